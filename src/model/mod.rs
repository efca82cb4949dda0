//! Data model shared by collectors, the differ and the manifest store.
//!
//! - [`DataSourceSpec`]: where and how to discover artifacts
//! - [`Artifact`]: one discovered file and its metadata
//! - [`Manifest`]: an ordered, immutable snapshot of artifacts
//!
//! All three serialize to the JSON document format used by the store. Every
//! timestamp carries an explicit UTC offset; naive timestamps are rejected on
//! decode (see [`timestamp`]).

pub mod artifact;
pub mod manifest;
pub mod source;
pub mod timestamp;

pub use artifact::{Artifact, ArtifactType};
pub use manifest::Manifest;
pub use source::{DataSourceSpec, SourceType};
