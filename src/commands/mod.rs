//! Command implementations for the `nlab` binary.
//!
//! Each command takes a [`crate::NeurolabContext`] and writes results to
//! stdout and messages to stderr through [`crate::output`].

pub mod collect;
pub mod config;
pub mod delete;
pub mod diff;
pub mod list;
pub mod show;
