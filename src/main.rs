use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use neurolab::cli::{Cli, Commands};
use neurolab::commands::collect::CollectOptions;
use neurolab::output::{self, Verbosity};
use neurolab::{NeurolabContext, commands};
use std::io;
use std::process;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    if let Err(e) = run() {
        output::error(&format!("Error: {e:#}"));
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    output::set_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));
    init_logging(cli.verbose);

    if let Commands::Completion { shell } = cli.command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let mut ctx = NeurolabContext::new()?;

    match cli.command {
        Commands::Collect {
            path,
            include,
            exclude,
            no_hash,
            no_recursive,
            no_save,
        } => {
            let opts = CollectOptions {
                include,
                exclude,
                no_hash,
                no_recursive,
                no_save,
            };
            commands::collect::execute(&ctx, &path, &opts)?;
        }
        Commands::List => commands::list::execute(&ctx)?,
        Commands::Show { id, json } => commands::show::execute(&ctx, &id, json)?,
        Commands::Delete { id } => commands::delete::execute(&ctx, &id)?,
        Commands::Clear { force } => {
            commands::delete::clear(&ctx, force)?;
        }
        Commands::Diff { old, new, detailed } => {
            commands::diff::execute(&ctx, &old, &new, detailed)?;
        }
        Commands::Config { key, value, list } => {
            commands::config::execute(&mut ctx, key.as_deref(), value.as_deref(), list)?;
        }
        Commands::Completion { .. } => {}
    }

    Ok(())
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "error" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("neurolab={level}")));

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .compact();

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
