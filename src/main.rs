mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    match Cli::parse().command {
        Commands::New {
            name,
            parent,
            templates,
            staged,
            strict,
            dry_run,
            verbose,
            json,
        } => commands::new::run(
            name, parent, templates, staged, strict, dry_run, verbose, json,
        ),
        Commands::Check { path, json } => commands::check::run(path, json),
    }
}
