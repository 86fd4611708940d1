use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stencil",
    about = "Generate service projects from a versioned template tree",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new service project
    New {
        /// Service name (prompted for when omitted)
        name: Option<String>,

        /// Parent directory for the generated project (default: current directory)
        #[arg(short, long)]
        parent: Option<String>,

        /// Template root (default: configured or platform data directory)
        #[arg(short, long)]
        templates: Option<String>,

        /// Render into a staging directory and move it into place when done
        #[arg(long)]
        staged: bool,

        /// Exit non-zero if any file fails
        #[arg(long)]
        strict: bool,

        /// Show what would be generated without writing anything
        #[arg(long)]
        dry_run: bool,

        /// With --dry-run, also print rendered file contents
        #[arg(short, long)]
        verbose: bool,

        /// Print the generation report (or dry-run plan) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a template root
    Check {
        /// Template root to check (default: configured or platform data directory)
        path: Option<String>,

        /// Print the check report as JSON
        #[arg(long)]
        json: bool,
    },
}
