//! # docsieve CLI
//!
//! Command-line interface for the docsieve page filtering engine.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsieve")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "docsieve.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new docsieve project
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Apply filter selections to the page model and report visibility
    Apply {
        /// Dropdown selections as name=value (repeatable)
        #[arg(long = "select", value_name = "NAME=VALUE")]
        selections: Vec<String>,

        /// Page URL (overrides the configured one; `?v=` preselects a version)
        #[arg(long)]
        url: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Inject tag badges into the page model and emit the result
    Annotate {
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = PageFormat::Yaml)]
        format: PageFormat,
    },

    /// List the filter tags recognized on the page, per dropdown
    Tags {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check the configuration against the page model and emit diagnostics
    Verify {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, ValueEnum)]
pub enum PageFormat {
    Yaml,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Apply {
            selections,
            url,
            json,
        } => {
            let opts = commands::ApplyOptions {
                selections,
                url,
                json,
            };
            commands::apply_filters(&cli.config, opts)
        }
        Commands::Annotate { output, format } => {
            commands::annotate_page(&cli.config, output.as_deref(), format)
        }
        Commands::Tags { json } => commands::list_tags(&cli.config, json),
        Commands::Verify { json } => commands::verify_setup(&cli.config, json),
    }
}
