//! # inkweave CLI
//!
//! Command-line interface for querying the inkweave content graph.

mod agent;
mod commands;

use clap::{Parser, Subcommand};
use inkweave_core::{ContentType, TypeFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkweave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "inkweave.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts and notes, newest first
    List {
        /// Content type to show (all, blog, note)
        #[arg(long = "type", default_value = "all")]
        content_type: TypeFilter,

        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,

        /// Required tags (repeat or comma separate)
        #[arg(long = "tag", value_delimiter = ',')]
        tags: Vec<String>,

        /// Maximum items to print
        #[arg(long)]
        limit: Option<usize>,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Print every tag in use
    Tags {
        #[arg(long)]
        json: bool,
    },

    /// Show a single post or note with its links
    Show {
        /// Content slug (file name without extension)
        slug: String,

        /// Content type of the item
        #[arg(long = "type", default_value = "blog")]
        content_type: ContentType,

        #[arg(long)]
        json: bool,
    },

    /// Show a topic with its projects and posts
    Topic {
        slug: String,

        #[arg(long)]
        json: bool,
    },

    /// Show a project with its posts
    Project {
        slug: String,

        #[arg(long)]
        json: bool,
    },

    /// Export the linked content model as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::List {
            content_type,
            search,
            tags,
            limit,
            json,
        } => {
            let opts = commands::ListOptions {
                content_type,
                search,
                tags,
                limit,
                json,
            };
            commands::list_posts(&cli.config, opts).await
        }
        Commands::Tags { json } => commands::list_tags(&cli.config, json).await,
        Commands::Show {
            slug,
            content_type,
            json,
        } => commands::show_post(&cli.config, &slug, content_type, json).await,
        Commands::Topic { slug, json } => commands::show_topic(&cli.config, &slug, json).await,
        Commands::Project { slug, json } => commands::show_project(&cli.config, &slug, json).await,
        Commands::Export { output, pretty } => {
            commands::export_model(&cli.config, output.as_deref(), pretty).await
        }
    }
}
