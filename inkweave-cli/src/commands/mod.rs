//! CLI command implementations.

pub mod export;
pub mod graph;
pub mod list;
pub mod show;

pub use export::export_model;
pub use graph::{show_project, show_topic};
pub use list::{list_posts, list_tags, ListOptions};
pub use show::show_post;

use anyhow::{Context, Result};
use inkweave_cli::{Config, DirectorySource};
use inkweave_core::{ContentRecord, ContentStore};
use std::path::Path;

/// Read the config file, or fall back to defaults when it does not exist.
pub fn load_config(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        tracing::debug!("No config at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }
    Config::from_file(config_path)
        .with_context(|| format!("Failed to load configuration {:?}", config_path))
}

/// Build the content store from the directories named in `config`.
pub async fn load_content(config: Config) -> Result<ContentStore> {
    let store = ContentStore::new();
    store
        .load(&DirectorySource::new(config))
        .await
        .context("Failed to load content")?;
    Ok(store)
}

/// Load configuration and build the content store from disk.
pub async fn load_store(config_path: &Path) -> Result<ContentStore> {
    load_content(load_config(config_path)?).await
}

/// Print a content record as a short text block.
pub(crate) fn print_record(record: &ContentRecord) {
    // [blog] Intro to Parsing
    //   intro · 2024-01-01 · 4 min · rust, parsing

    println!(
        "[{}] {}",
        record.content_type,
        record.title().unwrap_or("(untitled)")
    );

    let mut details = vec![record.slug.clone()];
    if let Some(date) = &record.meta.date {
        details.push(date.clone());
    }
    if let Some(minutes) = record.meta.read_time {
        details.push(format!("{} min", minutes));
    }
    if !record.tags().is_empty() {
        details.push(record.tags().join(", "));
    }
    println!("  {}", details.join(" · "));
}
