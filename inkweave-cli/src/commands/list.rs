//! Filtered listing and tag universe.

use super::{load_store, print_record};
use crate::agent;
use anyhow::Result;
use inkweave_core::TypeFilter;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub content_type: TypeFilter,
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub limit: Option<usize>,
    pub json: bool,
}

/// List content matching the given filters, newest first
pub async fn list_posts(config_path: &Path, opts: ListOptions) -> Result<()> {
    let store = load_store(config_path).await?;

    store.set_active_type(opts.content_type);
    if let Some(search) = opts.search {
        store.set_search_query(search);
    }
    for tag in &opts.tags {
        if !store.selected_tags().contains(tag) {
            store.toggle_tag(tag);
        }
    }

    let model = store.model();
    let criteria = store.criteria();
    let posts = inkweave_core::filtered_posts(&model, &criteria);
    let total = posts.len();
    let shown: Vec<_> = posts.into_iter().take(opts.limit.unwrap_or(usize::MAX)).collect();

    if opts.json {
        let payload = agent::envelope(
            "content.list",
            agent::ListData {
                criteria: &criteria,
                total,
                posts: shown,
            },
        );
        return agent::print_json(&payload, true);
    }

    if total == 0 {
        println!("No content matches the current filters");
        return Ok(());
    }

    for record in &shown {
        print_record(record);
    }
    if total > shown.len() {
        println!("\n  ... and {} more", total - shown.len());
    }

    Ok(())
}

/// Print every tag in use, sorted
pub async fn list_tags(config_path: &Path, json: bool) -> Result<()> {
    let store = load_store(config_path).await?;
    let tags = store.all_tags();

    if json {
        let payload = agent::envelope("content.tags", agent::TagsData { tags });
        return agent::print_json(&payload, true);
    }

    for tag in tags {
        println!("{tag}");
    }
    Ok(())
}
