//! Fetch a single content item with its resolved links.

use super::{load_store, print_record};
use crate::agent;
use anyhow::{Context, Result};
use inkweave_core::ContentType;
use std::path::Path;

pub async fn show_post(
    config_path: &Path,
    slug: &str,
    content_type: ContentType,
    json: bool,
) -> Result<()> {
    let store = load_store(config_path).await?;
    let post = store
        .get_post(slug, content_type)
        .with_context(|| format!("No {} named '{}'", content_type, slug))?;

    if json {
        return agent::print_json(&agent::envelope("content.item", &post), true);
    }

    print_record(&post);
    if let Some(project) = &post.project_data {
        println!("  project: {} ({})", project.title.as_deref().unwrap_or("-"), project.slug);
    }
    if let Some(topic) = &post.topic_data {
        println!("  topic: {} ({})", topic.title.as_deref().unwrap_or("-"), topic.slug);
    }
    if let Some(related) = post.related_posts.as_ref().filter(|r| !r.is_empty()) {
        println!("  related:");
        for item in related {
            println!(
                "    [{}] {} ({})",
                item.content_type,
                item.title.as_deref().unwrap_or("(untitled)"),
                item.slug
            );
        }
    }
    Ok(())
}
