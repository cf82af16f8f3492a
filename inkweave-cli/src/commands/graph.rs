//! Topic and project aggregation views.

use super::load_store;
use crate::agent;
use anyhow::{Context, Result};
use inkweave_core::{ProjectView, TopicView};
use std::path::Path;

pub async fn show_topic(config_path: &Path, slug: &str, json: bool) -> Result<()> {
    let store = load_store(config_path).await?;
    let model = store.model();
    let topic = model
        .topic(slug)
        .with_context(|| format!("Topic '{}' not found", slug))?;
    let view = TopicView::new(&model, topic);

    if json {
        let payload = agent::envelope(
            "topic.full",
            agent::TopicData {
                topic: view,
                items: model.topic_items(topic).collect(),
            },
        );
        return agent::print_json(&payload, true);
    }

    println!("{} ({})", view.title.as_deref().unwrap_or("(untitled)"), view.slug);
    println!("\nProjects ({}):", view.projects.len());
    for project in model.topic_projects(topic) {
        println!("  {} ({})", project.title().unwrap_or("(untitled)"), project.slug);
    }
    println!("\nPosts ({}):", view.posts.len());
    for key in &view.posts {
        println!("  {}", agent::key_label(key));
    }
    Ok(())
}

pub async fn show_project(config_path: &Path, slug: &str, json: bool) -> Result<()> {
    let store = load_store(config_path).await?;
    let model = store.model();
    let project = model
        .project(slug)
        .with_context(|| format!("Project '{}' not found", slug))?;
    let view = ProjectView::new(&model, project);

    if json {
        let payload = agent::envelope(
            "project.full",
            agent::ProjectData {
                project: view,
                items: model.project_posts(project).collect(),
            },
        );
        return agent::print_json(&payload, true);
    }

    println!("{} ({})", view.title.as_deref().unwrap_or("(untitled)"), view.slug);
    if let Some(topic) = view.topic.as_deref().and_then(|t| model.topic(t)) {
        println!("  topic: {} ({})", topic.title().unwrap_or("-"), topic.slug);
    }
    println!("\nPosts ({}):", view.posts.len());
    for key in &view.posts {
        println!("  {}", agent::key_label(key));
    }
    Ok(())
}
