//! Slug lookup tables over normalized records.

use crate::models::{ArenaId, ContentId, ContentRecord, SiteModel};
use crate::normalize::NormalizedContent;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Indexed but not yet linked content
///
/// Linking consumes this value, so a model can only ever be linked once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedContent {
    pub(crate) model: SiteModel,
}

impl IndexedContent {
    /// The indices as built, with every aggregation list still empty
    pub fn model(&self) -> &SiteModel {
        &self.model
    }
}

/// Build the topic, project and content indices
///
/// Topics and projects keep source order; a repeated slug replaces the
/// earlier entry in place. Content is blog-then-notes, stably sorted by date
/// descending, with undated records last.
pub fn build_indices(content: NormalizedContent) -> IndexedContent {
    let mut model = SiteModel::default();

    for entry in content.topics {
        let slug = entry.slug.clone();
        upsert(&mut model.topics, &mut model.topic_index, slug, entry.into());
    }

    for entry in content.projects {
        let slug = entry.slug.clone();
        upsert(&mut model.projects, &mut model.project_index, slug, entry.into());
    }

    let mut posts: Vec<ContentRecord> = content.blog.into_iter().chain(content.notes).collect();
    posts.sort_by_cached_key(|record| Reverse(record.timestamp_millis()));

    for (position, record) in posts.iter().enumerate() {
        if let Some(previous) = model
            .content_index
            .insert(record.slug.clone(), ContentId::from_index(position))
        {
            tracing::debug!(
                "Content slug '{}' shadows an earlier {} record",
                record.slug,
                posts[previous.index()].content_type
            );
        }
    }
    model.posts = posts;

    tracing::debug!(
        "Indexed {} topics, {} projects, {} content records",
        model.topics.len(),
        model.projects.len(),
        model.posts.len()
    );

    IndexedContent { model }
}

fn upsert<T, I: ArenaId>(items: &mut Vec<T>, index: &mut HashMap<String, I>, slug: String, item: T) {
    match index.get(&slug) {
        Some(id) => {
            tracing::warn!("Duplicate slug: {}", slug);
            items[id.index()] = item;
        }
        None => {
            index.insert(slug, I::from_index(items.len()));
            items.push(item);
        }
    }
}
