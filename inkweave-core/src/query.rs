//! Read-only views over the linked model, driven by filter criteria.

use crate::models::{ContentRecord, Project, SiteModel, Topic};
use inkweave_types::{ContentKey, ContentType, TypeFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// User-driven filter state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against titles
    pub search_query: String,
    /// Tags an item must all carry, in selection order
    pub selected_tags: Vec<String>,
    pub active_type: TypeFilter,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the tag, or deselect it if already selected
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    /// Clear search text and tags. The active type is kept.
    pub fn reset(&mut self) {
        self.search_query.clear();
        self.selected_tags.clear();
    }

    pub fn matches(&self, record: &ContentRecord) -> bool {
        self.matches_with(record, &self.search_query.to_lowercase())
    }

    fn matches_with(&self, record: &ContentRecord, query_lower: &str) -> bool {
        if !self.active_type.matches(record.content_type) {
            return false;
        }

        let matches_search = query_lower.is_empty()
            || record
                .title()
                .is_some_and(|title| title.to_lowercase().contains(query_lower));

        let matches_tags = self.selected_tags.iter().all(|tag| record.has_tag(tag));

        matches_search && matches_tags
    }
}

/// Content passing the criteria, in model order
pub fn filtered_posts<'a>(model: &'a SiteModel, criteria: &FilterCriteria) -> Vec<&'a ContentRecord> {
    let query_lower = criteria.search_query.to_lowercase();
    model
        .posts()
        .iter()
        .filter(|record| criteria.matches_with(record, &query_lower))
        .collect()
}

/// Every tag used by any content, deduplicated and sorted
pub fn all_tags(model: &SiteModel) -> Vec<String> {
    model
        .posts()
        .iter()
        .flat_map(|record| record.tags().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First content item with the given slug and type
pub fn get_item<'a>(
    model: &'a SiteModel,
    slug: &str,
    content_type: ContentType,
) -> Option<&'a ContentRecord> {
    model
        .posts()
        .iter()
        .find(|record| record.slug == slug && record.content_type == content_type)
}

/// Serializable view of a project with resolved membership
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub slug: String,
    pub title: Option<String>,
    pub topic: Option<String>,
    pub path: String,
    pub posts: Vec<ContentKey>,
}

impl ProjectView {
    pub fn new(model: &SiteModel, project: &Project) -> Self {
        Self {
            slug: project.slug.clone(),
            title: project.meta.title.clone(),
            topic: project.meta.topic.clone(),
            path: project.path.clone(),
            posts: model.project_posts(project).map(ContentRecord::key).collect(),
        }
    }
}

/// Serializable view of a topic with resolved membership
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicView {
    pub slug: String,
    pub title: Option<String>,
    pub path: String,
    pub projects: Vec<String>,
    pub posts: Vec<ContentKey>,
    #[serde(rename = "allItems")]
    pub all_items: Vec<ContentKey>,
}

impl TopicView {
    pub fn new(model: &SiteModel, topic: &Topic) -> Self {
        Self {
            slug: topic.slug.clone(),
            title: topic.meta.title.clone(),
            path: topic.path.clone(),
            projects: model
                .topic_projects(topic)
                .map(|p| p.slug.clone())
                .collect(),
            posts: model.topic_posts(topic).map(ContentRecord::key).collect(),
            all_items: model.topic_items(topic).map(ContentRecord::key).collect(),
        }
    }
}

/// The whole model as handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelExport<'a> {
    pub posts: &'a [ContentRecord],
    pub projects: Vec<ProjectView>,
    pub topics: Vec<TopicView>,
    pub tags: Vec<String>,
}

impl<'a> ModelExport<'a> {
    pub fn new(model: &'a SiteModel) -> Self {
        Self {
            posts: model.posts(),
            projects: model
                .projects()
                .iter()
                .map(|p| ProjectView::new(model, p))
                .collect(),
            topics: model
                .topics()
                .iter()
                .map(|t| TopicView::new(model, t))
                .collect(),
            tags: all_tags(model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_indices;
    use crate::link::link;
    use crate::models::Metadata;
    use crate::normalize::NormalizedContent;

    fn record(slug: &str, content_type: ContentType, title: Option<&str>, tags: &[&str]) -> ContentRecord {
        let meta = Metadata {
            title: title.map(str::to_string),
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.iter().map(|t| t.to_string()).collect())
            },
            ..Metadata::default()
        };
        ContentRecord::new(slug, content_type, format!("{slug}.md"), meta)
    }

    fn model() -> SiteModel {
        link(build_indices(NormalizedContent {
            blog: vec![
                record("intro-rust", ContentType::Blog, Some("Intro to Rust"), &["rust", "beginner"]),
                record("intro-go", ContentType::Blog, Some("An INTRO to Go"), &["go"]),
                record("deep-rust", ContentType::Blog, Some("Deep Rust"), &["rust"]),
                record("untitled", ContentType::Blog, None, &["rust"]),
            ],
            notes: vec![record("intro-note", ContentType::Note, Some("Intro notes"), &["rust"])],
            ..NormalizedContent::default()
        }))
    }

    fn slugs(records: Vec<&ContentRecord>) -> Vec<&str> {
        records.into_iter().map(|r| r.slug.as_str()).collect()
    }

    #[test]
    fn test_unconstrained_criteria_return_everything() {
        let model = model();
        assert_eq!(filtered_posts(&model, &FilterCriteria::new()).len(), 5);
    }

    #[test]
    fn test_combined_filter() {
        let model = model();
        let criteria = FilterCriteria {
            search_query: "intro".into(),
            selected_tags: vec!["rust".into()],
            active_type: TypeFilter::Blog,
        };
        assert_eq!(slugs(filtered_posts(&model, &criteria)), vec!["intro-rust"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_skips_untitled() {
        let model = model();
        let criteria = FilterCriteria {
            search_query: "InTrO".into(),
            ..FilterCriteria::default()
        };
        assert_eq!(
            slugs(filtered_posts(&model, &criteria)),
            vec!["intro-rust", "intro-go", "intro-note"]
        );
    }

    #[test]
    fn test_tags_must_all_match() {
        let model = model();
        let criteria = FilterCriteria {
            selected_tags: vec!["rust".into(), "beginner".into()],
            ..FilterCriteria::default()
        };
        assert_eq!(slugs(filtered_posts(&model, &criteria)), vec!["intro-rust"]);
    }

    #[test]
    fn test_type_filter() {
        let model = model();
        let criteria = FilterCriteria {
            active_type: TypeFilter::Note,
            ..FilterCriteria::default()
        };
        assert_eq!(slugs(filtered_posts(&model, &criteria)), vec!["intro-note"]);
    }

    #[test]
    fn test_untagged_item_fails_tag_filter() {
        let model = link(build_indices(NormalizedContent {
            notes: vec![record("bare", ContentType::Note, Some("Bare"), &[])],
            ..NormalizedContent::default()
        }));
        let mut criteria = FilterCriteria::new();
        assert_eq!(filtered_posts(&model, &criteria).len(), 1);
        criteria.toggle_tag("any");
        assert!(filtered_posts(&model, &criteria).is_empty());
    }

    #[test]
    fn test_matches_single_record() {
        let rust = record("r", ContentType::Blog, Some("Intro to Rust"), &["rust"]);
        let criteria = FilterCriteria {
            search_query: "RUST".into(),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&rust));

        let notes_only = FilterCriteria {
            active_type: TypeFilter::Note,
            ..criteria
        };
        assert!(!notes_only.matches(&rust));
    }

    #[test]
    fn test_all_tags_sorted_and_deduplicated() {
        let model = link(build_indices(NormalizedContent {
            blog: vec![
                record("one", ContentType::Blog, None, &["b", "a"]),
                record("two", ContentType::Blog, None, &["c", "b"]),
                record("three", ContentType::Blog, None, &[]),
            ],
            ..NormalizedContent::default()
        }));
        insta::assert_snapshot!(all_tags(&model).join(","), @"a,b,c");
    }

    #[test]
    fn test_get_item() {
        let model = model();
        assert_eq!(
            get_item(&model, "intro-note", ContentType::Note).map(|r| r.slug.as_str()),
            Some("intro-note")
        );
        assert!(get_item(&model, "intro-note", ContentType::Blog).is_none());
        assert!(get_item(&model, "missing-slug", ContentType::Blog).is_none());
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut criteria = FilterCriteria {
            active_type: TypeFilter::Blog,
            ..FilterCriteria::default()
        };
        criteria.toggle_tag("rust");
        criteria.toggle_tag("go");
        criteria.toggle_tag("rust");
        assert_eq!(criteria.selected_tags, vec!["go".to_string()]);

        criteria.search_query = "x".into();
        criteria.reset();
        assert!(criteria.search_query.is_empty());
        assert!(criteria.selected_tags.is_empty());
        assert_eq!(criteria.active_type, TypeFilter::Blog);
    }

    #[test]
    fn test_views_do_not_mutate_model() {
        let model = model();
        let before = model.clone();
        let criteria = FilterCriteria {
            search_query: "rust".into(),
            ..FilterCriteria::default()
        };
        let _ = filtered_posts(&model, &criteria);
        let _ = all_tags(&model);
        let _ = ModelExport::new(&model);
        assert_eq!(model, before);
    }
}
