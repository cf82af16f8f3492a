//! Content model structs for posts, notes, projects, topics and the linked site model.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use inkweave_types::{ContentKey, ContentType, LinkRef, RelatedRef};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Metadata attributes attached to a record by the content compiler
///
/// Known fields are decoded leniently: a value of the wrong shape is treated
/// as absent. Everything else is carried through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "lenient::string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Publication date, see [`parse_timestamp`] for the accepted formats
    #[serde(default, deserialize_with = "lenient::string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Slugs of related content, in author order. Only a list is honoured.
    #[serde(default, deserialize_with = "lenient::list")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<String>>,

    /// Estimated reading time in minutes
    #[serde(rename = "readTime")]
    #[serde(default, deserialize_with = "lenient::minutes")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A single post or note
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    /// URL slug, derived from the source file name
    pub slug: String,

    #[serde(rename = "type")]
    pub content_type: ContentType,

    /// Source identifier the record was compiled from
    pub path: String,

    #[serde(flatten)]
    pub meta: Metadata,

    #[serde(rename = "projectData", skip_serializing_if = "Option::is_none")]
    pub project_data: Option<LinkRef>,

    #[serde(rename = "topicData", skip_serializing_if = "Option::is_none")]
    pub topic_data: Option<LinkRef>,

    #[serde(rename = "relatedPosts", skip_serializing_if = "Option::is_none")]
    pub related_posts: Option<Vec<RelatedRef>>,
}

impl ContentRecord {
    pub fn new(
        slug: impl Into<String>,
        content_type: ContentType,
        path: impl Into<String>,
        meta: Metadata,
    ) -> Self {
        Self {
            slug: slug.into(),
            content_type,
            path: path.into(),
            meta,
            project_data: None,
            topic_data: None,
            related_posts: None,
        }
    }

    pub fn key(&self) -> ContentKey {
        ContentKey::new(self.slug.clone(), self.content_type)
    }

    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        self.meta.tags.as_deref().unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    /// Publication time in milliseconds since the epoch
    ///
    /// Missing or unparseable dates count as the epoch itself, so undated
    /// records sort after dated ones.
    pub fn timestamp_millis(&self) -> i64 {
        let Some(raw) = self.meta.date.as_deref() else {
            return 0;
        };
        parse_timestamp(raw).unwrap_or_else(|| {
            tracing::debug!("Unparseable date '{}' on {}", raw, self.key());
            0
        })
    }
}

/// A topic or project record before it joins the graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRecord {
    pub slug: String,
    pub path: String,
    #[serde(flatten)]
    pub meta: Metadata,
}

/// Position of a content record in the site model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicId(pub(crate) usize);

/// Handle into one of the model's arenas
pub(crate) trait ArenaId: Copy {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! arena_id {
    ($($name:ident),*) => {
        $(
            impl ArenaId for $name {
                fn from_index(index: usize) -> Self {
                    $name(index)
                }

                fn index(self) -> usize {
                    self.0
                }
            }
        )*
    };
}

arena_id!(ContentId, ProjectId, TopicId);

/// A body of work referenced by posts and notes
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub slug: String,
    pub path: String,
    pub meta: Metadata,
    /// Content referencing this project, in ingestion order
    pub posts: Vec<ContentId>,
}

impl Project {
    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.meta.topic.as_deref()
    }
}

impl From<EntryRecord> for Project {
    fn from(entry: EntryRecord) -> Self {
        Self {
            slug: entry.slug,
            path: entry.path,
            meta: entry.meta,
            posts: Vec::new(),
        }
    }
}

/// A thematic grouping of projects and content
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub slug: String,
    pub path: String,
    pub meta: Metadata,
    pub projects: Vec<ProjectId>,
    pub posts: Vec<ContentId>,
    /// Currently populated in lockstep with `posts`
    pub all_items: Vec<ContentId>,
}

impl Topic {
    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }
}

impl From<EntryRecord> for Topic {
    fn from(entry: EntryRecord) -> Self {
        Self {
            slug: entry.slug,
            path: entry.path,
            meta: entry.meta,
            projects: Vec::new(),
            posts: Vec::new(),
            all_items: Vec::new(),
        }
    }
}

/// The cross-linked content graph
///
/// Content, projects and topics each live in a single arena. Every
/// cross-reference is a handle into these arenas, so a record reached through
/// a topic is the same record reached through the flat list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteModel {
    pub(crate) posts: Vec<ContentRecord>,
    pub(crate) content_index: HashMap<String, ContentId>,
    pub(crate) projects: Vec<Project>,
    pub(crate) project_index: HashMap<String, ProjectId>,
    pub(crate) topics: Vec<Topic>,
    pub(crate) topic_index: HashMap<String, TopicId>,
}

impl SiteModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// All content, newest first
    pub fn posts(&self) -> &[ContentRecord] {
        &self.posts
    }

    /// True until at least one content record has been loaded
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn record(&self, id: ContentId) -> &ContentRecord {
        &self.posts[id.index()]
    }

    /// Look up content through the merged slug index (not type-scoped)
    pub fn find_content(&self, slug: &str) -> Option<&ContentRecord> {
        self.content_index.get(slug).map(|id| self.record(*id))
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.project_index
            .get(slug)
            .map(|id| &self.projects[id.index()])
    }

    pub fn topic(&self, slug: &str) -> Option<&Topic> {
        self.topic_index.get(slug).map(|id| &self.topics[id.index()])
    }

    pub fn project_posts<'a>(
        &'a self,
        project: &'a Project,
    ) -> impl Iterator<Item = &'a ContentRecord> + 'a {
        project.posts.iter().map(move |id| self.record(*id))
    }

    pub fn topic_posts<'a>(
        &'a self,
        topic: &'a Topic,
    ) -> impl Iterator<Item = &'a ContentRecord> + 'a {
        topic.posts.iter().map(move |id| self.record(*id))
    }

    pub fn topic_items<'a>(
        &'a self,
        topic: &'a Topic,
    ) -> impl Iterator<Item = &'a ContentRecord> + 'a {
        topic.all_items.iter().map(move |id| self.record(*id))
    }

    pub fn topic_projects<'a>(
        &'a self,
        topic: &'a Topic,
    ) -> impl Iterator<Item = &'a Project> + 'a {
        topic.projects.iter().map(move |id| &self.projects[id.index()])
    }
}

/// Parse a record date into milliseconds since the epoch
///
/// Accepted forms:
/// - RFC 3339 (`2024-01-15T09:30:00Z`) and RFC 2822 (`Mon, 15 Jan 2024 09:30:00 +0000`)
/// - `YYYY-MM-DD` with an optional ` HH:MM[:SS]` or `THH:MM[:SS]` time
/// - `YYYY/MM/DD` and US-style `MM/DD/YYYY`
/// - month names: `January 5, 2024`, `Jan 5 2024`
///
/// Naive values are read as UTC. Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.timestamp_millis());
    }

    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%B %d %Y"]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

mod lenient {
    use super::*;

    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(scalar(&value))
    }

    /// Lists of scalars; a lone scalar counts as a one-element list
    pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match &value {
            Value::Array(items) => {
                let mut out: Vec<String> = Vec::with_capacity(items.len());
                for item in items.iter().filter_map(scalar) {
                    if !out.contains(&item) {
                        out.push(item);
                    }
                }
                Some(out)
            }
            other => scalar(other).map(|s| vec![s]),
        })
    }

    /// Lists of scalars kept as written, duplicates included; anything else is absent
    pub fn list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match &value {
            Value::Array(items) => Some(items.iter().filter_map(scalar).collect()),
            _ => None,
        })
    }

    pub fn minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_u64().and_then(|m| u32::try_from(m).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: Value) -> Metadata {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_metadata_known_fields() {
        let m = meta(json!({
            "title": "Intro to Rust",
            "tags": ["rust", "intro"],
            "date": "2024-01-01",
            "project": "compiler",
            "related": ["a", "b"],
            "readTime": 4,
        }));
        assert_eq!(m.title.as_deref(), Some("Intro to Rust"));
        assert_eq!(m.tags, Some(vec!["rust".into(), "intro".into()]));
        assert_eq!(m.project.as_deref(), Some("compiler"));
        assert_eq!(m.topic, None);
        assert_eq!(m.related, Some(vec!["a".into(), "b".into()]));
        assert_eq!(m.read_time, Some(4));
        assert!(m.extra.is_empty());
    }

    #[test]
    fn test_metadata_passes_unknown_fields_through() {
        let m = meta(json!({ "title": "T", "cover": "hero.png", "draft": true }));
        assert_eq!(m.extra.get("cover"), Some(&json!("hero.png")));
        assert_eq!(m.extra.get("draft"), Some(&json!(true)));
    }

    #[test]
    fn test_metadata_tolerates_malformed_fields() {
        let m = meta(json!({
            "title": { "nested": true },
            "tags": "solo",
            "related": 7,
            "readTime": "soon",
            "date": null,
        }));
        assert_eq!(m.title, None);
        assert_eq!(m.tags, Some(vec!["solo".into()]));
        assert_eq!(m.related, None);
        assert_eq!(m.read_time, None);
        assert_eq!(m.date, None);
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let m = meta(json!({ "tags": ["a", "b", "a"] }));
        assert_eq!(m.tags, Some(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_related_keeps_repeats() {
        let m = meta(json!({ "related": ["b", "a", "b"] }));
        assert_eq!(m.related, Some(vec!["b".into(), "a".into(), "b".into()]));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp("1970-01-01T00:00:01Z"), Some(1_000));
        assert_eq!(parse_timestamp("1970-01-01 00:01"), Some(60_000));
        assert_eq!(parse_timestamp("1970-01-01T01:00:00+01:00"), Some(0));
        assert_eq!(parse_timestamp("1970/01/02"), Some(86_400_000));
        assert_eq!(parse_timestamp("01/02/1970"), Some(86_400_000));
        assert_eq!(parse_timestamp("January 2, 1970"), Some(86_400_000));
        assert_eq!(parse_timestamp("Jan 2 1970"), Some(86_400_000));
        assert_eq!(parse_timestamp("Fri, 02 Jan 1970 00:00:00 +0000"), Some(86_400_000));
        assert_eq!(parse_timestamp("next tuesday"), None);
    }

    #[test]
    fn test_undated_record_sorts_as_epoch() {
        let undated = ContentRecord::new("a", ContentType::Blog, "blog/a.md", Metadata::default());
        assert_eq!(undated.timestamp_millis(), 0);

        let garbled = ContentRecord::new(
            "b",
            ContentType::Note,
            "notes/b.md",
            meta(json!({ "date": "garbage" })),
        );
        assert_eq!(garbled.timestamp_millis(), 0);
    }

    #[test]
    fn test_record_serializes_flat() {
        let mut record = ContentRecord::new(
            "intro",
            ContentType::Blog,
            "blog/intro.md",
            meta(json!({ "title": "Intro", "cover": "x.png" })),
        );
        record.topic_data = Some(LinkRef {
            title: Some("Systems".into()),
            slug: "systems".into(),
        });

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["slug"], "intro");
        assert_eq!(value["type"], "blog");
        assert_eq!(value["title"], "Intro");
        assert_eq!(value["cover"], "x.png");
        assert_eq!(value["topicData"]["slug"], "systems");
        assert!(value.get("projectData").is_none());
        assert!(value.get("relatedPosts").is_none());
    }
}
