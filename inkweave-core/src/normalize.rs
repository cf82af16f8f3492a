//! Conversion of raw compiled modules into typed records.

use crate::models::{ContentRecord, EntryRecord, Metadata};
use crate::source::{RawCollection, RawCollections, RawModule};
use inkweave_types::ContentType;
use serde_json::{Map, Value};

/// Key under which the compiler exposes parsed frontmatter
pub const FRONTMATTER_KEY: &str = "frontmatter";

/// Key holding the rendered body, never part of metadata
pub const BODY_KEY: &str = "default";

/// Fields derived from the source path or by linking, never from metadata
const RESERVED_KEYS: [&str; 6] = [
    "slug",
    "path",
    "type",
    "projectData",
    "topicData",
    "relatedPosts",
];

/// Records of one load after normalization, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedContent {
    pub topics: Vec<EntryRecord>,
    pub projects: Vec<EntryRecord>,
    pub blog: Vec<ContentRecord>,
    pub notes: Vec<ContentRecord>,
}

/// Derive a slug from a source path: final segment, extension stripped
///
/// ```
/// use inkweave_core::normalize::slug_from_path;
///
/// assert_eq!(slug_from_path("/src/markdown/blog/2024/hello-world.md"), "hello-world");
/// assert_eq!(slug_from_path("notes/ideas.v2.md"), "ideas.v2");
/// assert_eq!(slug_from_path("README"), "README");
/// ```
pub fn slug_from_path(path: &str) -> String {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file.rfind('.') {
        Some(dot) if dot > 0 => file[..dot].to_string(),
        _ => file.to_string(),
    }
}

/// Extract the metadata of a module
///
/// A `frontmatter` object wins when present; otherwise the module itself,
/// minus its rendered body, is the attribute source.
pub fn metadata_of(path: &str, module: &RawModule) -> Metadata {
    let mut attrs: Map<String, Value> = match module.get(FRONTMATTER_KEY) {
        Some(Value::Object(frontmatter)) => frontmatter.clone(),
        _ => {
            let mut fields = module.fields().clone();
            fields.remove(BODY_KEY);
            fields
        }
    };

    for key in RESERVED_KEYS {
        if attrs.remove(key).is_some() {
            tracing::debug!("Ignoring metadata key '{}' on {}", key, path);
        }
    }

    serde_json::from_value(Value::Object(attrs)).unwrap_or_else(|err| {
        tracing::warn!("Unreadable metadata on {}: {}", path, err);
        Metadata::default()
    })
}

pub fn normalize_content(path: &str, module: &RawModule, content_type: ContentType) -> ContentRecord {
    ContentRecord::new(
        slug_from_path(path),
        content_type,
        path,
        metadata_of(path, module),
    )
}

pub fn normalize_entry(path: &str, module: &RawModule) -> EntryRecord {
    EntryRecord {
        slug: slug_from_path(path),
        path: path.to_string(),
        meta: metadata_of(path, module),
    }
}

/// Normalize every collection of a load
pub fn normalize_collections(raw: &RawCollections) -> NormalizedContent {
    let entries = |collection: &RawCollection| -> Vec<EntryRecord> {
        collection
            .iter()
            .map(|(path, module)| normalize_entry(path, module))
            .collect()
    };
    let contents = |collection: &RawCollection, content_type| -> Vec<ContentRecord> {
        collection
            .iter()
            .map(|(path, module)| normalize_content(path, module, content_type))
            .collect()
    };

    NormalizedContent {
        topics: entries(&raw.topics),
        projects: entries(&raw.projects),
        blog: contents(&raw.blog, ContentType::Blog),
        notes: contents(&raw.notes, ContentType::Note),
    }
}
