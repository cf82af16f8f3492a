//! Shared types for inkweave
//!
//! This crate provides the identifiers and link payloads shared between the
//! content graph and its consumers (CLI, renderers).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a content item (posts and notes share one collection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Note,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Note => "note",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown content type: {0}")]
pub struct ParseTypeError(pub String);

impl FromStr for ContentType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blog" => Ok(ContentType::Blog),
            "note" => Ok(ContentType::Note),
            _ => Err(ParseTypeError(s.to_string())),
        }
    }
}

/// Type constraint of the filter view (`all` is the wildcard)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Blog,
    Note,
}

impl TypeFilter {
    pub fn matches(&self, content_type: ContentType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Blog => content_type == ContentType::Blog,
            TypeFilter::Note => content_type == ContentType::Note,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Blog => "blog",
            TypeFilter::Note => "note",
        }
    }
}

impl From<ContentType> for TypeFilter {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Blog => TypeFilter::Blog,
            ContentType::Note => TypeFilter::Note,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        ContentType::from_str(s).map(TypeFilter::from)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a content item within a loaded model
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentKey {
    pub slug: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

impl ContentKey {
    pub fn new(slug: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            slug: slug.into(),
            content_type,
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.content_type, self.slug)
    }
}

/// Backlink from a content item to its project or topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub title: Option<String>,
    pub slug: String,
}

/// Resolved entry of a content item's `related` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedRef {
    pub title: Option<String>,
    pub slug: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_conversion() {
        assert_eq!("blog".parse::<ContentType>(), Ok(ContentType::Blog));
        assert_eq!("NOTE".parse::<ContentType>(), Ok(ContentType::Note));
        assert!("project".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_type_filter() {
        assert_eq!("all".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert_eq!("note".parse::<TypeFilter>(), Ok(TypeFilter::Note));
        assert!(TypeFilter::All.matches(ContentType::Note));
        assert!(TypeFilter::Blog.matches(ContentType::Blog));
        assert!(!TypeFilter::Blog.matches(ContentType::Note));
    }

    #[test]
    fn test_content_key_display() {
        let key = ContentKey::new("hello", ContentType::Note);
        assert_eq!(key.to_string(), "note/hello");
    }
}
