//! Frontmatter splitting for markdown sources.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Frontmatter must be a mapping")]
    NotAMapping,
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();
static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)^---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n(.*))?$")
            .expect("frontmatter pattern is valid")
    })
}

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(r"\w+").expect("word pattern is valid"))
}

/// Split markdown into its frontmatter mapping and body
///
/// Returns `None` for the mapping when the file has no frontmatter block.
///
/// # Example
///
/// ```
/// use inkweave_cli::frontmatter::split_frontmatter;
///
/// let content = "---\ntitle: My Post\ndate: 2025-01-01\n---\n# Hello World\n";
///
/// let (fm, body) = split_frontmatter(content).unwrap();
/// let fm = fm.unwrap();
/// assert_eq!(fm["title"], "My Post");
/// assert_eq!(fm["date"], "2025-01-01");
/// assert!(body.trim().starts_with("# Hello World"));
/// ```
pub fn split_frontmatter(
    content: &str,
) -> Result<(Option<Map<String, Value>>, String), FrontmatterError> {
    let Some(captures) = frontmatter_regex().captures(content) else {
        return Ok((None, content.to_string()));
    };

    let yaml = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    if yaml.trim().is_empty() {
        return Ok((Some(Map::new()), body.to_string()));
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Object(map) => Ok((Some(map), body.to_string())),
        Value::Null => Ok((Some(Map::new()), body.to_string())),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Minutes needed to read `body`, never less than one
pub fn reading_time(body: &str, words_per_minute: u32) -> u32 {
    let words = word_regex().find_iter(body).count() as u32;
    words.div_ceil(words_per_minute.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_valid_frontmatter() {
        let content = r#"---
title: Test Post
date: 2025-01-01
tags:
  - rust
  - programming
related: [a, b]
---

# Hello World

This is the content."#;

        let (fm, body) = split_frontmatter(content).unwrap();
        let fm = fm.unwrap();
        assert_eq!(fm["title"], "Test Post");
        assert_eq!(fm["date"], "2025-01-01");
        assert_eq!(fm["tags"], serde_json::json!(["rust", "programming"]));
        assert_eq!(fm["related"], serde_json::json!(["a", "b"]));
        assert!(body.contains("# Hello World"));
        assert!(body.contains("This is the content."));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just Content\n\nNo frontmatter here.";
        let (fm, body) = split_frontmatter(content).unwrap();
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter_and_body() {
        let (fm, body) = split_frontmatter("---\n\n---").unwrap();
        assert_eq!(fm, Some(Map::new()));
        assert_eq!(body, "");
    }

    #[test]
    fn test_invalid_yaml() {
        let content = "---\ntitle: Test\ninvalid yaml: [unclosed\n---\n\nContent.";
        assert!(matches!(
            split_frontmatter(content),
            Err(FrontmatterError::YamlError(_))
        ));
    }

    #[test]
    fn test_scalar_frontmatter_rejected() {
        let content = "---\njust a string\n---\nbody";
        assert!(matches!(
            split_frontmatter(content),
            Err(FrontmatterError::NotAMapping)
        ));
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time("", 200), 1);
        assert_eq!(reading_time("one two three", 200), 1);
        let long = "word ".repeat(401);
        assert_eq!(reading_time(&long, 200), 3);
        assert_eq!(reading_time(&long, 0), 401);
    }
}
