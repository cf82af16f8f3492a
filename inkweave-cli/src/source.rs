//! Filesystem record source: reads markdown collections from the content directory.

use crate::config::Config;
use crate::frontmatter::{reading_time, split_frontmatter};
use async_trait::async_trait;
use inkweave_core::normalize::{BODY_KEY, FRONTMATTER_KEY};
use inkweave_core::{RawCollection, RawCollections, RawModule, RecordSource, SourceError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How deep each collection is scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    /// Only files directly inside the directory
    Flat,
    /// Files in any subdirectory
    Recursive,
}

/// Reads topics, projects, blog posts and notes from disk
pub struct DirectorySource {
    config: Config,
}

impl DirectorySource {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Read every collection synchronously
    pub fn read_all(&self) -> Result<RawCollections, SourceError> {
        let root = self.config.content_dir();
        if !root.is_dir() {
            return Err(SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("content directory {:?} does not exist", root),
            )));
        }

        Ok(RawCollections {
            topics: self.read_collection(&self.config.topics_dir(), Depth::Flat)?,
            projects: self.read_collection(&self.config.projects_dir(), Depth::Flat)?,
            blog: self.read_collection(&self.config.blog_dir(), Depth::Recursive)?,
            notes: self.read_collection(&self.config.notes_dir(), Depth::Recursive)?,
        })
    }

    fn read_collection(&self, dir: &Path, depth: Depth) -> Result<RawCollection, SourceError> {
        let mut collection = RawCollection::new();
        if !dir.is_dir() {
            tracing::debug!("Skipping missing collection directory {:?}", dir);
            return Ok(collection);
        }

        let mut walker = WalkDir::new(dir).min_depth(1);
        if depth == Depth::Flat {
            walker = walker.max_depth(1);
        }

        for entry in walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if !self.config.is_content_file(entry.path()) {
                continue;
            }
            let key = self.source_key(entry.path());
            let module = self.read_module(entry.path(), &key)?;
            collection.insert(key, module);
        }

        tracing::debug!("Read {} records from {:?}", collection.len(), dir);
        Ok(collection)
    }

    /// Source identifier: path relative to the content root, `/`-separated
    fn source_key(&self, path: &Path) -> String {
        let root = self.config.content_dir();
        let rel: PathBuf = path.strip_prefix(&root).unwrap_or(path).to_path_buf();
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn read_module(&self, path: &Path, key: &str) -> Result<RawModule, SourceError> {
        let content = fs::read_to_string(path)?;
        let mut fields = Map::new();

        match split_frontmatter(&content) {
            Ok((Some(mut frontmatter), body)) => {
                let minutes = reading_time(&body, self.config.words_per_minute);
                frontmatter
                    .entry("readTime")
                    .or_insert_with(|| Value::from(minutes));
                fields.insert(FRONTMATTER_KEY.to_string(), Value::Object(frontmatter));
                fields.insert(BODY_KEY.to_string(), Value::String(body));
            }
            Ok((None, body)) => {
                fields.insert(BODY_KEY.to_string(), Value::String(body));
            }
            Err(err) => {
                tracing::warn!("Ignoring frontmatter of {}: {}", key, err);
                fields.insert(BODY_KEY.to_string(), Value::String(content));
            }
        }

        Ok(RawModule::new(fields))
    }
}

#[async_trait]
impl RecordSource for DirectorySource {
    async fn fetch(&self) -> Result<RawCollections, SourceError> {
        let source = DirectorySource::new(self.config.clone());
        tokio::task::spawn_blocking(move || source.read_all())
            .await
            .map_err(|err| SourceError::Other(err.into()))?
    }
}
