//! Raw record acquisition boundary.
//!
//! The content compiler hands over four collections of raw modules keyed by
//! source path. How they are produced (bundler, filesystem walk, fixtures) is
//! up to the [`RecordSource`] implementation.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record {path}: {message}")]
    InvalidRecord { path: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A compiled content module of arbitrary shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawModule(Map<String, Value>);

impl RawModule {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value; anything other than an object yields an empty module
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawModule {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Source path to raw module
pub type RawCollection = BTreeMap<String, RawModule>;

/// Everything a load needs, grouped by record kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCollections {
    pub topics: RawCollection,
    pub projects: RawCollection,
    pub blog: RawCollection,
    pub notes: RawCollection,
}

impl RawCollections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.topics.len() + self.projects.len() + self.blog.len() + self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Asynchronous supplier of raw content records
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self) -> Result<RawCollections, SourceError>;
}

/// Serves a fixed, already materialized set of collections
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    collections: RawCollections,
}

impl StaticSource {
    pub fn new(collections: RawCollections) -> Self {
        Self { collections }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch(&self) -> Result<RawCollections, SourceError> {
        Ok(self.collections.clone())
    }
}
