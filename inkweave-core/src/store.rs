//! Load coordination and the shared content store.
//!
//! [`ContentStore`] owns the linked [`SiteModel`] and the filter criteria.
//! Consumers receive it by reference (usually behind an `Arc`) instead of
//! reaching for process-wide state, so every test can build a fresh one.

use crate::index::build_indices;
use crate::link::link;
use crate::models::{ContentRecord, SiteModel};
use crate::normalize::normalize_collections;
use crate::query::{self, FilterCriteria};
use crate::source::{RecordSource, SourceError};
use inkweave_types::{ContentType, TypeFilter};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{watch, Mutex};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load content: {0}")]
    Source(#[from] SourceError),
}

/// Observable load status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadState {
    pub loading: bool,
    pub error: Option<String>,
    /// Bumped whenever the model or the filter criteria change
    pub generation: u64,
}

/// Owner of the content graph and its filter state
pub struct ContentStore {
    model: RwLock<Arc<SiteModel>>,
    criteria: RwLock<FilterCriteria>,
    state: watch::Sender<LoadState>,
    /// Held across the whole load, including the fetch await
    load_gate: Mutex<()>,
    link_passes: AtomicU64,
}

impl ContentStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self {
            model: RwLock::new(Arc::new(SiteModel::default())),
            criteria: RwLock::new(FilterCriteria::default()),
            state,
            load_gate: Mutex::new(()),
            link_passes: AtomicU64::new(0),
        }
    }

    /// Build the model from `source` unless content is already loaded
    ///
    /// Concurrent callers are serialized: the first one fetches and links,
    /// the rest wait for it and then return without doing any work. On
    /// failure the error message is recorded and the previous model is kept.
    pub async fn load(&self, source: &dyn RecordSource) -> Result<(), LoadError> {
        let _gate = self.load_gate.lock().await;

        let loaded = !self.model.read().is_empty();
        if loaded {
            tracing::debug!("Content already loaded, skipping");
            return Ok(());
        }

        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        let _loading = LoadingFlag(&self.state);

        match self.build(source).await {
            Ok(model) => {
                *self.model.write() = Arc::new(model);
                self.state.send_modify(|state| state.generation += 1);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to load content: {}", err);
                self.state
                    .send_modify(|state| state.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    async fn build(&self, source: &dyn RecordSource) -> Result<SiteModel, LoadError> {
        let raw = source.fetch().await?;
        tracing::info!("Fetched {} raw records", raw.len());

        let normalized = normalize_collections(&raw);
        let model = link(build_indices(normalized));
        self.link_passes.fetch_add(1, Ordering::SeqCst);

        tracing::info!(
            "Built content graph with {} items, {} projects, {} topics",
            model.posts().len(),
            model.projects().len(),
            model.topics().len()
        );
        Ok(model)
    }

    /// Discard the model and any recorded error so a fresh load can run
    pub async fn reset(&self) {
        let _gate = self.load_gate.lock().await;
        *self.model.write() = Arc::new(SiteModel::default());
        self.state.send_modify(|state| {
            state.error = None;
            state.generation += 1;
        });
    }

    /// Snapshot of the current model
    pub fn model(&self) -> Arc<SiteModel> {
        self.model.read().clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Watch load status and change notifications
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Number of linking passes completed over the store's lifetime
    pub fn link_passes(&self) -> u64 {
        self.link_passes.load(Ordering::SeqCst)
    }

    pub fn get_post(&self, slug: &str, content_type: ContentType) -> Option<ContentRecord> {
        query::get_item(&self.model(), slug, content_type).cloned()
    }

    pub fn filtered_posts(&self) -> Vec<ContentRecord> {
        let model = self.model();
        let criteria = self.criteria();
        query::filtered_posts(&model, &criteria)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn all_tags(&self) -> Vec<String> {
        query::all_tags(&self.model())
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.read().clone()
    }

    pub fn selected_tags(&self) -> Vec<String> {
        self.criteria.read().selected_tags.clone()
    }

    pub fn toggle_tag(&self, tag: &str) {
        self.update_criteria(|criteria| criteria.toggle_tag(tag));
    }

    pub fn reset_filters(&self) {
        self.update_criteria(FilterCriteria::reset);
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update_criteria(|criteria| criteria.search_query = query);
    }

    pub fn set_selected_tags(&self, tags: Vec<String>) {
        self.update_criteria(|criteria| criteria.selected_tags = tags);
    }

    pub fn set_active_type(&self, active_type: TypeFilter) {
        self.update_criteria(|criteria| criteria.active_type = active_type);
    }

    fn update_criteria(&self, update: impl FnOnce(&mut FilterCriteria)) {
        update(&mut self.criteria.write());
        self.state.send_modify(|state| state.generation += 1);
    }
}

/// Clears `loading` when a load ends, including when its future is dropped
struct LoadingFlag<'a>(&'a watch::Sender<LoadState>);

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|state| state.loading = false);
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}
