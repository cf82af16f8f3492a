//! # inkweave-core
//!
//! Content aggregation for the inkweave site generator.
//!
//! Raw compiled modules flow through a fixed pipeline:
//! normalization → indexing → linking → filtered views. [`ContentStore`]
//! runs that pipeline once per model lifetime and exposes the result.

pub mod index;
pub mod link;
pub mod models;
pub mod normalize;
pub mod query;
pub mod source;
pub mod store;

pub use index::{build_indices, IndexedContent};
pub use inkweave_types::{ContentKey, ContentType, LinkRef, RelatedRef, TypeFilter};
pub use link::link;
pub use models::{
    ContentId, ContentRecord, EntryRecord, Metadata, Project, ProjectId, SiteModel, Topic, TopicId,
};
pub use normalize::{normalize_collections, slug_from_path, NormalizedContent};
pub use query::{all_tags, filtered_posts, get_item, FilterCriteria, ModelExport, ProjectView, TopicView};
pub use source::{RawCollection, RawCollections, RawModule, RecordSource, SourceError, StaticSource};
pub use store::{ContentStore, LoadError, LoadState};
