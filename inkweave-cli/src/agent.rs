//! Shared JSON schema helpers for machine-consumable command output.

use inkweave_cli::config::SiteConfig;
use inkweave_core::{
    ContentKey, ContentRecord, FilterCriteria, ModelExport, ProjectView, TopicView,
};
use serde::Serialize;

pub const SCHEMA_VERSION: &str = "2025-01-inkweave-v1";

/// Standard envelope for machine-consumable responses.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub schema_version: &'static str,
    pub kind: &'static str,
    pub data: T,
}

pub fn envelope<T>(kind: &'static str, data: T) -> Envelope<T> {
    Envelope {
        schema_version: SCHEMA_VERSION,
        kind,
        data,
    }
}

#[derive(Serialize)]
pub struct ListData<'a> {
    pub criteria: &'a FilterCriteria,
    pub total: usize,
    pub posts: Vec<&'a ContentRecord>,
}

#[derive(Serialize)]
pub struct TagsData {
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct TopicData<'a> {
    #[serde(flatten)]
    pub topic: TopicView,
    pub items: Vec<&'a ContentRecord>,
}

#[derive(Serialize)]
pub struct ProjectData<'a> {
    #[serde(flatten)]
    pub project: ProjectView,
    pub items: Vec<&'a ContentRecord>,
}

#[derive(Serialize)]
pub struct ExportData<'a> {
    pub site: &'a SiteConfig,
    #[serde(flatten)]
    pub model: ModelExport<'a>,
}

/// Print a serializable payload as JSON
pub fn print_json<T: Serialize>(payload: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    println!("{json}");
    Ok(())
}

/// One-line human label for a content key
pub fn key_label(key: &ContentKey) -> String {
    format!("[{}] {}", key.content_type, key.slug)
}
