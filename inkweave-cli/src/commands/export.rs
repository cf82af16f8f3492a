//! Export the linked model for renderers.

use super::{load_config, load_content};
use crate::agent;
use anyhow::{Context, Result};
use inkweave_core::ModelExport;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;

/// Write site info, posts, projects, topics and tags as one JSON document.
pub async fn export_model(config_path: &Path, output: Option<&Path>, pretty: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let site = config.site.clone();
    let store = load_content(config).await?;
    let model = store.model();
    let payload = agent::envelope(
        "site.model",
        agent::ExportData {
            site: &site,
            model: ModelExport::new(&model),
        },
    );

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
        )),
        None => Box::new(BufWriter::new(stdout())),
    };

    if pretty {
        serde_json::to_writer_pretty(&mut writer, &payload)?;
    } else {
        serde_json::to_writer(&mut writer, &payload)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    if let Some(path) = output {
        tracing::info!("Exported {} items to {:?}", model.posts().len(), path);
    }
    Ok(())
}
