//! Input resolution shared by the CLI commands.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use fnreview_config::{ExtractionConfig, ExtractionMode, StrategyKind, load_config};
use fnreview_model::Document;
use fnreview_reconcile::ReviewInputs;
use tracing::{debug, trace};

use crate::logging::redact_value;

/// Loads the configuration file, or the built-in configuration without one,
/// and applies a mode given on the command line.
///
/// An order without a mode selects auto mode with that order.
pub fn resolve_config(
    path: Option<&Path>,
    mode: Option<&str>,
    order: &[StrategyKind],
) -> Result<ExtractionConfig> {
    let config = match path {
        Some(path) => load_config(path).with_context(|| format!("load {}", path.display()))?,
        None => ExtractionConfig::default(),
    };
    let mode = match (mode, order.is_empty()) {
        (None, true) => return Ok(config),
        (None, false) => "auto",
        (Some(mode), _) => mode,
    };
    let order = (!order.is_empty()).then_some(order);
    let mode = ExtractionMode::from_parts(mode, order).map_err(|message| anyhow!(message))?;
    debug!(mode = %mode, "extraction mode overridden");
    Ok(config.with_mode(mode))
}

/// Loads the document, attaching `text` as its body when given.
pub fn load_input_document(document: &Path, text: Option<&Path>) -> Result<Document> {
    let loaded = match text {
        Some(text) => fnreview_ingest::load_table_with_text(document, text),
        None => fnreview_ingest::load_document(document),
    }
    .with_context(|| format!("load document {}", document.display()))?;
    trace!(text = redact_value(&loaded.text), "document body");
    Ok(loaded)
}

/// Reads reconciliation inputs from a JSON file.
pub fn load_review_inputs(path: &Path) -> Result<ReviewInputs> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let inputs: ReviewInputs = serde_json::from_str(&contents)
        .with_context(|| format!("parse review inputs {}", path.display()))?;
    debug!(
        path = %path.display(),
        functions = inputs.functions.len(),
        "loaded review inputs"
    );
    Ok(inputs)
}
