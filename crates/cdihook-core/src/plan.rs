//! Hook plan loading.
//!
//! Plans are JSON by default. Files ending in `.yaml` or `.yml` are decoded
//! as YAML with the same field names.

use std::path::Path;

use cdihook_common::error::{HookError, Result};
use cdihook_common::types::{ConfigDevices, HookPlan};
use serde::de::DeserializeOwned;

/// Encoding of a plan file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl PlanFormat {
    /// Picks the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Reads and decodes a hook plan.
///
/// # Errors
///
/// Returns [`HookError::NotFound`] if the file does not exist,
/// [`HookError::Io`] if it cannot be read, or [`HookError::Decode`] if its
/// content does not match the plan shape.
pub fn load_plan(path: &Path) -> Result<HookPlan> {
    let plan: HookPlan = load_document(path)?;
    tracing::debug!(
        path = %path.display(),
        symlinks = plan.symlinks.len(),
        ld_cache_updates = plan.ld_cache_updates.len(),
        "hook plan loaded"
    );
    Ok(plan)
}

/// Reads and decodes a config devices file.
///
/// # Errors
///
/// Same conditions as [`load_plan`].
pub fn load_config_devices(path: &Path) -> Result<ConfigDevices> {
    load_document(path)
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
    decode(&content, PlanFormat::from_path(path)).map_err(|source| HookError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn decode<T: DeserializeOwned>(
    content: &str,
    format: PlanFormat,
) -> std::result::Result<T, Box<dyn std::error::Error + Send + Sync>> {
    match format {
        PlanFormat::Json => Ok(serde_json::from_str(content)?),
        PlanFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}
