// WHY: Runtime options for the orchestrator, loadable from JSON and overridable from the CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::language::Language;

const DEFAULT_MAX_VOCABULARY: usize = 10;

/// Options accepted by `LanguageProcessor::process_with_options`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorOptions {
    /// Analyse as this language instead of the detected one
    pub language: Option<Language>,
    /// Build pronunciation guides for the text's vocabulary
    pub pronunciation_guides: bool,
    /// How many of the hardest words to surface as key vocabulary
    pub max_vocabulary: usize,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            language: None,
            pronunciation_guides: true,
            max_vocabulary: DEFAULT_MAX_VOCABULARY,
        }
    }
}

impl ProcessorOptions {
    /// Load options from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}
