use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::services::extract;

/// What a converter hands back on success. An empty `text_content` is a
/// valid outcome (the orchestrator turns it into a warning, not an error).
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub text_content: String,
}

/// Trait for file-to-text converter implementations
#[async_trait::async_trait]
pub trait Converter: Send + Sync {
    /// Convert the file at `path` into plain text.
    async fn convert(&self, path: &Path) -> Result<ConversionResult>;

    /// Short identifier for health reporting.
    fn kind(&self) -> &'static str;
}

/// Production converter: reads the file and dispatches on its extension to
/// the format extractors. Parsing is synchronous, so it runs on the
/// blocking pool.
pub struct ExtractConverter;

#[async_trait::async_trait]
impl Converter for ExtractConverter {
    async fn convert(&self, path: &Path) -> Result<ConversionResult> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;

        let text_content =
            tokio::task::spawn_blocking(move || extract::extract_text(&bytes, &extension))
                .await
                .context("conversion task panicked")??;

        Ok(ConversionResult { text_content })
    }

    fn kind(&self) -> &'static str {
        "extract"
    }
}

/// Returns a canned string regardless of input. Stand-in for development
/// and tests, selected via `CONVERTER_TYPE=fixed`.
pub struct FixedConverter {
    text: String,
}

impl FixedConverter {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for FixedConverter {
    fn default() -> Self {
        Self::new("Fixed converter output.")
    }
}

#[async_trait::async_trait]
impl Converter for FixedConverter {
    async fn convert(&self, _path: &Path) -> Result<ConversionResult> {
        Ok(ConversionResult {
            text_content: self.text.clone(),
        })
    }

    fn kind(&self) -> &'static str {
        "fixed"
    }
}

/// Factory function to create the converter named in the config
pub fn create_converter(converter_type: &str) -> Arc<dyn Converter> {
    match converter_type.to_lowercase().as_str() {
        "extract" => Arc::new(ExtractConverter),
        "fixed" => Arc::new(FixedConverter::default()),
        _ => {
            tracing::warn!(
                "Unknown converter type '{}', using ExtractConverter",
                converter_type
            );
            Arc::new(ExtractConverter)
        }
    }
}
