use std::time::Duration;

use crate::api::error::AppError;
use crate::config::ConverterConfig;
use crate::services::converter::Converter;
use crate::services::report::{self, RenderPayload};
use crate::utils::temp::TransientFile;

/// Shown in place of content when the converter succeeds but yields nothing.
pub const EMPTY_EXTRACTION_WARNING: &str = "⚠️ Error: Conversion returned no text content.";

/// Shown in place of content when the converter fails. The request still
/// completes; the failure becomes the displayed text.
pub fn conversion_failure_warning(reason: &str) -> String {
    format!("⚠️ An error occurred during conversion: {}", reason)
}

/// Runs one upload through the whole pipeline: persist to a transient path,
/// convert (failures become warning text, never errors), measure, build the
/// render payload, delete the transient file.
///
/// Only filesystem failures (write, stat, delete) abort the request.
pub async fn convert_upload(
    config: &ConverterConfig,
    converter: &dyn Converter,
    filename: &str,
    bytes: &[u8],
) -> Result<RenderPayload, AppError> {
    let transient = TransientFile::create(filename, bytes)
        .map_err(|e| AppError::Internal(format!("failed to persist upload: {}", e)))?;

    let timeout = Duration::from_secs(config.convert_timeout_secs);
    let text_content = match tokio::time::timeout(timeout, converter.convert(transient.path()))
        .await
    {
        Ok(Ok(result)) if !result.text_content.is_empty() => result.text_content,
        Ok(Ok(_)) => {
            tracing::warn!(filename = %filename, "conversion yielded no text");
            EMPTY_EXTRACTION_WARNING.to_string()
        }
        Ok(Err(e)) => {
            tracing::warn!(filename = %filename, error = %e, "conversion failed");
            conversion_failure_warning(&e.to_string())
        }
        Err(_) => {
            tracing::warn!(filename = %filename, "conversion timed out");
            conversion_failure_warning(&format!(
                "timed out after {} seconds",
                config.convert_timeout_secs
            ))
        }
    };

    let original_bytes = transient
        .size_on_disk()
        .map_err(|e| AppError::Internal(format!("failed to stat upload: {}", e)))?;

    let payload = report::build_payload(filename, &text_content, original_bytes, config.preview_chars);

    transient
        .close()
        .map_err(|e| AppError::Internal(format!("failed to remove transient file: {}", e)))?;

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::converter::{ConversionResult, FixedConverter};
    use anyhow::anyhow;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    struct FailingConverter;

    #[async_trait::async_trait]
    impl Converter for FailingConverter {
        async fn convert(&self, _path: &Path) -> anyhow::Result<ConversionResult> {
            Err(anyhow!("unsupported codec"))
        }

        fn kind(&self) -> &'static str {
            "failing"
        }
    }

    struct EmptyConverter;

    #[async_trait::async_trait]
    impl Converter for EmptyConverter {
        async fn convert(&self, _path: &Path) -> anyhow::Result<ConversionResult> {
            Ok(ConversionResult {
                text_content: String::new(),
            })
        }

        fn kind(&self) -> &'static str {
            "empty"
        }
    }

    /// Records the path it was handed so tests can check cleanup afterwards.
    struct PathProbe(Mutex<Option<PathBuf>>);

    #[async_trait::async_trait]
    impl Converter for PathProbe {
        async fn convert(&self, path: &Path) -> anyhow::Result<ConversionResult> {
            assert!(path.exists(), "transient file must exist during conversion");
            *self.0.lock().unwrap() = Some(path.to_path_buf());
            Ok(ConversionResult {
                text_content: "probe".to_string(),
            })
        }

        fn kind(&self) -> &'static str {
            "probe"
        }
    }

    struct SleepyConverter;

    #[async_trait::async_trait]
    impl Converter for SleepyConverter {
        async fn convert(&self, _path: &Path) -> anyhow::Result<ConversionResult> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!()
        }

        fn kind(&self) -> &'static str {
            "sleepy"
        }
    }

    fn config() -> ConverterConfig {
        ConverterConfig::development()
    }

    #[tokio::test]
    async fn test_success_path() {
        let converter = FixedConverter::new("a".repeat(50_000));
        let bytes = vec![b'x'; 200_000];

        let payload = convert_upload(&config(), &converter, "report.docx", &bytes)
            .await
            .unwrap();

        assert_eq!(payload.original_bytes, 200_000);
        assert_eq!(payload.converted_bytes, 50_000);
        assert!((payload.reduction_percent - 75.0).abs() < 0.001);
        assert_eq!(payload.download_filename, "report.txt");
        assert_eq!(payload.size_table[0].size_mb, "0.19 MB");
        assert_eq!(payload.size_table[1].size_mb, "0.05 MB");
    }

    #[tokio::test]
    async fn test_converter_errors_never_escape() {
        let payload = convert_upload(&config(), &FailingConverter, "weird.pdf", b"%PDF")
            .await
            .unwrap();

        assert!(payload.preview.contains("unsupported codec"));
        assert!(payload.preview.starts_with("⚠️"));
        // The warning string is what gets measured
        assert_eq!(
            payload.converted_bytes,
            conversion_failure_warning("unsupported codec").len() as u64
        );
    }

    #[tokio::test]
    async fn test_empty_extraction_warning() {
        let payload = convert_upload(&config(), &EmptyConverter, "blank.txt", b"some bytes")
            .await
            .unwrap();

        assert_eq!(payload.preview, EMPTY_EXTRACTION_WARNING);
    }

    #[tokio::test]
    async fn test_zero_byte_original() {
        let payload = convert_upload(&config(), &EmptyConverter, "empty.txt", b"")
            .await
            .unwrap();

        assert_eq!(payload.original_bytes, 0);
        assert_eq!(payload.reduction_percent, 0.0);
    }

    #[tokio::test]
    async fn test_transient_file_removed_after_request() {
        let probe = PathProbe(Mutex::new(None));
        convert_upload(&config(), &probe, "cleanup.txt", b"bytes")
            .await
            .unwrap();

        let path = probe.0.lock().unwrap().take().unwrap();
        assert!(!path.exists(), "transient file leaked: {}", path.display());
    }

    #[tokio::test]
    async fn test_transient_file_removed_after_failure() {
        let probe = PathProbe(Mutex::new(None));
        // Probe succeeds; run the failing case separately with its own probe
        convert_upload(&config(), &probe, "a.txt", b"1").await.unwrap();
        let path = probe.0.lock().unwrap().take().unwrap();
        assert!(!path.exists());

        // Failing converter: the request still completes and still cleans up
        let payload = convert_upload(&config(), &FailingConverter, "a.txt", b"1")
            .await
            .unwrap();
        assert!(payload.preview.starts_with("⚠️"));
    }

    #[tokio::test]
    async fn test_timeout_becomes_warning() {
        let config = ConverterConfig {
            convert_timeout_secs: 0,
            ..ConverterConfig::development()
        };
        let payload = convert_upload(&config, &SleepyConverter, "slow.pdf", b"%PDF")
            .await
            .unwrap();

        assert!(payload.preview.contains("timed out after 0 seconds"));
    }
}
