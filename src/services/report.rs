use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::path::Path;
use utoipa::ToSchema;

/// Byte sizes of the original upload and the converted text.
///
/// `reduction_percent` is deliberately unclamped: when conversion grows the
/// content (e.g. a tiny file whose extraction fails into a warning string)
/// the value is negative and is shown as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeComparison {
    pub original_bytes: u64,
    pub converted_bytes: u64,
}

impl SizeComparison {
    pub fn new(original_bytes: u64, converted_bytes: u64) -> Self {
        Self {
            original_bytes,
            converted_bytes,
        }
    }

    /// `(1 - converted/original) * 100`, or exactly `0.0` for a zero-byte
    /// original (no division by zero).
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.converted_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}

/// One row of the size comparison table.
#[derive(Debug, Serialize, ToSchema)]
pub struct SizeRow {
    pub label: String,
    pub size_mb: String,
}

/// Everything the page needs to render one finished conversion.
#[derive(Debug, Serialize, ToSchema)]
pub struct RenderPayload {
    pub filename: String,
    /// First `preview_chars` Unicode characters of the converted text.
    pub preview: String,
    pub download_filename: String,
    /// `data:text/plain;base64,...` link payload for the download anchor.
    pub download_data_uri: String,
    pub original_bytes: u64,
    pub converted_bytes: u64,
    pub reduction_percent: f64,
    pub size_table: Vec<SizeRow>,
    pub status: String,
}

pub fn build_payload(
    filename: &str,
    text_content: &str,
    original_bytes: u64,
    preview_chars: usize,
) -> RenderPayload {
    let converted_bytes = text_content.len() as u64;
    let comparison = SizeComparison::new(original_bytes, converted_bytes);
    let reduction_percent = comparison.reduction_percent();

    RenderPayload {
        filename: filename.to_string(),
        preview: preview(text_content, preview_chars),
        download_filename: download_filename(filename),
        download_data_uri: download_data_uri(text_content),
        original_bytes,
        converted_bytes,
        reduction_percent,
        size_table: vec![
            SizeRow {
                label: "Original file".to_string(),
                size_mb: format_mb(original_bytes),
            },
            SizeRow {
                label: "Converted .txt file".to_string(),
                size_mb: format_mb(converted_bytes),
            },
        ],
        status: format!("✅ Text version is {:.1}% smaller!", reduction_percent),
    }
}

/// First `max_chars` Unicode characters, not bytes.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Strips the final extension and appends `.txt`.
pub fn download_filename(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    format!("{}.txt", stem)
}

pub fn download_data_uri(text_content: &str) -> String {
    format!(
        "data:text/plain;base64,{}",
        STANDARD.encode(text_content.as_bytes())
    )
}

pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
