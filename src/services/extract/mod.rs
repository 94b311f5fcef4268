//! Per-format text extraction. The format-specific parsing is delegated to
//! the parsing crates (lopdf, zip, quick-xml); these functions only pull the
//! text runs out of whatever the parser hands back.

mod archive;
mod markup;
mod office;
mod pdf;
mod text;

use anyhow::{Result, anyhow};

/// Dispatches on the (lowercased) file extension.
pub fn extract_text(bytes: &[u8], extension: &str) -> Result<String> {
    match extension {
        "pdf" => pdf::extract(bytes),
        "docx" => office::extract_docx(bytes),
        "xlsx" | "xlsm" => office::extract_xlsx(bytes),
        "pptx" => office::extract_pptx(bytes),
        "html" | "htm" => markup::extract(bytes),
        "txt" | "md" | "csv" => text::extract(bytes),
        "zip" => archive::extract(bytes),
        other => Err(anyhow!("no converter available for '.{}' files", other)),
    }
}
