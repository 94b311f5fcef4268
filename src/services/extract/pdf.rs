use anyhow::{Context, Result};

/// Extracts the text of every page via lopdf. Encrypted or malformed
/// documents surface as errors and become the conversion warning upstream.
pub fn extract(bytes: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_mem(bytes).context("failed to parse PDF")?;

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    let text = doc
        .extract_text(&pages)
        .context("failed to extract PDF text")?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = extract(b"definitely not a pdf").unwrap_err();
        assert!(err.to_string().contains("failed to parse PDF"));
    }

    #[test]
    fn test_rejects_truncated_header() {
        assert!(extract(b"%PDF-1.7").is_err());
    }
}
