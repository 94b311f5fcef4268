use anyhow::Result;

/// Plain text, markdown and CSV pass through unchanged. Invalid UTF-8 falls
/// back to lossy decoding rather than failing the conversion.
pub fn extract(bytes: &[u8]) -> Result<String> {
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
