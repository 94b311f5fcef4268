use anyhow::{Context, Result};
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Extensions converted when found inside an archive. Nested zips are listed
/// but not descended into.
const CONVERTIBLE: &[&str] = &[
    "pdf", "docx", "xlsx", "xlsm", "pptx", "html", "htm", "md", "txt", "csv",
];

/// Zip container: one `## <entry>` section per file entry. Supported entries
/// are converted in place; anything else is listed with its sniffed type so
/// the output still accounts for the whole archive.
pub fn extract(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).context("not a valid zip archive")?;

    let mut out = String::new();
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .with_context(|| format!("failed to open archive entry {}", index))?;
        if !file.is_file() {
            continue;
        }

        let name = file.name().to_string();
        let ext = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .with_context(|| format!("failed to read archive entry {}", name))?;

        out.push_str(&format!("## {}\n\n", name));
        if CONVERTIBLE.contains(&ext.as_str()) {
            match super::extract_text(&data, &ext) {
                Ok(text) => {
                    out.push_str(text.trim());
                    out.push_str("\n\n");
                }
                Err(e) => {
                    out.push_str(&format!("[could not convert: {}]\n\n", e));
                }
            }
        } else {
            let mime = infer::get(&data)
                .map(|kind| kind.mime_type())
                .unwrap_or("application/octet-stream");
            out.push_str(&format!(
                "[unsupported entry: {}, {} bytes]\n\n",
                mime,
                data.len()
            ));
        }
    }

    Ok(out.trim_end().to_string())
}
