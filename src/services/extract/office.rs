use anyhow::{Context, Result, anyhow};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Word: every text run in `word/document.xml`, one line per paragraph.
pub fn extract_docx(bytes: &[u8]) -> Result<String> {
    let xml = read_zip_member(bytes, "word/document.xml")?
        .ok_or_else(|| anyhow!("missing word/document.xml part"))?;
    collect_runs(&xml, b"w:t", b"w:p")
}

/// Excel: the shared-strings table, one line per string. Workbooks without
/// any text cells have no sharedStrings part; that is an empty extraction,
/// not an error.
pub fn extract_xlsx(bytes: &[u8]) -> Result<String> {
    match read_zip_member(bytes, "xl/sharedStrings.xml")? {
        Some(xml) => collect_runs(&xml, b"t", b"si"),
        None => Ok(String::new()),
    }
}

/// PowerPoint: text runs of every slide, in slide order.
pub fn extract_pptx(bytes: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).context("not a valid OOXML container")?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(number, _)| *number);

    let mut out = String::new();
    for (_, name) in slides {
        let mut xml = String::new();
        archive
            .by_name(&name)
            .with_context(|| format!("missing {} part", name))?
            .read_to_string(&mut xml)
            .with_context(|| format!("failed to read {}", name))?;

        let slide_text = collect_runs(&xml, b"a:t", b"a:p")?;
        if !slide_text.is_empty() {
            out.push_str(&slide_text);
            out.push('\n');
        }
    }
    Ok(out.trim_end().to_string())
}

fn read_zip_member(bytes: &[u8], member: &str) -> Result<Option<String>> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).context("not a valid OOXML container")?;

    let mut file = match archive.by_name(member) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("failed to open {}", member)),
    };

    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .with_context(|| format!("failed to read {}", member))?;
    Ok(Some(xml))
}

/// Collects the character content of every `text_tag` element, inserting a
/// line break whenever a `break_tag` element closes.
///
/// Text events are only captured inside `text_tag`, so document formatting
/// whitespace never leaks in — but whitespace inside a run is significant
/// (Word splits paragraphs into runs at formatting boundaries, and the
/// space often lands at the edge of a run) and must not be trimmed.
fn collect_runs(xml: &str, text_tag: &[u8], break_tag: &[u8]) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == text_tag => in_text = true,
            Ok(Event::End(e)) => {
                if e.name().as_ref() == text_tag {
                    in_text = false;
                } else if e.name().as_ref() == break_tag
                    && !out.is_empty()
                    && !out.ends_with('\n')
                {
                    out.push('\n');
                }
            }
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .unwrap_or_else(|_| String::from_utf8_lossy(e.as_ref()));
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow!("malformed XML part: {}", e)),
            _ => (),
        }
        buf.clear();
    }

    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn ooxml_with(member: &str, xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(member, FileOptions::default()).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_docx() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>First paragraph</w:t></w:r></w:p>
                <w:p><w:r><w:t>Second</w:t></w:r><w:r><w:t> paragraph</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;
        let bytes = ooxml_with("word/document.xml", xml);

        let text = extract_docx(&bytes).unwrap();
        assert_eq!(text, "First paragraph\nSecond paragraph");
    }

    #[test]
    fn test_extract_docx_preserves_run_edge_whitespace() {
        // Word splits text into runs at formatting boundaries; the space
        // frequently sits at the edge of a run (or is a run of its own)
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p>
                  <w:r><w:t>bold</w:t></w:r>
                  <w:r><w:t> then plain</w:t></w:r>
                </w:p>
                <w:p>
                  <w:r><w:t>a</w:t></w:r>
                  <w:r><w:t> </w:t></w:r>
                  <w:r><w:t>b</w:t></w:r>
                </w:p>
              </w:body>
            </w:document>"#;
        let bytes = ooxml_with("word/document.xml", xml);

        let text = extract_docx(&bytes).unwrap();
        assert_eq!(text, "bold then plain\na b");
    }

    #[test]
    fn test_extract_docx_unescapes_entities() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>AT&amp;T &lt;rates&gt;</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;
        let bytes = ooxml_with("word/document.xml", xml);

        assert_eq!(extract_docx(&bytes).unwrap(), "AT&T <rates>");
    }

    #[test]
    fn test_extract_docx_missing_part() {
        let bytes = ooxml_with("other.xml", "<x/>");
        assert!(extract_docx(&bytes).is_err());
    }

    #[test]
    fn test_extract_xlsx() {
        let xml = r#"<?xml version="1.0"?>
            <sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
              <si><t>Revenue</t></si>
              <si><t>Costs</t></si>
            </sst>"#;
        let bytes = ooxml_with("xl/sharedStrings.xml", xml);

        let text = extract_xlsx(&bytes).unwrap();
        assert_eq!(text, "Revenue\nCosts");
    }

    #[test]
    fn test_extract_xlsx_without_shared_strings() {
        let bytes = ooxml_with("xl/workbook.xml", "<workbook/>");
        assert_eq!(extract_xlsx(&bytes).unwrap(), "");
    }

    #[test]
    fn test_extract_pptx_slide_order() {
        let slide = |text: &str| {
            format!(
                r#"<p:sld xmlns:p="p" xmlns:a="a"><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sld>"#,
                text
            )
        };

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        // Deliberately written out of order
        for (name, text) in [
            ("ppt/slides/slide2.xml", "Second slide"),
            ("ppt/slides/slide1.xml", "First slide"),
            ("ppt/slides/slide10.xml", "Tenth slide"),
        ] {
            writer.start_file(name, FileOptions::default()).unwrap();
            writer.write_all(slide(text).as_bytes()).unwrap();
        }
        let bytes = writer.finish().unwrap().into_inner();

        let text = extract_pptx(&bytes).unwrap();
        assert_eq!(text, "First slide\nSecond slide\nTenth slide");
    }

    #[test]
    fn test_not_a_zip() {
        assert!(extract_docx(b"plain bytes").is_err());
    }
}
