use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// HTML to text: character data with `script` and `style` contents dropped.
///
/// Real-world HTML is rarely well-formed XML, so the reader runs with
/// end-name checking off and stops at the first hard parse error, keeping
/// whatever text was collected up to that point.
pub fn extract(bytes: &[u8]) -> Result<String> {
    let html = String::from_utf8_lossy(bytes);

    let mut reader = Reader::from_str(&html);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = false;
    let mut buf = Vec::new();

    let mut out = String::new();
    let mut skip_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if is_skipped_tag(e.name().as_ref()) {
                    skip_depth += 1;
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                if is_skipped_tag(name.as_ref()) {
                    skip_depth = skip_depth.saturating_sub(1);
                } else if skip_depth == 0 && is_block_tag(name.as_ref()) {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                }
            }
            Ok(Event::Text(e)) if skip_depth == 0 => {
                // Decode entities; keep the raw bytes for malformed ones
                // (bare ampersands are everywhere in real HTML)
                let text = e
                    .unescape()
                    .unwrap_or_else(|_| String::from_utf8_lossy(e.as_ref()));
                let text = text.trim();
                if !text.is_empty() {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push(' ');
                    }
                    out.push_str(text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!("stopping HTML scan on parse error: {}", e);
                break;
            }
            _ => (),
        }
        buf.clear();
    }

    Ok(out.trim_end().to_string())
}

fn is_skipped_tag(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"script") || name.eq_ignore_ascii_case(b"style")
}

fn is_block_tag(name: &[u8]) -> bool {
    matches!(
        name.to_ascii_lowercase().as_slice(),
        b"p" | b"div"
            | b"br"
            | b"li"
            | b"tr"
            | b"h1"
            | b"h2"
            | b"h3"
            | b"h4"
            | b"h5"
            | b"h6"
            | b"title"
    )
}
