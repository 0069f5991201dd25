//! Content-type extraction and SVG detection for fetched assets.

/// How many leading body bytes are inspected for an `<svg` root element.
const SNIFF_LEN: usize = 1024;

/// Returns the media type of the final response among collected header lines.
///
/// When redirects are followed the lines contain several responses; each
/// status line starts a new block, so only the last block counts. Parameters
/// (`; charset=...`) are dropped and the value is lower-cased.
pub(crate) fn content_type_from_headers(lines: &[String]) -> Option<String> {
    let mut content_type = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_type = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                let media = value.split(';').next().unwrap_or("").trim();
                if !media.is_empty() {
                    content_type = Some(media.to_ascii_lowercase());
                }
            }
        }
    }

    content_type
}

/// True if the content type names an SVG document.
pub fn content_type_is_svg(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("svg"))
}

/// True if the start of the body decodes to text containing an `<svg` tag.
pub fn body_looks_like_svg(body: &[u8]) -> bool {
    let head = &body[..body.len().min(SNIFF_LEN)];
    String::from_utf8_lossy(head)
        .to_ascii_lowercase()
        .contains("<svg")
}

/// Either signal is enough: header says SVG, or the body starts like one.
pub fn is_svg(content_type: Option<&str>, body: &[u8]) -> bool {
    content_type_is_svg(content_type) || body_looks_like_svg(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn content_type_strips_parameters() {
        let h = lines(&["HTTP/1.1 200 OK", "Content-Type: Image/SVG+XML; charset=utf-8"]);
        assert_eq!(content_type_from_headers(&h).as_deref(), Some("image/svg+xml"));
    }

    #[test]
    fn content_type_absent() {
        let h = lines(&["HTTP/1.1 200 OK", "Content-Length: 10"]);
        assert_eq!(content_type_from_headers(&h), None);
    }

    #[test]
    fn content_type_of_final_response_after_redirect() {
        let h = lines(&[
            "HTTP/1.1 302 Found",
            "Content-Type: text/html",
            "Location: /elsewhere",
            "",
            "HTTP/1.1 200 OK",
            "Content-Type: image/png",
        ]);
        assert_eq!(content_type_from_headers(&h).as_deref(), Some("image/png"));

        let h = lines(&[
            "HTTP/1.1 302 Found",
            "Content-Type: text/html",
            "",
            "HTTP/1.1 200 OK",
        ]);
        assert_eq!(content_type_from_headers(&h), None);
    }

    #[test]
    fn header_svg_wins_regardless_of_body() {
        assert!(is_svg(Some("image/svg+xml"), b"\x89PNG\r\n"));
        assert!(is_svg(Some("image/svg+xml"), b""));
    }

    #[test]
    fn body_sniff_without_header() {
        let body = br#"<?xml version="1.0"?><SVG xmlns="http://www.w3.org/2000/svg"></SVG>"#;
        assert!(is_svg(None, body));
        assert!(is_svg(Some("application/octet-stream"), body));
    }

    #[test]
    fn raster_is_not_svg() {
        assert!(!is_svg(Some("image/png"), b"\x89PNG\r\n\x1a\n"));
        assert!(!is_svg(None, b""));
    }

    #[test]
    fn sniff_only_looks_at_the_start() {
        let mut body = vec![b' '; SNIFF_LEN];
        body.extend_from_slice(b"<svg>");
        assert!(!body_looks_like_svg(&body));
    }
}
