//! Local file naming for downloaded assets.
//!
//! An identifier such as `carrefour.com` becomes the base name `carrefour`;
//! anything that doesn't look like a domain (brand ids, ISINs, tickers) is
//! kept whole. Either way the result is lower-cased and sanitized.

mod sanitize;

pub use sanitize::{is_invalid_file_name_char, sanitize_file_name};

/// Derives the base file name (no extension) for an identifier.
///
/// # Examples
///
/// - `base_name("carrefour.com")` → `"carrefour"`
/// - `base_name("Shop.Example.co.uk")` → `"shop"`
/// - `base_name("US0378331005")` → `"us0378331005"`
/// - `base_name("a/b")` → `"a_b"`
pub fn base_name(identifier: &str) -> String {
    let lowered = identifier.trim().to_lowercase();
    let stem = match domain_label(&lowered) {
        Some(label) => label,
        None => lowered.as_str(),
    };
    sanitize_file_name(stem)
}

/// Returns the part before the first dot when `s` matches
/// `^[a-z0-9-]+\.[a-z0-9.-]+$`.
fn domain_label(s: &str) -> Option<&str> {
    let (head, tail) = s.split_once('.')?;
    let head_ok = !head.is_empty() && head.chars().all(|c| is_domain_char(c, false));
    let tail_ok = !tail.is_empty() && tail.chars().all(|c| is_domain_char(c, true));
    (head_ok && tail_ok).then_some(head)
}

fn is_domain_char(c: char, allow_dot: bool) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || (allow_dot && c == '.')
}

/// File extension (with leading dot) for a classified download.
pub fn extension_for(is_svg: bool, content_type: Option<&str>) -> &'static str {
    if is_svg {
        return ".svg";
    }
    let ct = match content_type {
        Some(ct) => ct.to_ascii_lowercase(),
        None => return ".bin",
    };
    if ct.contains("png") {
        ".png"
    } else if ct.contains("jpeg") || ct.contains("jpg") {
        ".jpg"
    } else if ct.contains("webp") {
        ".webp"
    } else if ct.starts_with("image/") {
        ".img"
    } else {
        ".bin"
    }
}
