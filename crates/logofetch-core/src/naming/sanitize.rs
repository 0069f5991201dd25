//! Portable filename sanitization.

/// Characters rejected in file names by at least one mainstream filesystem.
const INVALID: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// True if `c` cannot appear in a file name on Windows, macOS or Linux.
pub fn is_invalid_file_name_char(c: char) -> bool {
    c.is_control() || INVALID.contains(&c)
}

/// Replaces every invalid file name character with `_`.
///
/// Unlike a full cleanup this keeps the length (in chars) unchanged, does not
/// trim and does not collapse runs, so it is idempotent.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if is_invalid_file_name_char(c) { '_' } else { c })
        .collect()
}
