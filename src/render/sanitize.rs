use std::sync::LazyLock;

use regex::Regex;

/// Longest file stem, in characters, a certificate can be saved under.
pub const MAX_FILENAME_LENGTH: usize = 120;
pub const FALLBACK_FILENAME: &str = "recipient";

static DISALLOWED_CHARACTERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\-_(). ]").expect("Filename allow-list should be a valid regex")
});

/// Turn a recipient name into a file stem that is safe on every filesystem.
///
/// Distinct names may end up with the same stem, in which case the last certificate rendered wins.
pub fn sanitize_filename(name: &str) -> String {
    let safe = DISALLOWED_CHARACTERS.replace_all(name, "");
    let truncated: String = safe.trim().chars().take(MAX_FILENAME_LENGTH).collect();
    let truncated = truncated.trim();
    if truncated.is_empty() {
        FALLBACK_FILENAME.to_owned()
    } else {
        truncated.to_owned()
    }
}
