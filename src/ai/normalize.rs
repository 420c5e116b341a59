//! Response Normalization
//!
//! Models sometimes wrap an otherwise plain markdown answer in a code fence
//! (```` ```markdown ```` or a bare ```` ``` ````). [`normalize`] unwraps that
//! and trims whitespace. Nothing else is touched: fences in the middle of the
//! document and fences with any other language tag are passed through.

use regex::Regex;
use std::sync::LazyLock;

/// Opening fence line (bare or `markdown`), body, optional closing fence line
static WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A```(?:markdown)?[ \t]*\r?\n(.*?)(?:\r?\n```)?\z")
        .expect("wrapper pattern is valid")
});

/// Strip incidental code-fence wrappers from model output.
///
/// Unwrapping repeats until the text no longer starts with a wrapper, so the
/// function is idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim();

    while let Some(body) = unwrap_once(text) {
        let next = body.trim();
        if next.len() == text.len() {
            break;
        }
        text = next;
    }

    text.to_string()
}

fn unwrap_once(text: &str) -> Option<&str> {
    WRAPPER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
