use std::sync::LazyLock;

use regex::Regex;

static MULTI_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Replace `\r` and `\t` with a space and collapse runs of spaces.
/// Newlines are left alone; callers that need paragraph structure must not use this.
pub fn normalize(text: &str) -> String {
    let spaced = text.replace(['\r', '\t'], " ");
    MULTI_SPACE_RE.replace_all(&spaced, " ").into_owned()
}
