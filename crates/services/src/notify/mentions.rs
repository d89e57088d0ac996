use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// A mention is `@` plus word characters, accepted only at the start of
/// the text or after whitespace / sentence punctuation. Keeps `a@b.com`
/// and similar embedded `@` usages from matching.
fn mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[\s.,!?;:()\[\]{}])@(\w+)").expect("valid regex")
    })
}

/// Extracts `@username` tokens from free text, deduplicated
/// case-insensitively, first-seen order, original casing preserved.
///
/// Does not check that the usernames exist; resolution against the user
/// directory is the caller's job.
pub fn parse_mentions(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut usernames = Vec::new();
    for captures in mention_re().captures_iter(text) {
        let username = &captures[1];
        if seen.insert(username.to_lowercase()) {
            usernames.push(username.to_string());
        }
    }
    usernames
}
