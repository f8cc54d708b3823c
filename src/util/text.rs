// src/util/text.rs
use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Single-line preview of free text for terminal listings.
///
/// This function:
/// 1. Decodes HTML entities (e.g., &amp; → &)
/// 2. Collapses every whitespace run, newlines included, into one space
/// 3. Truncates to `max_chars` characters, marking the cut with `…`
///
/// # Examples
///
/// ```
/// use centerview::util::text::excerpt;
///
/// let preview = excerpt("Juda  yaxshi\nmarkaz", 40);
/// assert_eq!(preview, "Juda yaxshi markaz");
/// ```
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let decoded = decode_html_entities(text).to_string();
    let collapsed = whitespace_re().replace_all(decoded.trim(), " ").into_owned();

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let kept: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Five-character star strip, e.g. `★★★☆☆`.
pub fn star_strip(rating: u8) -> String {
    (1..=crate::constants::MAX_RATING)
        .map(|n| if n <= rating { '★' } else { '☆' })
        .collect()
}
