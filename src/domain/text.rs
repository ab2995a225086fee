//! Display text helpers

/// Default maximum excerpt length, in characters
pub const DEFAULT_EXCERPT_LEN: usize = 150;

const MARKUP_CHARS: [char; 5] = ['#', '*', '`', '[', ']'];

/// Shortens a post description for a card.
///
/// Markup punctuation is stripped without parsing. Length is measured in
/// characters, not bytes, so a multi-byte glyph is never split. Output is
/// for display only.
pub fn truncate_description(text: &str, max_len: usize) -> String {
    let plain: String = text.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect();

    if plain.chars().count() <= max_len {
        return plain;
    }

    let head: String = plain.chars().take(max_len).collect();
    format!("{}...", head)
}
