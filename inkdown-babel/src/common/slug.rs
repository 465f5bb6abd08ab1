//! Heading anchor ids.
//!
//! Anchors are derived from heading text alone, so two headings with the same
//! text share an id. Links produced by the TOC builder rely on that mapping
//! being stable between runs.

/// Generate the anchor id for a heading.
///
/// Lower-cases the text, drops everything that is not a word character
/// (ASCII letters and digits, `_`, Hiragana, Katakana, CJK ideographs),
/// whitespace or a hyphen, then turns separator runs into single hyphens.
///
/// # Example
///
/// ```
/// use inkdown_babel::common::slug::slug;
///
/// assert_eq!(slug("Hello World"), "hello-world");
/// assert_eq!(slug("  What's new?  "), "whats-new");
/// assert_eq!(slug("日本語 の 見出し"), "日本語-の-見出し");
/// ```
pub fn slug(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    let mut at_start = true;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = !at_start;
        } else if is_anchor_char(c) {
            if pending_hyphen {
                result.push('-');
                pending_hyphen = false;
            }
            result.push(c);
            at_start = false;
        }
    }

    result
}

fn is_anchor_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || matches!(c,
            '\u{3040}'..='\u{309F}'   // Hiragana
            | '\u{30A0}'..='\u{30FF}' // Katakana
            | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_simple() {
        assert_eq!(slug("Intro"), "intro");
        assert_eq!(slug("Hello World"), "hello-world");
    }

    #[test]
    fn test_slug_strips_punctuation() {
        assert_eq!(slug("My API (v2)!"), "my-api-v2");
        assert_eq!(slug("C++ & Rust"), "c-rust");
    }

    #[test]
    fn test_slug_collapses_whitespace_and_hyphens() {
        assert_eq!(slug("a   b"), "a-b");
        assert_eq!(slug("a - b"), "a-b");
        assert_eq!(slug("a--b"), "a-b");
        assert_eq!(slug("a\t\nb"), "a-b");
    }

    #[test]
    fn test_slug_trims_hyphens() {
        assert_eq!(slug("- leading"), "leading");
        assert_eq!(slug("trailing -"), "trailing");
        assert_eq!(slug("  spaced  "), "spaced");
    }

    #[test]
    fn test_slug_keeps_digits_and_underscore() {
        assert_eq!(slug("Chapter 1: Setup_Guide"), "chapter-1-setup_guide");
    }

    #[test]
    fn test_slug_kana_and_ideographs() {
        assert_eq!(slug("ひらがな カタカナ 漢字"), "ひらがな-カタカナ-漢字");
        assert_eq!(slug("第1章 はじめに"), "第1章-はじめに");
    }

    #[test]
    fn test_slug_drops_letters_outside_ranges() {
        assert_eq!(slug("Héllo Wörld"), "hllo-wrld");
        assert_eq!(slug("Größe × Breite"), "gre-breite");
        assert_eq!(slug("emoji 🚀 rocket"), "emoji-rocket");
        assert_eq!(slug("한국어"), "");
    }

    #[test]
    fn test_slug_empty() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("   "), "");
        assert_eq!(slug("?!"), "");
    }

    #[test]
    fn test_slug_is_idempotent() {
        for text in ["Hello World", "a - b", "日本語 の 見出し", "  x  y  "] {
            let once = slug(text);
            assert_eq!(slug(&once), once);
        }
    }
}
