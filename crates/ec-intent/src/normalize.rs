//! Text canonicalisation and tokenization.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonicalise raw user text.
///
/// Lower-cases, strips diacritics from Latin letters so "Café" and "cafe"
/// compare equal, maps typographic quotes to ASCII, collapses runs of
/// whitespace to one space and trims. Marks on other scripts (Devanagari
/// vowel signs, Greek tonos) are kept and the result is recomposed (NFC).
pub fn normalize(text: &str) -> String {
    let mut after_latin = false;
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|&c| {
            if is_combining_mark(c) {
                !after_latin
            } else {
                after_latin = is_latin(c);
                true
            }
        })
        .map(fold_quote)
        .nfc()
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}')
}

fn fold_quote(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '`' | '\u{00B4}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{00AB}' | '\u{00BB}' => {
            '"'
        }
        other => other,
    }
}

/// A maximal run of letters/digits and its byte span in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Iterate over letter/digit runs; everything else separates tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = Token<'_>> {
    let mut chars = text.char_indices().peekable();
    std::iter::from_fn(move || {
        while let Some(&(_, c)) = chars.peek() {
            if c.is_alphanumeric() {
                break;
            }
            chars.next();
        }
        let (start, _) = *chars.peek()?;
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if !c.is_alphanumeric() {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        Some(Token {
            text: &text[start..end],
            start,
            end,
        })
    })
}

/// Cut `text` right after its `max_tokens`-th token.
///
/// Bounds the work every later stage does on pathological input.
pub fn truncate_to_tokens(text: &str, max_tokens: usize) -> &str {
    match tokens(text).nth(max_tokens) {
        Some(_) => {
            let end = tokens(text)
                .take(max_tokens)
                .last()
                .map(|t| t.end)
                .unwrap_or(0);
            &text[..end]
        }
        None => text,
    }
}
