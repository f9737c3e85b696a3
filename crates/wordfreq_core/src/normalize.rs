/// Lowercases `text`, turns every character that is not a letter or `_`
/// into a separator (punctuation and digit runs alike), then joins the
/// surviving tokens with single spaces.
///
/// Lowercasing happens first so characters whose lowercase form is not a
/// word character are dropped in the same pass; that keeps the operation
/// idempotent.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if is_word_char(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Number of whitespace-separated words in already normalized text.
pub fn normalized_word_count(normalized: &str) -> usize {
    normalized.split_whitespace().count()
}

fn is_word_char(c: char) -> bool {
    c == '_' || (c.is_alphabetic() && !c.is_numeric())
}

#[cfg(test)]
mod tests {
    use super::is_word_char;

    #[test]
    fn digits_and_punctuation_are_not_word_chars() {
        for c in ['1', '٣', '.', '\'', '-', ' ', '\n', '½'] {
            assert!(!is_word_char(c), "{c:?}");
        }
        for c in ['a', 'ß', 'é', '_', 'я'] {
            assert!(is_word_char(c), "{c:?}");
        }
    }
}
