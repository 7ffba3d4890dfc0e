// Word tokenizer shared by fitting and projection.
//
// Lower-cases the input and emits maximal runs of word characters (Unicode
// alphanumerics and underscore). Single-character runs are dropped, so "a"
// and "I" never enter the vocabulary.

/// Minimum token length, in characters.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Split `text` into lower-cased word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits_punctuation() {
        assert_eq!(
            tokenize("The Quick, brown-fox!"),
            vec!["the", "quick", "brown", "fox"]
        );
    }

    #[test]
    fn test_drops_single_chars() {
        assert_eq!(tokenize("a b cd I"), vec!["cd"]);
    }

    #[test]
    fn test_keeps_underscores_and_digits() {
        assert_eq!(tokenize("snake_case v2 42"), vec!["snake_case", "v2", "42"]);
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(tokenize("Élève déjà"), vec!["élève", "déjà"]);
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ... ").is_empty());
    }
}
