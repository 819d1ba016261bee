// src/core/tokenizer.rs
use crate::core::dictionary::GlyphDictionary;
use crate::core::types::Token;

/// Splits free-form input into glyph-lookup-ready tokens.
///
/// Stateless by design: the token sequence is a pure function of the input
/// text and the dictionary's key set, recomputed from scratch on every read.
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenizes a full input string.
    ///
    /// Words are split on spaces. A word with a case-insensitive whole-word
    /// match among the multi-character keys becomes a single token carrying
    /// the dictionary's stored casing; every other word is exploded into
    /// per-character tokens, non-letters included. Characters with no glyph
    /// survive this pass and are only dropped by the renderable filter.
    pub fn tokenize(&self, text: &str, dictionary: &GlyphDictionary) -> Vec<Token> {
        let mut tokens = Vec::new();
        for word in text.split(' ') {
            match dictionary.match_word(word) {
                Some(stored) => tokens.push(Token::Word(stored.to_string())),
                None => tokens.extend(word.chars().map(Token::Letter)),
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GlyphEntry;

    fn dict(keys: &[&str]) -> GlyphDictionary {
        GlyphDictionary::from_entries(
            keys.iter()
                .map(|key| GlyphEntry {
                    key: key.to_string(),
                    asset: format!("{}.png", key),
                })
                .collect(),
        )
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("", &dict(&["H", "I"])).is_empty());
    }

    #[test]
    fn letters_only_input_explodes_into_characters() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("hi", &dict(&["H", "I"]));
        assert_eq!(tokens, vec![Token::Letter('h'), Token::Letter('i')]);
        let keys: Vec<String> = tokens.iter().map(Token::lookup_key).collect();
        assert_eq!(keys, vec!["H", "I"]);
    }

    #[test]
    fn word_match_wins_over_character_explosion() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("hi there", &dict(&["Hi", "H", "I"]));
        assert_eq!(tokens[0], Token::Word("Hi".to_string()));
        // "there" has no whole-word match, so five letter tokens follow.
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[1], Token::Letter('t'));
        assert_eq!(tokens[5], Token::Letter('e'));
    }

    #[test]
    fn word_match_is_case_insensitive_and_emits_stored_casing() {
        let tokenizer = Tokenizer::new();
        let d = dict(&["Hi"]);
        assert_eq!(
            tokenizer.tokenize("HI", &d),
            vec![Token::Word("Hi".to_string())]
        );
        assert_eq!(
            tokenizer.tokenize("hi", &d),
            vec![Token::Word("Hi".to_string())]
        );
    }

    #[test]
    fn non_letter_characters_are_kept() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("a1!", &dict(&["A"]));
        assert_eq!(
            tokens,
            vec![Token::Letter('a'), Token::Letter('1'), Token::Letter('!')]
        );
    }

    #[test]
    fn repeated_spaces_contribute_nothing() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("a  b", &dict(&["A", "B"]));
        assert_eq!(tokens, vec![Token::Letter('a'), Token::Letter('b')]);
    }

    #[test]
    fn tokenization_is_idempotent() {
        let tokenizer = Tokenizer::new();
        let d = dict(&["Hi", "A"]);
        let first = tokenizer.tokenize("hi a zz", &d);
        let second = tokenizer.tokenize("hi a zz", &d);
        assert_eq!(first, second);
    }
}
