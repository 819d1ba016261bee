// --- File: src/core/dictionary.rs
use crate::core::types::{GlyphCard, GlyphEntry, GlyphId, Token};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whole-word signs bundled with the app alongside the A-Z alphabet.
const BUILTIN_WORD_SIGNS: [&str; 6] = ["Hello", "Thanks", "Sorry", "Please", "Yes", "No"];

/// The immutable glyph dictionary the translator runs against.
///
/// Built once from externally supplied entries and injected into the engine;
/// nothing mutates it afterwards. Single-character keys are letter glyphs,
/// multi-character keys are whole-word signs ("special words").
#[derive(Clone, Serialize, Deserialize)]
pub struct GlyphDictionary {
    entries: Vec<GlyphEntry>,
    /// Case-sensitive exact lookup over stored keys.
    by_key: HashMap<String, GlyphId>,
    /// Case-insensitive whole-word index: lowercased multi-character key
    /// to the id of the entry whose stored casing wins the match.
    word_index: HashMap<String, GlyphId>,
}

impl GlyphDictionary {
    /// Builds the dictionary and its two indexes in one pass.
    /// On duplicate keys the first entry wins, so callers feeding entries in
    /// a deterministic order get a deterministic dictionary.
    pub fn from_entries(entries: Vec<GlyphEntry>) -> Self {
        let mut by_key = HashMap::with_capacity(entries.len());
        let mut word_index = HashMap::new();

        for (id, entry) in entries.iter().enumerate() {
            by_key.entry(entry.key.clone()).or_insert(id);
            if entry.key.chars().count() > 1 {
                word_index.entry(entry.key.to_lowercase()).or_insert(id);
            }
        }

        Self {
            entries,
            by_key,
            word_index,
        }
    }

    /// The glyph set bundled with the app: the A-Z fingerspelling alphabet
    /// plus the whole-word signs shipped as static images.
    pub fn builtin() -> Self {
        let mut entries: Vec<GlyphEntry> = ('A'..='Z')
            .map(|c| GlyphEntry {
                key: c.to_string(),
                asset: format!("assets/signs/{}.png", c),
            })
            .collect();
        entries.extend(BUILTIN_WORD_SIGNS.iter().map(|word| GlyphEntry {
            key: word.to_string(),
            asset: format!("assets/signs/{}.png", word.to_lowercase()),
        }));
        Self::from_entries(entries)
    }

    /// Case-sensitive exact lookup against stored keys.
    pub fn get(&self, key: &str) -> Option<&GlyphEntry> {
        self.by_key.get(key).map(|&id| &self.entries[id])
    }

    /// Case-insensitive whole-word match against the multi-character keys.
    /// Returns the stored casing of the matched key, which is what the
    /// tokenizer must emit as the token.
    pub fn match_word(&self, word: &str) -> Option<&str> {
        self.word_index
            .get(&word.to_lowercase())
            .map(|&id| self.entries[id].key.as_str())
    }

    /// Resolves a token to its renderable card, `None` when the token has
    /// no glyph. Absence is the normal no-match case, not an error.
    pub fn card_for(&self, token: &Token) -> Option<GlyphCard> {
        self.get(&token.lookup_key()).map(GlyphCard::new)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
