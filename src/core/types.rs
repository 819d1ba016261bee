// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A unique identifier for a glyph entry in the dictionary.
pub type GlyphId = usize;

/// A single sign glyph as shipped in the app bundle.
/// The asset is an opaque handle (a bundle-relative image path); the engine
/// only checks for its existence and never decodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphEntry {
    /// Lookup key, stored casing. Length 1 means a letter glyph,
    /// anything longer is a whole-word sign.
    pub key: String,
    pub asset: String,
}

/// One unit of translated output.
///
/// A `Word` token always carries the dictionary's stored casing for its key,
/// never the casing the user typed. That keeps the later case-sensitive
/// lookup in agreement with the case-insensitive word match that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A whole special word that matched a multi-character dictionary key.
    Word(String),
    /// A single character of a word that had no whole-word match.
    Letter(char),
}

impl Token {
    /// The key used to look this token up in the glyph dictionary.
    /// Word tokens are already stored keys; letters map to their uppercase
    /// glyph. Non-letter characters uppercase to themselves and simply miss.
    pub fn lookup_key(&self) -> String {
        match self {
            Token::Word(word) => word.clone(),
            Token::Letter(c) => c.to_uppercase().collect(),
        }
    }
}

/// What a view actually renders: a resolved glyph.
/// The key doubles as the caption under the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphCard {
    pub key: String,
    pub asset: String,
}

impl GlyphCard {
    pub fn new(entry: &GlyphEntry) -> Self {
        Self {
            key: entry.key.clone(),
            asset: entry.asset.clone(),
        }
    }
}
