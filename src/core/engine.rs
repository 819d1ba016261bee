use crate::core::dictionary::GlyphDictionary;
use crate::core::playback::{PlaybackController, PlaybackState, TickOutcome};
use crate::core::tokenizer::Tokenizer;
use crate::core::types::{GlyphCard, Token};
use crate::persistence::{load_compiled, load_manifest, save_compiled};
use std::path::Path;
use std::time::Duration;

/// Fixed slideshow frame period.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// The translator screen's engine: dictionary, tokenizer and playback wired
/// around the live input text.
///
/// The dictionary is injected at construction and immutable from then on,
/// which keeps every derived view a pure function of (text, dictionary,
/// state, cursor). All mutation happens through the three event entry
/// points: `set_text`, `toggle_playback` and `tick`.
pub struct TranslatorEngine {
    pub dictionary: GlyphDictionary,
    tokenizer: Tokenizer,
    playback: PlaybackController,
    text: String,
    cache_path: Option<String>,
}

impl TranslatorEngine {
    pub fn new(dictionary: GlyphDictionary) -> Self {
        Self {
            dictionary,
            tokenizer: Tokenizer::new(),
            playback: PlaybackController::new(),
            text: String::new(),
            cache_path: None,
        }
    }

    /// Loads the compiled dictionary cache at `path`, falling back to the
    /// built-in glyph set when the cache is missing or unreadable.
    pub fn from_file_or_new(path: &str) -> Self {
        let dictionary =
            load_compiled(Path::new(path)).unwrap_or_else(|_| GlyphDictionary::builtin());
        let mut engine = Self::new(dictionary);
        engine.cache_path = Some(path.to_string());
        engine
    }

    /// Builds the engine from a hand-edited JSON manifest when one is
    /// present, keeping the cache path so the compiled form is persisted for
    /// the next start; otherwise falls back to the cache, then to the
    /// built-in set.
    pub fn from_manifest_or_cache(manifest_path: &str, cache_path: &str) -> Self {
        match load_manifest(Path::new(manifest_path)) {
            Ok(dictionary) => {
                let mut engine = Self::new(dictionary);
                engine.cache_path = Some(cache_path.to_string());
                engine
            }
            Err(_) => Self::from_file_or_new(cache_path),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the input text (one call per keystroke). Playback keeps
    /// running; the next tick recomputes its length from the new text.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
        }
    }

    /// The raw token sequence for the current text, recomputed from scratch.
    /// Unmatched tokens are still present here; only `renderable` drops them.
    pub fn tokens(&self) -> Vec<Token> {
        self.tokenizer.tokenize(&self.text, &self.dictionary)
    }

    /// Tokens narrowed, order preserved, to the ones with a resolvable
    /// glyph. The gallery and the slideshow both index this one sequence,
    /// so the two views always agree on what counts.
    pub fn renderable(&self) -> Vec<GlyphCard> {
        self.tokens()
            .iter()
            .filter_map(|token| self.dictionary.card_for(token))
            .collect()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn cursor(&self) -> usize {
        self.playback.cursor()
    }

    /// The single play/stop control.
    pub fn toggle_playback(&mut self) -> PlaybackState {
        self.playback.toggle()
    }

    /// Advances the slideshow one frame. The renderable length is recomputed
    /// from the live text, so edits made mid-playback shorten or extend the
    /// remaining run.
    pub fn tick(&mut self) -> TickOutcome {
        let renderable_len = self.renderable().len();
        self.playback.tick(renderable_len)
    }

    /// The one card on screen in slideshow mode, `None` while idle or when
    /// nothing is renderable.
    pub fn current_card(&self) -> Option<GlyphCard> {
        if !self.playback.is_playing() {
            return None;
        }
        let cards = self.renderable();
        self.playback
            .current(cards.len())
            .map(|index| cards[index].clone())
    }

    /// All cards for the static gallery strip. Empty while the slideshow
    /// runs, and empty when nothing is renderable.
    pub fn gallery(&self) -> Vec<GlyphCard> {
        if self.playback.is_playing() {
            return Vec::new();
        }
        self.renderable()
    }

    /// How long until the host should call `tick`; `None` while idle.
    /// The host must drop any pending timer whenever text, cursor or the
    /// playing flag changes and re-arm from this value, keeping at most one
    /// timer pending.
    pub fn tick_interval(&self) -> Option<Duration> {
        if self.playback.is_playing() {
            Some(TICK_INTERVAL)
        } else {
            None
        }
    }

    /// Persists the compiled dictionary cache, a no-op when the engine was
    /// built without a cache path.
    pub fn save_dictionary(&self) -> Result<(), std::io::Error> {
        if let Some(path) = &self.cache_path {
            save_compiled(&self.dictionary, Path::new(path))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GlyphEntry;

    fn engine_with(keys: &[&str]) -> TranslatorEngine {
        TranslatorEngine::new(GlyphDictionary::from_entries(
            keys.iter()
                .map(|key| GlyphEntry {
                    key: key.to_string(),
                    asset: format!("{}.png", key),
                })
                .collect(),
        ))
    }

    #[test]
    fn renderable_filter_preserves_order_and_drops_missing() {
        let mut engine = engine_with(&["A"]);
        engine.set_text("ab");
        let tokens = engine.tokens();
        assert_eq!(tokens, vec![Token::Letter('a'), Token::Letter('b')]);

        // B has no glyph: exactly one card, no placeholder for the gap.
        let cards = engine.renderable();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].key, "A");
    }

    #[test]
    fn gallery_and_slideshow_swap_with_the_toggle() {
        let mut engine = engine_with(&["A", "B"]);
        engine.set_text("ab");
        assert_eq!(engine.gallery().len(), 2);
        assert!(engine.current_card().is_none());

        engine.toggle_playback();
        assert!(engine.gallery().is_empty());
        assert_eq!(engine.current_card().unwrap().key, "A");

        engine.tick();
        assert_eq!(engine.current_card().unwrap().key, "B");
    }

    #[test]
    fn playback_runs_the_filtered_sequence_to_its_end() {
        let mut engine = engine_with(&["A", "B", "C"]);
        engine.set_text("abc");
        engine.toggle_playback();

        assert_eq!(engine.tick(), TickOutcome::Advanced(1));
        assert_eq!(engine.tick(), TickOutcome::Advanced(2));
        assert_eq!(engine.tick(), TickOutcome::Finished);
        assert_eq!(engine.playback_state(), PlaybackState::Idle);
        assert!(engine.tick_interval().is_none());
    }

    #[test]
    fn live_edit_during_playback_uses_the_new_length() {
        let mut engine = engine_with(&["A", "B", "C", "D"]);
        engine.set_text("abcd");
        engine.toggle_playback();
        engine.tick();
        engine.tick();
        assert_eq!(engine.cursor(), 2);

        // Edited down to three renderable cards: cursor 2 is now the last.
        engine.set_text("abc");
        assert_eq!(engine.tick(), TickOutcome::Finished);
    }

    #[test]
    fn empty_filtered_sequence_renders_nothing_in_either_view() {
        let mut engine = engine_with(&["A"]);
        engine.set_text("!!!");
        assert!(engine.gallery().is_empty());

        engine.toggle_playback();
        assert!(engine.current_card().is_none());
        assert_eq!(engine.tick(), TickOutcome::Finished);
    }

    #[test]
    fn startup_prefers_manifest_then_cache_then_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("glyph_manifest.json");
        let cache = dir.path().join("glyph_dictionary.bin");
        std::fs::write(&manifest, r#"{"X": "x.png"}"#).unwrap();

        let manifest_str = manifest.to_str().unwrap();
        let cache_str = cache.to_str().unwrap();

        let engine = TranslatorEngine::from_manifest_or_cache(manifest_str, cache_str);
        assert_eq!(engine.dictionary.len(), 1);
        engine.save_dictionary().unwrap();

        // Manifest gone: the compiled cache is picked up next.
        std::fs::remove_file(&manifest).unwrap();
        let engine = TranslatorEngine::from_manifest_or_cache(manifest_str, cache_str);
        assert_eq!(engine.dictionary.len(), 1);

        // Nothing on disk at all: the built-in set.
        std::fs::remove_file(&cache).unwrap();
        let engine = TranslatorEngine::from_manifest_or_cache(manifest_str, cache_str);
        assert!(engine.dictionary.len() > 26);
    }

    #[test]
    fn tick_interval_tracks_the_playing_flag() {
        let mut engine = engine_with(&["A", "B"]);
        engine.set_text("ab");
        assert!(engine.tick_interval().is_none());
        engine.toggle_playback();
        assert_eq!(engine.tick_interval(), Some(TICK_INTERVAL));
        engine.toggle_playback();
        assert!(engine.tick_interval().is_none());
    }
}
