// File: src/persistence.rs
use crate::core::dictionary::GlyphDictionary;
use crate::core::types::GlyphEntry;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Error};
use std::path::Path;
use tempfile::NamedTempFile;

/// On-disk manifest shape: glyph key to bundled image asset path.
/// A BTreeMap keeps manifest iteration (and so duplicate-key resolution)
/// deterministic.
type Manifest = BTreeMap<String, String>;

/// Reads a hand-edited JSON manifest and builds the dictionary from it.
pub fn load_manifest(path: &Path) -> Result<GlyphDictionary, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let manifest: Manifest = serde_json::from_reader(reader)?;

    let entries = manifest
        .into_iter()
        .map(|(key, asset)| GlyphEntry { key, asset })
        .collect();
    Ok(GlyphDictionary::from_entries(entries))
}

/// Writes the compiled dictionary to its binary cache.
/// The write goes through a temp file in the destination directory and is
/// persisted atomically, so a crash never leaves a half-written cache.
pub fn save_compiled(dictionary: &GlyphDictionary, path: &Path) -> Result<(), Error> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    bincode::serialize_into(writer, dictionary)
        .map_err(|e| Error::new(std::io::ErrorKind::Other, e))?;

    temp_file.persist(path)?;
    Ok(())
}

/// Loads a previously compiled dictionary cache.
pub fn load_compiled(path: &Path) -> Result<GlyphDictionary, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let dictionary: GlyphDictionary = bincode::deserialize_from(reader)?;
    Ok(dictionary)
}
