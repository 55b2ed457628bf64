//! Tafsir corpus loading.
//!
//! The corpus is a directory of per-author subdirectories, each holding
//! JSON files that contain arrays of tafsir entries. A malformed file is
//! skipped with a warning; it never aborts the load.

use crate::console::console;
use crate::error::CorpusError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One tafsir record: an author's commentary on a single ayah.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TafsirEntry {
    /// Surah number (1-114).
    pub surah_number: u32,

    /// Surah name in Arabic script.
    pub surah_name_arabic: String,

    /// Surah name transliterated/translated into English.
    pub surah_name_english: String,

    /// Ayah number within the surah (1-based).
    pub ayah_number: u32,

    /// The commentary text in its source language.
    pub tafsir_text: String,

    /// Display name of the author, when the file carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tafsir_author: Option<String>,

    /// Author directory this entry was loaded from. Filled by the loader.
    #[serde(default)]
    pub author: String,

    /// File this entry was loaded from. Filled by the loader.
    #[serde(default)]
    pub source_file: String,
}

/// In-memory tafsir corpus, indexed by author, surah, and ayah.
pub struct TafsirLibrary {
    entries: Vec<TafsirEntry>,
}

impl TafsirLibrary {
    /// Loads every `<base_dir>/<author>/*.json` file.
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    /// Directory order is sorted so repeated loads see entries in the same
    /// order.
    pub fn load(base_dir: &Path) -> Result<Self, CorpusError> {
        if !base_dir.is_dir() {
            return Err(CorpusError::MissingDataDir(
                base_dir.display().to_string(),
            ));
        }

        let mut author_dirs: Vec<_> = fs::read_dir(base_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        author_dirs.sort();

        let mut entries = Vec::new();
        for author_dir in author_dirs {
            let author = match author_dir.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            let mut files: Vec<_> = fs::read_dir(&author_dir)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .collect();
            files.sort();

            for file in files {
                match load_entry_file(&file) {
                    Ok(loaded) => {
                        let source_file = file
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or_default()
                            .to_string();
                        for mut entry in loaded {
                            entry.author = author.clone();
                            entry.source_file = source_file.clone();
                            entries.push(entry);
                        }
                    }
                    Err(reason) => {
                        console().warning(&format!(
                            "Skipping {}: {}",
                            file.display(),
                            reason
                        ));
                    }
                }
            }
        }

        Ok(Self { entries })
    }

    /// Returns the number of entries in the corpus.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries were loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all entries.
    pub fn entries(&self) -> &[TafsirEntry] {
        &self.entries
    }

    /// Returns the sorted list of authors present in the corpus.
    pub fn authors(&self) -> Vec<&str> {
        let mut authors: Vec<&str> = self.entries.iter().map(|e| e.author.as_str()).collect();
        authors.sort_unstable();
        authors.dedup();
        authors
    }

    /// Returns the sorted surah numbers available for an author.
    pub fn surahs(&self, author: &str) -> Vec<u32> {
        let mut surahs: Vec<u32> = self
            .entries
            .iter()
            .filter(|e| e.author == author)
            .map(|e| e.surah_number)
            .collect();
        surahs.sort_unstable();
        surahs.dedup();
        surahs
    }

    /// Finds the entry for an author, surah, and ayah.
    pub fn find(&self, author: &str, surah: u32, ayah: u32) -> Option<&TafsirEntry> {
        self.entries.iter().find(|e| {
            e.author == author && e.surah_number == surah && e.ayah_number == ayah
        })
    }
}

/// Reads one JSON file of entries, reporting the failure reason as text.
fn load_entry_file(path: &Path) -> Result<Vec<TafsirEntry>, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}
