//! Flat-file cache for translated tafsir.
//!
//! Translations are keyed by (language, author, surah, ayah) and stored as
//! plain text files, one per key. The translator core never touches this;
//! the caller decides when to read and write. Two writers racing on the
//! same key produce identical content, so duplicate writes are benign.

use crate::error::CacheError;
use std::fs;
use std::path::PathBuf;

/// Identifies one cached translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Target language code (ISO 639-1).
    pub language: String,
    /// Tafsir author the entry belongs to.
    pub author: String,
    /// Surah number (1-based).
    pub surah: u32,
    /// Ayah number (1-based).
    pub ayah: u32,
}

impl CacheKey {
    /// Creates a new cache key.
    pub fn new(language: &str, author: &str, surah: u32, ayah: u32) -> Self {
        Self {
            language: language.to_string(),
            author: author.to_string(),
            surah,
            ayah,
        }
    }
}

/// Trait for translation caches.
///
/// Implementations store only the final translated text; metadata lives in
/// the key.
pub trait TranslationCache {
    /// Looks up a cached translation, returning `None` on a miss.
    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    /// Stores a translation under the given key, overwriting any previous
    /// entry.
    fn put(&self, key: &CacheKey, translated: &str) -> Result<(), CacheError>;
}

/// Cache backed by per-language/per-author directories of flat text files.
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Creates a cache rooted at the given directory. The directory is
    /// created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the file path for a key:
    /// `<root>/<language>/<author>/surah_<s>_ayah_<a>.txt`.
    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root
            .join(sanitize_component(&key.language))
            .join(sanitize_component(&key.author))
            .join(format!("surah_{:03}_ayah_{:03}.txt", key.surah, key.ayah))
    }
}

impl TranslationCache for FileCache {
    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(CacheError::ReadError)
    }

    fn put(&self, key: &CacheKey, translated: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(CacheError::WriteError)?;
        }
        fs::write(&path, translated).map_err(CacheError::WriteError)
    }
}

/// Replaces characters that are unsafe in file names with underscores.
fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_miss_returns_none() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        let key = CacheKey::new("en", "Ibn Kathir", 2, 255);
        assert_eq!(cache.get(&key).unwrap(), None);
    }

    #[test]
    fn test_put_then_get_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        let key = CacheKey::new("en", "Ibn Kathir", 2, 255);

        cache.put(&key, "The Throne Verse commentary.").unwrap();
        assert_eq!(
            cache.get(&key).unwrap(),
            Some("The Throne Verse commentary.".to_string())
        );
    }

    #[test]
    fn test_keys_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        let first = CacheKey::new("en", "Ibn Kathir", 1, 1);
        let second = CacheKey::new("ur", "Ibn Kathir", 1, 1);
        let third = CacheKey::new("en", "Tabari", 1, 1);

        cache.put(&first, "english").unwrap();
        cache.put(&second, "urdu").unwrap();
        cache.put(&third, "other author").unwrap();

        assert_eq!(cache.get(&first).unwrap(), Some("english".to_string()));
        assert_eq!(cache.get(&second).unwrap(), Some("urdu".to_string()));
        assert_eq!(cache.get(&third).unwrap(), Some("other author".to_string()));
    }

    #[test]
    fn test_overwrite_replaces_entry() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        let key = CacheKey::new("en", "Qurtubi", 36, 1);

        cache.put(&key, "first").unwrap();
        cache.put(&key, "second").unwrap();
        assert_eq!(cache.get(&key).unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_author_names_sanitized() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        let key = CacheKey::new("en", "Ibn / Kathir: الجزء الأول", 1, 7);

        cache.put(&key, "text").unwrap();
        assert_eq!(cache.get(&key).unwrap(), Some("text".to_string()));
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("Ibn Kathir"), "Ibn_Kathir");
        assert_eq!(sanitize_component("a/b:c"), "a_b_c");
        assert_eq!(sanitize_component(""), "_");
        assert_eq!(sanitize_component("تفسير"), "تفسير");
    }
}
