use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Cache key for a remote image: blake3 of the URL, hex encoded.
pub fn url_key(url: &str) -> String {
    blake3::hash(url.as_bytes()).to_hex().to_string()
}

/// Disk-backed image cache keyed by URL hash.
pub struct ImageCache {
    cache_dir: PathBuf,
}

impl ImageCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("create cache dir: {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    /// Where the bytes for `key` live; the first two characters pick a bucket.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let bucket = &key[..2.min(key.len())];
        self.cache_dir.join(bucket).join(format!("{key}.img"))
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entry_path(&url_key(url)).exists()
    }

    pub fn store(&self, url: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.entry_path(&url_key(url));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data).with_context(|| format!("write cached image: {}", path.display()))?;
        debug!(?path, url, "cached image");
        Ok(path)
    }

    pub fn load(&self, url: &str) -> Option<Vec<u8>> {
        fs::read(self.entry_path(&url_key(url))).ok()
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://ik.imagekit.io/x6qhu235f/samples/goa-beach.jpg";

    #[test]
    fn store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::new(dir.path().join("images")).unwrap();
        assert!(!cache.contains(URL));

        let path = cache.store(URL, b"jpeg bytes").unwrap();
        assert!(path.exists());
        assert!(cache.contains(URL));
        assert_eq!(cache.load(URL).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn missing_entry_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::new(dir.path().to_path_buf()).unwrap();
        assert!(cache.load("https://example.com/none.jpg").is_none());
    }

    #[test]
    fn keys_are_bucketed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::new(dir.path().to_path_buf()).unwrap();
        let key = url_key(URL);
        assert_eq!(key.len(), 64);
        let path = cache.entry_path(&key);
        assert_eq!(path.parent().unwrap(), dir.path().join(&key[..2]));
    }

    #[test]
    fn transformed_urls_are_distinct_entries() {
        let thumb = format!("{URL}?tr=w-300,h-300,c-at_max");
        assert_ne!(url_key(URL), url_key(&thumb));
    }

    #[test]
    fn overwrite_replaces_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::new(dir.path().to_path_buf()).unwrap();
        cache.store(URL, b"v1").unwrap();
        cache.store(URL, b"v2").unwrap();
        assert_eq!(cache.load(URL).unwrap(), b"v2");
        assert_eq!(cache.cache_dir(), dir.path());
    }
}
