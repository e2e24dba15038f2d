use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::db::BlobStore;
use crate::models::Photo;

/// Photo collection for the gallery: a user's uploads (most recent first)
/// followed by the fixed sample set.
///
/// Every read and write of the persisted collection goes through here.
pub struct PhotoStore<B> {
    blobs: B,
    samples: Vec<Photo>,
}

pub fn blob_key(user_key: &str) -> String {
    format!("photos_{user_key}")
}

impl<B: BlobStore> PhotoStore<B> {
    pub fn new(blobs: B, samples: Vec<Photo>) -> Self {
        Self { blobs, samples }
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn samples(&self) -> &[Photo] {
        &self.samples
    }

    /// Uploaded photos for a user. Missing, unreadable or malformed blobs read as empty.
    pub fn uploaded(&self, user_key: &str) -> Vec<Photo> {
        let key = blob_key(user_key);
        match self.blobs.get(&key) {
            Ok(raw) => parse_photos(&key, raw.as_deref()),
            Err(err) => {
                warn!(%err, key, "failed to read photo blob, treating as empty");
                Vec::new()
            }
        }
    }

    /// Uploads ahead of samples. Never fails.
    pub fn load_all(&self, user_key: &str) -> Vec<Photo> {
        let mut photos = self.uploaded(user_key);
        let uploaded = photos.len();
        photos.extend(self.samples.iter().cloned());
        debug!(user_key, uploaded, total = photos.len(), "loaded photos");
        photos
    }

    /// Prepend a photo to the user's persisted collection and write it back whole.
    pub fn append(&self, user_key: &str, photo: Photo) -> Result<()> {
        let key = blob_key(user_key);
        let raw = self
            .blobs
            .get(&key)
            .with_context(|| format!("failed to read {key} before appending"))?;
        let mut photos = parse_photos(&key, raw.as_deref());
        let id = photo.id.clone();
        photos.insert(0, photo);
        let json = serde_json::to_string(&photos).context("failed to serialize photos")?;
        self.blobs.put(&key, &json)?;
        info!(user_key, %id, total = photos.len(), "photo saved");
        Ok(())
    }
}

/// Only a malformed blob is dropped; a failed read never reaches here.
fn parse_photos(key: &str, raw: Option<&str>) -> Vec<Photo> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<Photo>>(raw) {
        Ok(photos) => photos,
        Err(err) => {
            warn!(%err, key, "malformed photo blob, treating as empty");
            Vec::new()
        }
    }
}

pub fn filter_by_location(photos: &[Photo], location: Option<&str>) -> Vec<Photo> {
    match location {
        None => photos.to_vec(),
        Some(location) => photos
            .iter()
            .filter(|p| p.location == location)
            .cloned()
            .collect(),
    }
}

pub fn filter_by_trip(photos: &[Photo], trip_id: Option<&str>) -> Vec<Photo> {
    match trip_id {
        None => photos.to_vec(),
        Some(trip_id) => photos
            .iter()
            .filter(|p| p.trip_id.as_deref() == Some(trip_id))
            .cloned()
            .collect(),
    }
}
