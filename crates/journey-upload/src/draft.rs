use std::path::Path;

use image::ImageFormat;
use tracing::debug;

use journey_catalog::destinations::{Destination, DestinationCatalog};
use journey_catalog::models::{Tags, UNKNOWN_LOCATION};

use crate::error::UploadError;

/// A local file picked for upload.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Accept only names whose extension maps to an image format.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let name = name.into();
        if ImageFormat::from_path(Path::new(&name)).is_err() {
            return Err(UploadError::NotAnImage(name));
        }
        Ok(Self { name, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Validated form fields that travel with an upload.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoMeta {
    pub caption: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tags: Tags,
    pub trip_id: Option<String>,
}

/// Editable upload form state.
#[derive(Debug, Default)]
pub struct UploadDraft {
    pub file: Option<SelectedFile>,
    pub caption: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub destination: Option<String>,
    pub tags: Tags,
    pub tag_input: String,
}

impl UploadDraft {
    /// Move the pending tag input into the tag set.
    pub fn add_tag(&mut self) -> bool {
        let added = self.tags.insert(&self.tag_input);
        if added {
            self.tag_input.clear();
        }
        added
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub fn choose_destination(&mut self, destination: Option<&Destination>) {
        match destination {
            Some(d) => {
                self.destination = Some(d.id.clone());
                self.location = d.name.clone();
            }
            None => self.destination = None,
        }
    }

    /// Record coordinates and pick the nearby destination, if any.
    pub fn set_coordinates<'c>(
        &mut self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        catalog: &'c DestinationCatalog,
    ) -> Option<&'c Destination> {
        self.latitude = latitude;
        self.longitude = longitude;
        let found = catalog.find_by_coordinates(latitude?, longitude?)?;
        debug!(destination = %found.id, "coordinates matched destination");
        self.choose_destination(Some(found));
        Some(found)
    }

    /// Check the form and produce the metadata for an upload.
    ///
    /// `default_trip` applies when no destination was chosen.
    pub fn validate(
        &self,
        default_trip: Option<&str>,
    ) -> Result<(&SelectedFile, PhotoMeta), UploadError> {
        let file = self.file.as_ref().ok_or(UploadError::MissingFile)?;
        let caption = self.caption.trim();
        if caption.is_empty() {
            return Err(UploadError::EmptyCaption);
        }
        let location = match self.location.trim() {
            "" => UNKNOWN_LOCATION.to_string(),
            l => l.to_string(),
        };
        let trip_id = self
            .destination
            .clone()
            .or_else(|| default_trip.map(str::to_string));

        Ok((
            file,
            PhotoMeta {
                caption: caption.to_string(),
                location,
                latitude: self.latitude,
                longitude: self.longitude,
                tags: self.tags.clone(),
                trip_id,
            },
        ))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_file() -> UploadDraft {
        UploadDraft {
            file: Some(SelectedFile::new("beach.jpg", vec![1, 2, 3]).unwrap()),
            caption: "  Sunset  ".into(),
            ..Default::default()
        }
    }

    #[test]
    fn non_image_names_are_rejected() {
        assert!(matches!(
            SelectedFile::new("notes.txt", vec![]),
            Err(UploadError::NotAnImage(_))
        ));
        assert!(SelectedFile::new("IMG_0001.PNG", vec![]).is_ok());
    }

    #[test]
    fn missing_file_fails_first() {
        let draft = UploadDraft {
            caption: "x".into(),
            ..Default::default()
        };
        assert!(matches!(draft.validate(None), Err(UploadError::MissingFile)));
    }

    #[test]
    fn blank_caption_is_rejected() {
        let mut draft = with_file();
        draft.caption = "   ".into();
        assert!(matches!(draft.validate(None), Err(UploadError::EmptyCaption)));
    }

    #[test]
    fn defaults_fill_in() {
        let draft = with_file();
        let (file, meta) = draft.validate(Some("kerala")).unwrap();
        assert_eq!(file.name, "beach.jpg");
        assert_eq!(meta.caption, "Sunset");
        assert_eq!(meta.location, UNKNOWN_LOCATION);
        assert_eq!(meta.trip_id.as_deref(), Some("kerala"));
    }

    #[test]
    fn chosen_destination_beats_default_trip() {
        let catalog = DestinationCatalog::india();
        let mut draft = with_file();
        draft.choose_destination(catalog.get("jaipur"));
        let (_, meta) = draft.validate(Some("kerala")).unwrap();
        assert_eq!(meta.trip_id.as_deref(), Some("jaipur"));
        assert_eq!(meta.location, "Jaipur");
    }

    #[test]
    fn tags_trim_and_dedupe() {
        let mut draft = with_file();
        draft.tag_input = " beach ".into();
        assert!(draft.add_tag());
        assert!(draft.tag_input.is_empty());
        draft.tag_input = "beach".into();
        assert!(!draft.add_tag());
        assert_eq!(draft.tag_input, "beach");
        draft.tag_input = "  ".into();
        assert!(!draft.add_tag());
        assert_eq!(draft.tags.as_slice(), ["beach"]);
        assert!(draft.remove_tag("beach"));
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn coordinates_detect_destination() {
        let catalog = DestinationCatalog::india();
        let mut draft = with_file();
        let found = draft.set_coordinates(Some(15.30), Some(74.12), &catalog);
        assert_eq!(found.map(|d| d.id.as_str()), Some("goa"));
        assert_eq!(draft.destination.as_deref(), Some("goa"));
        assert_eq!(draft.location, "Goa");
    }

    #[test]
    fn far_coordinates_keep_form() {
        let catalog = DestinationCatalog::india();
        let mut draft = with_file();
        draft.location = "Somewhere".into();
        assert!(draft.set_coordinates(Some(0.0), Some(0.0), &catalog).is_none());
        assert_eq!(draft.location, "Somewhere");
        assert_eq!(draft.latitude, Some(0.0));
        assert!(draft.destination.is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut draft = with_file();
        draft.reset();
        assert!(draft.file.is_none());
        assert!(draft.caption.is_empty());
    }
}
