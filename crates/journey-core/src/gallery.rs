use tracing::debug;

use journey_catalog::destinations::{Destination, DestinationCatalog};
use journey_catalog::locations::{LocationCount, summarize_locations};
use journey_catalog::models::{Photo, PhotoId};
use journey_catalog::store::{filter_by_location, filter_by_trip};

/// Keys the lightbox responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    Left,
    Right,
}

/// Filtered gallery view with a lightbox selection.
///
/// `all` is only ever replaced wholesale; the filtered view is recomputed
/// from it whenever a filter changes, and the selection is dropped if it
/// no longer belongs to the view.
#[derive(Debug, Default)]
pub struct Gallery {
    all: Vec<Photo>,
    location: Option<String>,
    trip: Option<String>,
    filtered: Vec<Photo>,
    selected: Option<PhotoId>,
}

impl Gallery {
    pub fn new(photos: Vec<Photo>) -> Self {
        let mut gallery = Self {
            all: photos,
            ..Default::default()
        };
        gallery.refilter();
        gallery
    }

    /// Replace the whole collection, e.g. after an upload was persisted.
    pub fn reload(&mut self, photos: Vec<Photo>) {
        self.all = photos;
        self.refilter();
    }

    pub fn select_location(&mut self, location: Option<String>) {
        self.location = location;
        self.refilter();
    }

    pub fn select_trip(&mut self, trip: Option<String>) {
        self.trip = trip;
        self.refilter();
    }

    /// Select the trip, or clear it when it is already selected.
    pub fn toggle_trip(&mut self, trip: &str) {
        if self.trip.as_deref() == Some(trip) {
            self.select_trip(None);
        } else {
            self.select_trip(Some(trip.to_string()));
        }
    }

    fn refilter(&mut self) {
        let by_location = filter_by_location(&self.all, self.location.as_deref());
        self.filtered = filter_by_trip(&by_location, self.trip.as_deref());
        if self.position().is_none() && self.selected.take().is_some() {
            debug!("selected photo left the filtered view");
        }
        debug!(
            location = ?self.location,
            trip = ?self.trip,
            shown = self.filtered.len(),
            total = self.all.len(),
            "gallery filtered"
        );
    }

    pub fn photos(&self) -> &[Photo] {
        &self.all
    }

    pub fn filtered(&self) -> &[Photo] {
        &self.filtered
    }

    pub fn selected_location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn selected_trip(&self) -> Option<&str> {
        self.trip.as_deref()
    }

    pub fn selected_photo(&self) -> Option<&Photo> {
        self.position().map(|i| &self.filtered[i])
    }

    /// Index of the selected photo within the filtered view.
    pub fn position(&self) -> Option<usize> {
        let id = self.selected.as_deref()?;
        self.filtered.iter().position(|p| p.id == id)
    }

    /// Open the lightbox on a photo of the current view.
    pub fn select_photo(&mut self, id: &str) -> bool {
        if self.filtered.iter().any(|p| p.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn has_previous(&self) -> bool {
        self.position().is_some_and(|i| i > 0)
    }

    pub fn has_next(&self) -> bool {
        self.position().is_some_and(|i| i + 1 < self.filtered.len())
    }

    pub fn previous(&mut self) -> bool {
        match self.position() {
            Some(i) if i > 0 => {
                self.selected = Some(self.filtered[i - 1].id.clone());
                true
            }
            _ => false,
        }
    }

    pub fn next(&mut self) -> bool {
        match self.position() {
            Some(i) if i + 1 < self.filtered.len() => {
                self.selected = Some(self.filtered[i + 1].id.clone());
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Returns whether the key changed anything.
    pub fn handle_key(&mut self, key: LightboxKey) -> bool {
        match key {
            LightboxKey::Escape => self.selected.take().is_some(),
            LightboxKey::Left => self.previous(),
            LightboxKey::Right => self.next(),
        }
    }

    pub fn location_summaries(&self) -> Vec<LocationCount> {
        summarize_locations(&self.all)
    }

    pub fn destination_counts(&self, catalog: &DestinationCatalog) -> Vec<Destination> {
        catalog.with_photo_counts(&self.all)
    }
}
