use serde::{Deserialize, Serialize};

use crate::models::Photo;

/// Coordinate-space radius, in degrees, for matching a position to a destination.
///
/// Flat Euclidean distance on latitude/longitude, tuned against the built-in
/// catalog. Not a geodesic distance.
pub const PROXIMITY_DEGREES: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub state: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub color: String,
    pub photo_count: usize,
}

impl Destination {
    fn new(
        id: &str,
        name: &str,
        state: &str,
        region: &str,
        (latitude, longitude): (f64, f64),
        description: &str,
        color: &str,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: state.into(),
            region: region.into(),
            latitude,
            longitude,
            description: description.into(),
            color: color.into(),
            photo_count: 0,
        }
    }

    pub fn degree_distance(&self, lat: f64, lng: f64) -> f64 {
        (self.latitude - lat).hypot(self.longitude - lng)
    }

    /// Parse the `#RRGGBB` display color into 0..=1 channels.
    pub fn rgb(&self) -> Option<[f32; 3]> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some([channel(0)?, channel(2)?, channel(4)?])
    }
}

/// Read-only list of destinations, queried by id, name, or position.
#[derive(Clone, Debug)]
pub struct DestinationCatalog {
    destinations: Vec<Destination>,
}

impl DestinationCatalog {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self { destinations }
    }

    /// The built-in India travel destinations.
    pub fn india() -> Self {
        Self::new(vec![
            Destination::new(
                "goa",
                "Goa",
                "Goa",
                "West Coast",
                (15.2993, 74.1240),
                "Beaches, nightlife, and Portuguese heritage",
                "#FF6B6B",
            ),
            Destination::new(
                "jaipur",
                "Jaipur",
                "Rajasthan",
                "North",
                (26.9124, 75.7873),
                "Pink City with royal palaces and forts",
                "#FFE66D",
            ),
            Destination::new(
                "ladakh",
                "Ladakh",
                "Ladakh",
                "North",
                (34.1526, 77.5771),
                "High-altitude desert and Buddhist monasteries",
                "#4ECDC4",
            ),
            Destination::new(
                "kerala",
                "Kerala",
                "Kerala",
                "South",
                (10.8505, 76.2711),
                "Backwaters, beaches, and Ayurveda",
                "#45B7D1",
            ),
            Destination::new(
                "varanasi",
                "Varanasi",
                "Uttar Pradesh",
                "North",
                (25.3176, 82.9739),
                "Spiritual capital on the Ganges",
                "#96CEB4",
            ),
            Destination::new(
                "andaman",
                "Andaman",
                "Andaman & Nicobar Islands",
                "Islands",
                (11.7401, 92.6586),
                "Pristine beaches and marine life",
                "#FFA07A",
            ),
        ])
    }

    pub fn all(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    /// Case-insensitive match on the display name or the state label.
    pub fn find_by_name(&self, name: &str) -> Option<&Destination> {
        let needle = name.to_lowercase();
        self.destinations
            .iter()
            .find(|d| d.name.to_lowercase() == needle || d.state.to_lowercase() == needle)
    }

    /// First destination within [`PROXIMITY_DEGREES`] of the position, in catalog order.
    pub fn find_by_coordinates(&self, lat: f64, lng: f64) -> Option<&Destination> {
        self.destinations
            .iter()
            .find(|d| d.degree_distance(lat, lng) < PROXIMITY_DEGREES)
    }

    /// Copies of every destination with `photo_count` set from the photos' trip ids.
    pub fn with_photo_counts(&self, photos: &[Photo]) -> Vec<Destination> {
        self.destinations
            .iter()
            .map(|d| Destination {
                photo_count: photos
                    .iter()
                    .filter(|p| p.trip_id.as_deref() == Some(d.id.as_str()))
                    .count(),
                ..d.clone()
            })
            .collect()
    }
}

impl Default for DestinationCatalog {
    fn default() -> Self {
        Self::india()
    }
}
