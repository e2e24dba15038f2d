use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Photo, Tags};

const SAMPLE_BASE: &str = "https://ik.imagekit.io/x6qhu235f/samples";

struct Sample {
    id: &'static str,
    file: &'static str,
    caption: &'static str,
    location: &'static str,
    trip: &'static str,
    coords: (f64, f64),
    tags: &'static [&'static str],
    taken: (i32, u32, u32),
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "sample-goa-1",
        file: "goa-palolem-sunset.jpg",
        caption: "Golden hour on Palolem beach",
        location: "Goa",
        trip: "goa",
        coords: (15.0100, 74.0232),
        tags: &["Beach", "Sunset"],
        taken: (2024, 12, 28),
    },
    Sample {
        id: "sample-goa-2",
        file: "goa-fontainhas.jpg",
        caption: "Painted houses of Fontainhas",
        location: "Goa",
        trip: "goa",
        coords: (15.4989, 73.8278),
        tags: &["Heritage", "Streets"],
        taken: (2024, 12, 30),
    },
    Sample {
        id: "sample-jaipur-1",
        file: "jaipur-hawa-mahal.jpg",
        caption: "Morning light on Hawa Mahal",
        location: "Jaipur",
        trip: "jaipur",
        coords: (26.9239, 75.8267),
        tags: &["Palace", "Architecture"],
        taken: (2024, 11, 3),
    },
    Sample {
        id: "sample-ladakh-1",
        file: "ladakh-pangong.jpg",
        caption: "Blue hour at Pangong Tso",
        location: "Ladakh",
        trip: "ladakh",
        coords: (33.7595, 78.6674),
        tags: &["Lake", "Mountains"],
        taken: (2024, 8, 14),
    },
    Sample {
        id: "sample-ladakh-2",
        file: "ladakh-thiksey.jpg",
        caption: "Prayer flags above Thiksey Monastery",
        location: "Ladakh",
        trip: "ladakh",
        coords: (34.0558, 77.6673),
        tags: &["Monastery"],
        taken: (2024, 8, 16),
    },
    Sample {
        id: "sample-kerala-1",
        file: "kerala-alleppey.jpg",
        caption: "Houseboat drifting through Alleppey",
        location: "Kerala",
        trip: "kerala",
        coords: (9.4981, 76.3388),
        tags: &["Backwaters", "Boats"],
        taken: (2024, 1, 20),
    },
    Sample {
        id: "sample-varanasi-1",
        file: "varanasi-ganga-aarti.jpg",
        caption: "Evening aarti at Dashashwamedh Ghat",
        location: "Varanasi",
        trip: "varanasi",
        coords: (25.3069, 83.0104),
        tags: &["Ghats", "Spiritual"],
        taken: (2024, 3, 9),
    },
    Sample {
        id: "sample-andaman-1",
        file: "andaman-radhanagar.jpg",
        caption: "Turquoise water at Radhanagar",
        location: "Andaman",
        trip: "andaman",
        coords: (11.9840, 92.9510),
        tags: &[],
        taken: (2024, 2, 2),
    },
];

/// The fixed sample photos shown to every user ahead of any upload.
pub fn sample_photos() -> Vec<Photo> {
    SAMPLES.iter().map(to_photo).collect()
}

fn to_photo(sample: &Sample) -> Photo {
    let (y, m, d) = sample.taken;
    let uploaded_at: DateTime<Utc> = Utc
        .with_ymd_and_hms(y, m, d, 9, 0, 0)
        .single()
        .unwrap_or_default();
    Photo {
        id: sample.id.to_string(),
        url: format!("{SAMPLE_BASE}/{}", sample.file),
        thumbnail_url: None,
        caption: sample.caption.to_string(),
        location: sample.location.to_string(),
        latitude: Some(sample.coords.0),
        longitude: Some(sample.coords.1),
        tags: sample.tags.iter().copied().collect::<Tags>(),
        trip_id: Some(sample.trip.to_string()),
        uploaded_at,
        file_name: sample.file.to_string(),
        file_size: 0,
        width: None,
        height: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sample_ids_are_unique() {
        let photos = sample_photos();
        let ids: HashSet<_> = photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), photos.len());
    }

    #[test]
    fn samples_fill_a_carousel() {
        assert!(sample_photos().len() >= 8);
    }

    #[test]
    fn sample_trips_exist_in_catalog() {
        let catalog = crate::destinations::DestinationCatalog::india();
        for photo in sample_photos() {
            let trip = photo.trip_id.as_deref().unwrap();
            assert!(catalog.get(trip).is_some(), "unknown trip {trip}");
        }
    }
}
