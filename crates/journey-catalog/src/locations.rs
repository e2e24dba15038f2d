use std::collections::BTreeMap;

use crate::models::Photo;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

/// Distinct photo locations, sorted, each with its number of photos.
pub fn summarize_locations(photos: &[Photo]) -> Vec<LocationCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for photo in photos {
        *counts.entry(photo.location.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(location, count)| LocationCount {
            location: location.to_string(),
            count,
        })
        .collect()
}

/// Latitude/longitude window of the destination map and its pixel box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapProjection {
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl MapProjection {
    /// Equirectangular window over the Indian subcontinent.
    pub const INDIA: MapProjection = MapProjection {
        min_lng: 68.0,
        max_lng: 97.0,
        min_lat: 8.0,
        max_lat: 37.0,
        width: 700.0,
        height: 500.0,
        margin: 50.0,
    };

    /// Project to map pixels with north at the top.
    pub fn project(&self, lat: f64, lng: f64) -> (f32, f32) {
        let x = (lng - self.min_lng) / (self.max_lng - self.min_lng);
        let y = (self.max_lat - lat) / (self.max_lat - self.min_lat);
        (
            x as f32 * self.width + self.margin,
            y as f32 * self.height + self.margin,
        )
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        (
            self.width + 2.0 * self.margin,
            self.height + 2.0 * self.margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::sample_photos;

    #[test]
    fn summary_is_sorted_with_counts() {
        let photos = sample_photos();
        let summary = summarize_locations(&photos);
        let names: Vec<_> = summary.iter().map(|l| l.location.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let total: usize = summary.iter().map(|l| l.count).sum();
        assert_eq!(total, photos.len());

        let goa = summary.iter().find(|l| l.location == "Goa").unwrap();
        assert_eq!(goa.count, 2);
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        assert!(summarize_locations(&[]).is_empty());
    }

    #[test]
    fn projection_corners() {
        let p = MapProjection::INDIA;
        assert_eq!(p.project(37.0, 68.0), (50.0, 50.0));
        assert_eq!(p.project(8.0, 97.0), (750.0, 550.0));
        assert_eq!(p.canvas_size(), (800.0, 600.0));
    }

    #[test]
    fn north_is_up() {
        let p = MapProjection::INDIA;
        let (_, ladakh_y) = p.project(34.15, 77.57);
        let (_, kerala_y) = p.project(10.85, 76.27);
        assert!(ladakh_y < kerala_y);
    }
}
