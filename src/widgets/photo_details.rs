use iced::Element;
use iced::widget::{column, container, row, text};

use journey_catalog::models::Photo;

use crate::app::Message;

/// Label/value pairs shown next to the lightbox image.
pub fn detail_rows(photo: &Photo) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Location", photo.location.clone()),
        ("Date", photo.uploaded_at.format("%B %-d, %Y").to_string()),
    ];
    if let Some((lat, lng)) = photo.coordinates() {
        rows.push(("Coordinates", format!("{lat:.4}, {lng:.4}")));
    }
    if !photo.tags.is_empty() {
        rows.push(("Tags", photo.tags.joined(", ")));
    }
    if let (Some(w), Some(h)) = (photo.width, photo.height) {
        rows.push(("Size", format!("{w} x {h}")));
    }
    if photo.file_size > 0 {
        rows.push(("File", format!("{} KB", photo.file_size / 1024)));
    }
    rows
}

pub fn view(photo: &Photo) -> Element<'_, Message> {
    let mut items: Vec<Element<'_, Message>> = vec![text(photo.caption.as_str()).size(18).into()];

    for (key, value) in detail_rows(photo) {
        items.push(
            row![text(format!("{key}:")).size(12), text(value).size(12)]
                .spacing(8)
                .into(),
        );
    }

    container(column(items).spacing(6)).padding(10).into()
}

#[cfg(test)]
mod tests {
    use journey_catalog::models::Tags;

    use super::*;

    fn photo() -> Photo {
        Photo {
            id: "p1".into(),
            url: "https://example.com/p1.jpg".into(),
            thumbnail_url: None,
            caption: "Sunset".into(),
            location: "Goa".into(),
            latitude: Some(15.2993),
            longitude: Some(74.124),
            tags: ["beach", "sunset"].into_iter().collect::<Tags>(),
            trip_id: Some("goa".into()),
            uploaded_at: "2025-03-01T12:00:00Z".parse().unwrap(),
            file_name: "p1.jpg".into(),
            file_size: 4096,
            width: None,
            height: None,
        }
    }

    #[test]
    fn rows_for_full_photo() {
        let rows = detail_rows(&photo());
        assert_eq!(rows[0], ("Location", "Goa".to_string()));
        assert_eq!(rows[1], ("Date", "March 1, 2025".to_string()));
        assert!(rows.contains(&("Coordinates", "15.2993, 74.1240".to_string())));
        assert!(rows.contains(&("Tags", "beach, sunset".to_string())));
        assert!(rows.contains(&("File", "4 KB".to_string())));
        assert!(!rows.iter().any(|(k, _)| *k == "Size"));
    }

    #[test]
    fn optional_rows_are_skipped() {
        let mut photo = photo();
        photo.latitude = None;
        photo.tags = Tags::new();
        photo.file_size = 0;
        let keys: Vec<_> = detail_rows(&photo).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Location", "Date"]);
    }
}
