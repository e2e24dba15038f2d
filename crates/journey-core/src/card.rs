use journey_catalog::models::{Photo, PhotoId};

/// Most cards a carousel is built with.
pub const CAROUSEL_CARD_LIMIT: usize = 8;
pub const DEFAULT_BADGE: &str = "Travel";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeVariant {
    Pink,
    Indigo,
    Orange,
}

impl BadgeVariant {
    pub const PALETTE: [BadgeVariant; 3] =
        [BadgeVariant::Pink, BadgeVariant::Indigo, BadgeVariant::Orange];

    pub fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    pub text: String,
    pub variant: BadgeVariant,
}

/// Display projection of a photo for the carousel.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: PhotoId,
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub badge: Badge,
}

impl Card {
    pub fn from_photo(photo: &Photo, index: usize) -> Self {
        Self {
            id: photo.id.clone(),
            title: photo.location.clone(),
            subtitle: photo.caption.clone(),
            image: photo.url.clone(),
            badge: Badge {
                text: photo.tags.first().unwrap_or(DEFAULT_BADGE).to_string(),
                variant: BadgeVariant::for_index(index),
            },
        }
    }
}

/// Cards for the first [`CAROUSEL_CARD_LIMIT`] photos, in order.
pub fn cards_from_photos(photos: &[Photo]) -> Vec<Card> {
    photos
        .iter()
        .take(CAROUSEL_CARD_LIMIT)
        .enumerate()
        .map(|(i, photo)| Card::from_photo(photo, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use journey_catalog::samples::sample_photos;

    use super::*;

    #[test]
    fn badge_cycles_through_palette() {
        let cards = cards_from_photos(&sample_photos());
        let variants: Vec<_> = cards.iter().take(4).map(|c| c.badge.variant).collect();
        assert_eq!(
            variants,
            [
                BadgeVariant::Pink,
                BadgeVariant::Indigo,
                BadgeVariant::Orange,
                BadgeVariant::Pink
            ]
        );
    }

    #[test]
    fn card_fields_come_from_photo() {
        let photos = sample_photos();
        let card = Card::from_photo(&photos[0], 0);
        assert_eq!(card.id, photos[0].id);
        assert_eq!(card.title, photos[0].location);
        assert_eq!(card.subtitle, photos[0].caption);
        assert_eq!(card.image, photos[0].url);
        assert_eq!(Some(card.badge.text.as_str()), photos[0].tags.first());
    }

    #[test]
    fn untagged_photo_gets_default_badge() {
        let mut photo = sample_photos().remove(0);
        photo.tags = Default::default();
        assert_eq!(Card::from_photo(&photo, 5).badge.text, DEFAULT_BADGE);
        assert_eq!(Card::from_photo(&photo, 5).badge.variant, BadgeVariant::Orange);
    }

    #[test]
    fn at_most_eight_cards() {
        let mut photos = sample_photos();
        photos.extend(sample_photos());
        assert_eq!(cards_from_photos(&photos).len(), CAROUSEL_CARD_LIMIT);
        assert!(cards_from_photos(&[]).is_empty());
    }
}
