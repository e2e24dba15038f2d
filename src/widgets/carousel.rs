use std::collections::HashMap;
use std::time::Instant;

use iced::widget::image::Handle;
use iced::widget::{Stack, column, container, image, mouse_area, text};
use iced::{Border, Color, ContentFit, Element, Length, Padding};

use journey_core::card::{BadgeVariant, Card};
use journey_core::carousel::{Carousel, MAX_TWEEN_OFFSET};
use journey_upload::transform::endpoint_thumbnail_url;

use crate::app::Message;

const CARD_WIDTH: f32 = 260.0;
const IMAGE_HEIGHT: f32 = 260.0;
const STAGE_WIDTH: f32 = 1320.0;
const STAGE_HEIGHT: f32 = 420.0;
/// Stage pixels per unit of card transform.
const STAGE_SCALE: f32 = 0.8;

const CARD_BG: Color = Color::from_rgb(0.13, 0.13, 0.15);

pub fn badge_color(variant: BadgeVariant) -> Color {
    match variant {
        BadgeVariant::Pink => Color::from_rgb8(0xDB, 0x27, 0x77),
        BadgeVariant::Indigo => Color::from_rgb8(0x4F, 0x46, 0xE5),
        BadgeVariant::Orange => Color::from_rgb8(0xF9, 0x73, 0x16),
    }
}

/// Image requested for a card: a CDN-sized copy where the host supports it.
pub fn card_image_url(card: &Card, endpoint: &str) -> String {
    endpoint_thumbnail_url(&card.image, endpoint, 640, 640)
}

/// Left edge of a card on the stage, or `None` when it falls off either side.
pub fn stage_left(x: f32, width: f32) -> Option<f32> {
    let left = STAGE_WIDTH / 2.0 + x * STAGE_SCALE - width / 2.0;
    (left >= 0.0 && left + width <= STAGE_WIDTH).then_some(left)
}

pub fn view<'a>(
    carousel: &'a Carousel<Card>,
    images: &'a HashMap<String, Handle>,
    endpoint: &str,
) -> Element<'a, Message> {
    if carousel.is_empty() {
        return container(text("No photos yet").size(16))
            .height(STAGE_HEIGHT)
            .center_x(Length::Fill)
            .center_y(STAGE_HEIGHT)
            .into();
    }

    let now = Instant::now();
    let mut stage = Stack::new().width(STAGE_WIDTH).height(STAGE_HEIGHT);

    for placement in carousel.placements(now) {
        if placement.offset.abs() > MAX_TWEEN_OFFSET {
            continue;
        }
        let t = placement.transform;
        let width = CARD_WIDTH * t.scale;
        let Some(left) = stage_left(t.x, width) else {
            continue;
        };
        let handle = images.get(&card_image_url(placement.item, endpoint));
        let card = card_view(placement.item, handle, t.scale, placement.offset == 0);
        stage = stage.push(container(card).padding(Padding {
            top: t.y,
            left,
            ..Padding::ZERO
        }));
    }

    let stage = mouse_area(stage)
        .on_enter(Message::CarouselEntered)
        .on_exit(Message::CarouselLeft);

    container(stage).center_x(Length::Fill).into()
}

fn card_view<'a>(
    card: &'a Card,
    handle: Option<&Handle>,
    scale: f32,
    focal: bool,
) -> Element<'a, Message> {
    let width = CARD_WIDTH * scale;
    let image_height = IMAGE_HEIGHT * scale;

    let picture: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .width(width)
            .height(image_height)
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("...").size(12))
            .width(width)
            .height(image_height)
            .center_x(width)
            .center_y(image_height)
            .into(),
    };

    let badge_bg = badge_color(card.badge.variant);
    let badge = container(text(card.badge.text.as_str()).size(11))
        .padding([2, 8])
        .style(move |_theme: &_| container::Style {
            background: Some(badge_bg.into()),
            text_color: Some(Color::WHITE),
            border: Border {
                radius: 10.0.into(),
                ..Border::default()
            },
            ..Default::default()
        });

    let border = if focal {
        Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.5),
            width: 1.0,
            radius: 12.0.into(),
        }
    } else {
        Border {
            radius: 12.0.into(),
            ..Border::default()
        }
    };

    container(
        column![
            picture,
            badge,
            text(card.title.as_str()).size(16),
            text(card.subtitle.as_str()).size(12),
        ]
        .spacing(6)
        .width(width),
    )
    .padding(8)
    .style(move |_theme: &_| container::Style {
        background: Some(CARD_BG.into()),
        border,
        ..Default::default()
    })
    .into()
}

#[cfg(test)]
mod tests {
    use journey_core::carousel::{CARD_SPACING, CardTransform};

    use super::*;

    #[test]
    fn neighbours_fit_on_stage() {
        for offset in -MAX_TWEEN_OFFSET..=MAX_TWEEN_OFFSET {
            let t = CardTransform::for_offset(offset);
            assert!(
                stage_left(t.x, CARD_WIDTH * t.scale).is_some(),
                "offset {offset} off stage"
            );
        }
    }

    #[test]
    fn far_cards_fall_off() {
        assert!(stage_left(3.0 * CARD_SPACING, CARD_WIDTH).is_none());
        assert!(stage_left(-3.0 * CARD_SPACING, CARD_WIDTH).is_none());
    }

    #[test]
    fn focal_card_is_centred() {
        let left = stage_left(0.0, CARD_WIDTH).unwrap();
        assert_eq!(left * 2.0 + CARD_WIDTH, STAGE_WIDTH);
    }
}
