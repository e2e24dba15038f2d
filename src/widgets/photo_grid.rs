use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{Space, button, column, container, image, row, text};
use iced::{ContentFit, Element, Length};

use journey_catalog::models::Photo;
use journey_upload::transform::{
    DEFAULT_THUMBNAIL_HEIGHT, DEFAULT_THUMBNAIL_WIDTH, endpoint_thumbnail_url,
};

use crate::app::Message;

const THUMB_SIZE: f32 = 220.0;
const GRID_COLUMNS: usize = 4;
const CAPTION_CHARS: usize = 28;

/// Image requested for a grid cell.
pub fn grid_image_url(photo: &Photo, endpoint: &str) -> String {
    photo.thumbnail_url.clone().unwrap_or_else(|| {
        endpoint_thumbnail_url(
            &photo.url,
            endpoint,
            DEFAULT_THUMBNAIL_WIDTH,
            DEFAULT_THUMBNAIL_HEIGHT,
        )
    })
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

pub fn view<'a>(
    photos: &'a [Photo],
    images: &'a HashMap<String, Handle>,
    endpoint: &str,
) -> Element<'a, Message> {
    if photos.is_empty() {
        return container(text("No photos found for this location.").size(16))
            .padding(40)
            .center_x(Length::Fill)
            .into();
    }

    let mut grid_rows: Vec<Element<'a, Message>> = Vec::new();
    let mut current_row: Vec<Element<'a, Message>> = Vec::new();

    for photo in photos {
        let cell = photo_cell(photo, images.get(&grid_image_url(photo, endpoint)));
        current_row.push(cell);

        if current_row.len() >= GRID_COLUMNS {
            grid_rows.push(row(std::mem::take(&mut current_row)).spacing(8).into());
        }
    }

    if !current_row.is_empty() {
        while current_row.len() < GRID_COLUMNS {
            current_row.push(Space::new().width(THUMB_SIZE).into());
        }
        grid_rows.push(row(std::mem::take(&mut current_row)).spacing(8).into());
    }

    column(grid_rows).spacing(8).padding(10).into()
}

fn photo_cell<'a>(photo: &'a Photo, thumbnail: Option<&Handle>) -> Element<'a, Message> {
    let thumb_content: Element<'a, Message> = if let Some(handle) = thumbnail {
        image(handle.clone())
            .width(THUMB_SIZE)
            .height(THUMB_SIZE)
            .content_fit(ContentFit::Cover)
            .into()
    } else {
        container(text("...").size(12))
            .width(THUMB_SIZE)
            .height(THUMB_SIZE)
            .center_x(THUMB_SIZE)
            .center_y(THUMB_SIZE)
            .into()
    };

    let cell = column![
        thumb_content,
        text(truncate(&photo.caption, CAPTION_CHARS)).size(12),
        text(photo.location.as_str()).size(11),
    ]
    .spacing(4)
    .width(THUMB_SIZE);

    button(cell)
        .on_press(Message::OpenPhoto(photo.id.clone()))
        .padding(4)
        .style(button::text)
        .into()
}
