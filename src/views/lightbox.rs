use iced::widget::{Space, button, column, container, image, row, scrollable, text};
use iced::{Alignment, ContentFit, Element, Length};

use super::{CANVAS_BG, status_bar};
use crate::app::{App, Message};
use crate::widgets;

pub fn view(app: &App) -> Element<'_, Message> {
    let gallery = app.gallery();
    let Some(photo) = gallery.selected_photo() else {
        return Space::new().into();
    };

    let position = gallery.position().map(|i| i + 1).unwrap_or_default();
    let toolbar = row![
        button("< Back").on_press(Message::ClosePhoto),
        Space::new().width(Length::Fill),
        text(format!("{position} / {}", gallery.filtered().len())).size(14),
        Space::new().width(Length::Fill),
    ]
    .spacing(10)
    .padding(10)
    .align_y(Alignment::Center);

    let canvas_style = |_theme: &_| container::Style {
        background: Some(CANVAS_BG.into()),
        ..Default::default()
    };

    let picture: Element<'_, Message> = match app.images().get(&photo.url) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => text("Loading image...").size(16).into(),
    };

    let previous: Element<'_, Message> = if gallery.has_previous() {
        button(text("<").size(24)).on_press(Message::PreviousPhoto).into()
    } else {
        Space::new().width(40).into()
    };
    let next: Element<'_, Message> = if gallery.has_next() {
        button(text(">").size(24)).on_press(Message::NextPhoto).into()
    } else {
        Space::new().width(40).into()
    };

    let image_view = container(
        row![previous, picture, next]
            .spacing(10)
            .align_y(Alignment::Center),
    )
    .style(canvas_style)
    .padding(10)
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill);

    let sidebar = scrollable(
        column![widgets::photo_details::view(photo)]
            .spacing(10)
            .padding(10)
            .width(300),
    )
    .height(Length::Fill);

    let content = row![image_view, sidebar]
        .spacing(0)
        .width(Length::Fill)
        .height(Length::Fill);

    column![toolbar, content, status_bar(app)]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
