use iced::widget::{Space, button, container, row, text};
use iced::{Alignment, Color, Element, Length};

use crate::app::{App, Message, Page};

pub mod gallery;
pub mod home;
pub mod lightbox;

pub const CANVAS_BG: Color = Color::from_rgb(0.08, 0.08, 0.08);

pub fn toolbar(app: &App) -> Element<'_, Message> {
    let nav = |label: &'static str, page: Page, message: Message| {
        button(text(label).size(13))
            .on_press(message)
            .padding([4, 12])
            .style(if app.page() == page {
                button::primary
            } else {
                button::text
            })
    };

    let session_btn = if app.is_authenticated() {
        button(text("Log out").size(13)).on_press(Message::Logout)
    } else {
        button(text("Log in").size(13)).on_press(Message::ToggleLoginPanel)
    };

    row![
        text("Journey").size(24),
        Space::new().width(16),
        nav("Home", Page::Home, Message::ShowHome),
        nav("Gallery", Page::Gallery, Message::ShowGallery),
        Space::new().width(Length::Fill),
        button(text("Upload").size(13)).on_press(Message::ToggleUploadPanel),
        Space::new().width(8),
        session_btn.style(button::secondary),
    ]
    .spacing(4)
    .padding(10)
    .align_y(Alignment::Center)
    .into()
}

pub fn status_bar(app: &App) -> Element<'_, Message> {
    container(text(app.status_message()).size(12))
        .padding(5)
        .width(Length::Fill)
        .into()
}
