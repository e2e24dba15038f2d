use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Element, Length};

use super::{CANVAS_BG, status_bar, toolbar};
use crate::app::{App, Message};
use crate::widgets;

pub fn view(app: &App) -> Element<'_, Message> {
    let hero = column![
        text("Capture Your Journey").size(40),
        text("Every destination tells a story. Browse the trips, relive the moments.").size(16),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let carousel = widgets::carousel::view(app.carousel(), app.images(), app.url_endpoint());

    let controls = row![
        button(text("<").size(18)).on_press(Message::CarouselPrev),
        Space::new().width(24),
        button(text("Explore gallery").size(14))
            .on_press(Message::ShowGallery)
            .style(button::primary),
        Space::new().width(24),
        button(text(">").size(18)).on_press(Message::CarouselNext),
    ]
    .align_y(Alignment::Center);

    let body = column![hero, carousel, controls]
        .spacing(24)
        .padding(20)
        .align_x(Alignment::Center)
        .width(Length::Fill);

    let stage = container(body)
        .style(|_theme: &_| container::Style {
            background: Some(CANVAS_BG.into()),
            ..Default::default()
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .center_y(Length::Fill);

    let mut page = column![toolbar(app), stage];
    if app.login_form().open {
        let login = widgets::login_panel::view(app.login_form());
        page = page.push(container(login).center_x(Length::Fill));
    }
    page.push(status_bar(app))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
