use iced::widget::{column, container, row, scrollable, text};
use iced::{Element, Length};

use super::{CANVAS_BG, status_bar, toolbar};
use crate::app::{App, Message};
use crate::widgets;

pub fn view(app: &App) -> Element<'_, Message> {
    let gallery = app.gallery();

    let sidebar = column![
        widgets::destination_map::view(
            gallery.destination_counts(app.catalog()),
            gallery.selected_trip(),
        ),
        widgets::location_sidebar::view(
            &gallery.location_summaries(),
            gallery.photos().len(),
            gallery.selected_location(),
        ),
    ]
    .spacing(8)
    .width(260);

    let heading = match gallery.selected_location() {
        Some(location) => location.to_string(),
        None => "All Photos".to_string(),
    };
    let trip = gallery
        .selected_trip()
        .and_then(|id| app.catalog().get(id))
        .map(|d| format!(" - {} trip", d.name))
        .unwrap_or_default();
    let header = column![
        text(format!("{heading}{trip}")).size(22),
        text(format!("{} photos", gallery.filtered().len())).size(12),
    ]
    .spacing(2)
    .padding(10);

    let grid = container(
        scrollable(widgets::photo_grid::view(
            gallery.filtered(),
            app.images(),
            app.url_endpoint(),
        ))
        .height(Length::Fill)
        .width(Length::Fill),
    )
    .style(|_theme: &_| container::Style {
        background: Some(CANVAS_BG.into()),
        ..Default::default()
    })
    .width(Length::Fill)
    .height(Length::Fill);

    let mut center = row![sidebar, column![header, grid].width(Length::Fill)]
        .spacing(0)
        .width(Length::Fill)
        .height(Length::Fill);

    if app.login_form().open {
        center = center.push(widgets::login_panel::view(app.login_form()));
    } else if app.upload_form().open {
        center = center.push(widgets::upload_panel::view(app.upload_form(), app.catalog()));
    }

    column![toolbar(app), center, status_bar(app)]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
