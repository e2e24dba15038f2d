use iced::widget::{Space, button, column, container, row, scrollable, text};
use iced::{Element, Length, Padding};

use journey_catalog::locations::LocationCount;

use crate::app::Message;

const SIDEBAR_WIDTH: f32 = 220.0;

pub fn view<'a>(
    locations: &[LocationCount],
    total: usize,
    active: Option<&str>,
) -> Element<'a, Message> {
    let mut items: Vec<Element<'a, Message>> = vec![
        text("Locations").size(16).into(),
        filter_button(format!("All ({total})"), None, active.is_none()),
    ];

    for entry in locations {
        items.push(filter_button(
            format!("{} ({})", entry.location, entry.count),
            Some(entry.location.clone()),
            active == Some(entry.location.as_str()),
        ));
    }

    container(scrollable(column(items).spacing(2).padding(8)).height(Length::Fill))
        .width(SIDEBAR_WIDTH)
        .height(Length::Fill)
        .into()
}

fn filter_button<'a>(
    label: String,
    location: Option<String>,
    is_active: bool,
) -> Element<'a, Message> {
    let btn = button(text(label).size(13))
        .on_press(Message::SelectLocation(location))
        .padding(Padding::from([2, 6]))
        .width(Length::Fill);

    let btn = if is_active {
        btn.style(button::primary)
    } else {
        btn.style(button::text)
    };

    row![Space::new().width(4), btn].spacing(0).into()
}
