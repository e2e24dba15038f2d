use iced::widget::{Space, button, column, container, image, row, scrollable, text, text_input};
use iced::{Element, Length};

use journey_catalog::destinations::DestinationCatalog;

use crate::app::{Message, UploadForm};

const PANEL_WIDTH: f32 = 320.0;
const PREVIEW_HEIGHT: f32 = 180.0;

pub fn view<'a>(form: &'a UploadForm, catalog: &'a DestinationCatalog) -> Element<'a, Message> {
    let draft = &form.draft;

    let file_label = match &draft.file {
        Some(file) => format!("{} ({} KB)", file.name, file.size() / 1024),
        None => "No photo selected".to_string(),
    };
    let picker = column![
        button(text("Choose photo...").size(13))
            .on_press_maybe((!form.uploading).then_some(Message::PickFile)),
        text(file_label).size(11),
    ]
    .spacing(4);

    let preview: Element<'a, Message> = match &form.preview {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(PREVIEW_HEIGHT)
            .into(),
        None => Space::new().height(0).into(),
    };

    let destinations = catalog.all().iter().map(|d| {
        let chosen = draft.destination.as_deref() == Some(d.id.as_str());
        let next = if chosen { None } else { Some(d.id.clone()) };
        button(text(d.name.as_str()).size(11))
            .on_press(Message::DestinationChosen(next))
            .padding([2, 6])
            .style(if chosen { button::primary } else { button::secondary })
            .into()
    });

    let tags = draft.tags.iter().map(|tag| {
        button(text(format!("{tag} x")).size(11))
            .on_press(Message::RemoveTag(tag.to_string()))
            .padding([2, 6])
            .style(button::secondary)
            .into()
    });

    let submit_label = if form.uploading { "Uploading..." } else { "Upload" };
    let submit = button(text(submit_label).size(13))
        .on_press_maybe((!form.uploading).then_some(Message::SubmitUpload))
        .style(button::primary);

    let body = column![
        text("Upload photo").size(16),
        picker,
        preview,
        labeled(
            "Caption",
            text_input("What's the story?", &draft.caption).on_input(Message::CaptionChanged),
        ),
        labeled(
            "Location",
            text_input("Unknown location", &draft.location).on_input(Message::LocationChanged),
        ),
        row![
            labeled(
                "Latitude",
                text_input("15.2993", &form.latitude).on_input(Message::LatitudeChanged),
            ),
            labeled(
                "Longitude",
                text_input("74.1240", &form.longitude).on_input(Message::LongitudeChanged),
            ),
        ]
        .spacing(8),
        text("Destination").size(12),
        row(destinations).spacing(4).wrap(),
        labeled(
            "Tags",
            text_input("Add a tag and press Enter", &draft.tag_input)
                .on_input(Message::TagInputChanged)
                .on_submit(Message::AddTag),
        ),
        row(tags).spacing(4).wrap(),
        row![
            button(text("Cancel").size(13))
                .on_press(Message::ToggleUploadPanel)
                .style(button::text),
            Space::new().width(Length::Fill),
            submit,
        ],
    ]
    .spacing(10);

    container(scrollable(body.padding(10)).height(Length::Fill))
        .width(PANEL_WIDTH)
        .height(Length::Fill)
        .into()
}

fn labeled<'a>(
    label: &'static str,
    input: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    column![text(label).size(12), input.into()].spacing(4).into()
}
