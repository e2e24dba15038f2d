use iced::widget::{button, column, container, text, text_input};
use iced::{Color, Element};

use crate::app::{LoginForm, Message};

const ERROR_COLOR: Color = Color::from_rgb(0.95, 0.45, 0.45);

pub fn view(form: &LoginForm) -> Element<'_, Message> {
    let mut body = column![
        text("Log in").size(16),
        text_input("Username", &form.username).on_input(Message::UsernameChanged),
        text_input("Password", &form.password)
            .secure(true)
            .on_input(Message::PasswordChanged)
            .on_submit(Message::SubmitLogin),
        button(text("Log in").size(13))
            .on_press(Message::SubmitLogin)
            .style(button::primary),
    ]
    .spacing(8);

    if let Some(error) = &form.error {
        body = body.push(text(error.as_str()).size(12).color(ERROR_COLOR));
    }

    container(body).padding(10).width(280).into()
}
