use std::time::Duration;

use iced::Subscription;
use muda::accelerator::{Accelerator, Code, Modifiers};
use muda::{Menu, MenuEvent, MenuItem, PredefinedMenuItem, Submenu};

use crate::app::Message;

pub struct AppMenu {
    _menu: Menu,
    pub upload_item: MenuItem,
}

pub fn build() -> AppMenu {
    let menu = Menu::new();

    // macOS uses the first submenu as the app menu (title replaced with app name)
    let app_menu = Submenu::with_items(
        "journey",
        true,
        &[
            &PredefinedMenuItem::about(None, None),
            &PredefinedMenuItem::separator(),
            &PredefinedMenuItem::hide(None),
            &PredefinedMenuItem::show_all(None),
            &PredefinedMenuItem::separator(),
            &PredefinedMenuItem::quit(None),
        ],
    )
    .expect("failed to create app menu");

    let upload_item = MenuItem::with_id(
        "upload",
        "Upload Photo...",
        false,
        Some(Accelerator::new(Some(Modifiers::META), Code::KeyU)),
    );

    let file_menu = Submenu::with_id_and_items("file", "File", true, &[&upload_item])
        .expect("failed to create File menu");

    let go_menu = Submenu::with_id_and_items(
        "go",
        "Go",
        true,
        &[
            &MenuItem::with_id(
                "home",
                "Home",
                true,
                Some(Accelerator::new(Some(Modifiers::META), Code::Digit1)),
            ),
            &MenuItem::with_id(
                "gallery",
                "Gallery",
                true,
                Some(Accelerator::new(Some(Modifiers::META), Code::Digit2)),
            ),
        ],
    )
    .expect("failed to create Go menu");

    menu.append_items(&[&app_menu, &file_menu, &go_menu])
        .expect("failed to append menus");

    #[cfg(target_os = "macos")]
    menu.init_for_nsapp();

    AppMenu {
        _menu: menu,
        upload_item,
    }
}

pub fn subscription() -> Subscription<Message> {
    iced::time::every(Duration::from_millis(50)).map(|_| match MenuEvent::receiver().try_recv() {
        Ok(event) if event.id == "upload" => Message::ToggleUploadPanel,
        Ok(event) if event.id == "home" => Message::ShowHome,
        Ok(event) if event.id == "gallery" => Message::ShowGallery,
        _ => Message::Noop,
    })
}
