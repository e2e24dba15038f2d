pub mod carousel;
pub mod destination_map;
pub mod location_sidebar;
pub mod login_panel;
pub mod photo_details;
pub mod photo_grid;
pub mod upload_panel;
