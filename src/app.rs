use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use iced::event::{self, Event};
use iced::keyboard::{self, key::Named};
use iced::widget::image::Handle;
use iced::{Element, Subscription, Task, Theme};
use tracing::{error, info, warn};

use journey_catalog::db::SqliteBlobStore;
use journey_catalog::destinations::DestinationCatalog;
use journey_catalog::models::{Photo, PhotoId};
use journey_catalog::samples::sample_photos;
use journey_catalog::store::PhotoStore;
use journey_core::card::{Card, cards_from_photos};
use journey_core::carousel::{Carousel, Direction};
use journey_core::gallery::{Gallery, LightboxKey};
use journey_thumbnails::cache::ImageCache;
use journey_thumbnails::fetch::ImageFetcher;
use journey_upload::UploadClient;
use journey_upload::draft::{SelectedFile, UploadDraft};
use journey_upload::error::UploadError;

use crate::config::Config;
use crate::menu::{self, AppMenu};
use crate::session::{Credentials, Session};
use crate::views;
use crate::widgets;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Gallery,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub open: bool,
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct UploadForm {
    pub open: bool,
    pub draft: UploadDraft,
    pub latitude: String,
    pub longitude: String,
    pub preview: Option<Handle>,
    pub uploading: bool,
}

pub struct App {
    config: Config,
    page: Page,
    store: Option<PhotoStore<SqliteBlobStore>>,
    catalog: DestinationCatalog,
    gallery: Gallery,
    carousel: Carousel<Card>,
    session: Session,
    uploader: Option<Arc<UploadClient>>,
    fetcher: Option<ImageFetcher>,
    images: HashMap<String, Handle>,
    requested: HashSet<String>,
    upload: UploadForm,
    login: LoginForm,
    status_message: String,
    menu: AppMenu,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    ShowHome,
    ShowGallery,

    // Carousel
    Tick,
    CarouselPrev,
    CarouselNext,
    CarouselEntered,
    CarouselLeft,

    // Gallery
    SelectLocation(Option<String>),
    ToggleTrip(String),
    OpenPhoto(PhotoId),
    ClosePhoto,
    PreviousPhoto,
    NextPhoto,
    Key(LightboxKey),

    // Images
    ImageFetched(String, Vec<u8>),
    ImageFailed(String),

    // Upload
    ToggleUploadPanel,
    PickFile,
    FilePicked(Option<(String, Vec<u8>)>),
    PreviewReady(Vec<u8>),
    CaptionChanged(String),
    LocationChanged(String),
    LatitudeChanged(String),
    LongitudeChanged(String),
    DestinationChosen(Option<String>),
    TagInputChanged(String),
    AddTag,
    RemoveTag(String),
    SubmitUpload,
    UploadFinished(Result<Photo, String>),

    // Session
    ToggleLoginPanel,
    UsernameChanged(String),
    PasswordChanged(String),
    SubmitLogin,
    Logout,

    Noop,
}

impl App {
    pub fn new(config: Config) -> (Self, Task<Message>) {
        let mut status_message = String::from("Welcome to Journey.");

        let store = match open_store(&config) {
            Ok(store) => Some(store),
            Err(err) => {
                error!("failed to open database: {err:#}");
                status_message = format!("Error opening database: {err}");
                None
            }
        };

        let photos = match &store {
            Some(store) => store.load_all(&config.user_id),
            None => sample_photos(),
        };

        let credentials = Credentials {
            username: config.login_user.clone(),
            password: config.login_password.clone(),
        };
        let session = match &store {
            Some(store) => Session::restore(credentials, store.blobs()),
            None => Session::restore(credentials, &NoBlobs),
        };

        let fetcher = match ImageCache::new(config.image_cache_dir()) {
            Ok(cache) => Some(ImageFetcher::new(cache)),
            Err(err) => {
                warn!("image cache unavailable: {err:#}");
                None
            }
        };

        let uploader = config.auth_source().map(|auth| {
            Arc::new(UploadClient::new(
                config.upload_url.clone(),
                config.public_key.clone(),
                auth,
            ))
        });

        let carousel = Carousel::with_interval(
            cards_from_photos(&photos),
            config.rotation_interval,
            Instant::now(),
        );
        info!(photos = photos.len(), user = %config.user_id, "journey started");

        let mut app = Self {
            config,
            page: Page::Home,
            store,
            catalog: DestinationCatalog::india(),
            gallery: Gallery::new(photos),
            carousel,
            session,
            uploader,
            fetcher,
            images: HashMap::new(),
            requested: HashSet::new(),
            upload: UploadForm::default(),
            login: LoginForm::default(),
            status_message,
            menu: menu::build(),
        };
        app.sync_menu();
        let task = app.request_carousel_images();
        (app, task)
    }

    pub fn title(&self) -> String {
        match self.page {
            Page::Home => "Journey".into(),
            Page::Gallery => match self.gallery.selected_photo() {
                Some(photo) => format!("Journey - {}", photo.caption),
                None => format!("Journey - {} photos", self.gallery.filtered().len()),
            },
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ShowHome => {
                if self.page == Page::Home {
                    return Task::none();
                }
                self.page = Page::Home;
                self.carousel = Carousel::with_interval(
                    cards_from_photos(self.gallery.photos()),
                    self.config.rotation_interval,
                    Instant::now(),
                );
                self.request_carousel_images()
            }

            Message::ShowGallery => {
                if self.page == Page::Home {
                    self.carousel.unmount();
                }
                self.page = Page::Gallery;
                self.request_grid_images()
            }

            Message::Tick => {
                self.carousel.tick(Instant::now());
                Task::none()
            }
            Message::CarouselPrev => {
                self.carousel.shift(Direction::Prev, Instant::now());
                Task::none()
            }
            Message::CarouselNext => {
                self.carousel.shift(Direction::Next, Instant::now());
                Task::none()
            }
            Message::CarouselEntered => {
                self.carousel.pointer_entered();
                Task::none()
            }
            Message::CarouselLeft => {
                self.carousel.pointer_left(Instant::now());
                Task::none()
            }

            Message::SelectLocation(location) => {
                self.gallery.select_location(location);
                self.request_grid_images()
            }

            Message::ToggleTrip(trip) => {
                self.gallery.toggle_trip(&trip);
                self.request_grid_images()
            }

            Message::OpenPhoto(id) => {
                if self.gallery.select_photo(&id) {
                    self.request_selected_image()
                } else {
                    Task::none()
                }
            }

            Message::ClosePhoto => {
                self.gallery.close();
                Task::none()
            }

            Message::PreviousPhoto => {
                self.gallery.previous();
                self.request_selected_image()
            }

            Message::NextPhoto => {
                self.gallery.next();
                self.request_selected_image()
            }

            Message::Key(key) => {
                if self.page == Page::Gallery && self.gallery.handle_key(key) {
                    self.request_selected_image()
                } else {
                    Task::none()
                }
            }

            Message::ImageFetched(url, bytes) => {
                self.images.insert(url, Handle::from_bytes(bytes));
                Task::none()
            }

            Message::ImageFailed(url) => {
                self.requested.remove(&url);
                Task::none()
            }

            Message::ToggleUploadPanel => {
                if !self.session.is_authenticated() {
                    self.login.open = true;
                    self.status_message = "Please log in to upload photos".into();
                    return Task::none();
                }
                self.upload.open = !self.upload.open;
                if self.page != Page::Gallery {
                    return self.update(Message::ShowGallery);
                }
                Task::none()
            }

            Message::PickFile => Task::perform(
                async {
                    let handle = rfd::AsyncFileDialog::new()
                        .set_title("Select a photo to upload")
                        .add_filter("Images", &["jpg", "jpeg", "png", "webp", "gif"])
                        .pick_file()
                        .await?;
                    let bytes = handle.read().await;
                    Some((handle.file_name(), bytes))
                },
                Message::FilePicked,
            ),

            Message::FilePicked(None) => Task::none(),

            Message::FilePicked(Some((name, bytes))) => match SelectedFile::new(name, bytes) {
                Ok(file) => {
                    let bytes = file.bytes.clone();
                    self.upload.draft.file = Some(file);
                    self.upload.preview = None;
                    Task::perform(
                        tokio::task::spawn_blocking(move || {
                            journey_thumbnails::generator::generate_preview(&bytes)
                        }),
                        |result| match result.map_err(anyhow::Error::from).and_then(|r| r) {
                            Ok(jpeg) => Message::PreviewReady(jpeg),
                            Err(err) => {
                                warn!("preview failed: {err:#}");
                                Message::Noop
                            }
                        },
                    )
                }
                Err(err) => {
                    self.status_message = err.notice();
                    Task::none()
                }
            },

            Message::PreviewReady(jpeg) => {
                self.upload.preview = Some(Handle::from_bytes(jpeg));
                Task::none()
            }

            Message::CaptionChanged(caption) => {
                self.upload.draft.caption = caption;
                Task::none()
            }
            Message::LocationChanged(location) => {
                self.upload.draft.location = location;
                Task::none()
            }
            Message::LatitudeChanged(value) => {
                self.upload.latitude = value;
                self.apply_coordinates();
                Task::none()
            }
            Message::LongitudeChanged(value) => {
                self.upload.longitude = value;
                self.apply_coordinates();
                Task::none()
            }
            Message::DestinationChosen(id) => {
                let destination = id.as_deref().and_then(|id| self.catalog.get(id));
                self.upload.draft.choose_destination(destination);
                Task::none()
            }
            Message::TagInputChanged(value) => {
                self.upload.draft.tag_input = value;
                Task::none()
            }
            Message::AddTag => {
                self.upload.draft.add_tag();
                Task::none()
            }
            Message::RemoveTag(tag) => {
                self.upload.draft.remove_tag(&tag);
                Task::none()
            }

            Message::SubmitUpload => self.submit_upload(),

            Message::UploadFinished(Ok(photo)) => {
                self.upload.uploading = false;
                let caption = photo.caption.clone();
                if let Some(store) = &self.store {
                    if let Err(err) = store.append(&self.config.user_id, photo) {
                        error!("failed to save uploaded photo: {err:#}");
                        self.status_message = format!("Uploaded, but saving failed: {err}");
                        return Task::none();
                    }
                    self.gallery.reload(store.load_all(&self.config.user_id));
                }
                self.upload = UploadForm::default();
                self.status_message = format!("Uploaded \"{caption}\"");
                self.request_grid_images()
            }

            Message::UploadFinished(Err(notice)) => {
                self.upload.uploading = false;
                self.status_message = notice;
                Task::none()
            }

            Message::ToggleLoginPanel => {
                self.login.open = !self.login.open;
                self.login.error = None;
                Task::none()
            }
            Message::UsernameChanged(value) => {
                self.login.username = value;
                Task::none()
            }
            Message::PasswordChanged(value) => {
                self.login.password = value;
                Task::none()
            }

            Message::SubmitLogin => {
                let Some(store) = &self.store else {
                    self.login.error = Some("Database unavailable".into());
                    return Task::none();
                };
                match self
                    .session
                    .login(&self.login.username, &self.login.password, store.blobs())
                {
                    Ok(true) => {
                        self.login = LoginForm::default();
                        self.status_message = "Logged in".into();
                        self.sync_menu();
                    }
                    Ok(false) => {
                        self.login.error = Some("Invalid username or password".into());
                    }
                    Err(err) => {
                        error!("failed to save session: {err:#}");
                        self.login.error = Some(format!("Login failed: {err}"));
                    }
                }
                Task::none()
            }

            Message::Logout => {
                if let Some(store) = &self.store
                    && let Err(err) = self.session.logout(store.blobs())
                {
                    error!("failed to clear session: {err:#}");
                    self.status_message = format!("Logout failed: {err}");
                    return Task::none();
                }
                self.upload.open = false;
                self.status_message = "Logged out".into();
                self.sync_menu();
                Task::none()
            }

            Message::Noop => Task::none(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self.page {
            Page::Home => views::home::view(self),
            Page::Gallery if self.gallery.selected_photo().is_some() => {
                views::lightbox::view(self)
            }
            Page::Gallery => views::gallery::view(self),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![menu::subscription(), event::listen_with(handle_event)];
        if self.page == Page::Home {
            let now = Instant::now();
            if self.carousel.is_animating(now) {
                subscriptions.push(iced::time::every(FRAME_INTERVAL).map(|_| Message::Tick));
            } else if self.carousel.timer().is_pending() {
                subscriptions.push(iced::time::every(IDLE_TICK_INTERVAL).map(|_| Message::Tick));
            }
        }
        Subscription::batch(subscriptions)
    }

    fn submit_upload(&mut self) -> Task<Message> {
        if self.upload.uploading {
            return Task::none();
        }
        if !self.session.is_authenticated() {
            self.login.open = true;
            self.status_message = "Please log in to upload photos".into();
            return Task::none();
        }
        let Some(uploader) = self.uploader.clone() else {
            self.status_message = "Uploads are not configured".into();
            return Task::none();
        };
        let (file, meta) = match self.upload.draft.validate(self.gallery.selected_trip()) {
            Ok((file, meta)) => (file.clone(), meta),
            Err(err) => {
                self.status_message = err.notice();
                return Task::none();
            }
        };

        self.upload.uploading = true;
        self.status_message = format!("Uploading {}...", file.name);
        let user_id = self.config.user_id.clone();
        Task::perform(
            async move {
                uploader
                    .upload(&file, &meta, &user_id)
                    .await
                    .map_err(|err: UploadError| {
                        error!(%err, file = %file.name, "upload failed");
                        err.notice()
                    })
            },
            Message::UploadFinished,
        )
    }

    fn apply_coordinates(&mut self) {
        let latitude = self.upload.latitude.trim().parse().ok();
        let longitude = self.upload.longitude.trim().parse().ok();
        if let Some(found) = self
            .upload
            .draft
            .set_coordinates(latitude, longitude, &self.catalog)
        {
            self.status_message = format!("Matched destination {}", found.name);
        }
    }

    fn request_images(&mut self, urls: Vec<String>) -> Task<Message> {
        let Some(fetcher) = &self.fetcher else {
            return Task::none();
        };
        let tasks: Vec<_> = urls
            .into_iter()
            .filter(|url| !self.images.contains_key(url) && self.requested.insert(url.clone()))
            .map(|url| {
                let fetcher = fetcher.clone();
                Task::perform(
                    async move {
                        let result = fetcher.fetch(&url).await;
                        (url, result)
                    },
                    |(url, result)| match result {
                        Ok(bytes) => Message::ImageFetched(url, bytes),
                        Err(err) => {
                            warn!(%url, "image download failed: {err:#}");
                            Message::ImageFailed(url)
                        }
                    },
                )
            })
            .collect();
        Task::batch(tasks)
    }

    fn request_carousel_images(&mut self) -> Task<Message> {
        let endpoint = &self.config.url_endpoint;
        let urls = self
            .carousel
            .items()
            .iter()
            .map(|card| widgets::carousel::card_image_url(card, endpoint))
            .collect();
        self.request_images(urls)
    }

    fn request_grid_images(&mut self) -> Task<Message> {
        let endpoint = &self.config.url_endpoint;
        let urls = self
            .gallery
            .filtered()
            .iter()
            .map(|photo| widgets::photo_grid::grid_image_url(photo, endpoint))
            .collect();
        self.request_images(urls)
    }

    fn request_selected_image(&mut self) -> Task<Message> {
        match self.gallery.selected_photo() {
            Some(photo) => {
                let url = photo.url.clone();
                self.request_images(vec![url])
            }
            None => Task::none(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn carousel(&self) -> &Carousel<Card> {
        &self.carousel
    }

    pub fn catalog(&self) -> &DestinationCatalog {
        &self.catalog
    }

    pub fn url_endpoint(&self) -> &str {
        &self.config.url_endpoint
    }

    pub fn images(&self) -> &HashMap<String, Handle> {
        &self.images
    }

    pub fn upload_form(&self) -> &UploadForm {
        &self.upload
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn sync_menu(&self) {
        self.menu
            .upload_item
            .set_enabled(self.session.is_authenticated() && self.uploader.is_some());
    }
}

fn open_store(config: &Config) -> anyhow::Result<PhotoStore<SqliteBlobStore>> {
    use anyhow::Context;

    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("create data dir: {}", config.data_dir.display()))?;
    let path = config.database_path();
    let blobs = SqliteBlobStore::open(&path.to_string_lossy())?;
    info!(path = %path.display(), "database opened");
    Ok(PhotoStore::new(blobs, sample_photos()))
}

fn handle_event(
    event: Event,
    status: event::Status,
    _window: iced::window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    let Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event else {
        return None;
    };
    match key {
        keyboard::Key::Named(Named::Escape) => Some(Message::Key(LightboxKey::Escape)),
        keyboard::Key::Named(Named::ArrowLeft) => Some(Message::Key(LightboxKey::Left)),
        keyboard::Key::Named(Named::ArrowRight) => Some(Message::Key(LightboxKey::Right)),
        _ => None,
    }
}

/// Stand-in when the database failed to open: nothing is ever stored.
struct NoBlobs;

impl journey_catalog::db::BlobStore for NoBlobs {
    fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    fn put(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("database unavailable")
    }

    fn remove(&self, _key: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
