pub mod auth;
pub mod client;
pub mod compress;
pub mod draft;
pub mod error;
pub mod transform;

pub use client::UploadClient;
pub use error::UploadError;
