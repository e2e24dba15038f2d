use std::path::Path;

use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use journey_catalog::models::Photo;

use crate::auth::{AuthParams, AuthSource};
use crate::compress::{CompressedImage, JPEG_QUALITY, MAX_UPLOAD_WIDTH, compress};
use crate::draft::{PhotoMeta, SelectedFile};
use crate::error::UploadError;
use crate::transform::default_thumbnail_url;

pub const DEFAULT_UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";
pub const UPLOAD_FOLDER: &str = "/travel-photos";

/// Successful upload as reported by the hosting service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: String,
    pub name: String,
    pub size: u64,
    pub url: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl UploadResponse {
    pub fn into_photo(self, meta: PhotoMeta, uploaded_at: DateTime<Utc>) -> Photo {
        let thumbnail_url = self
            .thumbnail_url
            .unwrap_or_else(|| default_thumbnail_url(&self.url));
        Photo {
            id: self.file_id,
            url: self.url,
            thumbnail_url: Some(thumbnail_url),
            caption: meta.caption,
            location: meta.location,
            latitude: meta.latitude,
            longitude: meta.longitude,
            tags: meta.tags,
            trip_id: meta.trip_id,
            uploaded_at,
            file_name: self.name,
            file_size: self.size,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomMetadata<'a> {
    user_id: &'a str,
    caption: &'a str,
    location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trip_id: Option<&'a str>,
    uploaded_at: DateTime<Utc>,
}

/// Name the file is stored under remotely.
pub fn remote_file_name(user_id: &str, unix_millis: i64, name: &str) -> String {
    format!("{user_id}_{unix_millis}_{name}")
}

/// `name` with its extension swapped to match the re-encoded `mime`.
pub fn encoded_file_name(name: &str, mime: &str) -> String {
    let path = Path::new(name);
    let current = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let (ext, matches) = match mime {
        "image/png" => ("png", current.as_deref() == Some("png")),
        _ => ("jpg", matches!(current.as_deref(), Some("jpg" | "jpeg"))),
    };
    if matches {
        name.to_string()
    } else {
        path.with_extension(ext).to_string_lossy().into_owned()
    }
}

/// Text parts of the multipart request, in the order they are sent.
pub fn text_fields(
    public_key: &str,
    auth: &AuthParams,
    meta: &PhotoMeta,
    user_id: &str,
    file_name: &str,
    uploaded_at: DateTime<Utc>,
) -> Result<Vec<(&'static str, String)>, UploadError> {
    let mut fields = vec![
        (
            "fileName",
            remote_file_name(user_id, uploaded_at.timestamp_millis(), file_name),
        ),
        ("publicKey", public_key.to_string()),
        ("signature", auth.signature.clone()),
        ("expire", auth.expire.to_string()),
        ("token", auth.token.clone()),
        ("useUniqueFileName", "true".to_string()),
    ];
    if !meta.tags.is_empty() {
        fields.push(("tags", meta.tags.joined(",")));
    }
    fields.push(("folder", UPLOAD_FOLDER.to_string()));

    let custom = CustomMetadata {
        user_id,
        caption: &meta.caption,
        location: &meta.location,
        latitude: meta.latitude,
        longitude: meta.longitude,
        trip_id: meta.trip_id.as_deref(),
        uploaded_at,
    };
    fields.push(("customMetadata", serde_json::to_string(&custom)?));
    Ok(fields)
}

/// Uploads photos to the image hosting service.
#[derive(Debug)]
pub struct UploadClient {
    http: reqwest::Client,
    upload_url: String,
    public_key: String,
    auth: AuthSource,
}

impl UploadClient {
    pub fn new(
        upload_url: impl Into<String>,
        public_key: impl Into<String>,
        auth: AuthSource,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_url: upload_url.into(),
            public_key: public_key.into(),
            auth,
        }
    }

    /// Compress, sign, and send one photo. Nothing is persisted here.
    pub async fn upload(
        &self,
        file: &SelectedFile,
        meta: &PhotoMeta,
        user_id: &str,
    ) -> Result<Photo, UploadError> {
        let bytes = file.bytes.clone();
        let compressed: CompressedImage =
            tokio::task::spawn_blocking(move || compress(&bytes, MAX_UPLOAD_WIDTH, JPEG_QUALITY))
                .await
                .map_err(|e| UploadError::Image(e.to_string()))?
                .map_err(|e| UploadError::Image(format!("{e:#}")))?;

        let auth = self.auth.fetch(&self.http).await?;
        let uploaded_at = Utc::now();

        let file_name = encoded_file_name(&file.name, compressed.mime);
        let part = Part::bytes(compressed.bytes)
            .file_name(file_name.clone())
            .mime_str(compressed.mime)?;
        let form = text_fields(
            &self.public_key,
            &auth,
            meta,
            user_id,
            &file_name,
            uploaded_at,
        )?
        .into_iter()
        .fold(Form::new().part("file", part), |form, (name, value)| {
            form.text(name, value)
        });

        let response = self.http.post(&self.upload_url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| status.to_string());
            warn!(%status, %message, file = %file.name, "upload rejected");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response.json().await?;
        info!(file_id = %body.file_id, url = %body.url, "uploaded photo");
        Ok(body.into_photo(meta.clone(), uploaded_at))
    }
}
