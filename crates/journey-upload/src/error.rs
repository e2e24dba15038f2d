use thiserror::Error;

/// Why an upload did not produce a photo.
///
/// Validation errors are raised before any network traffic; everything
/// else means the remote side or the local image handling failed and the
/// user may simply retry.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no photo selected")]
    MissingFile,
    #[error("{0} is not an image file")]
    NotAnImage(String),
    #[error("caption is empty")]
    EmptyCaption,
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("upload rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("failed to prepare image: {0}")]
    Image(String),
    #[error("failed to encode metadata: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl UploadError {
    /// Short message suitable for the status bar.
    pub fn notice(&self) -> String {
        match self {
            UploadError::MissingFile => "Please select a photo".into(),
            UploadError::NotAnImage(_) => "Please select an image file".into(),
            UploadError::EmptyCaption => "Please add a caption".into(),
            _ => "Failed to upload photo. Please try again.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_name_the_missing_input() {
        assert_eq!(UploadError::MissingFile.notice(), "Please select a photo");
        assert_eq!(
            UploadError::NotAnImage("a.txt".into()).notice(),
            "Please select an image file"
        );
    }

    #[test]
    fn remote_failures_share_a_retry_notice() {
        let rejected = UploadError::Rejected {
            status: 400,
            message: "Invalid signature".into(),
        };
        assert_eq!(rejected.notice(), "Failed to upload photo. Please try again.");
        assert_eq!(UploadError::EmptyCaption.notice(), "Please add a caption");
    }
}
