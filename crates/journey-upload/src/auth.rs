use std::fmt;

use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use tracing::{debug, warn};

use crate::error::UploadError;

type HmacSha1 = Hmac<Sha1>;

/// Seconds an issued token stays valid.
pub const AUTH_VALIDITY_SECS: i64 = 1800;

/// Signed, time-boxed credentials attached to one upload request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthParams {
    pub token: String,
    pub expire: i64,
    pub signature: String,
}

impl AuthParams {
    pub fn is_expired(&self, now_unix: i64) -> bool {
        now_unix >= self.expire
    }
}

/// Issues [`AuthParams`] with a private key that never leaves this type.
pub struct Signer {
    private_key: String,
}

impl Signer {
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
        }
    }

    pub fn issue(&self) -> Result<AuthParams, UploadError> {
        self.issue_at(Utc::now().timestamp())
    }

    pub fn issue_at(&self, now_unix: i64) -> Result<AuthParams, UploadError> {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        let expire = now_unix + AUTH_VALIDITY_SECS;
        let signature = self.sign(&token, expire)?;
        debug!(expire, "issued upload credentials");
        Ok(AuthParams {
            token,
            expire,
            signature,
        })
    }

    /// Hex HMAC-SHA1 over `token` followed by the decimal `expire`.
    pub fn sign(&self, token: &str, expire: i64) -> Result<String, UploadError> {
        let mut mac = HmacSha1::new_from_slice(self.private_key.as_bytes())
            .map_err(|e| UploadError::Auth(e.to_string()))?;
        mac.update(token.as_bytes());
        mac.update(expire.to_string().as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Where upload credentials come from.
#[derive(Debug)]
pub enum AuthSource {
    /// Sign in-process with a locally configured private key.
    Local(Signer),
    /// Ask an auth endpoint that returns `{token, expire, signature}`.
    Remote { endpoint: String },
}

impl AuthSource {
    pub async fn fetch(&self, http: &reqwest::Client) -> Result<AuthParams, UploadError> {
        match self {
            AuthSource::Local(signer) => signer.issue(),
            AuthSource::Remote { endpoint } => {
                let response = http.get(endpoint).send().await?;
                let status = response.status();
                if !status.is_success() {
                    warn!(%status, endpoint, "auth endpoint refused");
                    return Err(UploadError::Auth(format!(
                        "auth endpoint returned {status}"
                    )));
                }
                let params = response.json::<AuthParams>().await?;
                fresh(params, Utc::now().timestamp())
            }
        }
    }
}

/// Rejects credentials that expired before they could be used.
fn fresh(params: AuthParams, now_unix: i64) -> Result<AuthParams, UploadError> {
    if params.is_expired(now_unix) {
        warn!(expire = params.expire, now_unix, "auth endpoint returned expired credentials");
        return Err(UploadError::Auth(format!(
            "credentials expired at {}",
            params.expire
        )));
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_reference() {
        let signer = Signer::new("private_test_key");
        let signature = signer
            .sign("a1b2c3d4e5f60718293a4b5c6d7e8f90", 1_700_001_800)
            .unwrap();
        assert_eq!(signature, "b8175a0b33d06937e7503c85ee72af32ae4f5394");
    }

    #[test]
    fn issued_params_expire_after_window() {
        let signer = Signer::new("key");
        let params = signer.issue_at(1_700_000_000).unwrap();
        assert_eq!(params.expire, 1_700_000_000 + AUTH_VALIDITY_SECS);
        assert!(!params.is_expired(1_700_000_000));
        assert!(params.is_expired(params.expire));
    }

    #[test]
    fn expired_remote_credentials_are_refused() {
        let params = AuthParams {
            token: "t".into(),
            expire: 1_700_000_000,
            signature: "s".into(),
        };
        assert_eq!(fresh(params.clone(), 1_699_999_999).unwrap(), params);
        assert!(matches!(
            fresh(params, 1_700_000_000),
            Err(UploadError::Auth(_))
        ));
    }

    #[test]
    fn issued_params_verify() {
        let signer = Signer::new("key");
        let params = signer.issue_at(42).unwrap();
        assert_eq!(params.token.len(), 32);
        assert!(params.token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(params.signature, signer.sign(&params.token, params.expire).unwrap());
    }

    #[test]
    fn tokens_are_fresh() {
        let signer = Signer::new("key");
        let a = signer.issue_at(0).unwrap();
        let b = signer.issue_at(0).unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn debug_hides_private_key() {
        let signer = Signer::new("super-secret");
        let rendered = format!("{:?}", AuthSource::Local(signer));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn auth_params_json_layout() {
        let params: AuthParams =
            serde_json::from_str(r#"{"token":"t","expire":10,"signature":"s"}"#).unwrap();
        assert_eq!(params.expire, 10);
    }
}
