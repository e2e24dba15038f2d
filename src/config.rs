use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};

use journey_upload::auth::{AuthSource, Signer};
use journey_upload::client::DEFAULT_UPLOAD_URL;

pub const DEFAULT_USER_ID: &str = "himalika-user";
pub const DEFAULT_PUBLIC_KEY: &str = "public_RJdT2rhZ+ZJjltBIbs5EN+4kJqI=";
pub const DEFAULT_URL_ENDPOINT: &str = "https://ik.imagekit.io/x6qhu235f";

#[derive(Clone)]
pub struct Config {
    pub user_id: String,
    pub data_dir: PathBuf,
    pub public_key: String,
    pub url_endpoint: String,
    pub upload_url: String,
    pub auth_endpoint: Option<String>,
    pub private_key: Option<String>,
    pub login_user: String,
    pub login_password: String,
    pub rotation_interval: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match lookup("JOURNEY_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let dir = dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("journey");
                info!(dir = %dir.display(), "JOURNEY_DATA_DIR not set, using default");
                dir
            }
        };
        let rotation_ms: u64 = try_load(&lookup, "JOURNEY_ROTATION_MS", "3000")?;
        if rotation_ms == 0 {
            return Err(anyhow!("JOURNEY_ROTATION_MS must be positive"));
        }

        Ok(Self {
            user_id: try_load(&lookup, "JOURNEY_USER_ID", DEFAULT_USER_ID)?,
            data_dir,
            public_key: try_load(&lookup, "IMAGEKIT_PUBLIC_KEY", DEFAULT_PUBLIC_KEY)?,
            url_endpoint: try_load(&lookup, "IMAGEKIT_URL_ENDPOINT", DEFAULT_URL_ENDPOINT)?,
            upload_url: try_load(&lookup, "IMAGEKIT_UPLOAD_URL", DEFAULT_UPLOAD_URL)?,
            auth_endpoint: lookup("IMAGEKIT_AUTH_ENDPOINT"),
            private_key: lookup("IMAGEKIT_PRIVATE_KEY"),
            login_user: try_load(&lookup, "JOURNEY_LOGIN_USER", "Himalika")?,
            login_password: try_load(&lookup, "JOURNEY_LOGIN_PASSWORD", "Rishi")?,
            rotation_interval: Duration::from_millis(rotation_ms),
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("journey.db")
    }

    pub fn image_cache_dir(&self) -> PathBuf {
        dirs::cache_dir()
            .map(|d| d.join("journey").join("images"))
            .unwrap_or_else(|| self.data_dir.join("images"))
    }

    /// Upload signing, preferring a local key over a remote endpoint.
    pub fn auth_source(&self) -> Option<AuthSource> {
        if let Some(key) = &self.private_key {
            return Some(AuthSource::Local(Signer::new(key.clone())));
        }
        if let Some(endpoint) = &self.auth_endpoint {
            return Some(AuthSource::Remote {
                endpoint: endpoint.clone(),
            });
        }
        warn!("neither IMAGEKIT_PRIVATE_KEY nor IMAGEKIT_AUTH_ENDPOINT set, uploads disabled");
        None
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("invalid {key} value: {raw}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = config(&[("JOURNEY_DATA_DIR", "/tmp/journey")]).unwrap();
        assert_eq!(config.user_id, DEFAULT_USER_ID);
        assert_eq!(config.upload_url, DEFAULT_UPLOAD_URL);
        assert_eq!(config.rotation_interval, Duration::from_secs(3));
        assert_eq!(config.database_path(), PathBuf::from("/tmp/journey/journey.db"));
        assert!(config.auth_source().is_none());
    }

    #[test]
    fn bad_number_is_an_error() {
        assert!(config(&[("JOURNEY_ROTATION_MS", "soon")]).is_err());
        assert!(config(&[("JOURNEY_ROTATION_MS", "0")]).is_err());
    }

    #[test]
    fn local_key_wins_over_endpoint() {
        let config = config(&[
            ("IMAGEKIT_PRIVATE_KEY", "private_x"),
            ("IMAGEKIT_AUTH_ENDPOINT", "http://localhost/auth"),
        ])
        .unwrap();
        assert!(matches!(config.auth_source(), Some(AuthSource::Local(_))));
    }

    #[test]
    fn endpoint_alone_is_remote() {
        let config = config(&[("IMAGEKIT_AUTH_ENDPOINT", "http://localhost/auth")]).unwrap();
        assert!(matches!(
            config.auth_source(),
            Some(AuthSource::Remote { .. })
        ));
    }
}
