use anyhow::Result;
use tracing::{info, warn};

use journey_catalog::db::BlobStore;

pub const SESSION_KEY: &str = "isAuthenticated";

/// Credentials the login form is checked against.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Persisted logged-in flag. Not a security boundary.
pub struct Session {
    credentials: Credentials,
    authenticated: bool,
}

impl Session {
    pub fn restore(credentials: Credentials, blobs: &impl BlobStore) -> Self {
        let authenticated = match blobs.get(SESSION_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(%err, "failed to read session flag");
                false
            }
        };
        Self {
            credentials,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns whether the credentials matched.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        blobs: &impl BlobStore,
    ) -> Result<bool> {
        if username != self.credentials.username || password != self.credentials.password {
            warn!(username, "login rejected");
            return Ok(false);
        }
        blobs.put(SESSION_KEY, "true")?;
        self.authenticated = true;
        info!(username, "logged in");
        Ok(true)
    }

    pub fn logout(&mut self, blobs: &impl BlobStore) -> Result<()> {
        blobs.remove(SESSION_KEY)?;
        self.authenticated = false;
        info!("logged out");
        Ok(())
    }
}
