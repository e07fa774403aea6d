use std::fmt::{self, Debug};

use super::digest::{Algorithm, Error, INBOUND_VERSION};

/// Key material used to verify inbound webhooks. Built once at startup and shared read-only.
#[derive(Clone)]
pub struct SigningContext {
    secret: String,
    algorithm: Algorithm,
    version: String,
}

impl SigningContext {
    pub fn new(secret: &str, algorithm: Algorithm) -> Result<Self, Error> {
        if secret.is_empty() {
            return Err(Error::InvalidKey);
        }
        Ok(Self {
            secret: secret.to_string(),
            algorithm,
            version: INBOUND_VERSION.to_string(),
        })
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("version", &self.version)
            .finish()
    }
}

/// Application id and key pair issued by the transit API.
#[derive(Clone)]
pub struct AppKey {
    pub id: String,
    pub key: String,
}

impl AppKey {
    pub fn new(id: &str, key: &str) -> Self {
        Self {
            id: id.to_string(),
            key: key.to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.key.is_empty()
    }
}

impl Debug for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppKey")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .finish()
    }
}
