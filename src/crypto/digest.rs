use std::fmt::{self, Display};
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

/// Version tag of the inbound `<version>=<hex>` digest format.
pub const INBOUND_VERSION: &str = "v0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    HmacSha256,
    HmacSha1,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::HmacSha256 => write!(f, "hmac-sha256"),
            Algorithm::HmacSha1 => write!(f, "hmac-sha1"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "hmac-sha256" | "hmacsha256" => Ok(Algorithm::HmacSha256),
            "hmac-sha1" | "hmacsha1" => Ok(Algorithm::HmacSha1),
            _ => Err(Error::CryptoUnavailable(value.to_string())),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Error {
    CryptoUnavailable(String),
    InvalidKey,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CryptoUnavailable(name) => write!(f, "unsupported digest algorithm: {}", name),
            Error::InvalidKey => write!(f, "digest key is empty or malformed"),
        }
    }
}

impl std::error::Error for Error {}

/// Computes the keyed hash of `content` under `key`.
pub fn digest(content: &[u8], key: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, Error> {
    if key.is_empty() {
        return Err(Error::InvalidKey);
    }
    let result = match algorithm {
        Algorithm::HmacSha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(|_| Error::InvalidKey)?;
            mac.update(content);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::HmacSha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key).map_err(|_| Error::InvalidKey)?;
            mac.update(content);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(result)
}

/// Recomputes the keyed hash of `content` and compares it against `expected` in constant time.
pub fn verify(
    content: &[u8],
    key: &[u8],
    algorithm: Algorithm,
    expected: &[u8],
) -> Result<bool, Error> {
    if key.is_empty() {
        return Err(Error::InvalidKey);
    }
    let verified = match algorithm {
        Algorithm::HmacSha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(|_| Error::InvalidKey)?;
            mac.update(content);
            mac.verify_slice(expected).is_ok()
        }
        Algorithm::HmacSha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key).map_err(|_| Error::InvalidKey)?;
            mac.update(content);
            mac.verify_slice(expected).is_ok()
        }
    };
    Ok(verified)
}

/// `v0=<hex>`, the format expected in the `X-Slack-Signature` header.
pub fn encode_inbound(bytes: &[u8]) -> String {
    Digest::new(INBOUND_VERSION, bytes.to_vec()).to_string()
}

/// Plain base64 with no version prefix, the format expected by the transit API.
pub fn encode_outbound(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// A versioned digest as carried on the inbound wire: `<version>=<hex>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digest {
    version: String,
    bytes: Vec<u8>,
}

impl Digest {
    pub fn new(version: &str, bytes: Vec<u8>) -> Self {
        Self {
            version: version.to_string(),
            bytes,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.version, hex::encode(&self.bytes))
    }
}

#[derive(Debug, PartialEq)]
pub enum ParseError {
    MissingVersion,
    InvalidHex,
}

impl FromStr for Digest {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (version, encoded) = value.split_once('=').ok_or(ParseError::MissingVersion)?;
        if version.is_empty() {
            return Err(ParseError::MissingVersion);
        }
        let bytes = hex::decode(encoded).map_err(|_| ParseError::InvalidHex)?;
        if bytes.is_empty() {
            return Err(ParseError::InvalidHex);
        }
        Ok(Self::new(version, bytes))
    }
}
