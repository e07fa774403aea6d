use crate::crypto::canonical;
use crate::crypto::digest::{self, Algorithm};
use crate::crypto::AppKey;
use crate::helpers::date::Timestamp;

/// The only header covered by the transit API signature.
pub const DATE_HEADER: &str = "x-date";

#[derive(Debug, PartialEq)]
pub struct Response {
    pub authorization: String,
    pub x_date: String,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidKey,
    CryptoUnavailable,
}

impl From<digest::Error> for Error {
    fn from(value: digest::Error) -> Self {
        match value {
            digest::Error::InvalidKey => Error::InvalidKey,
            digest::Error::CryptoUnavailable(..) => Error::CryptoUnavailable,
        }
    }
}

pub fn execute(key: &AppKey) -> Result<Response, Error> {
    execute_at(key, Timestamp::now())
}

pub fn execute_at(key: &AppKey, now: Timestamp) -> Result<Response, Error> {
    if !key.is_complete() {
        log::error!("refusing to sign transit request with incomplete credentials: {:?}", key);
        return Err(Error::InvalidKey);
    }

    let x_date = now.to_http_date();
    let content = canonical::header_line(DATE_HEADER, &x_date);
    let signature = digest::encode_outbound(&digest::digest(
        content.as_bytes(),
        key.key.as_bytes(),
        Algorithm::HmacSha1,
    )?);

    let authorization = format!(
        "hmac username=\"{}\", algorithm=\"{}\", headers=\"{}\", signature=\"{}\"",
        key.id,
        Algorithm::HmacSha1,
        DATE_HEADER,
        signature
    );

    Ok(Response {
        authorization,
        x_date,
    })
}
