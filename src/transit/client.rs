use std::fmt::Debug;

use hyper::{header, Body, Request};
use serde::Serialize;
use serde_json::Value;

use crate::crypto::AppKey;
use crate::domain::auth::sign_request::{self, DATE_HEADER};
use crate::http;

#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidKey,
    Request(String),
    Response(String),
}

impl From<sign_request::Error> for Error {
    fn from(value: sign_request::Error) -> Self {
        match value {
            sign_request::Error::InvalidKey => Error::InvalidKey,
            sign_request::Error::CryptoUnavailable => Error::Request("hmac-sha1 unavailable".to_string()),
        }
    }
}

impl From<http::Error> for Error {
    fn from(value: http::Error) -> Self {
        Error::Request(value.message)
    }
}

/// Client of the transportation-data API. Every request carries a fresh `x-date` signature.
#[derive(Debug, Clone)]
pub struct Client {
    api_url: String,
    city: String,
    key: AppKey,
}

pub fn new(api_url: &str, city: &str, key: AppKey) -> Client {
    Client {
        api_url: api_url.trim_end_matches('/').to_string(),
        city: city.to_string(),
        key,
    }
}

impl Client {
    pub fn url(&self, method: &str, route: &str) -> String {
        format!(
            "{}/{}/City/{}/{}?$format=JSON",
            self.api_url,
            method,
            self.city,
            encode_segment(route)
        )
    }

    /// Builds a signed GET request. Fails before anything is built when the app key is incomplete.
    pub fn request(
        &self,
        method: &str,
        route: &str,
        query: &(impl Serialize + Debug),
    ) -> Result<Request<Body>, Error> {
        let signed = sign_request::execute(&self.key)?;

        Ok(http::Client::new()
            .with_header(header::AUTHORIZATION.as_str(), &signed.authorization)
            .with_header(DATE_HEADER, &signed.x_date)
            .request(&self.url(method, route), Some(query))?)
    }

    pub async fn call(
        &self,
        method: &str,
        route: &str,
        query: &(impl Serialize + Debug),
    ) -> Result<Vec<Value>, Error> {
        let request = self.request(method, route, query)?;
        log::trace!("calling transit api {} for route {}: {:?}", method, route, query);

        let response = http::Client::new().send(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!("transit api responded with {}: {}", status, body);
            return Err(Error::Response(format!("{}: {}", status, body)));
        }

        serde_json::from_str(&body).map_err(|err| {
            log::error!("could not parse transit api response: {}", err);
            Error::Response(err.to_string())
        })
    }
}

/// Percent-encodes everything but unreserved characters.
fn encode_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|byte| match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (byte as char).to_string()
            }
            _ => format!("%{:02X}", byte),
        })
        .collect()
}
