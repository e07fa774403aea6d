use std::fmt::{Debug, Display};

use hyper::{header, Body, Method, Request, StatusCode};
use hyper_tls::HttpsConnector;
use serde::Serialize;

/// Outbound GET client shared by the slack relay and the transit API.
pub struct Client {
    headers: Vec<(String, String)>,
}

impl Client {
    pub fn new() -> Self {
        Self { headers: vec![] }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_access_token(self, access_token: &str) -> Self {
        self.with_header(header::AUTHORIZATION.as_str(), &format!("Bearer {}", access_token))
    }

    pub fn uri(url: &str, query: Option<&(impl Serialize + Debug)>) -> Result<String, Error> {
        match query {
            Some(query) => {
                let query = serde_urlencoded::to_string(query)?;
                if query.is_empty() {
                    return Ok(url.to_string());
                }
                let separator = if url.contains('?') { '&' } else { '?' };
                Ok(format!("{}{}{}", url, separator, query))
            }
            None => Ok(url.to_string()),
        }
    }

    pub fn request(
        &self,
        url: &str,
        query: Option<&(impl Serialize + Debug)>,
    ) -> Result<Request<Body>, Error> {
        let mut builder = Request::builder()
            .method(Method::GET)
            .uri(Self::uri(url, query)?);

        for (name, value) in self.headers.iter() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        Ok(builder.body(Body::empty())?)
    }

    pub async fn get(
        &self,
        url: &str,
        query: Option<&(impl Serialize + Debug)>,
    ) -> Result<Response, Error> {
        log::trace!("sending get request to {}: {:?}", url, query);
        self.send(self.request(url, query)?).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<Response, Error> {
        let https = HttpsConnector::new();
        let client = hyper::Client::builder().build::<_, Body>(https);

        let uri = request.uri().clone();
        let response = client.request(request).await?;

        log::trace!(
            "received response from get request to {}: {}",
            uri.path(),
            response.status()
        );

        Ok(response.into())
    }
}

#[derive(Debug)]
pub struct Response {
    response: hyper::Response<Body>,
}

impl Response {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub async fn text(self) -> Result<String, Error> {
        let bytes = hyper::body::to_bytes(self.response.into_body()).await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

impl From<hyper::Response<Body>> for Response {
    fn from(response: hyper::Response<Body>) -> Self {
        Self { response }
    }
}

#[derive(Debug)]
pub struct Error {
    pub message: String,
}

impl<T: Display> From<T> for Error {
    fn from(err: T) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}
