use axum::{
    body::Body,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
    Extension, RequestPartsExt,
};
use futures::TryStreamExt;
use hyper::{HeaderMap, StatusCode};
use std::sync::Arc;

use crate::domain::auth::verify_request;

use super::state::AppState;

const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
const SIGNATURE_HEADER: &str = "x-slack-signature";

struct Guard {
    parts: Parts,
    body: String,
    state: Arc<AppState>,
}

impl Guard {
    async fn new(request: Request<Body>) -> Result<Self, StatusCode> {
        let (mut parts, mut body) = request.into_parts();
        let body = response_to_string(&mut body).await?;

        let Extension(state) =
            parts
                .extract::<Extension<Arc<AppState>>>()
                .await
                .map_err(|err| {
                    log::error!("could not find app state on request: {}", err);
                    StatusCode::INTERNAL_SERVER_ERROR
                })?;

        Ok(Self { parts, body, state })
    }

    fn validate_signature(&self) -> Result<(), StatusCode> {
        let timestamp = header(&self.parts.headers, TIMESTAMP_HEADER)?;
        let signature = header(&self.parts.headers, SIGNATURE_HEADER)?;
        log::debug!("verifying signature: {}={}", TIMESTAMP_HEADER, timestamp);

        verify_request::execute(
            &self.state.signing,
            &verify_request::Request {
                timestamp,
                signature,
                body: self.body.clone(),
            },
        )
        .map_err(|err| {
            log::trace!("request rejected: {:?}", err);
            match err {
                verify_request::Error::MalformedTimestamp => StatusCode::BAD_REQUEST,
                verify_request::Error::ExpiredRequest
                | verify_request::Error::SignatureMismatch => StatusCode::UNAUTHORIZED,
                verify_request::Error::InvalidKey | verify_request::Error::CryptoUnavailable => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        })
    }

    fn request(self) -> Request<Body> {
        Request::from_parts(self.parts, Body::from(self.body))
    }
}

/// Rejects every request whose slack signature does not verify before it reaches a handler.
pub async fn validate(request: Request<Body>, next: Next<Body>) -> Result<Response, StatusCode> {
    let guard = Guard::new(request).await?;
    log::trace!("guard: validating signature");
    guard.validate_signature()?;
    log::debug!("guard: signature verified");
    Ok(next.run(guard.request()).await)
}

fn header(headers: &HeaderMap, name: &str) -> Result<String, StatusCode> {
    let value = headers.get(name).ok_or_else(|| {
        log::trace!("unable to find authentication header {}", name);
        StatusCode::BAD_REQUEST
    })?;
    let value = value.to_str().map_err(|err| {
        log::trace!("authentication header {} is not visible ascii: {}", name, err);
        StatusCode::BAD_REQUEST
    })?;
    Ok(value.to_string())
}

async fn response_to_string(stream: &mut Body) -> Result<String, StatusCode> {
    let entire_body = stream
        .try_fold(Vec::new(), |mut data, chunk| async move {
            data.extend_from_slice(&chunk);
            Ok(data)
        })
        .await
        .map_err(|err| {
            log::error!("could not read from body stream: {}", err);
            StatusCode::BAD_REQUEST
        })?;
    let entire_body = String::from_utf8(entire_body).map_err(|err| {
        log::error!("request body was not valid utf-8: {}", err);
        StatusCode::BAD_REQUEST
    })?;
    Ok(entire_body)
}
