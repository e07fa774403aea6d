use crate::crypto::canonical;
use crate::crypto::digest::{self, Digest};
use crate::crypto::SigningContext;
use crate::helpers::date::Timestamp;

/// Replay window, in seconds, after the claimed request timestamp.
/// Timestamps ahead of the local clock are not bounded.
pub const TOLERANCE: i64 = 5 * 60;

pub struct Request {
    pub timestamp: String,
    pub signature: String,
    pub body: String,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    MalformedTimestamp,
    ExpiredRequest,
    SignatureMismatch,
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

pub fn execute(context: &SigningContext, req: &Request) -> Result<(), Error> {
    execute_at(context, req, Timestamp::now())
}

pub fn execute_at(context: &SigningContext, req: &Request, now: Timestamp) -> Result<(), Error> {
    let timestamp = Timestamp::parse(&req.timestamp).ok_or_else(|| {
        log::trace!("request timestamp is not a number: {:?}", req.timestamp);
        Error::MalformedTimestamp
    })?;

    if timestamp.plus(TOLERANCE) < now {
        log::trace!("request is too old: timestamp={}, now={}", timestamp.seconds(), now.seconds());
        return Err(Error::ExpiredRequest);
    }

    let claimed: Digest = req.signature.parse().map_err(|err| {
        log::trace!("malformed request signature: {:?}", err);
        Error::SignatureMismatch
    })?;
    if claimed.version() != context.version() {
        log::trace!("unexpected signature version: {}", claimed.version());
        return Err(Error::SignatureMismatch);
    }

    // the timestamp is hashed exactly as received
    let content = canonical::canonicalize(context.version(), &req.timestamp, &req.body);

    if !digest::verify(
        content.as_bytes(),
        context.secret(),
        context.algorithm(),
        claimed.bytes(),
    )? {
        log::trace!("signature mismatch");
        return Err(Error::SignatureMismatch);
    }

    log::debug!("signature verified");
    Ok(())
}
