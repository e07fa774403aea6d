use std::sync::Arc;

use crate::domain::entities::{Credential, DelegatedCommand};
use crate::repository::{credentials::Repository, errors::FindError};

use super::{dispatch_payload, CommandRelay};

pub struct Request {
    pub payload: String,
    pub namespace: String,
}

#[derive(Debug, PartialEq)]
pub struct Response {
    pub command: DelegatedCommand,
    pub reply: String,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    Rejected(dispatch_payload::Error),
    Unauthorized,
    Relay(String),
    Unknown,
}

impl From<dispatch_payload::Error> for Error {
    fn from(value: dispatch_payload::Error) -> Self {
        Error::Rejected(value)
    }
}

impl From<FindError> for Error {
    fn from(value: FindError) -> Self {
        match value {
            FindError::NotFound => Error::Unauthorized,
            FindError::Unknown => Error::Unknown,
        }
    }
}

/// Re-issues the command selected in an interaction payload on behalf of the user who selected it.
///
/// Relay failures are reported, never retried: replaying a user action could run it twice.
pub async fn execute(
    repo: Arc<dyn Repository>,
    relay: Arc<dyn CommandRelay>,
    req: Request,
) -> Result<Response, Error> {
    let command = dispatch_payload::execute(dispatch_payload::Request {
        payload: req.payload,
    })?
    .into_delegated()?;

    let key = Credential::key(&req.namespace, &command.user);
    let credential = repo.find_token(key).await.map_err(|err| {
        log::trace!("no delegated credential for user {}: {:?}", command.user, err);
        Error::from(err)
    })?;

    let reply = relay
        .relay(&credential.token, &command)
        .await
        .map_err(|err| {
            log::error!("failed to relay {}: {}", command, err.message);
            Error::Relay(err.message)
        })?;

    log::info!("relayed {}: {}", command, reply);

    Ok(Response { command, reply })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mocks::{self, MockRelay};
    use crate::repository::credentials::InMemoryRepository;

    fn request(payload: String) -> Request {
        Request {
            payload,
            namespace: mocks::NAMESPACE.to_string(),
        }
    }

    #[tokio::test]
    async fn it_should_relay_the_task_with_the_user_token() {
        let repo = mocks::credentials();
        let relay = Arc::new(MockRelay::new());

        let result = execute(repo, relay.clone(), request(mocks::interactive_payload("WEATHER"))).await;

        let expected = DelegatedCommand {
            command: "weather".to_string(),
            text: "".to_string(),
            channel: mocks::CHANNEL.to_string(),
            user: mocks::USER.to_string(),
        };
        match result {
            Ok(Response { command, reply }) => {
                assert_eq!(command, expected);
                assert_eq!(reply, mocks::RELAY_REPLY);
            }
            _ => unreachable!(),
        };
        assert_eq!(relay.calls(), vec![(mocks::TOKEN.to_string(), expected)]);
    }

    #[tokio::test]
    async fn it_should_relay_the_dialog_submission_text() {
        let relay = Arc::new(MockRelay::new());

        let result = execute(
            mocks::credentials(),
            relay.clone(),
            request(mocks::submission_payload("Daan", "24")),
        )
        .await;

        match result {
            Ok(Response { command, .. }) => {
                assert_eq!(command.command, "weather");
                assert_eq!(command.text, "Daan 24");
            }
            _ => unreachable!(),
        };
        assert_eq!(relay.calls().len(), 1);
    }

    #[tokio::test]
    async fn it_should_return_unauthorized_when_the_user_has_no_token() {
        let repo = Arc::new(InMemoryRepository::new());
        let relay = Arc::new(MockRelay::new());

        let result = execute(repo, relay.clone(), request(mocks::interactive_payload("WEATHER"))).await;

        match result {
            Err(err) => assert_eq!(err, Error::Unauthorized),
            _ => unreachable!(),
        };
        assert!(relay.calls().is_empty());
    }

    #[tokio::test]
    async fn it_should_look_up_tokens_in_the_configured_namespace() {
        let relay = Arc::new(MockRelay::new());
        let req = Request {
            payload: mocks::interactive_payload("WEATHER"),
            namespace: "other.namespace".to_string(),
        };

        let result = execute(mocks::credentials(), relay, req).await;

        match result {
            Err(err) => assert_eq!(err, Error::Unauthorized),
            _ => unreachable!(),
        };
    }

    #[tokio::test]
    async fn it_should_reject_payloads_before_touching_the_relay() {
        let relay = Arc::new(MockRelay::new());

        let result = execute(
            mocks::credentials(),
            relay.clone(),
            request(mocks::interactive_payload("LOTTERY")),
        )
        .await;

        match result {
            Err(err) => assert_eq!(
                err,
                Error::Rejected(dispatch_payload::Error::UnknownTask("LOTTERY".to_string()))
            ),
            _ => unreachable!(),
        };
        assert!(relay.calls().is_empty());
    }

    #[tokio::test]
    async fn it_should_reject_payloads_without_a_user() {
        let relay = Arc::new(MockRelay::new());
        let payload = r#"{"type":"dialog_submission","callback_id":"weather","submission":{"district":"Daan","hours":"24"},"channel":{"id":"C0123"}}"#;

        let result = execute(mocks::credentials(), relay, request(payload.to_string())).await;

        match result {
            Err(err) => assert_eq!(
                err,
                Error::Rejected(dispatch_payload::Error::MissingField("user.name".to_string()))
            ),
            _ => unreachable!(),
        };
    }

    #[tokio::test]
    async fn it_should_surface_relay_failures_without_retrying() {
        let relay = Arc::new(MockRelay::failing("channel_not_found"));

        let result = execute(
            mocks::credentials(),
            relay.clone(),
            request(mocks::interactive_payload("MOVIE")),
        )
        .await;

        match result {
            Err(err) => assert_eq!(err, Error::Relay("channel_not_found".to_string())),
            _ => unreachable!(),
        };
        assert_eq!(relay.calls().len(), 1);
    }
}
