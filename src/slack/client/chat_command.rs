use std::fmt::{self, Debug};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::DelegatedCommand;
use crate::domain::tasks::{CommandRelay, RelayError};
use crate::http;

const METHOD: &str = "chat.command";

#[derive(Serialize)]
pub struct ClientQuery {
    pub token: String,
    pub channel: String,
    pub command: String,
    pub text: String,
}

impl ClientQuery {
    pub fn new(token: &str, command: &DelegatedCommand) -> Self {
        Self {
            token: token.to_string(),
            channel: command.channel.clone(),
            command: format!("/{}", command.command),
            text: command.text.clone(),
        }
    }
}

impl Debug for ClientQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientQuery")
            .field("token", &"<redacted>")
            .field("channel", &self.channel)
            .field("command", &self.command)
            .field("text", &self.text)
            .finish()
    }
}

#[derive(Deserialize)]
pub struct ClientResponse {
    pub ok: bool,
    pub error: Option<String>,
}

impl TryFrom<&str> for ClientResponse {
    type Error = RelayError;

    fn try_from(body: &str) -> Result<Self, Self::Error> {
        serde_json::from_str(body).map_err(|err| {
            RelayError::new(&format!("invalid chat.command response: {}", err))
        })
    }
}

/// Runs slash commands through the `chat.command` method with a user token.
#[derive(Debug, Clone)]
pub struct Client {
    pub api_url: String,
}

pub fn new(api_url: &str) -> Client {
    Client {
        api_url: api_url.to_string(),
    }
}

impl Client {
    pub fn url(&self) -> String {
        format!("{}{}", self.api_url, METHOD)
    }
}

impl From<http::Error> for RelayError {
    fn from(err: http::Error) -> Self {
        RelayError { message: err.message }
    }
}

#[async_trait]
impl CommandRelay for Client {
    async fn relay(&self, token: &str, command: &DelegatedCommand) -> Result<String, RelayError> {
        let query = ClientQuery::new(token, command);
        let body = http::Client::new()
            .get(&self.url(), Some(&query))
            .await?
            .text()
            .await?;

        let response = ClientResponse::try_from(body.as_str())?;
        if !response.ok {
            return Err(RelayError::new(
                response.error.as_deref().unwrap_or("unknown_error"),
            ));
        }
        Ok(body)
    }
}
