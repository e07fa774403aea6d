pub mod dispatch_payload;
pub mod execute_task;

use async_trait::async_trait;

use crate::domain::entities::DelegatedCommand;

/// Issues a delegated command to the chat platform with the acting user's token.
#[async_trait]
pub trait CommandRelay: Send + Sync {
    async fn relay(&self, token: &str, command: &DelegatedCommand) -> Result<String, RelayError>;
}

#[derive(Debug, PartialEq)]
pub struct RelayError {
    pub message: String,
}

impl RelayError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
