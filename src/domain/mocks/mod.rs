use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;
use serde_json::json;

use crate::domain::entities::{Credential, DelegatedCommand, TASK_CALLBACK_ID};
use crate::domain::tasks::{CommandRelay, RelayError};
use crate::repository::credentials::InMemoryRepository;

pub const NAMESPACE: &str = "slack.legacy.token";
pub const USER: &str = "alice";
pub const CHANNEL: &str = "C0123";
pub const TOKEN: &str = "xoxp-alice";
pub const RELAY_REPLY: &str = r#"{"ok":true}"#;

pub fn interactive_payload(task: &str) -> String {
    json!({
        "type": "interactive_message",
        "callback_id": TASK_CALLBACK_ID,
        "actions": [{ "name": TASK_CALLBACK_ID, "value": task }],
        "channel": { "id": CHANNEL },
        "user": { "name": USER },
    })
    .to_string()
}

pub fn submission_payload(district: &str, hours: &str) -> String {
    json!({
        "type": "dialog_submission",
        "callback_id": "weather",
        "submission": { "district": district, "hours": hours },
        "channel": { "id": CHANNEL },
        "user": { "name": USER },
        "trigger_id": "1337.42",
    })
    .to_string()
}

pub fn credentials() -> Arc<InMemoryRepository> {
    let repo = InMemoryRepository::new();
    repo.insert(Credential {
        key: Credential::key(NAMESPACE, USER),
        token: TOKEN.to_string(),
    });
    Arc::new(repo)
}

/// Records every relayed command instead of calling slack.
pub struct MockRelay {
    calls: Mutex<Vec<(String, DelegatedCommand)>>,
    failure: Option<String>,
}

impl MockRelay {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(vec![]),
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(vec![]),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<(String, DelegatedCommand)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRelay for MockRelay {
    async fn relay(&self, token: &str, command: &DelegatedCommand) -> Result<String, RelayError> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), command.clone()));
        match &self.failure {
            Some(message) => Err(RelayError::new(message)),
            None => Ok(RELAY_REPLY.to_string()),
        }
    }
}

static LOGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(vec![]));

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        LOGS.lock().unwrap().push(format!("{}", record.args()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Installs a process-wide logger that keeps every formatted record. Safe to call more than once.
pub fn capture_logs() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

pub fn captured_logs() -> Vec<String> {
    LOGS.lock().unwrap().clone()
}
