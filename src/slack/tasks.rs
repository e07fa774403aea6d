use std::sync::Arc;

use axum::extract::{Form, State};
use axum::Json;
use hyper::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::tasks::execute_task;

use super::state::AppState;
use super::templates;

/// Slash command posted to `/task`. The text heads the prompt and the channel addresses it.
#[derive(Deserialize, Debug)]
pub struct TaskCommand {
    pub channel_id: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// Interaction posted to `/task/execute`, the json payload travels in a form field.
#[derive(Deserialize)]
pub struct TaskExecution {
    pub payload: String,
}

pub async fn prompt(Form(command): Form<TaskCommand>) -> Result<Json<Value>, StatusCode> {
    log::trace!("received task command: {:?}", command);
    let prompt = templates::task_prompt(command.text.trim(), command.channel_id.as_deref())?;
    Ok(Json(prompt))
}

pub async fn execute(
    State(state): State<Arc<AppState>>,
    Form(execution): Form<TaskExecution>,
) -> Result<StatusCode, StatusCode> {
    log::trace!("received task execution: {} bytes", execution.payload.len());

    let result = execute_task::execute(
        state.credentials.clone(),
        state.relay.clone(),
        execute_task::Request {
            payload: execution.payload,
            namespace: state.token_namespace.clone(),
        },
    )
    .await;

    match result {
        Ok(..) => Ok(StatusCode::OK),
        Err(err) => {
            log::trace!("task execution failed: {:?}", err);
            Err(match err {
                execute_task::Error::Rejected(..) => StatusCode::BAD_REQUEST,
                execute_task::Error::Unauthorized => StatusCode::FORBIDDEN,
                execute_task::Error::Relay(..) => StatusCode::BAD_GATEWAY,
                execute_task::Error::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            })
        }
    }
}
