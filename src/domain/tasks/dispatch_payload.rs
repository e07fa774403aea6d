use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::entities::{
    Action, DelegatedCommand, Dialog, DialogSubmission, InteractionPayload, InteractiveAction,
    Task, TASK_CALLBACK_ID,
};

pub struct Request {
    pub payload: String,
}

#[derive(Debug, PartialEq)]
pub struct Response {
    pub command: String,
    pub text: String,
    pub channel: Option<String>,
    pub user: Option<String>,
}

impl Response {
    /// The channel and user are only required once the command is delegated.
    pub fn into_delegated(self) -> Result<DelegatedCommand, Error> {
        Ok(DelegatedCommand {
            command: self.command,
            text: self.text,
            channel: self.channel.ok_or(Error::MissingField("channel.id".to_string()))?,
            user: self.user.ok_or(Error::MissingField("user.name".to_string()))?,
        })
    }
}

#[derive(Debug, PartialEq)]
pub enum Error {
    MalformedPayload(String),
    UnknownPayloadType(String),
    ForeignCallback(String),
    MalformedActions(usize),
    UnknownTask(String),
    EmptySubmission,
    MissingField(String),
}

#[derive(Deserialize)]
struct RawPayload {
    #[serde(rename = "type")]
    payload_type: Option<String>,
    callback_id: Option<String>,
    actions: Option<Vec<RawAction>>,
    submission: Option<HashMap<String, Option<String>>>,
    channel: Option<RawChannel>,
    user: Option<RawUser>,
    trigger_id: Option<String>,
}

#[derive(Deserialize)]
struct RawAction {
    name: Option<String>,
    value: Option<String>,
}

#[derive(Deserialize)]
struct RawChannel {
    id: Option<String>,
}

#[derive(Deserialize)]
struct RawUser {
    name: Option<String>,
}

impl TryFrom<RawPayload> for InteractionPayload {
    type Error = Error;

    fn try_from(value: RawPayload) -> Result<Self, Self::Error> {
        let payload_type = value.payload_type.unwrap_or_default();
        if payload_type != "interactive_message" && payload_type != "dialog_submission" {
            return Err(Error::UnknownPayloadType(payload_type));
        }

        // absent identifiers fail the callback checks as foreign
        let callback_id = value.callback_id.unwrap_or_default();
        let channel = value.channel.and_then(|channel| channel.id);
        let user = value.user.and_then(|user| user.name);

        match payload_type.as_str() {
            "interactive_message" => Ok(InteractionPayload::InteractiveAction(
                InteractiveAction {
                    callback_id,
                    actions: value
                        .actions
                        .unwrap_or_default()
                        .into_iter()
                        .map(|action| Action {
                            name: action.name.unwrap_or_default(),
                            value: action.value.unwrap_or_default(),
                        })
                        .collect(),
                    channel,
                    user,
                },
            )),
            _ => Ok(InteractionPayload::DialogSubmission(DialogSubmission {
                callback_id,
                submission: value.submission.unwrap_or_default(),
                channel,
                user,
                trigger_id: value.trigger_id,
            })),
        }
    }
}

pub fn parse(payload: &str) -> Result<InteractionPayload, Error> {
    let raw: RawPayload = serde_json::from_str(payload).map_err(|err| {
        log::trace!("failed to deserialize interaction payload: {}", err);
        Error::MalformedPayload(err.to_string())
    })?;
    raw.try_into()
}

pub fn execute(req: Request) -> Result<Response, Error> {
    let payload = parse(&req.payload)?;
    log::trace!("dispatching interaction payload: {:?}", payload);

    match payload {
        InteractionPayload::InteractiveAction(action) => dispatch_action(action),
        InteractionPayload::DialogSubmission(submission) => dispatch_submission(submission),
    }
}

fn dispatch_action(payload: InteractiveAction) -> Result<Response, Error> {
    check_callback(TASK_CALLBACK_ID, &payload.callback_id)?;

    let mut actions = payload.actions;
    if actions.len() != 1 {
        return Err(Error::MalformedActions(actions.len()));
    }
    let action = actions.remove(0);

    // the action must carry the same identifier as its envelope
    check_callback(TASK_CALLBACK_ID, &action.name)?;

    let task = Task::try_from(action.value.as_str()).map_err(Error::UnknownTask)?;

    Ok(Response {
        command: task.command(),
        text: String::new(),
        channel: payload.channel,
        user: payload.user,
    })
}

fn dispatch_submission(payload: DialogSubmission) -> Result<Response, Error> {
    let dialog = Dialog::try_from(payload.callback_id.as_str()).map_err(Error::ForeignCallback)?;
    check_callback(Dialog::Weather.command(), dialog.command())?;

    if payload.submission.is_empty() {
        return Err(Error::EmptySubmission);
    }

    let text = dialog.text(&payload.submission).map_err(Error::MissingField)?;

    Ok(Response {
        command: dialog.command().to_string(),
        text,
        channel: payload.channel,
        user: payload.user,
    })
}

fn check_callback(expected: &str, actual: &str) -> Result<(), Error> {
    if expected != actual {
        log::trace!("rejecting foreign callback: expected={}, actual={}", expected, actual);
        return Err(Error::ForeignCallback(actual.to_string()));
    }
    Ok(())
}
