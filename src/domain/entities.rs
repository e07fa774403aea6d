use std::collections::HashMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Callback identifier embedded in the task prompt and echoed back by slack.
pub const TASK_CALLBACK_ID: &str = "HEROKU_TASK";

/// Tasks offered as buttons on the task prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    Weather,
    Typhoon,
    Movie,
}

impl Task {
    pub fn all() -> [Task; 3] {
        [Task::Weather, Task::Typhoon, Task::Movie]
    }

    /// Value carried by the prompt button.
    pub fn value(&self) -> &'static str {
        match self {
            Task::Weather => "WEATHER",
            Task::Typhoon => "TYPHOON",
            Task::Movie => "MOVIE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Task::Weather => "Weather forecast",
            Task::Typhoon => "Typhoon bulletin",
            Task::Movie => "Movie showtimes",
        }
    }

    /// Slash command the task is re-issued as.
    pub fn command(&self) -> String {
        self.value().to_lowercase()
    }
}

impl TryFrom<&str> for Task {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Task::all()
            .into_iter()
            .find(|task| task.value() == value)
            .ok_or_else(|| value.to_string())
    }
}

/// Dialogs this service opens, each with its ordered list of required fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialog {
    Weather,
    Bus,
    Station,
}

impl Dialog {
    pub fn all() -> [Dialog; 3] {
        [Dialog::Weather, Dialog::Bus, Dialog::Station]
    }

    /// The callback identifier of the dialog, which is also the command it submits to.
    pub fn command(&self) -> &'static str {
        match self {
            Dialog::Weather => "weather",
            Dialog::Bus => "bus",
            Dialog::Station => "station",
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Dialog::Weather => &["district", "hours"],
            Dialog::Bus => &["stop"],
            Dialog::Station => &["start", "end"],
        }
    }

    /// Joins the submitted values of every field with a single space.
    /// Fails with the name of the first field that is absent or null.
    pub fn text(&self, submission: &HashMap<String, Option<String>>) -> Result<String, String> {
        let values = self
            .fields()
            .iter()
            .map(|&field| match submission.get(field) {
                Some(Some(value)) => Ok(value.as_str()),
                _ => Err(field.to_string()),
            })
            .collect::<Result<Vec<&str>, String>>()?;
        Ok(values.join(" "))
    }
}

impl TryFrom<&str> for Dialog {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Dialog::all()
            .into_iter()
            .find(|dialog| dialog.command() == value)
            .ok_or_else(|| value.to_string())
    }
}

/// Interaction payload posted by slack to the deferred execution endpoint.
#[derive(Debug, PartialEq)]
pub enum InteractionPayload {
    InteractiveAction(InteractiveAction),
    DialogSubmission(DialogSubmission),
}

#[derive(Debug, PartialEq)]
pub struct InteractiveAction {
    pub callback_id: String,
    pub actions: Vec<Action>,
    pub channel: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct Action {
    pub name: String,
    pub value: String,
}

#[derive(Debug, PartialEq)]
pub struct DialogSubmission {
    pub callback_id: String,
    pub submission: HashMap<String, Option<String>>,
    pub channel: Option<String>,
    pub user: Option<String>,
    pub trigger_id: Option<String>,
}

/// A command re-issued on behalf of the user that triggered it.
#[derive(Clone, Debug, PartialEq)]
pub struct DelegatedCommand {
    pub command: String,
    pub text: String,
    pub channel: String,
    pub user: String,
}

impl Display for DelegatedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{} {} (channel={}, user={})",
            self.command, self.text, self.channel, self.user
        )
    }
}

/// A per-user token stored under `<namespace>.<username>`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Credential {
    pub key: String,
    pub token: String,
}

impl Credential {
    pub fn key(namespace: &str, user: &str) -> String {
        format!("{}.{}", namespace, user)
    }
}
