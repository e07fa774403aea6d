use handlebars::Handlebars;
use hyper::StatusCode;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::domain::entities::{Task, TASK_CALLBACK_ID};

const TASK_PROMPT_HBS: &str = "task_prompt.json.hbs";

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut registry = Handlebars::new();
    // values land inside json string literals
    registry.register_escape_fn(|value| {
        let quoted = Value::from(value).to_string();
        quoted[1..quoted.len() - 1].to_string()
    });
    if let Err(err) = registry.register_template_string(
        TASK_PROMPT_HBS,
        include_str!("../assets/task_prompt.json.hbs"),
    ) {
        log::error!("could not register template {}: {}", TASK_PROMPT_HBS, err);
    }
    registry
});

#[derive(Debug, PartialEq)]
pub enum Error {
    RenderTemplate,
}

impl From<Error> for StatusCode {
    fn from(value: Error) -> Self {
        match value {
            Error::RenderTemplate => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Message offering every task as a confirmable button under the task callback id.
pub fn task_prompt(text: &str, channel: Option<&str>) -> Result<Value, Error> {
    let context = json!({
        "text": text,
        "channel": channel,
        "callback_id": TASK_CALLBACK_ID,
        "tasks": Task::all()
            .into_iter()
            .map(|task| json!({ "label": task.label(), "value": task.value() }))
            .collect::<Vec<Value>>(),
    });

    let rendered = TEMPLATES.render(TASK_PROMPT_HBS, &context).map_err(|err| {
        log::error!("could not render template {}: {}", TASK_PROMPT_HBS, err);
        Error::RenderTemplate
    })?;

    serde_json::from_str(&rendered).map_err(|err| {
        log::error!("template {} rendered invalid json: {}", TASK_PROMPT_HBS, err);
        Error::RenderTemplate
    })
}
