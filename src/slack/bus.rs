use std::sync::Arc;

use axum::extract::{Form, State};
use axum::Json;
use hyper::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::transit;

use super::state::AppState;

/// Slash command posted to `/bus`. The first word of the text names the bus route.
#[derive(Deserialize, Debug)]
pub struct BusCommand {
    #[serde(default)]
    pub text: String,
}

pub async fn route(
    State(state): State<Arc<AppState>>,
    Form(command): Form<BusCommand>,
) -> Result<Json<Value>, StatusCode> {
    log::trace!("received bus command: {:?}", command);

    let route = command.text.split_whitespace().next().ok_or_else(|| {
        log::trace!("bus command without a route");
        StatusCode::BAD_REQUEST
    })?;

    let routes = state
        .transit
        .call("Route", route, &Vec::<(&str, &str)>::new())
        .await
        .map_err(|err| {
            log::error!("could not look up bus route {}: {:?}", route, err);
            match err {
                transit::client::Error::InvalidKey => StatusCode::INTERNAL_SERVER_ERROR,
                transit::client::Error::Request(..) | transit::client::Error::Response(..) => {
                    StatusCode::BAD_GATEWAY
                }
            }
        })?;

    Ok(Json(Value::Array(routes)))
}
