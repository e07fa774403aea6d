use std::{net::SocketAddr, sync::Arc};

use axum::{middleware, routing, Extension, Router, Server};
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    repository::credentials::{EnvRepository, MongoDbRepository, Repository},
    slack::client::chat_command,
    transit,
};

use super::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/task", routing::post(super::tasks::prompt))
        .route("/task/execute", routing::post(super::tasks::execute))
        .route("/bus", routing::post(super::bus::route))
        .route_layer(middleware::from_fn(super::guard::validate))
        .layer(Extension(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let signing = config.signing_context()?;

    let credentials: Arc<dyn Repository> = match &config.database_url {
        Some(url) => {
            log::info!("Connecting to credentials database {}", config.database_name);
            Arc::new(MongoDbRepository::new(url, &config.database_name, 10).await?)
        }
        None => {
            log::info!("Reading delegated tokens from the environment");
            Arc::new(EnvRepository::new())
        }
    };

    let state = Arc::new(AppState {
        signing,
        token_namespace: config.token_namespace.clone(),
        credentials,
        relay: Arc::new(chat_command::new(&config.slack_api_url)),
        transit: transit::client::new(
            &config.transit_api_url,
            &config.transit_city,
            config.transit_key(),
        ),
    });

    let address: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    log::info!("Listening on port {}", config.port);

    Server::bind(&address)
        .serve(router(state).into_make_service())
        .await?;

    Ok(())
}
