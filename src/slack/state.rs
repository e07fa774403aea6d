use std::sync::Arc;

use crate::{
    crypto::SigningContext, domain::tasks::CommandRelay, repository, transit,
};

pub struct AppState {
    pub signing: SigningContext,
    pub token_namespace: String,
    pub credentials: Arc<dyn repository::credentials::Repository>,
    pub relay: Arc<dyn CommandRelay>,
    pub transit: transit::client::Client,
}
