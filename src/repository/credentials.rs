use std::collections::HashMap;
use std::env::{self, VarError};
use std::sync::Mutex;

use async_trait::async_trait;
use bson::doc;

use crate::domain::entities::Credential;

use super::errors::FindError;

/// Lookup of delegated user tokens by their `<namespace>.<username>` key.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_token(&self, key: String) -> Result<Credential, FindError>;
}

/// Reads tokens from environment variables named after the lookup key.
pub struct EnvRepository;

impl EnvRepository {
    pub fn new() -> EnvRepository {
        EnvRepository
    }
}

#[async_trait]
impl Repository for EnvRepository {
    async fn find_token(&self, key: String) -> Result<Credential, FindError> {
        match env::var(&key) {
            Ok(token) if !token.is_empty() => Ok(Credential { key, token }),
            Ok(..) | Err(VarError::NotPresent) => Err(FindError::NotFound),
            Err(err) => {
                log::error!("could not read token {}: {}", key, err);
                Err(FindError::Unknown)
            }
        }
    }
}

pub struct MongoDbRepository {
    db: mongodb::Database,
}

impl MongoDbRepository {
    pub async fn new(
        uri: &str,
        database: &str,
        pool_size: u32,
    ) -> Result<MongoDbRepository, mongodb::error::Error> {
        // Parse a connection string into an options struct.
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;
        client_options.max_pool_size = Some(pool_size);

        let client = mongodb::Client::with_options(client_options)?;
        let db = client.database(database);

        db.run_command(doc! {"ping": 1}, None).await?;

        Ok(MongoDbRepository { db })
    }
}

#[async_trait]
impl Repository for MongoDbRepository {
    async fn find_token(&self, key: String) -> Result<Credential, FindError> {
        let filter = doc! { "key": key };
        let credential = self
            .db
            .collection::<Credential>("tokens")
            .find_one(filter, None)
            .await?;

        match credential {
            Some(credential) if !credential.token.is_empty() => Ok(credential),
            _ => Err(FindError::NotFound),
        }
    }
}

pub struct InMemoryRepository {
    tokens: Mutex<HashMap<String, String>>,
}

impl InMemoryRepository {
    pub fn new() -> InMemoryRepository {
        InMemoryRepository {
            tokens: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, credential: Credential) {
        if let Ok(mut lock) = self.tokens.lock() {
            lock.insert(credential.key, credential.token);
        }
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_token(&self, key: String) -> Result<Credential, FindError> {
        let lock = match self.tokens.lock() {
            Ok(lock) => lock,
            _ => return Err(FindError::Unknown),
        };
        match lock.get(&key) {
            Some(token) => Ok(Credential {
                key,
                token: token.clone(),
            }),
            None => Err(FindError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_should_find_an_inserted_token() {
        let repo = InMemoryRepository::new();
        repo.insert(Credential {
            key: "slack.legacy.token.alice".to_string(),
            token: "xoxp-1".to_string(),
        });

        let result = repo.find_token("slack.legacy.token.alice".to_string()).await;

        match result {
            Ok(Credential { token, .. }) => assert_eq!(token, "xoxp-1"),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn it_should_return_not_found_for_unknown_users() {
        let repo = InMemoryRepository::new();

        let result = repo.find_token("slack.legacy.token.bob".to_string()).await;

        assert_eq!(result, Err(FindError::NotFound));
    }

    #[tokio::test]
    async fn it_should_read_tokens_from_the_environment() {
        let key = "slack.legacy.token.env-repository-test".to_string();
        env::set_var(&key, "xoxp-env");

        let result = EnvRepository::new().find_token(key.clone()).await;

        assert_eq!(
            result,
            Ok(Credential {
                key: key.clone(),
                token: "xoxp-env".to_string(),
            })
        );
        env::remove_var(&key);
    }

    #[tokio::test]
    async fn it_should_treat_missing_or_empty_variables_as_not_found() {
        let key = "slack.legacy.token.env-repository-empty".to_string();

        let result = EnvRepository::new().find_token(key.clone()).await;
        assert_eq!(result, Err(FindError::NotFound));

        env::set_var(&key, "");
        let result = EnvRepository::new().find_token(key.clone()).await;
        assert_eq!(result, Err(FindError::NotFound));
        env::remove_var(&key);
    }
}
