use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{ConversationStore, error::StoreError, model::Conversation};

#[derive(Deserialize)]
#[serde(untagged)]
enum Records {
    Many(Vec<Conversation>),
    One(Box<Conversation>),
}

/// Reads a conversation export from disk: a single record, or an array of
/// records as returned by the REST endpoint.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConversationStore for FileStore {
    async fn fetch(&self, id: &str) -> Result<Conversation, StoreError> {
        debug!(path = %self.path.display(), "Reading conversation file");
        let raw = tokio::fs::read_to_string(&self.path).await?;

        match serde_json::from_str::<Records>(&raw)? {
            Records::One(conversation) => Ok(*conversation),
            Records::Many(rows) => rows
                .into_iter()
                .find(|c| id.is_empty() || c.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string())),
        }
    }
}
