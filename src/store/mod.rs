pub mod error;
pub mod file;
pub mod model;
pub mod rest;
pub mod share;

use async_trait::async_trait;

pub use error::StoreError;
pub use file::FileStore;
pub use model::{Conversation, Message, Role};
pub use rest::RestStore;
pub use share::resolve_conversation_id;

#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Conversation, StoreError>;
}
