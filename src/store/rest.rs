use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info};

use super::{ConversationStore, error::StoreError, model::Conversation};
use crate::config::StoreConfig;

/// Reads conversations from a PostgREST endpoint.
pub struct RestStore {
    client: Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let base_url = config
            .base_url
            .clone()
            .ok_or(StoreError::NotConfigured("SUPABASE_URL"))?;
        let anon_key = config
            .anon_key
            .clone()
            .ok_or(StoreError::NotConfigured("SUPABASE_ANON_KEY"))?;

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            table: config.table.clone(),
        })
    }

    pub fn record_url(&self, id: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(&format!("{}/rest/v1/{}", self.base_url, self.table))
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("select", "*");
        Ok(url)
    }
}

#[async_trait]
impl ConversationStore for RestStore {
    async fn fetch(&self, id: &str) -> Result<Conversation, StoreError> {
        let url = self.record_url(id)?;
        debug!(%url, "Fetching conversation");

        let rows: Vec<Conversation> = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let conversation = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        info!(id, messages = conversation.messages.len(), "Loaded conversation");
        Ok(conversation)
    }
}
