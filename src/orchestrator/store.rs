//! Saved-results persistence
//!
//! [`ResultStore`] is the CRUD capability behind the saved-results
//! operations; [`HttpResultStore`] maps it onto the server's
//! `/api/resultados-salvos` collection.

use crate::error::StoreError;
use crate::model::{NewSavedResult, ResultFilter, SavedResult, SavedResultId};
use crate::transport::Transport;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Durable list of named saved runs
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// List saved results matching `filter`, in server order
    async fn list(&self, filter: &ResultFilter) -> Result<Vec<SavedResult>, StoreError>;

    /// Persist a new saved result and return its id
    async fn create(&self, record: &NewSavedResult) -> Result<SavedResultId, StoreError>;

    /// Fetch one saved result
    async fn get(&self, id: SavedResultId) -> Result<SavedResult, StoreError>;

    /// Delete one saved result
    async fn delete(&self, id: SavedResultId) -> Result<(), StoreError>;
}

/// Identifier echoed back by the create endpoint
#[derive(Deserialize)]
struct Created {
    id: SavedResultId,
}

/// [`ResultStore`] backed by the roadmap server
#[derive(Clone)]
pub struct HttpResultStore {
    transport: Arc<dyn Transport>,
    path: String,
}

impl HttpResultStore {
    /// Create a store over `transport` rooted at the collection `path`
    pub fn new(transport: Arc<dyn Transport>, path: impl Into<String>) -> Self {
        Self {
            transport,
            path: path.into(),
        }
    }

    fn item_path(&self, id: SavedResultId) -> String {
        format!("{}/{}", self.path, id)
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl ResultStore for HttpResultStore {
    async fn list(&self, filter: &ResultFilter) -> Result<Vec<SavedResult>, StoreError> {
        let value = self.transport.get_json(&self.path, &filter.query()).await?;
        decode(value)
    }

    async fn create(&self, record: &NewSavedResult) -> Result<SavedResultId, StoreError> {
        let body = serde_json::to_value(record).map_err(|e| StoreError::Encode(e.to_string()))?;
        let value = self.transport.post_json(&self.path, &body).await?;
        let created: Created = decode(value)?;
        Ok(created.id)
    }

    async fn get(&self, id: SavedResultId) -> Result<SavedResult, StoreError> {
        let value = self.transport.get_json(&self.item_path(id), &[]).await?;
        decode(value)
    }

    async fn delete(&self, id: SavedResultId) -> Result<(), StoreError> {
        self.transport.delete(&self.item_path(id)).await?;
        Ok(())
    }
}
