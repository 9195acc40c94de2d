//! Transport seam between the sync engine and the HTTP client.
//!
//! The engine only ever needs one operation: push a category's item
//! sequence to a list document. Keeping that behind a trait lets tests
//! drive the engine with a scripted transport instead of a server.

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};
use crate::models::{Category, Item};

/// Pushes one category's item sequence to the remote list document.
pub trait CategoryTransport: Send + Sync {
    fn push_category(
        &self,
        list_id: Uuid,
        category: Category,
        items: Vec<Item>,
    ) -> BoxFuture<'static, Result<(), ApiError>>;
}

impl CategoryTransport for ApiClient {
    fn push_category(
        &self,
        list_id: Uuid,
        category: Category,
        items: Vec<Item>,
    ) -> BoxFuture<'static, Result<(), ApiError>> {
        let client = self.clone();
        Box::pin(async move { client.update_category(list_id, &category, &items).await })
    }
}
