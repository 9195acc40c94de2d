//! PackLightly Core Library
//!
//! Shared types and logic for PackLightly clients: the packing list data
//! model, the in-memory checklist store, the REST API client and the
//! per-category synchronization engine.

pub mod api;
pub mod checklist;
pub mod models;
pub mod sync;

pub use api::{ApiClient, ApiError, NoSession, StaticToken, TokenProvider};
pub use checklist::{ChecklistStore, SaveStatus};
pub use models::{
    ArticleUpdate, Category, CategorySection, Item, ItemUpdate, NewArticle, NewProduct,
    NewsArticle, PackingList, PackingListSummary, Product, ProductUpdate, Role, User,
};
pub use sync::{CategoryTransport, SyncEngine, RETRY_DELAY, SAVED_TTL};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
