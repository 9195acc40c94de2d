//! REST client for the PackLightly API.

mod client;
mod error;
mod token;

pub use client::ApiClient;
pub use error::ApiError;
pub use token::{NoSession, StaticToken, TokenProvider};
