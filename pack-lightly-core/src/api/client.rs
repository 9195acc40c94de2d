//! HTTP client for the PackLightly REST API.
//!
//! Thin reqwest wrapper: every method is one authenticated JSON request.
//! Success is any 2xx status; everything else maps onto the `ApiError`
//! taxonomy. The client is cheap to clone and share.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::error::ApiError;
use super::token::TokenProvider;
use crate::models::{
    ArticleUpdate, Category, Item, NewArticle, NewProduct, NewsArticle, PackingList,
    PackingListSummary, Product, ProductUpdate, Role, User,
};

/// Client for the PackLightly REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            tokens,
        }
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a full URL for a given path, normalizing the base URL.
    fn build_url(&self, path: &str) -> String {
        let base = if self.base_url.starts_with("http://") || self.base_url.starts_with("https://")
        {
            self.base_url.clone()
        } else {
            format!("https://{}", self.base_url)
        };
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.tokens.token().ok_or(ApiError::NotAuthenticated)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.build_url(path))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::MalformedBody(e.to_string()))
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .request(method, self.build_url(path))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::MalformedBody(e.to_string()))
    }

    /// Sends a request whose response body is ignored on success.
    async fn send_no_body<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let mut request = self
            .http
            .request(method, self.build_url(path))
            .bearer_auth(self.bearer()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Packing lists
    // ------------------------------------------------------------------

    /// Fetch the packing list index.
    pub async fn fetch_packing_lists(&self) -> Result<Vec<PackingListSummary>, ApiError> {
        self.get_json("/packinglists").await
    }

    /// Fetch one packing list document.
    pub async fn fetch_packing_list(&self, list_id: Uuid) -> Result<PackingList, ApiError> {
        self.get_json(&format!("/packinglists/{}", list_id)).await
    }

    /// Push one category's item sequence to a list document.
    ///
    /// `PATCH /packinglists/{listId}/category/{category}` with body
    /// `{ "items": [...] }`. The category segment is percent-encoded since
    /// custom category names may contain spaces.
    pub async fn update_category(
        &self,
        list_id: Uuid,
        category: &Category,
        items: &[Item],
    ) -> Result<(), ApiError> {
        let path = format!(
            "/packinglists/{}/category/{}",
            list_id,
            urlencoding::encode(category.name())
        );
        let body = serde_json::json!({ "items": items });
        self.send_no_body(reqwest::Method::PATCH, &path, Some(&body))
            .await
    }

    // ------------------------------------------------------------------
    // Admin: products
    // ------------------------------------------------------------------

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products").await
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.send_json(reqwest::Method::POST, "/products", product)
            .await
    }

    pub async fn update_product(
        &self,
        product_id: Uuid,
        update: &ProductUpdate,
    ) -> Result<Product, ApiError> {
        self.send_json(
            reqwest::Method::PATCH,
            &format!("/products/{}", product_id),
            update,
        )
        .await
    }

    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), ApiError> {
        self.send_no_body::<()>(
            reqwest::Method::DELETE,
            &format!("/products/{}", product_id),
            None,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Admin: news
    // ------------------------------------------------------------------

    pub async fn list_articles(&self) -> Result<Vec<NewsArticle>, ApiError> {
        self.get_json("/news").await
    }

    pub async fn create_article(&self, article: &NewArticle) -> Result<NewsArticle, ApiError> {
        self.send_json(reqwest::Method::POST, "/news", article).await
    }

    pub async fn update_article(
        &self,
        article_id: Uuid,
        update: &ArticleUpdate,
    ) -> Result<NewsArticle, ApiError> {
        self.send_json(
            reqwest::Method::PATCH,
            &format!("/news/{}", article_id),
            update,
        )
        .await
    }

    pub async fn delete_article(&self, article_id: Uuid) -> Result<(), ApiError> {
        self.send_no_body::<()>(
            reqwest::Method::DELETE,
            &format!("/news/{}", article_id),
            None,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Admin: users
    // ------------------------------------------------------------------

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users").await
    }

    pub async fn update_user_role(&self, user_id: Uuid, role: Role) -> Result<User, ApiError> {
        let body = serde_json::json!({ "role": role });
        self.send_json(
            reqwest::Method::PATCH,
            &format!("/users/{}/role", user_id),
            &body,
        )
        .await
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), ApiError> {
        self.send_no_body::<()>(reqwest::Method::DELETE, &format!("/users/{}", user_id), None)
            .await
    }
}
