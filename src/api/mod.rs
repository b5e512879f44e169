//! Remote Blooms API: the `BloomsApi` seam and its HTTP implementation.

pub mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RequestError;
use crate::models::{
    Blog, BlogPayload, Category, CategoryNode, CategoryPayload, Credentials, Identity,
    RegisterPayload, SubCategory, SubCategoryPayload,
};
use crate::types::EntityId;

pub use client::ApiClient;

/// Every call the console makes against the backend.
///
/// Mutations return the decoded body when the server sent one. Callers must
/// not rely on it being present.
#[async_trait]
pub trait BloomsApi: Send + Sync {
    // user / session
    async fn register(&self, payload: &RegisterPayload) -> Result<Option<Value>, RequestError>;
    /// `Ok(None)` means the server answered with an empty body: bad credentials.
    async fn login(&self, credentials: &Credentials) -> Result<Option<Identity>, RequestError>;

    // category
    async fn categories(&self) -> Result<Vec<Category>, RequestError>;
    async fn create_category(&self, payload: &CategoryPayload) -> Result<Option<Value>, RequestError>;
    async fn update_category(&self, payload: &CategoryPayload) -> Result<Option<Value>, RequestError>;
    async fn delete_category(&self, id: &EntityId) -> Result<Option<Value>, RequestError>;

    // subcategory
    async fn subcategories(&self) -> Result<Vec<SubCategory>, RequestError>;
    async fn create_subcategory(&self, payload: &SubCategoryPayload) -> Result<Option<Value>, RequestError>;
    async fn update_subcategory(&self, payload: &SubCategoryPayload) -> Result<Option<Value>, RequestError>;
    async fn delete_subcategory(&self, id: &EntityId) -> Result<Option<Value>, RequestError>;

    // blog
    async fn blogs(&self) -> Result<Vec<Blog>, RequestError>;
    async fn category_tree(&self) -> Result<Vec<CategoryNode>, RequestError>;
    async fn create_blog(&self, payload: &BlogPayload) -> Result<Option<Value>, RequestError>;
    async fn update_blog(&self, payload: &BlogPayload) -> Result<Option<Value>, RequestError>;
    async fn delete_blog(&self, id: &EntityId) -> Result<Option<Value>, RequestError>;
}
