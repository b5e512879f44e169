use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::api::BloomsApi;
use crate::config::ApiConfig;
use crate::error::RequestError;
use crate::models::{
    Blog, BlogPayload, Category, CategoryNode, CategoryPayload, Credentials, Identity,
    RegisterPayload, SubCategory, SubCategoryPayload,
};
use crate::session::Session;
use crate::types::EntityId;

/// HTTP client for the Blooms backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            log_requests: config.enable_request_logging,
        })
    }

    /// Attach the session's bearer credential (if any) to every request
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = session
            .current_user()
            .and_then(Identity::token)
            .map(str::to_string);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: Option<(&str, &EntityId)>) -> Result<Url, RequestError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if let Some((key, id)) = query {
            url.query_pairs_mut().append_pair(key, &id.to_string());
        }
        Ok(url)
    }

    /// Issue one request and return the raw body text on 2xx
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<String, RequestError> {
        if self.log_requests {
            tracing::info!("{} {}", method, url.path());
        } else {
            tracing::debug!("{} {}", method, url.path());
        }

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!("{} {} failed with {}", method, url.path(), status);
            return Err(RequestError::from_status(status.as_u16(), &text));
        }

        Ok(text)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, RequestError> {
        let text = self.send(Method::GET, self.url(path, None)?, None).await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn mutate<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Option<Value>, RequestError> {
        let body = serde_json::to_value(body)?;
        let text = self.send(method, self.url(path, None)?, Some(body)).await?;
        Ok(parse_optional_body(&text))
    }

    async fn delete(&self, path: &str, key: &str, id: &EntityId) -> Result<Option<Value>, RequestError> {
        let text = self.send(Method::DELETE, self.url(path, Some((key, id)))?, None).await?;
        Ok(parse_optional_body(&text))
    }
}

/// Mutation endpoints answer with JSON, plain text, or nothing at all
fn parse_optional_body(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
}

#[async_trait]
impl BloomsApi for ApiClient {
    async fn register(&self, payload: &RegisterPayload) -> Result<Option<Value>, RequestError> {
        self.mutate(Method::POST, "/user", payload).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<Option<Identity>, RequestError> {
        let body = self.mutate(Method::POST, "/user/login", credentials).await?;
        Ok(body.and_then(Identity::from_payload))
    }

    async fn categories(&self) -> Result<Vec<Category>, RequestError> {
        self.get_list("/category/all").await
    }

    async fn create_category(&self, payload: &CategoryPayload) -> Result<Option<Value>, RequestError> {
        self.mutate(Method::POST, "/category", payload).await
    }

    async fn update_category(&self, payload: &CategoryPayload) -> Result<Option<Value>, RequestError> {
        self.mutate(Method::PUT, "/category", payload).await
    }

    async fn delete_category(&self, id: &EntityId) -> Result<Option<Value>, RequestError> {
        self.delete("/category", "categoryId", id).await
    }

    async fn subcategories(&self) -> Result<Vec<SubCategory>, RequestError> {
        self.get_list("/subcategory/subcategories").await
    }

    async fn create_subcategory(&self, payload: &SubCategoryPayload) -> Result<Option<Value>, RequestError> {
        self.mutate(Method::POST, "/subcategory", payload).await
    }

    async fn update_subcategory(&self, payload: &SubCategoryPayload) -> Result<Option<Value>, RequestError> {
        self.mutate(Method::PUT, "/subcategory", payload).await
    }

    async fn delete_subcategory(&self, id: &EntityId) -> Result<Option<Value>, RequestError> {
        self.delete("/subcategory", "subCategoryId", id).await
    }

    async fn blogs(&self) -> Result<Vec<Blog>, RequestError> {
        self.get_list("/blog/all").await
    }

    async fn category_tree(&self) -> Result<Vec<CategoryNode>, RequestError> {
        self.get_list("/blog/categories").await
    }

    async fn create_blog(&self, payload: &BlogPayload) -> Result<Option<Value>, RequestError> {
        self.mutate(Method::POST, "/blog", payload).await
    }

    async fn update_blog(&self, payload: &BlogPayload) -> Result<Option<Value>, RequestError> {
        self.mutate(Method::PUT, "/blog", payload).await
    }

    async fn delete_blog(&self, id: &EntityId) -> Result<Option<Value>, RequestError> {
        self.delete("/blog", "blogId", id).await
    }
}
