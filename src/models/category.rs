use serde::{Deserialize, Serialize};

use crate::models::null_as_default;
use crate::types::EntityId;

/// Top-level taxonomy node as returned by `GET /category/all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_url: Option<String>,
}

/// Body for `POST /category` and `PUT /category`; `id` is only sent on update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_url: Option<String>,
}
