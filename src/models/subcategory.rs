use serde::{Deserialize, Serialize};

use crate::models::null_as_default;
use crate::types::EntityId;

/// Second-level taxonomy node as returned by `GET /subcategory/subcategories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: EntityId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_url: Option<String>,
    // The server keeps the foreign key even after its category is gone,
    // but older rows were written with null.
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub category_name: Option<String>,
}

/// Body for `POST /subcategory` and `PUT /subcategory`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_url: Option<String>,
    pub category_id: EntityId,
}
