use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::null_as_default;
use crate::types::EntityId;

/// Account record echoed back by `POST /user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

/// Body for `POST /user`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body for `POST /user/login`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Authenticated-user payload exactly as the login endpoint returned it.
///
/// The shape is owned by the server; only a handful of well-known fields are
/// read and the rest is persisted untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(Value);

impl Identity {
    /// Wrap a login response. Empty or falsy bodies are not identities.
    pub fn from_payload(payload: Value) -> Option<Self> {
        match &payload {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::Object(map) if map.is_empty() => None,
            _ => Some(Identity(payload)),
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        serde_json::from_value(self.0.get("id")?.clone()).ok()
    }

    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(Value::as_str)
    }

    /// Human label: display name, then username, then id
    pub fn display_name(&self) -> String {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| self.username())
            .map(str::to_string)
            .or_else(|| self.id().map(|id| id.to_string()))
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Bearer credential, when the backend issues one
    pub fn token(&self) -> Option<&str> {
        self.0
            .get("token")
            .or_else(|| self.0.get("accessToken"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
