use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// OAuth authorization granted to an application
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Authorization {
    pub id: i64,
    pub token: String,
    /// `None` when the payload has no `scopes` array, `Some(vec![])` when it
    /// has an empty one
    pub scopes: Option<Vec<String>>,
    pub note: String,
    pub note_url: String,
    pub url: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(rename = "app", skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
}

/// Application an authorization was issued to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Application {
    pub name: String,
    pub url: String,
}

/// Request body for creating or updating an authorization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorizationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_url: Option<String>,
}
