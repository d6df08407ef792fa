use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// GitHub account profile
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub email: String,
    pub blog: String,
    pub company: String,
    pub location: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub html_url: String,
    pub url: String,
    pub followers: i32,
    pub following: i32,
    pub public_repos: i32,
    pub public_gists: i32,
    pub hireable: bool,
    /// Account classification, e.g. "User" or "Organization"
    #[serde(rename = "type")]
    pub user_type: String,
    pub created_at: DateTime<FixedOffset>,
    /// Only present when the payload carries a `plan` key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

/// Billing plan attached to the authenticated user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub name: String,
    pub space: i32,
    pub collaborators: i32,
    pub private_repos: i32,
}

/// Request body for updating the authenticated user.
///
/// Unset fields are left out of the request entirely; they are never sent
/// as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hireable: Option<bool>,
}
