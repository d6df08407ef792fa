use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::user::User;

/// GitHub repository summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub homepage: String,
    pub language: String,
    pub master_branch: String,
    pub url: String,
    pub html_url: String,
    pub clone_url: String,
    pub git_url: String,
    pub ssh_url: String,
    pub svn_url: String,
    pub mirror_url: String,
    /// Size in kilobytes
    pub size: i64,
    pub open_issues_count: i32,
    pub watchers_count: i32,
    pub forks_count: i32,
    pub network_count: i32,
    pub has_issues: bool,
    pub has_wiki: bool,
    pub has_downloads: bool,
    #[serde(rename = "fork")]
    pub is_fork: bool,
    #[serde(rename = "private")]
    pub is_private: bool,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub pushed_at: DateTime<FixedOffset>,
    /// Only `login`, `url`, `id` and `avatar_url` are filled in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
}
