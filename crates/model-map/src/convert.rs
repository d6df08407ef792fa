//! Conversions between GitHub JSON payloads and domain records

use serde_json::Value;
use tracing::trace;

use crate::error::Result;
use crate::json::{elements, Fields, ObjectBuilder};
use crate::models::*;
use crate::options::DecodeOptions;
use crate::registry::{DecodeTarget, EncodeTarget};

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::models::User {}
    impl Sealed for crate::models::Authorization {}
    impl Sealed for Vec<crate::models::Authorization> {}
    impl Sealed for crate::models::Repository {}
    impl Sealed for Vec<crate::models::Repository> {}
    impl Sealed for crate::models::UserUpdate {}
    impl Sealed for crate::models::AuthorizationUpdate {}
}

/// A record the registry knows how to decode
pub trait FromJson: sealed::Sealed + Sized {
    const TARGET: DecodeTarget;

    fn from_json(value: &Value, options: DecodeOptions) -> Result<Self>;
}

/// An update record the registry knows how to encode
pub trait ToJson: sealed::Sealed {
    const TARGET: EncodeTarget;

    fn to_json(&self) -> Value;
}

impl FromJson for User {
    const TARGET: DecodeTarget = DecodeTarget::User;

    fn from_json(value: &Value, options: DecodeOptions) -> Result<Self> {
        decode_user(&Fields::of(value, options)?)
    }
}

impl FromJson for Authorization {
    const TARGET: DecodeTarget = DecodeTarget::Authorization;

    fn from_json(value: &Value, options: DecodeOptions) -> Result<Self> {
        decode_authorization(&Fields::of(value, options)?)
    }
}

impl FromJson for Vec<Authorization> {
    const TARGET: DecodeTarget = DecodeTarget::AuthorizationList;

    fn from_json(value: &Value, options: DecodeOptions) -> Result<Self> {
        decode_list(value, options, decode_authorization)
    }
}

impl FromJson for Repository {
    const TARGET: DecodeTarget = DecodeTarget::Repository;

    fn from_json(value: &Value, options: DecodeOptions) -> Result<Self> {
        decode_repository(&Fields::of(value, options)?)
    }
}

impl FromJson for Vec<Repository> {
    const TARGET: DecodeTarget = DecodeTarget::RepositoryList;

    fn from_json(value: &Value, options: DecodeOptions) -> Result<Self> {
        decode_list(value, options, decode_repository)
    }
}

impl ToJson for UserUpdate {
    const TARGET: EncodeTarget = EncodeTarget::UserUpdate;

    fn to_json(&self) -> Value {
        ObjectBuilder::new()
            .string("name", self.name.as_deref())
            .string("email", self.email.as_deref())
            .string("blog", self.blog.as_deref())
            .string("company", self.company.as_deref())
            .string("location", self.location.as_deref())
            .string("bio", self.bio.as_deref())
            .bool("hireable", self.hireable)
            .build()
    }
}

impl ToJson for AuthorizationUpdate {
    const TARGET: EncodeTarget = EncodeTarget::AuthorizationUpdate;

    fn to_json(&self) -> Value {
        ObjectBuilder::new()
            .strings("scopes", self.scopes.as_deref())
            .string("note", self.note.as_deref())
            .string("note_url", self.note_url.as_deref())
            .build()
    }
}

/// Decode every element of a JSON array in order, stopping at the first
/// element that fails.
fn decode_list<T>(
    value: &Value,
    options: DecodeOptions,
    decode: fn(&Fields<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    elements(value)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            trace!(index, "decoding list element");
            Fields::of(item, options)
                .and_then(|fields| decode(&fields))
                .map_err(|e| e.at_index(index))
        })
        .collect()
}

fn decode_user(fields: &Fields<'_>) -> Result<User> {
    let plan = match fields.nested("plan")? {
        Some(plan) => Some(Plan {
            name: plan.string("name")?,
            space: plan.int("space")?,
            collaborators: plan.int("collaborators")?,
            private_repos: plan.int("private_repos")?,
        }),
        None => None,
    };

    Ok(User {
        id: fields.long("id")?,
        login: fields.string("login")?,
        name: fields.string("name")?,
        email: fields.string("email")?,
        blog: fields.string("blog")?,
        company: fields.string("company")?,
        location: fields.string("location")?,
        bio: fields.string("bio")?,
        avatar_url: fields.opt_string("avatar_url")?,
        html_url: fields.string("html_url")?,
        url: fields.string("url")?,
        followers: fields.int("followers")?,
        following: fields.int("following")?,
        public_repos: fields.int("public_repos")?,
        public_gists: fields.int("public_gists")?,
        hireable: fields.bool("hireable")?,
        user_type: fields.string("type")?,
        created_at: fields.timestamp("created_at")?,
        plan,
    })
}

fn decode_authorization(fields: &Fields<'_>) -> Result<Authorization> {
    let application = match fields.nested("app")? {
        Some(app) => Some(Application {
            name: app.string("name")?,
            url: app.string("url")?,
        }),
        None => None,
    };

    Ok(Authorization {
        id: fields.long("id")?,
        token: fields.string("token")?,
        scopes: fields.string_list("scopes")?,
        note: fields.string("note")?,
        note_url: fields.string("note_url")?,
        url: fields.string("url")?,
        created_at: fields.timestamp("created_at")?,
        updated_at: fields.timestamp("updated_at")?,
        application,
    })
}

fn decode_repository(fields: &Fields<'_>) -> Result<Repository> {
    // Repository payloads embed a trimmed-down owner account
    let owner = match fields.nested("owner")? {
        Some(owner) => Some(User {
            login: owner.string("login")?,
            url: owner.string("url")?,
            id: owner.long("id")?,
            avatar_url: owner.opt_string("avatar_url")?,
            ..User::default()
        }),
        None => None,
    };

    Ok(Repository {
        id: fields.long("id")?,
        name: fields.string("name")?,
        full_name: fields.string("full_name")?,
        description: fields.string("description")?,
        homepage: fields.string("homepage")?,
        language: fields.string("language")?,
        master_branch: fields.string("master_branch")?,
        url: fields.string("url")?,
        html_url: fields.string("html_url")?,
        clone_url: fields.string("clone_url")?,
        git_url: fields.string("git_url")?,
        ssh_url: fields.string("ssh_url")?,
        svn_url: fields.string("svn_url")?,
        mirror_url: fields.string("mirror_url")?,
        size: fields.long("size")?,
        open_issues_count: fields.int("open_issues_count")?,
        watchers_count: fields.int("watchers_count")?,
        forks_count: fields.int("forks_count")?,
        network_count: fields.int("network_count")?,
        has_issues: fields.bool("has_issues")?,
        has_wiki: fields.bool("has_wiki")?,
        has_downloads: fields.bool("has_downloads")?,
        is_fork: fields.bool("fork")?,
        is_private: fields.bool("private")?,
        created_at: fields.timestamp("created_at")?,
        updated_at: fields.timestamp("updated_at")?,
        pushed_at: fields.timestamp("pushed_at")?,
        owner,
    })
}
