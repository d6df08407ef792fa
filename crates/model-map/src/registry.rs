//! Conversion registry
//!
//! Every decodable record and every encodable update record has one variant
//! in [`DecodeTarget`] or [`EncodeTarget`]. Dispatch is an exhaustive match,
//! so adding a target without a converter does not compile. Names are only
//! used at the dynamic edge (`decode_named`, `encode_named`), where an
//! unknown name is reported as [`MapError::UnsupportedType`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::convert::{FromJson, ToJson};
use crate::error::{MapError, Result};
use crate::models::*;
use crate::options::DecodeOptions;

/// Record types a JSON payload can be decoded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeTarget {
    User,
    Authorization,
    AuthorizationList,
    Repository,
    RepositoryList,
}

impl DecodeTarget {
    pub const ALL: [DecodeTarget; 5] = [
        DecodeTarget::User,
        DecodeTarget::Authorization,
        DecodeTarget::AuthorizationList,
        DecodeTarget::Repository,
        DecodeTarget::RepositoryList,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DecodeTarget::User => "user",
            DecodeTarget::Authorization => "authorization",
            DecodeTarget::AuthorizationList => "authorization-list",
            DecodeTarget::Repository => "repository",
            DecodeTarget::RepositoryList => "repository-list",
        }
    }
}

impl fmt::Display for DecodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecodeTarget {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        DecodeTarget::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| MapError::UnsupportedType(s.to_string()))
    }
}

/// Update records that can be encoded into a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeTarget {
    UserUpdate,
    AuthorizationUpdate,
}

impl EncodeTarget {
    pub const ALL: [EncodeTarget; 2] = [EncodeTarget::UserUpdate, EncodeTarget::AuthorizationUpdate];

    pub fn name(self) -> &'static str {
        match self {
            EncodeTarget::UserUpdate => "user-update",
            EncodeTarget::AuthorizationUpdate => "authorization-update",
        }
    }
}

impl fmt::Display for EncodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodeTarget {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        EncodeTarget::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| MapError::UnsupportedType(s.to_string()))
    }
}

/// Result of a dynamically dispatched decode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decoded {
    User(User),
    Authorization(Authorization),
    AuthorizationList(Vec<Authorization>),
    Repository(Repository),
    RepositoryList(Vec<Repository>),
}

impl Decoded {
    pub fn target(&self) -> DecodeTarget {
        match self {
            Decoded::User(_) => DecodeTarget::User,
            Decoded::Authorization(_) => DecodeTarget::Authorization,
            Decoded::AuthorizationList(_) => DecodeTarget::AuthorizationList,
            Decoded::Repository(_) => DecodeTarget::Repository,
            Decoded::RepositoryList(_) => DecodeTarget::RepositoryList,
        }
    }
}

/// Any update record the registry can encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateRecord {
    User(UserUpdate),
    Authorization(AuthorizationUpdate),
}

impl UpdateRecord {
    pub fn target(&self) -> EncodeTarget {
        match self {
            UpdateRecord::User(_) => EncodeTarget::UserUpdate,
            UpdateRecord::Authorization(_) => EncodeTarget::AuthorizationUpdate,
        }
    }

    /// Read an update record of the given kind from its JSON form
    pub fn from_json(target: EncodeTarget, json: &Value) -> Result<Self> {
        if json.is_null() {
            return Err(MapError::NullInput("update record"));
        }
        let record = match target {
            EncodeTarget::UserUpdate => UpdateRecord::User(serde_json::from_value(json.clone())?),
            EncodeTarget::AuthorizationUpdate => {
                UpdateRecord::Authorization(serde_json::from_value(json.clone())?)
            }
        };
        Ok(record)
    }
}

impl From<UserUpdate> for UpdateRecord {
    fn from(update: UserUpdate) -> Self {
        UpdateRecord::User(update)
    }
}

impl From<AuthorizationUpdate> for UpdateRecord {
    fn from(update: AuthorizationUpdate) -> Self {
        UpdateRecord::Authorization(update)
    }
}

/// Dispatches decode and encode requests to the matching converter.
///
/// Holds nothing but its decode options, so a registry can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Registry {
    options: DecodeOptions,
}

impl Registry {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Process-wide registry with default (lenient) options
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::default)
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decode a payload into a registered record type
    pub fn decode<T: FromJson>(&self, json: &Value) -> Result<T> {
        debug!(kind = T::TARGET.name(), mode = ?self.options.mode, "decoding payload");
        if json.is_null() {
            return Err(MapError::NullInput("json"));
        }
        T::from_json(json, self.options)
    }

    pub fn decode_as(&self, target: DecodeTarget, json: &Value) -> Result<Decoded> {
        let decoded = match target {
            DecodeTarget::User => Decoded::User(self.decode(json)?),
            DecodeTarget::Authorization => Decoded::Authorization(self.decode(json)?),
            DecodeTarget::AuthorizationList => Decoded::AuthorizationList(self.decode(json)?),
            DecodeTarget::Repository => Decoded::Repository(self.decode(json)?),
            DecodeTarget::RepositoryList => Decoded::RepositoryList(self.decode(json)?),
        };
        Ok(decoded)
    }

    /// Decode by target name, e.g. `"repository-list"`
    pub fn decode_named(&self, name: &str, json: &Value) -> Result<Decoded> {
        let target = name.parse::<DecodeTarget>()?;
        self.decode_as(target, json)
    }

    /// Encode an update record into a request body holding only its set fields
    pub fn encode<T: ToJson>(&self, record: Option<&T>) -> Result<Value> {
        let record = record.ok_or(MapError::NullInput("record"))?;
        debug!(kind = T::TARGET.name(), "encoding update record");
        Ok(record.to_json())
    }

    pub fn encode_record(&self, record: Option<&UpdateRecord>) -> Result<Value> {
        match record {
            Some(UpdateRecord::User(update)) => self.encode(Some(update)),
            Some(UpdateRecord::Authorization(update)) => self.encode(Some(update)),
            None => Err(MapError::NullInput("record")),
        }
    }

    /// Read an update record by target name and encode it
    pub fn encode_named(&self, name: &str, json: &Value) -> Result<Value> {
        let target = name.parse::<EncodeTarget>()?;
        let record = UpdateRecord::from_json(target, json)?;
        self.encode_record(Some(&record))
    }
}
