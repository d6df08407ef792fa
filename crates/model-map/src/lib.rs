//! Mapping layer between GitHub API JSON payloads and typed records.
//!
//! Payloads are decoded field by field from a `serde_json::Value` tree, and
//! partial update records are encoded back into minimal request bodies. The
//! [`Registry`] is the entry point for both directions.

mod convert;
pub mod error;
mod json;
pub mod models;
pub mod options;
pub mod registry;


pub use convert::{FromJson, ToJson};
pub use error::{MapError, Result};
pub use json::JsonKind;
pub use models::*;
pub use options::{DecodeMode, DecodeOptions};
pub use registry::{DecodeTarget, Decoded, EncodeTarget, Registry, UpdateRecord};
