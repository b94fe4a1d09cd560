//! Per-resource schemas.
//!
//! Each submodule contains:
//! - A zero-sized marker implementing [`Resource`] (collection + entity name)
//! - A `Deserialize + Validate` create DTO carrying every required field
//! - For [`Editable`] resources, a `Deserialize + Validate` update DTO (all
//!   `Option` fields) for patches
//!
//! Field names are camelCase on the wire and in stored documents.

pub mod about;
pub mod contact_message;
pub mod portfolio_item;
pub mod service;
pub mod team_member;
pub mod testimonial;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

/// A named collection exposed through the generic CRUD routes.
pub trait Resource: Send + Sync + 'static {
    /// Store collection the records live in.
    const COLLECTION: &'static str;
    /// Human-readable entity name used in error messages and logs.
    const ENTITY: &'static str;

    /// Full payload accepted on create.
    type Create: DeserializeOwned + Serialize + Validate + Send + Sync + 'static;
}

/// A resource whose records may be edited after creation.
pub trait Editable: Resource {
    /// Partial payload accepted on update; absent fields must not serialize.
    type Update: DeserializeOwned + Serialize + Validate + Send + Sync + 'static;
}
