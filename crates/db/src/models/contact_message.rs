//! Messages sent through the public contact form.

use serde::{Deserialize, Serialize};
use studio_core::validation::{not_blank, trimmed};
use validator::Validate;

use super::Resource;

pub struct ContactMessage;

impl Resource for ContactMessage {
    const COLLECTION: &'static str = "contact";
    const ENTITY: &'static str = "ContactMessage";
    type Create = CreateContactMessage;
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactMessage {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank"))]
    pub subject: String,
    #[validate(custom(function = "not_blank"))]
    pub message: String,
}
