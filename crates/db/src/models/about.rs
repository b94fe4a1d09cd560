//! About-section content.

use serde::{Deserialize, Serialize};
use studio_core::validation::{not_blank, trimmed, trimmed_opt};
use validator::Validate;

use super::{Editable, Resource};

pub struct About;

impl Resource for About {
    const COLLECTION: &'static str = "about";
    const ENTITY: &'static str = "About";
    type Create = CreateAbout;
}

impl Editable for About {
    type Update = UpdateAbout;
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAbout {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAbout {
    #[serde(default, deserialize_with = "trimmed_opt", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
