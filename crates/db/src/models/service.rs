//! Services offered by the studio.

use serde::{Deserialize, Serialize};
use studio_core::validation::{not_blank, trimmed, trimmed_opt};
use validator::Validate;

use super::{Editable, Resource};

pub struct Service;

impl Resource for Service {
    const COLLECTION: &'static str = "services";
    const ENTITY: &'static str = "Service";
    type Create = CreateService;
}

impl Editable for Service {
    type Update = UpdateService;
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    /// Icon class name or icon image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateService {
    #[serde(default, deserialize_with = "trimmed_opt", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}
