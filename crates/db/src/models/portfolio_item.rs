//! Portfolio gallery entries.

use serde::{Deserialize, Serialize};
use studio_core::validation::{not_blank, trimmed, trimmed_opt};
use validator::Validate;

use super::{Editable, Resource};

pub struct PortfolioItem;

impl Resource for PortfolioItem {
    const COLLECTION: &'static str = "portfolio";
    const ENTITY: &'static str = "PortfolioItem";
    type Create = CreatePortfolioItem;
}

impl Editable for PortfolioItem {
    type Update = UpdatePortfolioItem;
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioItem {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    pub image_url: String,
    #[serde(default, deserialize_with = "trimmed_opt", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolioItem {
    #[serde(default, deserialize_with = "trimmed_opt", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
