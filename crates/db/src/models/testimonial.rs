//! Client testimonials. Submitted publicly, shown only once approved.

use serde::{Deserialize, Serialize};
use studio_core::validation::{not_blank, trimmed, trimmed_opt, DEFAULT_RATING};
use validator::Validate;

use super::{Editable, Resource};

pub struct Testimonial;

impl Resource for Testimonial {
    const COLLECTION: &'static str = "testimonials";
    const ENTITY: &'static str = "Testimonial";
    type Create = SubmitTestimonial;
}

impl Editable for Testimonial {
    type Update = UpdateTestimonial;
}

fn default_rating() -> i32 {
    DEFAULT_RATING
}

/// Public submission. `approved` is always stored as `false`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestimonial {
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub message: String,
    /// Public path of an uploaded photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default = "default_rating")]
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: i32,
    #[serde(skip_deserializing)]
    pub approved: bool,
}

/// Moderation edit: approve/unapprove or correct the visible fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(default, deserialize_with = "trimmed_opt", skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: Option<i32>,
}
