//! Boundary validation helpers shared by the resource schemas.
//!
//! Schemas derive [`validator::Validate`]; the helpers here cover what the
//! derive cannot express on its own (trim-on-deserialize, rating bounds,
//! flattening errors into one human-readable message).

use serde::{Deserialize, Deserializer};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Lowest accepted testimonial rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted testimonial rating.
pub const MAX_RATING: i32 = 5;
/// Rating applied when a submission omits it or sends something unparsable.
pub const DEFAULT_RATING: i32 = 5;

/// Deserialize a string and trim surrounding whitespace.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Deserialize an optional string and trim surrounding whitespace.
pub fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(|v| v.trim().to_string()))
}

/// Deserialize an optional string, treating `""` the same as absent.
///
/// Settings forms post every field; an empty one means "leave as is".
pub fn non_empty_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.filter(|v| !v.is_empty()))
}

/// Reject strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Parse a free-form rating, falling back to [`DEFAULT_RATING`].
///
/// Multipart submissions carry the rating as text; anything that is not an
/// integer yields the default. Range checking happens in validation.
pub fn parse_rating(raw: Option<&str>) -> i32 {
    raw.and_then(|r| r.trim().parse::<i32>().ok())
        .unwrap_or(DEFAULT_RATING)
}

/// Flatten validator errors into `field: message; field: message`.
///
/// Fields are sorted so the message is stable across runs.
pub fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    collect(errors, "", &mut parts);
    parts.sort();
    parts.join("; ")
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let msg = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", err.code));
                    out.push(format!("{path}: {msg}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect(inner, &format!("{path}[{idx}]"), out);
                }
            }
        }
    }
}
