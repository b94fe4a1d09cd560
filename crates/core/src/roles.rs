//! Roles and the capabilities they grant.
//!
//! There is a single `admin` role today. Handlers check capabilities rather
//! than role names so a narrower role can be added without touching routes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";

/// Operations a token holder may be allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, edit, and delete site content (services, team, portfolio, about).
    ManageContent,
    /// Read the contact inbox and moderate submitted testimonials.
    ModerateSubmissions,
    /// Upload media files for use in site content.
    UploadMedia,
}

/// Role carried in the `role` claim of an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Whether this role may perform `capability`.
    pub fn grants(self, capability: Capability) -> bool {
        match self {
            Role::Admin => matches!(
                capability,
                Capability::ManageContent
                    | Capability::ModerateSubmissions
                    | Capability::UploadMedia
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}
