//! Authentication types for the domain layer.
//!
//! These types represent an authenticated staff user as supplied by the
//! identity collaborator. The core trusts this input and never re-validates
//! credentials; token transport and verification live outside this crate.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::UserId;

/// Role carried by an authenticated staff user.
///
/// Admin gates user-account management only; member lifecycle operations
/// are available to any authenticated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Staff,
}

impl StaffRole {
    /// Returns true for the admin role.
    pub fn is_admin(&self) -> bool {
        matches!(self, StaffRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Staff => "staff",
        }
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(StaffRole::Admin),
            "staff" => Ok(StaffRole::Staff),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Authenticated staff user attached to every request by the identity
/// boundary.
#[derive(Debug, Clone)]
pub struct AuthenticatedStaff {
    pub id: UserId,
    pub role: StaffRole,
}

impl AuthenticatedStaff {
    pub fn new(id: UserId, role: StaffRole) -> Self {
        Self { id, role }
    }
}
