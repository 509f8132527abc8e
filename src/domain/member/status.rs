//! Membership status definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a member record.
///
/// `Active` is the default for new members. `Expired` is derived lazily:
/// an active record whose expiry date has passed is corrected the next
/// time it is persisted, never by a background sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    /// Paid up and in good standing.
    #[default]
    Active,

    /// Voluntarily paused by the member or staff.
    Inactive,

    /// Suspended by staff (e.g. unpaid dues, conduct).
    Suspended,

    /// Expiry date has passed. Renewal reactivates.
    Expired,
}

impl MembershipStatus {
    /// All statuses, for iteration in grouping and tests.
    pub const ALL: [MembershipStatus; 4] = [
        MembershipStatus::Active,
        MembershipStatus::Inactive,
        MembershipStatus::Suspended,
        MembershipStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Inactive => "inactive",
            MembershipStatus::Suspended => "suspended",
            MembershipStatus::Expired => "expired",
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(MembershipStatus::Active),
            "inactive" => Ok(MembershipStatus::Inactive),
            "suspended" => Ok(MembershipStatus::Suspended),
            "expired" => Ok(MembershipStatus::Expired),
            other => Err(format!("unknown membership status: {}", other)),
        }
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
