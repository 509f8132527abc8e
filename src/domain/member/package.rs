//! Membership package definitions and duration policy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::Timestamp;

/// Membership package tier.
///
/// Determines the paid-up duration of a membership period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// One-week trial package.
    Trial,

    /// Standard monthly package. The default for new members.
    #[default]
    Basic,

    /// Quarterly package.
    Premium,

    /// Annual package.
    Elite,
}

impl PackageType {
    /// All package tiers, for iteration in grouping and tests.
    pub const ALL: [PackageType; 4] = [
        PackageType::Trial,
        PackageType::Basic,
        PackageType::Premium,
        PackageType::Elite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Trial => "trial",
            PackageType::Basic => "basic",
            PackageType::Premium => "premium",
            PackageType::Elite => "elite",
        }
    }

    /// Parses a package name, falling back to `Basic` when unrecognized.
    ///
    /// The renewal path historically accepted arbitrary package strings and
    /// billed them at the basic duration; this lenient parse preserves that
    /// behavior. The create path validates strictly at the boundary instead.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trial" => Ok(PackageType::Trial),
            "basic" => Ok(PackageType::Basic),
            "premium" => Ok(PackageType::Premium),
            "elite" => Ok(PackageType::Elite),
            other => Err(format!("unknown package type: {}", other)),
        }
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Duration table mapping each package tier to paid-up days.
///
/// Injected as configuration rather than hardcoded in the lifecycle
/// handlers, so pricing-policy changes never touch the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PackagePolicy {
    pub trial_days: i64,
    pub basic_days: i64,
    pub premium_days: i64,
    pub elite_days: i64,
}

impl Default for PackagePolicy {
    fn default() -> Self {
        Self {
            trial_days: 7,
            basic_days: 30,
            premium_days: 90,
            elite_days: 365,
        }
    }
}

impl PackagePolicy {
    /// Returns the paid-up duration in days for a package tier.
    pub fn duration_days(&self, package: PackageType) -> i64 {
        match package {
            PackageType::Trial => self.trial_days,
            PackageType::Basic => self.basic_days,
            PackageType::Premium => self.premium_days,
            PackageType::Elite => self.elite_days,
        }
    }

    /// Computes an expiry date from a base point and a package tier.
    pub fn compute_expiry(&self, base: Timestamp, package: PackageType) -> Timestamp {
        base.add_days(self.duration_days(package))
    }
}
