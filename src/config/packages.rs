//! Package duration configuration

use serde::Deserialize;

use crate::domain::member::PackagePolicy;

use super::error::ValidationError;

/// Membership package durations in days.
///
/// Each tier's paid-up duration can be overridden through the environment,
/// e.g. `MEMBERDESK__PACKAGES__PREMIUM_DAYS=120`.
#[derive(Debug, Clone, Deserialize)]
pub struct PackagesConfig {
    #[serde(default = "default_trial_days")]
    pub trial_days: i64,

    #[serde(default = "default_basic_days")]
    pub basic_days: i64,

    #[serde(default = "default_premium_days")]
    pub premium_days: i64,

    #[serde(default = "default_elite_days")]
    pub elite_days: i64,
}

impl PackagesConfig {
    /// Build the domain policy injected into the lifecycle handlers.
    pub fn policy(&self) -> PackagePolicy {
        PackagePolicy {
            trial_days: self.trial_days,
            basic_days: self.basic_days,
            premium_days: self.premium_days,
            elite_days: self.elite_days,
        }
    }

    /// Validate package configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let durations = [
            self.trial_days,
            self.basic_days,
            self.premium_days,
            self.elite_days,
        ];
        if durations.iter().any(|d| *d < 1) {
            return Err(ValidationError::InvalidPackageDuration);
        }
        Ok(())
    }
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            trial_days: default_trial_days(),
            basic_days: default_basic_days(),
            premium_days: default_premium_days(),
            elite_days: default_elite_days(),
        }
    }
}

fn default_trial_days() -> i64 {
    7
}

fn default_basic_days() -> i64 {
    30
}

fn default_premium_days() -> i64 {
    90
}

fn default_elite_days() -> i64 {
    365
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_policy() {
        assert_eq!(PackagesConfig::default().policy(), PackagePolicy::default());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let config = PackagesConfig {
            trial_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn overridden_durations_flow_into_policy() {
        let config = PackagesConfig {
            premium_days: 120,
            ..Default::default()
        };
        assert_eq!(
            config.policy().duration_days(crate::domain::member::PackageType::Premium),
            120
        );
    }
}
