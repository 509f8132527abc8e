//! Member reader port (read side / CQRS queries).
//!
//! Defines the contract for listing, detail reads, and aggregate
//! statistics. Statistics are computed against the raw stored records:
//! grouping by the *persisted* status field (which may be stale under
//! lazy correction) and by raw expiry dates for the near-expiry window.

use crate::domain::foundation::{DomainError, MemberId, Timestamp, UserId};
use crate::domain::member::{MemberRecord, MembershipStatus, PackageType};
use async_trait::async_trait;
use serde::Serialize;

/// Records expiring within this many days of "now" count as expiring soon.
/// Both window ends are inclusive.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 7;

/// Conjunction of optional list predicates.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    /// Case-insensitive substring match against full name, email, or phone.
    pub search: Option<String>,
    /// Exact persisted status.
    pub status: Option<MembershipStatus>,
    /// Exact package tier.
    pub package: Option<PackageType>,
}

impl MemberFilter {
    /// Evaluates the filter against a record.
    ///
    /// The single source of truth for filter semantics; in-memory readers
    /// apply it directly and SQL readers must match it.
    pub fn matches(&self, record: &MemberRecord) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = record.full_name.to_lowercase().contains(&needle)
                || record.email.to_lowercase().contains(&needle)
                || record.phone.contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.membership_status != status {
                return false;
            }
        }
        if let Some(package) = self.package {
            if record.package_type != package {
                return false;
            }
        }
        true
    }
}

/// One page of list results plus the unpaginated total.
#[derive(Debug, Clone)]
pub struct MemberPage {
    pub members: Vec<MemberRecord>,
    pub total: u64,
}

/// Resolved creator reference for detail reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedByRef {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// A member record with its creator resolved to a display name and email.
///
/// The join is a read-side concern; the lifecycle never depends on the
/// referenced user still existing.
#[derive(Debug, Clone)]
pub struct MemberDetail {
    pub record: MemberRecord,
    pub created_by: Option<CreatedByRef>,
}

/// Count of records holding one persisted status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: MembershipStatus,
    pub count: u64,
}

/// Count of records on one package tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageCount {
    pub package: PackageType,
    pub count: u64,
}

/// Aggregate statistics over the full record set.
///
/// Groups with zero matching records are omitted rather than zero-filled.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemberStatistics {
    pub total: u64,
    pub by_status: Vec<StatusCount>,
    pub by_package: Vec<PackageCount>,
    pub expiring_soon: u64,
}

impl MemberStatistics {
    /// Computes the statistics in one pass over a record slice.
    ///
    /// Reference implementation for reader adapters; the SQL reader's
    /// grouped queries must agree with it. `expiring_soon` is evaluated on
    /// raw expiry dates, independent of whether lazy status correction has
    /// run.
    pub fn from_records<'a, I>(records: I, now: Timestamp) -> Self
    where
        I: IntoIterator<Item = &'a MemberRecord>,
    {
        let window_end = now.add_days(EXPIRING_SOON_WINDOW_DAYS);
        let mut total = 0u64;
        let mut expiring_soon = 0u64;
        let mut status_counts = [0u64; MembershipStatus::ALL.len()];
        let mut package_counts = [0u64; PackageType::ALL.len()];

        for record in records {
            total += 1;
            if record.expiry_date >= now && record.expiry_date <= window_end {
                expiring_soon += 1;
            }
            let s = MembershipStatus::ALL
                .iter()
                .position(|s| *s == record.membership_status)
                .unwrap_or(0);
            status_counts[s] += 1;
            let p = PackageType::ALL
                .iter()
                .position(|p| *p == record.package_type)
                .unwrap_or(0);
            package_counts[p] += 1;
        }

        let by_status = MembershipStatus::ALL
            .iter()
            .zip(status_counts)
            .filter(|(_, count)| *count > 0)
            .map(|(status, count)| StatusCount {
                status: *status,
                count,
            })
            .collect();
        let by_package = PackageType::ALL
            .iter()
            .zip(package_counts)
            .filter(|(_, count)| *count > 0)
            .map(|(package, count)| PackageCount {
                package: *package,
                count,
            })
            .collect();

        Self {
            total,
            by_status,
            by_package,
            expiring_soon,
        }
    }
}

/// Reader port for member queries.
#[async_trait]
pub trait MemberReader: Send + Sync {
    /// Detail read with the creator resolved. Returns `None` if absent.
    async fn get_detail(&self, id: &MemberId) -> Result<Option<MemberDetail>, DomainError>;

    /// Lists records matching the filter, newest first, with offset
    /// pagination. `skip` and `limit` are row offsets, already derived
    /// from page numbers by the caller.
    async fn list(
        &self,
        filter: &MemberFilter,
        skip: u64,
        limit: u64,
    ) -> Result<MemberPage, DomainError>;

    /// Aggregate statistics over the full record set.
    async fn get_statistics(&self, now: Timestamp) -> Result<MemberStatistics, DomainError>;
}
