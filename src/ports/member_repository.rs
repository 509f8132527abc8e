//! Member repository port (write side).
//!
//! Defines the contract for persisting MemberRecord aggregates.
//!
//! # Design
//!
//! - **Optimistic conflict check**: `find_conflict` lets handlers reject
//!   duplicates before writing, but the check-then-write is not atomic.
//!   The storage unique constraints on email and phone are the
//!   authoritative guarantee; implementations must translate constraint
//!   violations into `ErrorCode::DuplicateMember`.
//! - **Hard delete**: removal is permanent, no tombstones.

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::member::MemberRecord;
use async_trait::async_trait;

/// Repository port for MemberRecord persistence.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persists a new record.
    ///
    /// # Errors
    ///
    /// - `DuplicateMember` if a unique constraint on email or phone fires
    /// - `DatabaseError` on other persistence failures
    async fn insert(&self, record: &MemberRecord) -> Result<(), DomainError>;

    /// Persists changes to an existing record.
    ///
    /// # Errors
    ///
    /// - `DuplicateMember` if a unique constraint on email or phone fires
    /// - `DatabaseError` on other persistence failures
    async fn update(&self, record: &MemberRecord) -> Result<(), DomainError>;

    /// Finds a record by its id. Returns `None` if absent.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<MemberRecord>, DomainError>;

    /// Finds the first record whose email (case-insensitive) or phone
    /// matches a candidate value, excluding `exclude` when given.
    ///
    /// Used during update so a record may keep its own email and phone.
    async fn find_conflict(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        exclude: Option<&MemberId>,
    ) -> Result<Option<MemberRecord>, DomainError>;

    /// Permanently deletes a record. Returns `false` when no record with
    /// that id existed.
    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError>;
}
