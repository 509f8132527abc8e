//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form
//! the vocabulary of the MemberDesk domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthenticatedStaff, StaffRole};
pub use errors::{DomainError, ErrorCode};
pub use ids::{MemberId, UserId};
pub use timestamp::Timestamp;
