//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Storage-backed repository and read model
//! - `http` - REST API exposure

pub mod http;
pub mod postgres;

pub use http::{member_router, MemberAppState};
pub use postgres::{PostgresMemberReader, PostgresMemberRepository};
