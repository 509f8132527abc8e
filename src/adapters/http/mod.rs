//! HTTP adapters - REST API implementations.

pub mod member;

// Re-export key types for convenience
pub use member::member_router;
pub use member::MemberAppState;
