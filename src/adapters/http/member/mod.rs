//! HTTP adapter for member endpoints.
//!
//! Exposes member administration via REST API:
//! - `GET /api/members` - List members with filters and pagination
//! - `GET /api/members/stats` - Aggregate membership statistics
//! - `POST /api/members` - Register a new member
//! - `GET /api/members/:id` - Get a member with the creator resolved
//! - `PUT /api/members/:id` - Partially update a member
//! - `DELETE /api/members/:id` - Remove a member
//! - `POST /api/members/:id/renew` - Renew a membership

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{MemberApiError, MemberAppState};
pub use routes::{member_router, member_routes};
