//! Axum router configuration for member endpoints.
//!
//! This module defines the route structure for member administration
//! and wires it to the corresponding handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_member, delete_member, get_member, get_member_stats, list_members, renew_membership,
    update_member, MemberAppState,
};

/// Create the member API router.
///
/// # Routes
///
/// All endpoints require authentication.
/// - `GET /` - List members with filters and pagination
/// - `GET /stats` - Aggregate membership statistics
/// - `POST /` - Register a new member
/// - `GET /:id` - Get a member with the creator resolved
/// - `PUT /:id` - Partially update a member
/// - `DELETE /:id` - Remove a member
/// - `POST /:id/renew` - Renew a membership and record the payment
pub fn member_routes() -> Router<MemberAppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/stats", get(get_member_stats))
        .route("/:id", get(get_member).put(update_member).delete(delete_member))
        .route("/:id/renew", post(renew_membership))
}

/// Create the complete member module router, mounted under `/members`.
///
/// `nest` matches `/members` but not `/members/`, so the collection route
/// is also registered explicitly at the trailing-slash path.
pub fn member_router() -> Router<MemberAppState> {
    Router::new()
        .route("/members/", get(list_members).post(create_member))
        .nest("/members", member_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::application::handlers::member::test_support::{member_record, MemberStore};
    use crate::domain::foundation::UserId;
    use crate::domain::member::PackagePolicy;

    fn test_state(store: MemberStore) -> MemberAppState {
        let store = Arc::new(store);
        MemberAppState::new(store.clone(), store, PackagePolicy::default())
    }

    fn staff_header() -> String {
        UserId::new().to_string()
    }

    // ───────────────────────────────────────────────────────────────
    // Tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn member_router_serves_detail_endpoint() {
        let record = member_record(1);
        let id = record.id;
        let store = MemberStore::with_records(vec![record]);

        let app = member_router().with_state(test_state(store));

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/members/{}", id))
                    .header("X-User-Id", staff_header())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_auth_header_is_unauthorized() {
        let app = member_router().with_state(test_state(MemberStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/members/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_id_maps_to_bad_request() {
        let app = member_router().with_state(test_state(MemberStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/members/not-a-uuid")
                    .header("X-User-Id", staff_header())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stats_endpoint_responds() {
        let app = member_router().with_state(test_state(MemberStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/members/stats")
                    .header("X-User-Id", staff_header())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
