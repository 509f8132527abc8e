//! HTTP handlers for member endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::member::{
    CreateMemberCommand, CreateMemberHandler, DeleteMemberCommand, DeleteMemberHandler,
    GetMemberHandler, GetMemberQuery, GetMemberStatsHandler, GetMemberStatsQuery,
    ListMembersHandler, ListMembersQuery, RenewMembershipCommand, RenewMembershipHandler,
    UpdateMemberCommand, UpdateMemberHandler,
};
use crate::domain::foundation::{AuthenticatedStaff, MemberId, StaffRole, Timestamp, UserId};
use crate::domain::member::{MemberError, PackagePolicy};
use crate::ports::{MemberFilter, MemberReader, MemberRepository};

use super::dto::{
    CreateMemberRequest, DeleteMemberResponse, ErrorResponse, ListMembersParams,
    MemberDetailResponse, MemberListResponse, MemberResponse, RenewMembershipRequest,
    UpdateMemberRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct MemberAppState {
    pub member_repository: Arc<dyn MemberRepository>,
    pub member_reader: Arc<dyn MemberReader>,
    pub package_policy: PackagePolicy,
}

impl MemberAppState {
    pub fn new(
        member_repository: Arc<dyn MemberRepository>,
        member_reader: Arc<dyn MemberReader>,
        package_policy: PackagePolicy,
    ) -> Self {
        Self {
            member_repository,
            member_reader,
            package_policy,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn create_member_handler(&self) -> CreateMemberHandler {
        CreateMemberHandler::new(self.member_repository.clone(), self.package_policy.clone())
    }

    pub fn update_member_handler(&self) -> UpdateMemberHandler {
        UpdateMemberHandler::new(self.member_repository.clone())
    }

    pub fn delete_member_handler(&self) -> DeleteMemberHandler {
        DeleteMemberHandler::new(self.member_repository.clone())
    }

    pub fn renew_membership_handler(&self) -> RenewMembershipHandler {
        RenewMembershipHandler::new(self.member_repository.clone(), self.package_policy.clone())
    }

    pub fn get_member_handler(&self) -> GetMemberHandler {
        GetMemberHandler::new(self.member_reader.clone())
    }

    pub fn list_members_handler(&self) -> ListMembersHandler {
        ListMembersHandler::new(self.member_reader.clone())
    }

    pub fn stats_handler(&self) -> GetMemberStatsHandler {
        GetMemberStatsHandler::new(self.member_reader.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Staff Context (would come from auth middleware in production)
// ════════════════════════════════════════════════════════════════════════════════

/// Rejection type for [`AuthenticatedStaff`] extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

/// Header-based extraction of the authenticated staff user.
///
/// In production this would come from JWT/session validation by auth
/// middleware. For development/testing, `X-User-Id` carries the staff id
/// and `X-User-Role` the role (defaults to staff).
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedStaff
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::from_str(s).ok())
                .ok_or(AuthenticationRequired)?;

            let role = parts
                .headers
                .get("X-User-Role")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| StaffRole::from_str(s).ok())
                .unwrap_or(StaffRole::Staff);

            Ok(AuthenticatedStaff::new(user_id, role))
        })
    }
}

fn parse_member_id(raw: &str) -> Result<MemberId, MemberApiError> {
    MemberId::from_str(raw).map_err(|_| MemberApiError(MemberError::malformed_id(raw)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/members - List members with filters and pagination
pub async fn list_members(
    State(state): State<MemberAppState>,
    _staff: AuthenticatedStaff,
    Query(params): Query<ListMembersParams>,
) -> Result<impl IntoResponse, MemberApiError> {
    let filter = MemberFilter {
        search: params.search_filter(),
        status: params.status_filter()?,
        package: params.package_filter()?,
    };
    let query = ListMembersQuery {
        filter,
        page: params.page.unwrap_or(1),
        page_size: params.limit.unwrap_or(ListMembersParams::DEFAULT_PAGE_SIZE),
    };

    let result = state.list_members_handler().handle(query).await?;

    let now = Timestamp::now();
    let response = MemberListResponse {
        members: result
            .members
            .into_iter()
            .map(|record| MemberResponse::from_record(record, now))
            .collect(),
        pagination: result.pagination,
    };

    Ok(Json(response))
}

/// GET /api/members/stats - Aggregate membership statistics
pub async fn get_member_stats(
    State(state): State<MemberAppState>,
    _staff: AuthenticatedStaff,
) -> Result<impl IntoResponse, MemberApiError> {
    let query = GetMemberStatsQuery {
        now: Timestamp::now(),
    };
    let stats = state.stats_handler().handle(query).await?;
    Ok(Json(stats))
}

/// GET /api/members/:id - Get a member with the creator resolved
pub async fn get_member(
    State(state): State<MemberAppState>,
    _staff: AuthenticatedStaff,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MemberApiError> {
    let id = parse_member_id(&id)?;
    let detail = state.get_member_handler().handle(GetMemberQuery { id }).await?;
    Ok(Json(MemberDetailResponse::from_detail(detail, Timestamp::now())))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT/DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/members - Register a new member
pub async fn create_member(
    State(state): State<MemberAppState>,
    staff: AuthenticatedStaff,
    Json(request): Json<CreateMemberRequest>,
) -> Result<impl IntoResponse, MemberApiError> {
    let input = request.into_input()?;
    let cmd = CreateMemberCommand {
        input,
        actor: staff.id,
    };

    let record = state.create_member_handler().handle(cmd).await?;

    let response = MemberResponse::from_record(record, Timestamp::now());
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/members/:id - Partially update a member
pub async fn update_member(
    State(state): State<MemberAppState>,
    _staff: AuthenticatedStaff,
    Path(id): Path<String>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<impl IntoResponse, MemberApiError> {
    let id = parse_member_id(&id)?;
    let patch = request.into_patch()?;

    let record = state
        .update_member_handler()
        .handle(UpdateMemberCommand { id, patch })
        .await?;

    Ok(Json(MemberResponse::from_record(record, Timestamp::now())))
}

/// DELETE /api/members/:id - Remove a member
pub async fn delete_member(
    State(state): State<MemberAppState>,
    _staff: AuthenticatedStaff,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MemberApiError> {
    let id = parse_member_id(&id)?;
    let deleted = state
        .delete_member_handler()
        .handle(DeleteMemberCommand { id })
        .await?;

    Ok(Json(DeleteMemberResponse {
        id: deleted.to_string(),
    }))
}

/// POST /api/members/:id/renew - Renew a membership and record the payment
pub async fn renew_membership(
    State(state): State<MemberAppState>,
    _staff: AuthenticatedStaff,
    Path(id): Path<String>,
    Json(request): Json<RenewMembershipRequest>,
) -> Result<impl IntoResponse, MemberApiError> {
    let id = parse_member_id(&id)?;
    let cmd = RenewMembershipCommand {
        id,
        package_type: request.package(),
        payment_amount: request.payment_amount,
        payment_method: request.payment_method,
        transaction_id: request.transaction_id,
    };

    let record = state.renew_membership_handler().handle(cmd).await?;

    Ok(Json(MemberResponse::from_record(record, Timestamp::now())))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
pub struct MemberApiError(MemberError);

impl From<MemberError> for MemberApiError {
    fn from(err: MemberError) -> Self {
        Self(err)
    }
}

impl IntoResponse for MemberApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            MemberError::NotFound(_) => (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND"),
            MemberError::Duplicate { .. } => (StatusCode::CONFLICT, "DUPLICATE_MEMBER"),
            MemberError::MalformedId(_) => (StatusCode::BAD_REQUEST, "MALFORMED_IDENTIFIER"),
            MemberError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            MemberError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "member request failed");
        }

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
