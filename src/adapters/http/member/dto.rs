//! HTTP DTOs for member endpoints.
//!
//! The JSON request/response boundary. Shape validation (lengths, email
//! and phone formats) happens here, before the application core runs;
//! semantic uniqueness stays with the core since no shape check can see
//! other records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::member::{
    EmergencyContact, MedicalInfo, MemberError, MemberPatch, MemberRecord, MembershipStatus,
    NewMember, PackageType,
};
use crate::ports::{CreatedByRef, MemberDetail};

// ════════════════════════════════════════════════════════════════════════════════
// Validation rules
// ════════════════════════════════════════════════════════════════════════════════

fn validate_full_name(s: &str) -> Result<(), MemberError> {
    let len = s.trim().chars().count();
    if !(2..=100).contains(&len) {
        return Err(MemberError::validation(
            "full_name",
            "must be between 2 and 100 characters",
        ));
    }
    Ok(())
}

fn validate_email(s: &str) -> Result<(), MemberError> {
    let valid = match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !s.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(MemberError::validation("email", "must be a valid address"));
    }
    Ok(())
}

fn validate_phone(s: &str) -> Result<(), MemberError> {
    if s.len() != 10 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MemberError::validation(
            "phone",
            "must be exactly 10 digits",
        ));
    }
    Ok(())
}

fn validate_address(s: &str) -> Result<(), MemberError> {
    let len = s.trim().chars().count();
    if !(5..=200).contains(&len) {
        return Err(MemberError::validation(
            "address",
            "must be between 5 and 200 characters",
        ));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to register a new member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Defaults to basic when omitted.
    #[serde(default)]
    pub package_type: PackageType,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default)]
    pub medical_info: Option<MedicalInfo>,
}

impl CreateMemberRequest {
    /// Validates the payload and produces the core input.
    pub fn into_input(self) -> Result<NewMember, MemberError> {
        validate_full_name(&self.full_name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        validate_address(&self.address)?;
        Ok(NewMember {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone,
            address: self.address.trim().to_string(),
            package_type: self.package_type,
            emergency_contact: self.emergency_contact,
            medical_info: self.medical_info,
        })
    }
}

/// Partial update request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub package_type: Option<PackageType>,
    pub membership_status: Option<MembershipStatus>,
    pub emergency_contact: Option<EmergencyContact>,
    pub medical_info: Option<MedicalInfo>,
}

impl UpdateMemberRequest {
    /// Validates present fields and produces the patch.
    pub fn into_patch(self) -> Result<MemberPatch, MemberError> {
        if let Some(full_name) = &self.full_name {
            validate_full_name(full_name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(address) = &self.address {
            validate_address(address)?;
        }
        Ok(MemberPatch {
            full_name: self.full_name.map(|s| s.trim().to_string()),
            email: self.email.map(|s| s.trim().to_string()),
            phone: self.phone,
            address: self.address.map(|s| s.trim().to_string()),
            package_type: self.package_type,
            membership_status: self.membership_status,
            emergency_contact: self.emergency_contact,
            medical_info: self.medical_info,
        })
    }
}

/// Request to renew a membership.
///
/// `package_type` arrives as free text and falls back to basic when
/// unrecognized; the renewal endpoint has always been lenient here,
/// unlike create where the enum is validated strictly.
#[derive(Debug, Clone, Deserialize)]
pub struct RenewMembershipRequest {
    pub package_type: String,
    pub payment_amount: f64,
    pub payment_method: String,
    pub transaction_id: String,
}

impl RenewMembershipRequest {
    pub fn package(&self) -> PackageType {
        PackageType::parse_lenient(&self.package_type)
    }
}

/// Query parameters for member listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMembersParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub package_type: Option<String>,
}

impl ListMembersParams {
    pub const DEFAULT_PAGE_SIZE: u64 = 10;

    /// Parses enum filters strictly; empty strings count as absent.
    pub fn status_filter(&self) -> Result<Option<MembershipStatus>, MemberError> {
        match self.status.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => s
                .parse()
                .map(Some)
                .map_err(|e: String| MemberError::validation("status", e)),
        }
    }

    pub fn package_filter(&self) -> Result<Option<PackageType>, MemberError> {
        match self.package_type.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => s
                .parse()
                .map(Some)
                .map_err(|e: String| MemberError::validation("package_type", e)),
        }
    }

    pub fn search_filter(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Member record for API responses, with derived expiry state.
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub package_type: PackageType,
    pub membership_status: MembershipStatus,
    pub join_date: String,
    pub expiry_date: String,
    pub is_expired: bool,
    pub days_remaining: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_info: Option<MedicalInfo>,
    pub payment_history: Vec<crate::domain::member::PaymentEntry>,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl MemberResponse {
    pub fn from_record(record: MemberRecord, now: Timestamp) -> Self {
        Self {
            id: record.id.to_string(),
            is_expired: record.is_expired(now),
            days_remaining: record.days_remaining(now),
            full_name: record.full_name,
            email: record.email,
            phone: record.phone,
            address: record.address,
            package_type: record.package_type,
            membership_status: record.membership_status,
            join_date: record.join_date.to_string(),
            expiry_date: record.expiry_date.to_string(),
            emergency_contact: record.emergency_contact,
            medical_info: record.medical_info,
            payment_history: record.payment_history,
            created_by: record.created_by.map(|u| u.to_string()),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Detail response with the creator resolved to name and email.
#[derive(Debug, Clone, Serialize)]
pub struct MemberDetailResponse {
    #[serde(flatten)]
    pub member: MemberResponse,
    pub created_by_user: Option<CreatedByRef>,
}

impl MemberDetailResponse {
    pub fn from_detail(detail: MemberDetail, now: Timestamp) -> Self {
        Self {
            member: MemberResponse::from_record(detail.record, now),
            created_by_user: detail.created_by,
        }
    }
}

/// Listing response with pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberResponse>,
    pub pagination: crate::application::handlers::member::Pagination,
}

/// Deletion confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteMemberResponse {
    pub id: String,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
