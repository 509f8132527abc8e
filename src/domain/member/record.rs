//! Member record aggregate.
//!
//! The MemberRecord aggregate represents one gym member: contact details,
//! the package they are paying for, and the paid-up period derived from it.
//!
//! # Design Decisions
//!
//! - **Lazy expiry correction**: an active record whose expiry date has
//!   passed is flipped to `Expired` on the next persisting write, never by
//!   a background sweep. Reads may see a stale persisted status; the
//!   derived `is_expired` / `days_remaining` values are always current.
//! - **Email stored lowercased**: uniqueness is case-insensitive, so the
//!   canonical form is fixed at the aggregate boundary.
//! - **Append-only payments**: renewal pushes exactly one entry; nothing
//!   ever removes or reorders history.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Timestamp, UserId};

use super::{MembershipStatus, PackagePolicy, PackageType, PaymentEntry};

/// Emergency contact details. All fields optional free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub relation: Option<String>,
}

/// Medical notes kept on file for the member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalInfo {
    pub blood_group: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
}

/// Validated input for creating a new member.
///
/// Shape validation (lengths, email/phone format, enum membership) happens
/// at the HTTP boundary; by the time this struct exists the fields are
/// well-formed. Semantic uniqueness is still enforced by the handler.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub package_type: PackageType,
    pub emergency_contact: Option<EmergencyContact>,
    pub medical_info: Option<MedicalInfo>,
}

/// Partial update for an existing member.
///
/// Unset fields are left untouched; they are never overwritten with
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct MemberPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub package_type: Option<PackageType>,
    pub membership_status: Option<MembershipStatus>,
    pub emergency_contact: Option<EmergencyContact>,
    pub medical_info: Option<MedicalInfo>,
}

impl MemberPatch {
    /// True when the patch touches email or phone and therefore needs a
    /// conflict check before persisting.
    pub fn touches_identity(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }
}

/// MemberRecord aggregate.
///
/// # Invariants
///
/// - `email` (case-insensitive) and `phone` are unique across all records;
///   enforced by the conflict check plus the storage unique indexes.
/// - `join_date` is fixed at creation.
/// - `payment_history` only grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: MemberId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub package_type: PackageType,
    pub membership_status: MembershipStatus,
    pub join_date: Timestamp,
    pub expiry_date: Timestamp,
    pub emergency_contact: Option<EmergencyContact>,
    pub medical_info: Option<MedicalInfo>,
    pub payment_history: Vec<PaymentEntry>,
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MemberRecord {
    /// Creates a new member joining now.
    ///
    /// The expiry date is the join date plus the package duration; the
    /// status starts at its default (`Active`).
    pub fn create(
        id: MemberId,
        input: NewMember,
        policy: &PackagePolicy,
        created_by: UserId,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            full_name: input.full_name,
            email: input.email.to_lowercase(),
            phone: input.phone,
            address: input.address,
            package_type: input.package_type,
            membership_status: MembershipStatus::default(),
            join_date: now,
            expiry_date: policy.compute_expiry(now, input.package_type),
            emergency_contact: input.emergency_contact,
            medical_info: input.medical_info,
            payment_history: Vec::new(),
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the expiry date is strictly in the past.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiry_date < now
    }

    /// Whole days until expiry, rounded up. Negative once expired.
    pub fn days_remaining(&self, now: Timestamp) -> i64 {
        let millis = self.expiry_date.duration_since(&now).num_milliseconds();
        (millis as f64 / 86_400_000.0).ceil() as i64
    }

    /// Flips an active record past its expiry date to `Expired`.
    ///
    /// Applied on every write path that persists the record. Idempotent:
    /// once corrected the record is no longer active, so a second pass is
    /// a no-op. Other statuses are never touched.
    pub fn correct_status(&mut self, now: Timestamp) {
        if self.expiry_date < now && self.membership_status == MembershipStatus::Active {
            self.membership_status = MembershipStatus::Expired;
        }
    }

    /// Merges a partial update into the record. Unset fields keep their
    /// current values.
    pub fn apply_patch(&mut self, patch: MemberPatch, now: Timestamp) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = patch.email {
            self.email = email.to_lowercase();
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(package_type) = patch.package_type {
            self.package_type = package_type;
        }
        if let Some(status) = patch.membership_status {
            self.membership_status = status;
        }
        if let Some(contact) = patch.emergency_contact {
            self.emergency_contact = Some(contact);
        }
        if let Some(medical) = patch.medical_info {
            self.medical_info = Some(medical);
        }
        self.updated_at = now;
    }

    /// Renews the membership onto a (possibly different) package.
    ///
    /// The renewal base is `max(current expiry, now)`: an active member
    /// extends from their current expiry, a lapsed one from today, so a
    /// late renewal never produces a past-dated expiry and an early one
    /// never loses paid-up days. Renewal always reactivates and appends
    /// exactly one payment entry.
    pub fn renew(
        &mut self,
        package: PackageType,
        policy: &PackagePolicy,
        payment: PaymentEntry,
        now: Timestamp,
    ) {
        let base = std::cmp::max(self.expiry_date, now);
        self.package_type = package;
        self.expiry_date = policy.compute_expiry(base, package);
        self.membership_status = MembershipStatus::Active;
        self.payment_history.push(payment);
        self.updated_at = now;
    }
}
