//! PostgreSQL implementation of MemberRepository.
//!
//! Persistent storage for MemberRecord aggregates. The unique indexes on
//! `lower(email)` and `phone` are the authoritative uniqueness guarantee;
//! violations are translated to `ErrorCode::DuplicateMember` so the
//! application-level conflict check and the constraint report the same
//! typed failure.

use crate::domain::foundation::{DomainError, MemberId, Timestamp, UserId};
use crate::domain::member::{
    EmergencyContact, MedicalInfo, MemberRecord, MembershipStatus, PackageType, PaymentEntry,
};
use crate::ports::MemberRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

pub(super) const MEMBER_COLUMNS: &str = "id, full_name, email, phone, address, package_type, \
     membership_status, join_date, expiry_date, emergency_contact, medical_info, \
     payment_history, created_by, created_at, updated_at";

/// PostgreSQL implementation of the MemberRepository port.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new PostgresMemberRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct MemberRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub package_type: String,
    pub membership_status: String,
    pub join_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub emergency_contact: Option<Json<EmergencyContact>>,
    pub medical_info: Option<Json<MedicalInfo>>,
    pub payment_history: Json<Vec<PaymentEntry>>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for MemberRecord {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(MemberRecord {
            id: MemberId::from_uuid(row.id),
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            package_type: parse_package(&row.package_type)?,
            membership_status: parse_status(&row.membership_status)?,
            join_date: Timestamp::from_datetime(row.join_date),
            expiry_date: Timestamp::from_datetime(row.expiry_date),
            emergency_contact: row.emergency_contact.map(|j| j.0),
            medical_info: row.medical_info.map(|j| j.0),
            payment_history: row.payment_history.0,
            created_by: row.created_by.map(UserId::from_uuid),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

pub(super) fn parse_package(s: &str) -> Result<PackageType, DomainError> {
    s.parse()
        .map_err(|_| DomainError::database(format!("Invalid package_type value: {}", s)))
}

pub(super) fn parse_status(s: &str) -> Result<MembershipStatus, DomainError> {
    s.parse()
        .map_err(|_| DomainError::database(format!("Invalid membership_status value: {}", s)))
}

/// Maps unique-index violations to duplicate errors, everything else to a
/// database error.
fn map_write_error(e: sqlx::Error, op: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("members_email_key") => return DomainError::duplicate("email"),
            Some("members_phone_key") => return DomainError::duplicate("phone"),
            _ => {}
        }
    }
    DomainError::database(format!("Failed to {} member: {}", op, e))
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn insert(&self, record: &MemberRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO members (
                id, full_name, email, phone, address, package_type, membership_status,
                join_date, expiry_date, emergency_contact, medical_info, payment_history,
                created_by, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.full_name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.address)
        .bind(record.package_type.as_str())
        .bind(record.membership_status.as_str())
        .bind(record.join_date.as_datetime())
        .bind(record.expiry_date.as_datetime())
        .bind(record.emergency_contact.as_ref().map(Json))
        .bind(record.medical_info.as_ref().map(Json))
        .bind(Json(&record.payment_history))
        .bind(record.created_by.map(|u| *u.as_uuid()))
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "insert"))?;

        Ok(())
    }

    async fn update(&self, record: &MemberRecord) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET
                full_name = $2, email = $3, phone = $4, address = $5, package_type = $6,
                membership_status = $7, expiry_date = $8, emergency_contact = $9,
                medical_info = $10, payment_history = $11, updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.full_name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.address)
        .bind(record.package_type.as_str())
        .bind(record.membership_status.as_str())
        .bind(record.expiry_date.as_datetime())
        .bind(record.emergency_contact.as_ref().map(Json))
        .bind(record.medical_info.as_ref().map(Json))
        .bind(Json(&record.payment_history))
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::database(format!(
                "Update touched no rows for member {}",
                record.id
            )));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<MemberRecord>, DomainError> {
        let sql = format!("SELECT {} FROM members WHERE id = $1", MEMBER_COLUMNS);
        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch member: {}", e)))?;

        row.map(MemberRecord::try_from).transpose()
    }

    async fn find_conflict(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        exclude: Option<&MemberId>,
    ) -> Result<Option<MemberRecord>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM members
            WHERE (($1::text IS NOT NULL AND lower(email) = lower($1))
                OR ($2::text IS NOT NULL AND phone = $2))
              AND ($3::uuid IS NULL OR id <> $3)
            LIMIT 1
            "#,
            MEMBER_COLUMNS
        );
        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(email)
            .bind(phone)
            .bind(exclude.map(|id| *id.as_uuid()))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Conflict lookup failed: {}", e)))?;

        row.map(MemberRecord::try_from).transpose()
    }

    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete member: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_package_accepts_stored_values() {
        for package in PackageType::ALL {
            assert_eq!(parse_package(package.as_str()).unwrap(), package);
        }
    }

    #[test]
    fn parse_status_rejects_unknown_values() {
        let err = parse_status("archived").unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::DatabaseError);
    }
}
