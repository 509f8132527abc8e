//! PostgreSQL implementation of MemberReader.
//!
//! Read-optimized queries: creator-resolving detail reads, filtered
//! listings, and grouped statistics. Grouping runs in SQL; the results
//! must agree with `MemberStatistics::from_records`.

use crate::domain::foundation::{DomainError, MemberId, Timestamp, UserId};
use crate::domain::member::MemberRecord;
use crate::ports::{
    CreatedByRef, MemberDetail, MemberFilter, MemberPage, MemberReader, MemberStatistics,
    PackageCount, StatusCount, EXPIRING_SOON_WINDOW_DAYS,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::member_repository::{parse_package, parse_status, MemberRow, MEMBER_COLUMNS};

/// PostgreSQL implementation of the MemberReader port.
pub struct PostgresMemberReader {
    pool: PgPool,
}

impl PostgresMemberReader {
    /// Creates a new PostgresMemberReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row for the creator join on detail reads.
#[derive(Debug, sqlx::FromRow)]
struct CreatorRow {
    id: Uuid,
    name: String,
    email: String,
}

/// Row for status grouping.
#[derive(Debug, sqlx::FromRow)]
struct StatusCountRow {
    membership_status: String,
    count: i64,
}

/// Row for package grouping.
#[derive(Debug, sqlx::FromRow)]
struct PackageCountRow {
    package_type: String,
    count: i64,
}

fn read_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

#[async_trait]
impl MemberReader for PostgresMemberReader {
    async fn get_detail(&self, id: &MemberId) -> Result<Option<MemberDetail>, DomainError> {
        let sql = format!("SELECT {} FROM members WHERE id = $1", MEMBER_COLUMNS);
        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to fetch member", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let record = MemberRecord::try_from(row)?;

        // Weak reference: the creating user may have been removed since.
        let created_by = match record.created_by {
            Some(user_id) => sqlx::query_as::<_, CreatorRow>(
                "SELECT id, name, email FROM users WHERE id = $1",
            )
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to resolve creator", e))?
            .map(|u| CreatedByRef {
                id: UserId::from_uuid(u.id),
                name: u.name,
                email: u.email,
            }),
            None => None,
        };

        Ok(Some(MemberDetail { record, created_by }))
    }

    async fn list(
        &self,
        filter: &MemberFilter,
        skip: u64,
        limit: u64,
    ) -> Result<MemberPage, DomainError> {
        let search = filter.search.as_deref();
        let status = filter.status.map(|s| s.as_str());
        let package = filter.package.map(|p| p.as_str());

        const LIST_PREDICATE: &str = r#"
              ($1::text IS NULL
                OR full_name ILIKE '%' || $1 || '%'
                OR email ILIKE '%' || $1 || '%'
                OR phone LIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR membership_status = $2)
              AND ($3::text IS NULL OR package_type = $3)
        "#;

        let sql = format!(
            "SELECT {} FROM members WHERE {} ORDER BY created_at DESC OFFSET $4 LIMIT $5",
            MEMBER_COLUMNS, LIST_PREDICATE
        );
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(search)
            .bind(status)
            .bind(package)
            .bind(skip as i64)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list members", e))?;

        let members = rows
            .into_iter()
            .map(MemberRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let count_sql = format!("SELECT COUNT(*) FROM members WHERE {}", LIST_PREDICATE);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(search)
            .bind(status)
            .bind(package)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to count members", e))?;

        Ok(MemberPage {
            members,
            total: total as u64,
        })
    }

    async fn get_statistics(&self, now: Timestamp) -> Result<MemberStatistics, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to count members", e))?;

        let status_rows = sqlx::query_as::<_, StatusCountRow>(
            "SELECT membership_status, COUNT(*) AS count FROM members GROUP BY membership_status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("Failed to group by status", e))?;

        let by_status = status_rows
            .into_iter()
            .map(|row| {
                Ok(StatusCount {
                    status: parse_status(&row.membership_status)?,
                    count: row.count as u64,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let package_rows = sqlx::query_as::<_, PackageCountRow>(
            "SELECT package_type, COUNT(*) AS count FROM members GROUP BY package_type",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("Failed to group by package", e))?;

        let by_package = package_rows
            .into_iter()
            .map(|row| {
                Ok(PackageCount {
                    package: parse_package(&row.package_type)?,
                    count: row.count as u64,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        // Raw expiry dates, inclusive at both window ends, regardless of
        // the persisted status field.
        let window_end = now.add_days(EXPIRING_SOON_WINDOW_DAYS);
        let expiring_soon: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM members WHERE expiry_date >= $1 AND expiry_date <= $2",
        )
        .bind(now.as_datetime())
        .bind(window_end.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("Failed to count expiring members", e))?;

        Ok(MemberStatistics {
            total: total as u64,
            by_status,
            by_package,
            expiring_soon: expiring_soon as u64,
        })
    }
}
