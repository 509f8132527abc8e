//! Member lifecycle and query handlers.
//!
//! One command/query handler per operation, wired to the repository and
//! reader ports. Handlers own orchestration (conflict checks, status
//! correction, persistence ordering); the date arithmetic lives on the
//! domain aggregate.

mod create_member;
mod delete_member;
mod get_member;
mod get_member_stats;
mod list_members;
mod renew_membership;
mod update_member;

pub use create_member::{CreateMemberCommand, CreateMemberHandler};
pub use delete_member::{DeleteMemberCommand, DeleteMemberHandler};
pub use get_member::{GetMemberHandler, GetMemberQuery};
pub use get_member_stats::{GetMemberStatsHandler, GetMemberStatsQuery};
pub use list_members::{ListMembersHandler, ListMembersQuery, ListMembersResult, Pagination};
pub use renew_membership::{RenewMembershipCommand, RenewMembershipHandler};
pub use update_member::{UpdateMemberCommand, UpdateMemberHandler};

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory store backing the handler tests.
    //!
    //! Behaves like the real storage layer: uniqueness is enforced on
    //! insert and update (the authoritative constraint), filters and
    //! statistics follow the shared port semantics.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::foundation::{DomainError, MemberId, Timestamp, UserId};
    use crate::domain::member::{
        MemberRecord, NewMember, PackagePolicy, PackageType,
    };
    use crate::ports::{
        CreatedByRef, MemberDetail, MemberFilter, MemberPage, MemberReader, MemberRepository,
        MemberStatistics,
    };

    pub struct MemberStore {
        records: Mutex<Vec<MemberRecord>>,
        users: Mutex<HashMap<UserId, (String, String)>>,
        fail: bool,
    }

    impl MemberStore {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                users: Mutex::new(HashMap::new()),
                fail: false,
            }
        }

        pub fn with_records(records: Vec<MemberRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                users: Mutex::new(HashMap::new()),
                fail: false,
            }
        }

        /// Every operation fails with a database error.
        pub fn failing() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                users: Mutex::new(HashMap::new()),
                fail: true,
            }
        }

        pub fn add_user(&self, id: UserId, name: &str, email: &str) {
            self.users
                .lock()
                .unwrap()
                .insert(id, (name.to_string(), email.to_string()));
        }

        pub fn records(&self) -> Vec<MemberRecord> {
            self.records.lock().unwrap().clone()
        }

        fn check_available(&self) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::database("simulated storage failure"));
            }
            Ok(())
        }

        fn constraint_check(
            records: &[MemberRecord],
            candidate: &MemberRecord,
        ) -> Result<(), DomainError> {
            for existing in records {
                if existing.id == candidate.id {
                    continue;
                }
                if existing.email.eq_ignore_ascii_case(&candidate.email) {
                    return Err(DomainError::duplicate("email"));
                }
                if existing.phone == candidate.phone {
                    return Err(DomainError::duplicate("phone"));
                }
            }
            Ok(())
        }
    }

    #[async_trait]
    impl MemberRepository for MemberStore {
        async fn insert(&self, record: &MemberRecord) -> Result<(), DomainError> {
            self.check_available()?;
            let mut records = self.records.lock().unwrap();
            Self::constraint_check(&records, record)?;
            records.push(record.clone());
            Ok(())
        }

        async fn update(&self, record: &MemberRecord) -> Result<(), DomainError> {
            self.check_available()?;
            let mut records = self.records.lock().unwrap();
            Self::constraint_check(&records, record)?;
            let pos = records
                .iter()
                .position(|r| r.id == record.id)
                .ok_or_else(|| DomainError::database("update of missing record"))?;
            records[pos] = record.clone();
            Ok(())
        }

        async fn find_by_id(&self, id: &MemberId) -> Result<Option<MemberRecord>, DomainError> {
            self.check_available()?;
            let records = self.records.lock().unwrap();
            Ok(records.iter().find(|r| r.id == *id).cloned())
        }

        async fn find_conflict(
            &self,
            email: Option<&str>,
            phone: Option<&str>,
            exclude: Option<&MemberId>,
        ) -> Result<Option<MemberRecord>, DomainError> {
            self.check_available()?;
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .find(|r| {
                    if exclude.is_some_and(|id| r.id == *id) {
                        return false;
                    }
                    email.is_some_and(|e| r.email.eq_ignore_ascii_case(e))
                        || phone.is_some_and(|p| r.phone == p)
                })
                .cloned())
        }

        async fn delete(&self, id: &MemberId) -> Result<bool, DomainError> {
            self.check_available()?;
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.id != *id);
            Ok(records.len() < before)
        }
    }

    #[async_trait]
    impl MemberReader for MemberStore {
        async fn get_detail(&self, id: &MemberId) -> Result<Option<MemberDetail>, DomainError> {
            self.check_available()?;
            let records = self.records.lock().unwrap();
            let Some(record) = records.iter().find(|r| r.id == *id).cloned() else {
                return Ok(None);
            };
            let users = self.users.lock().unwrap();
            let created_by = record.created_by.and_then(|uid| {
                users.get(&uid).map(|(name, email)| CreatedByRef {
                    id: uid,
                    name: name.clone(),
                    email: email.clone(),
                })
            });
            Ok(Some(MemberDetail { record, created_by }))
        }

        async fn list(
            &self,
            filter: &MemberFilter,
            skip: u64,
            limit: u64,
        ) -> Result<MemberPage, DomainError> {
            self.check_available()?;
            let records = self.records.lock().unwrap();
            let mut matched: Vec<MemberRecord> =
                records.iter().filter(|r| filter.matches(r)).cloned().collect();
            matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let total = matched.len() as u64;
            let members = matched
                .into_iter()
                .skip(skip as usize)
                .take(limit as usize)
                .collect();
            Ok(MemberPage { members, total })
        }

        async fn get_statistics(&self, now: Timestamp) -> Result<MemberStatistics, DomainError> {
            self.check_available()?;
            let records = self.records.lock().unwrap();
            Ok(MemberStatistics::from_records(records.iter(), now))
        }
    }

    /// A valid create input with distinct identity fields per suffix.
    pub fn member_input(suffix: u32) -> NewMember {
        NewMember {
            full_name: format!("Test Member {}", suffix),
            email: format!("member{}@gym.test", suffix),
            phone: format!("555{:07}", suffix),
            address: "100 Gym Street, Springfield".to_string(),
            package_type: PackageType::Basic,
            emergency_contact: None,
            medical_info: None,
        }
    }

    /// A persisted record with distinct identity fields per suffix.
    pub fn member_record(suffix: u32) -> MemberRecord {
        MemberRecord::create(
            MemberId::new(),
            member_input(suffix),
            &PackagePolicy::default(),
            UserId::new(),
            Timestamp::now(),
        )
    }
}
