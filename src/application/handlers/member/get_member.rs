//! GetMemberHandler - Query handler for single-member detail reads.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::member::MemberError;
use crate::ports::{MemberDetail, MemberReader};

/// Query to fetch one member with its creator resolved.
#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    pub id: MemberId,
}

/// Handler for member detail reads.
pub struct GetMemberHandler {
    reader: Arc<dyn MemberReader>,
}

impl GetMemberHandler {
    pub fn new(reader: Arc<dyn MemberReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetMemberQuery) -> Result<MemberDetail, MemberError> {
        self.reader
            .get_detail(&query.id)
            .await?
            .ok_or(MemberError::NotFound(query.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::member::test_support::{member_record, MemberStore};

    #[tokio::test]
    async fn returns_member_with_resolved_creator() {
        let record = member_record(1);
        let id = record.id;
        let creator = record.created_by.unwrap();
        let store = Arc::new(MemberStore::with_records(vec![record]));
        store.add_user(creator, "Front Desk", "desk@gym.test");

        let detail = GetMemberHandler::new(store)
            .handle(GetMemberQuery { id })
            .await
            .unwrap();

        assert_eq!(detail.record.id, id);
        let created_by = detail.created_by.unwrap();
        assert_eq!(created_by.name, "Front Desk");
        assert_eq!(created_by.email, "desk@gym.test");
    }

    #[tokio::test]
    async fn record_outlives_its_creator_reference() {
        // The creating user is gone; the read still succeeds.
        let record = member_record(1);
        let id = record.id;
        let store = Arc::new(MemberStore::with_records(vec![record]));

        let detail = GetMemberHandler::new(store)
            .handle(GetMemberQuery { id })
            .await
            .unwrap();

        assert!(detail.created_by.is_none());
    }

    #[tokio::test]
    async fn missing_member_is_not_found() {
        let store = Arc::new(MemberStore::new());
        let id = MemberId::new();

        let err = GetMemberHandler::new(store)
            .handle(GetMemberQuery { id })
            .await
            .unwrap_err();

        assert_eq!(err, MemberError::NotFound(id));
    }
}
