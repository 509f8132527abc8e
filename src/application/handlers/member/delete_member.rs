//! DeleteMemberHandler - Command handler for permanent member removal.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::member::MemberError;
use crate::ports::MemberRepository;

/// Command to permanently delete a member.
#[derive(Debug, Clone)]
pub struct DeleteMemberCommand {
    pub id: MemberId,
}

/// Handler for member deletion.
///
/// Hard delete with no tombstone and no cascading effects; the deleted id
/// comes back as confirmation.
pub struct DeleteMemberHandler {
    repository: Arc<dyn MemberRepository>,
}

impl DeleteMemberHandler {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteMemberCommand) -> Result<MemberId, MemberError> {
        let deleted = self.repository.delete(&cmd.id).await?;
        if !deleted {
            return Err(MemberError::NotFound(cmd.id));
        }
        Ok(cmd.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::member::test_support::{member_record, MemberStore};

    #[tokio::test]
    async fn deletes_existing_member_and_returns_id() {
        let record = member_record(1);
        let id = record.id;
        let store = Arc::new(MemberStore::with_records(vec![record]));

        let returned = DeleteMemberHandler::new(store.clone())
            .handle(DeleteMemberCommand { id })
            .await
            .unwrap();

        assert_eq!(returned, id);
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn missing_member_is_not_found() {
        let store = Arc::new(MemberStore::new());
        let id = MemberId::new();

        let err = DeleteMemberHandler::new(store)
            .handle(DeleteMemberCommand { id })
            .await
            .unwrap_err();

        assert_eq!(err, MemberError::NotFound(id));
    }

    #[tokio::test]
    async fn delete_leaves_other_members_alone() {
        let keep = member_record(1);
        let remove = member_record(2);
        let keep_id = keep.id;
        let remove_id = remove.id;
        let store = Arc::new(MemberStore::with_records(vec![keep, remove]));

        DeleteMemberHandler::new(store.clone())
            .handle(DeleteMemberCommand { id: remove_id })
            .await
            .unwrap();

        let remaining = store.records();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep_id);
    }
}
