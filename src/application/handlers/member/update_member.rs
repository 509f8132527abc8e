//! UpdateMemberHandler - Command handler for partial member updates.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::member::{MemberError, MemberPatch, MemberRecord};
use crate::ports::MemberRepository;

/// Command to apply a partial update to a member.
#[derive(Debug, Clone)]
pub struct UpdateMemberCommand {
    pub id: MemberId,
    pub patch: MemberPatch,
}

/// Handler for partial member updates.
///
/// When the patch touches email or phone, the conflict check runs with the
/// member's own id excluded so a record may keep its current values.
/// Status correction re-runs after the merge, so an update that leaves a
/// lapsed record active persists it as expired.
pub struct UpdateMemberHandler {
    repository: Arc<dyn MemberRepository>,
}

impl UpdateMemberHandler {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateMemberCommand) -> Result<MemberRecord, MemberError> {
        if cmd.patch.touches_identity() {
            let email = cmd.patch.email.as_ref().map(|e| e.to_lowercase());
            if let Some(existing) = self
                .repository
                .find_conflict(email.as_deref(), cmd.patch.phone.as_deref(), Some(&cmd.id))
                .await?
            {
                let field = match &email {
                    Some(e) if existing.email.eq_ignore_ascii_case(e) => "email",
                    _ => "phone",
                };
                return Err(MemberError::duplicate(field));
            }
        }

        let mut record = self
            .repository
            .find_by_id(&cmd.id)
            .await?
            .ok_or(MemberError::NotFound(cmd.id))?;

        let now = Timestamp::now();
        record.apply_patch(cmd.patch, now);
        record.correct_status(now);

        self.repository.update(&record).await?;
        Ok(record)
    }
}
