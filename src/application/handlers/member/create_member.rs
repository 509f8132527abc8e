//! CreateMemberHandler - Command handler for registering new members.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp, UserId};
use crate::domain::member::{MemberError, MemberRecord, NewMember, PackagePolicy};
use crate::ports::MemberRepository;

/// Command to register a new member.
#[derive(Debug, Clone)]
pub struct CreateMemberCommand {
    pub input: NewMember,
    /// The authenticated staff user performing the registration.
    pub actor: UserId,
}

/// Handler for member registration.
///
/// Runs the optimistic conflict check, derives the expiry date from the
/// package duration, and persists. The storage unique constraints remain
/// the authoritative duplicate guard; a constraint violation on insert
/// surfaces as the same `Duplicate` error as the pre-check.
pub struct CreateMemberHandler {
    repository: Arc<dyn MemberRepository>,
    policy: PackagePolicy,
}

impl CreateMemberHandler {
    pub fn new(repository: Arc<dyn MemberRepository>, policy: PackagePolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn handle(&self, cmd: CreateMemberCommand) -> Result<MemberRecord, MemberError> {
        let email = cmd.input.email.to_lowercase();

        if let Some(existing) = self
            .repository
            .find_conflict(Some(&email), Some(&cmd.input.phone), None)
            .await?
        {
            let field = if existing.email.eq_ignore_ascii_case(&email) {
                "email"
            } else {
                "phone"
            };
            return Err(MemberError::duplicate(field));
        }

        let now = Timestamp::now();
        let mut record =
            MemberRecord::create(MemberId::new(), cmd.input, &self.policy, cmd.actor, now);
        record.correct_status(now);

        self.repository.insert(&record).await?;
        Ok(record)
    }
}
