//! RenewMembershipHandler - Command handler for membership renewal.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Timestamp};
use crate::domain::member::{
    MemberError, MemberRecord, PackagePolicy, PackageType, PaymentEntry,
};
use crate::ports::MemberRepository;

/// Command to renew a membership onto a package.
#[derive(Debug, Clone)]
pub struct RenewMembershipCommand {
    pub id: MemberId,
    pub package_type: PackageType,
    pub payment_amount: f64,
    pub payment_method: String,
    pub transaction_id: String,
}

/// Handler for membership renewal.
///
/// The renewal base is `max(current expiry, now)`; the aggregate performs
/// the extension, reactivation, and payment append in one step so partial
/// renewals cannot be observed.
pub struct RenewMembershipHandler {
    repository: Arc<dyn MemberRepository>,
    policy: PackagePolicy,
}

impl RenewMembershipHandler {
    pub fn new(repository: Arc<dyn MemberRepository>, policy: PackagePolicy) -> Self {
        Self { repository, policy }
    }

    pub async fn handle(&self, cmd: RenewMembershipCommand) -> Result<MemberRecord, MemberError> {
        let mut record = self
            .repository
            .find_by_id(&cmd.id)
            .await?
            .ok_or(MemberError::NotFound(cmd.id))?;

        let now = Timestamp::now();
        let payment = PaymentEntry::new(
            cmd.payment_amount,
            now,
            cmd.payment_method,
            cmd.transaction_id,
        );
        record.renew(cmd.package_type, &self.policy, payment, now);

        self.repository.update(&record).await?;
        Ok(record)
    }
}
