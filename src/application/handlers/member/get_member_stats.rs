//! GetMemberStatsHandler - Query handler for dashboard statistics.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::member::MemberError;
use crate::ports::{MemberReader, MemberStatistics};

/// Query for aggregate member statistics.
///
/// Carries the evaluation instant so the near-expiry window is stable
/// within a request and pinnable in tests.
#[derive(Debug, Clone)]
pub struct GetMemberStatsQuery {
    pub now: Timestamp,
}

/// Handler for aggregate statistics.
pub struct GetMemberStatsHandler {
    reader: Arc<dyn MemberReader>,
}

impl GetMemberStatsHandler {
    pub fn new(reader: Arc<dyn MemberReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetMemberStatsQuery) -> Result<MemberStatistics, MemberError> {
        Ok(self.reader.get_statistics(query.now).await?)
    }
}
