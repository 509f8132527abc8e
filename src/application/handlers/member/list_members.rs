//! ListMembersHandler - Query handler for filtered, paginated listings.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::member::{MemberError, MemberRecord};
use crate::ports::{MemberFilter, MemberReader};

/// Query for a filtered page of members.
#[derive(Debug, Clone)]
pub struct ListMembersQuery {
    pub filter: MemberFilter,
    /// 1-based page number.
    pub page: u64,
    pub page_size: u64,
}

/// Offset pagination metadata returned with every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
}

impl Pagination {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        Self {
            current_page: page,
            total_pages: (total + page_size - 1) / page_size,
            total_items: total,
            items_per_page: page_size,
        }
    }
}

/// One page of members plus pagination metadata.
#[derive(Debug, Clone)]
pub struct ListMembersResult {
    pub members: Vec<MemberRecord>,
    pub pagination: Pagination,
}

/// Handler for member listings.
///
/// Pages are 1-based; out-of-range values are clamped to sane minimums
/// rather than rejected. Ordering is creation time descending.
pub struct ListMembersHandler {
    reader: Arc<dyn MemberReader>,
}

impl ListMembersHandler {
    pub fn new(reader: Arc<dyn MemberReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListMembersQuery) -> Result<ListMembersResult, MemberError> {
        let page = query.page.max(1);
        let page_size = query.page_size.max(1);
        let skip = (page - 1) * page_size;

        let page_result = self.reader.list(&query.filter, skip, page_size).await?;

        Ok(ListMembersResult {
            pagination: Pagination::new(page, page_size, page_result.total),
            members: page_result.members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::member::test_support::{member_record, MemberStore};
    use crate::domain::member::MembershipStatus;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn store_with(count: u32) -> Arc<MemberStore> {
        let mut records = Vec::new();
        for i in 0..count {
            let mut r = member_record(i);
            // Spread creation times so the ordering is deterministic.
            r.created_at = r.created_at.minus_days(i as i64);
            records.push(r);
        }
        Arc::new(MemberStore::with_records(records))
    }

    fn query(page: u64, page_size: u64) -> ListMembersQuery {
        ListMembersQuery {
            filter: MemberFilter::default(),
            page,
            page_size,
        }
    }

    #[tokio::test]
    async fn pages_are_ordered_newest_first() {
        let store = store_with(5);
        let result = ListMembersHandler::new(store)
            .handle(query(1, 10))
            .await
            .unwrap();

        for pair in result.members.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn pagination_metadata_is_consistent() {
        let store = store_with(25);
        let result = ListMembersHandler::new(store)
            .handle(query(2, 10))
            .await
            .unwrap();

        assert_eq!(result.members.len(), 10);
        assert_eq!(
            result.pagination,
            Pagination {
                current_page: 2,
                total_pages: 3,
                total_items: 25,
                items_per_page: 10,
            }
        );
    }

    #[tokio::test]
    async fn last_page_holds_the_remainder() {
        let store = store_with(25);
        let result = ListMembersHandler::new(store)
            .handle(query(3, 10))
            .await
            .unwrap();

        assert_eq!(result.members.len(), 5);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_but_well_formed() {
        let store = store_with(5);
        let result = ListMembersHandler::new(store)
            .handle(query(4, 10))
            .await
            .unwrap();

        assert!(result.members.is_empty());
        assert_eq!(result.pagination.total_pages, 1);
        assert_eq!(result.pagination.total_items, 5);
    }

    #[tokio::test]
    async fn zero_page_is_clamped_to_first() {
        let store = store_with(5);
        let result = ListMembersHandler::new(store)
            .handle(query(0, 10))
            .await
            .unwrap();

        assert_eq!(result.pagination.current_page, 1);
        assert_eq!(result.members.len(), 5);
    }

    #[tokio::test]
    async fn status_filter_restricts_results_and_totals() {
        let mut records = vec![member_record(1), member_record(2), member_record(3)];
        records[0].membership_status = MembershipStatus::Suspended;
        let store = Arc::new(MemberStore::with_records(records));

        let result = ListMembersHandler::new(store)
            .handle(ListMembersQuery {
                filter: MemberFilter {
                    status: Some(MembershipStatus::Suspended),
                    ..Default::default()
                },
                page: 1,
                page_size: 10,
            })
            .await
            .unwrap();

        assert_eq!(result.members.len(), 1);
        assert_eq!(result.pagination.total_items, 1);
    }

    #[tokio::test]
    async fn concatenated_pages_cover_every_member_once() {
        let store = store_with(23);
        let handler = ListMembersHandler::new(store);
        let mut seen = HashSet::new();
        let mut fetched = 0u64;

        for page in 1..=5 {
            let result = handler.handle(query(page, 5)).await.unwrap();
            assert_eq!(result.pagination.total_pages, 5);
            for member in &result.members {
                assert!(seen.insert(member.id), "duplicate across pages");
            }
            fetched += result.members.len() as u64;
        }

        assert_eq!(fetched, 23);
    }

    proptest! {
        #[test]
        fn total_pages_is_ceiling_division(total in 0u64..10_000, page_size in 1u64..500) {
            let p = Pagination::new(1, page_size, total);
            prop_assert_eq!(p.total_pages, total.div_euclid(page_size) + u64::from(total % page_size != 0));
            // total_pages is the smallest page count that fits every item.
            prop_assert!(p.total_pages * page_size >= total);
            prop_assert!(p.total_pages.saturating_sub(1) * page_size < total || total == 0);
        }
    }
}
