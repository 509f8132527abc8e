//! Ports - trait contracts between the application core and its adapters.

mod member_reader;
mod member_repository;

pub use member_reader::{
    CreatedByRef, MemberDetail, MemberFilter, MemberPage, MemberReader, MemberStatistics,
    PackageCount, StatusCount, EXPIRING_SOON_WINDOW_DAYS,
};
pub use member_repository::MemberRepository;
