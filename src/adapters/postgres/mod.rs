//! PostgreSQL adapters - database implementations of the member ports.
//!
//! - `PostgresMemberRepository` - write-side persistence with constraint
//!   translation
//! - `PostgresMemberReader` - listings, detail joins, grouped statistics

mod member_reader;
mod member_repository;

pub use member_reader::PostgresMemberReader;
pub use member_repository::PostgresMemberRepository;
