//! Member domain module.
//!
//! Handles the membership lifecycle: record rules, package durations,
//! status transitions, renewal accounting.
//!
//! # Module Structure
//!
//! - `record` - MemberRecord aggregate and derived-state rules
//! - `package` - PackageType tiers and the injected duration policy
//! - `status` - MembershipStatus lifecycle states
//! - `payment` - append-only payment history entries
//! - `errors` - member-facing error taxonomy

mod errors;
mod package;
mod payment;
mod record;
mod status;

pub use errors::MemberError;
pub use package::{PackagePolicy, PackageType};
pub use payment::PaymentEntry;
pub use record::{EmergencyContact, MedicalInfo, MemberPatch, MemberRecord, NewMember};
pub use status::MembershipStatus;
