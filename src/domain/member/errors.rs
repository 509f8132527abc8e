//! Member-specific error types.
//!
//! The typed failure taxonomy for lifecycle and query operations.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | Duplicate | 409 |
//! | MalformedId | 400 |
//! | Validation | 400 |
//! | Storage | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, MemberId};

/// Member-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
    /// The member id does not resolve to a record.
    NotFound(MemberId),

    /// Another record already holds this email or phone.
    Duplicate { field: String },

    /// The supplied id is not a shape storage can resolve. Distinct from
    /// NotFound: syntactically invalid rather than absent.
    MalformedId(String),

    /// Input shape or semantic rule violated at the boundary.
    Validation { field: String, message: String },

    /// The storage collaborator failed. Retryable at the caller's
    /// discretion; the core never retries internally.
    Storage(String),
}

impl MemberError {
    pub fn not_found(id: MemberId) -> Self {
        MemberError::NotFound(id)
    }

    pub fn duplicate(field: impl Into<String>) -> Self {
        MemberError::Duplicate {
            field: field.into(),
        }
    }

    pub fn malformed_id(raw: impl Into<String>) -> Self {
        MemberError::MalformedId(raw.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MemberError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        MemberError::Storage(message.into())
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            MemberError::NotFound(id) => format!("Member not found: {}", id),
            MemberError::Duplicate { field } => {
                format!("A member with this {} already exists", field)
            }
            MemberError::MalformedId(raw) => format!("Invalid member id: {}", raw),
            MemberError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MemberError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MemberError::Storage(_))
    }
}

impl std::fmt::Display for MemberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MemberError {}

impl From<DomainError> for MemberError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateMember => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "email or phone".to_string());
                MemberError::Duplicate { field }
            }
            ErrorCode::MalformedIdentifier => MemberError::MalformedId(err.message),
            ErrorCode::ValidationFailed => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "input".to_string());
                MemberError::Validation {
                    field,
                    message: err.message,
                }
            }
            ErrorCode::DatabaseError => MemberError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_the_field() {
        let err = MemberError::duplicate("phone");
        assert_eq!(err.message(), "A member with this phone already exists");
    }

    #[test]
    fn only_storage_errors_are_retryable() {
        assert!(MemberError::storage("pool timeout").is_retryable());
        assert!(!MemberError::not_found(MemberId::new()).is_retryable());
        assert!(!MemberError::duplicate("email").is_retryable());
        assert!(!MemberError::malformed_id("123").is_retryable());
    }

    #[test]
    fn duplicate_domain_error_converts_with_field() {
        let err: MemberError = DomainError::duplicate("email").into();
        assert_eq!(err, MemberError::duplicate("email"));
    }

    #[test]
    fn database_domain_error_converts_to_storage() {
        let err: MemberError = DomainError::database("connection reset").into();
        assert!(matches!(err, MemberError::Storage(_)));
    }

    #[test]
    fn validation_domain_error_keeps_field_detail() {
        let err: MemberError = DomainError::validation("phone", "expected 10 digits").into();
        assert_eq!(err, MemberError::validation("phone", "expected 10 digits"));
    }

    #[test]
    fn every_port_code_translates() {
        let cases = [
            (
                DomainError::validation("email", "bad shape"),
                MemberError::validation("email", "bad shape"),
            ),
            (DomainError::duplicate("phone"), MemberError::duplicate("phone")),
            (
                DomainError::new(ErrorCode::MalformedIdentifier, "not-a-uuid"),
                MemberError::malformed_id("not-a-uuid"),
            ),
            (
                DomainError::database("pool timeout"),
                MemberError::storage("[DATABASE_ERROR] pool timeout"),
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(MemberError::from(input), expected);
        }
    }
}
