//! Payment history entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// A single payment recorded against a member.
///
/// Payment history is append-only: entries are added on renewal and never
/// truncated, reordered, or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    /// Amount paid, in the gym's currency.
    pub amount: f64,

    /// When the payment was taken.
    pub date: Timestamp,

    /// How the payment was made (cash, card, transfer, ...). Free text.
    pub payment_method: String,

    /// External reference from the payment processor or receipt book.
    pub transaction_id: String,
}

impl PaymentEntry {
    pub fn new(
        amount: f64,
        date: Timestamp,
        payment_method: impl Into<String>,
        transaction_id: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            date,
            payment_method: payment_method.into(),
            transaction_id: transaction_id.into(),
        }
    }
}
