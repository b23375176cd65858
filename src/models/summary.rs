use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Transaction;

/// Aggregate figures the service derives from a user's transactions.
///
/// `expense` uses the same sign convention as stored transactions: it is the
/// (non-positive) sum of all negative amounts, so `balance == income + expense`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub balance: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub income: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub expense: Decimal
}

impl Summary {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut summary = Summary::default();

        for transaction in transactions {
            summary.include(transaction.amount);
        }

        summary
    }

    /// Whether the figures agree with each other. The client never corrects a
    /// summary that fails this, it only reports it.
    pub fn is_balanced(&self) -> bool {
        self.balance == self.income + self.expense
    }

    pub(crate) fn include(&mut self, amount: Decimal) {
        self.balance += amount;

        if amount.is_sign_negative() {
            self.expense += amount;
        } else {
            self.income += amount;
        }
    }

    pub(crate) fn exclude(&mut self, amount: Decimal) {
        self.balance -= amount;

        if amount.is_sign_negative() {
            self.expense -= amount;
        } else {
            self.income -= amount;
        }
    }
}

// Aggregates over an empty set come back as null.
fn zero_if_null<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}
