use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Category;
use crate::types::{deserialize_timestamp, Timestamp, TransactionId, UserId};

/// A transaction as stored by the remote service.
///
/// `amount` is signed: negative for an expense, positive for income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: Timestamp
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount.is_sign_negative()
    }
}

/// A validated creation request.
///
/// Only [`crate::validation::validate`] builds one, so a value of this type
/// always has a non-empty title, a non-zero amount whose sign matches
/// `is_expense`, and a known category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    user_id: UserId,
    title: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    category: Category,
    #[serde(rename = "isExpense")]
    is_expense: bool
}

impl NewTransaction {
    pub(crate) fn new(user_id: UserId, title: String, amount: Decimal, category: Category, is_expense: bool) -> Self {
        Self { user_id, title, amount, category, is_expense }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_expense(&self) -> bool {
        self.is_expense
    }
}
