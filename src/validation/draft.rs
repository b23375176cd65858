use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Category, NewTransaction};
use crate::types::UserId;
use crate::validation::ValidationError;

/// Raw fields as collected by the create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: String,
    /// Selected category label, empty when nothing is selected.
    pub category: String,
    pub is_expense: bool
}

impl TransactionDraft {
    pub fn expense(title: &str, amount: &str, category: &str) -> Self {
        Self {
            title: title.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            is_expense: true
        }
    }

    pub fn income(title: &str, amount: &str, category: &str) -> Self {
        Self { is_expense: false, ..Self::expense(title, amount, category) }
    }
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self::expense("", "", "")
    }
}

/// Turns a draft into a creation request for `user_id`, all or nothing.
///
/// Checks run in the order the form reports them: title, amount present,
/// category present, amount value, category label.
///
/// # Errors
/// Returns the first [`ValidationError`] encountered.
pub fn validate(draft: &TransactionDraft, user_id: &UserId) -> Result<NewTransaction, ValidationError> {
    let title = draft.title.trim();

    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }

    if draft.amount.trim().is_empty() {
        return Err(ValidationError::MissingAmount);
    }

    if draft.category.trim().is_empty() {
        return Err(ValidationError::MissingCategory);
    }

    let magnitude = parse_magnitude(&draft.amount)?;

    let category = Category::from_label(&draft.category)
        .ok_or_else(|| ValidationError::invalid_category(&draft.category))?;

    Ok(NewTransaction::new(
        user_id.clone(),
        title.to_string(),
        normalize(magnitude, draft.is_expense),
        category,
        draft.is_expense
    ))
}

/// Parses the unsigned amount the user typed. Zero and negative values are rejected.
pub fn parse_magnitude(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::MissingAmount);
    }

    let mut candidate = trimmed.strip_suffix('.').unwrap_or(trimmed).to_string();

    if candidate.starts_with('.') {
        candidate.insert(0, '0');
    }

    let value = Decimal::from_str(&candidate)
        .map_err(|_| ValidationError::invalid_amount(trimmed))?;

    if value <= Decimal::ZERO {
        return Err(ValidationError::invalid_amount(trimmed));
    }

    Ok(value)
}

/// Applies the transaction sign: expenses are stored negative, income positive.
pub fn normalize(magnitude: Decimal, is_expense: bool) -> Decimal {
    let magnitude = magnitude.abs();

    if is_expense { -magnitude } else { magnitude }
}
