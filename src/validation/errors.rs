use thiserror::Error;

/// Why a draft could not become a creation request. Nothing is sent when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a transaction title")]
    MissingTitle,
    #[error("Please enter a transaction amount")]
    MissingAmount,
    #[error("Please enter a valid amount, [{value}] is not a positive number")]
    InvalidAmount {
        value: String
    },
    #[error("Please select a category")]
    MissingCategory,
    #[error("Unknown category [{label}]")]
    InvalidCategory {
        label: String
    }
}

impl ValidationError {
    pub fn invalid_amount(value: &str) -> Self {
        Self::InvalidAmount { value: value.to_string() }
    }

    pub fn invalid_category(label: &str) -> Self {
        Self::InvalidCategory { label: label.to_string() }
    }
}
