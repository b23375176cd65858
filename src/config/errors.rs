use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value [{value}] for [{key}]: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String
    }
}

impl ConfigError {
    pub fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.to_string()
        }
    }
}
