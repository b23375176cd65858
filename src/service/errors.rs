use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Request to [{url}] did not complete: {message}")]
    Transport {
        url: String,
        message: String
    },
    #[error("Service responded with status [{status}]{}", detail(.message))]
    Status {
        status: u16,
        message: Option<String>
    },
    #[error("Response from [{url}] could not be decoded: {message}")]
    Decode {
        url: String,
        message: String
    }
}

impl ServiceError {
    pub fn transport(url: impl ToString, message: impl ToString) -> Self {
        Self::Transport { url: url.to_string(), message: message.to_string() }
    }

    pub fn status(status: u16, message: Option<&str>) -> Self {
        Self::Status { status, message: message.map(str::to_string) }
    }

    pub fn decode(url: impl ToString, message: impl ToString) -> Self {
        Self::Decode { url: url.to_string(), message: message.to_string() }
    }

    /// The human readable reason the service gave, if it gave one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref().filter(|message| !message.trim().is_empty()),
            _ => None
        }
    }
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new()
    }
}
