use thiserror::Error;

/// Why a report fetch produced no payload.
///
/// Never propagated past the fetcher: it becomes the Error state's message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP error: {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Text for the error state; `fallback` covers errors without a
    /// specific message
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FetchError::Network(msg) if !msg.trim().is_empty() => msg.clone(),
            FetchError::Status {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            FetchError::Status { status, .. } => format!("{} (HTTP {})", fallback, status),
            FetchError::Parse(msg) if !msg.trim().is_empty() => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Failed to load advertising overview data";

    #[test]
    fn test_error_without_message_uses_fallback() {
        assert_eq!(FetchError::Network(String::new()).user_message(FALLBACK), FALLBACK);
        assert_eq!(FetchError::Parse("  ".into()).user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn test_specific_messages_win() {
        assert_eq!(
            FetchError::Network("connection refused".into()).user_message(FALLBACK),
            "connection refused"
        );
        assert_eq!(
            FetchError::Status {
                status: 403,
                message: Some("Dealership access denied".into())
            }
            .user_message(FALLBACK),
            "Dealership access denied"
        );
        assert_eq!(
            FetchError::Status { status: 500, message: None }.user_message(FALLBACK),
            "Failed to load advertising overview data (HTTP 500)"
        );
        assert_eq!(
            FetchError::Parse("expected value".into()).user_message(FALLBACK),
            "Failed to parse response: expected value"
        );
    }
}
