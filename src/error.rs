//! Failures of the out-of-process collaborators (evaluator, analysis)
//!
//! Core editing never fails; these only describe what went wrong talking to
//! the services a formula is handed to.

/// Categorized failure of an evaluation or analysis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No response within the configured timeout
    Timeout,
    /// Host unreachable, DNS or TLS failure
    Network(String),
    /// Credentials rejected (HTTP 401/403)
    Authentication,
    /// Response did not have the expected shape
    MalformedResponse(String),
    /// The evaluator rejected the expression
    Evaluation(String),
}

impl ServiceError {
    /// Classify a transport failure by status code and message text
    pub fn classify(code: Option<u16>, message: &str) -> Self {
        if matches!(code, Some(401) | Some(403)) {
            return Self::Authentication;
        }

        let lower = message.to_lowercase();
        if lower.contains("timeout") || lower.contains("timed out") {
            Self::Timeout
        } else if lower.contains("host")
            || lower.contains("dns")
            || lower.contains("resolve")
            || lower.contains("ssl")
            || lower.contains("certificate")
        {
            Self::Network(message.to_string())
        } else if let Some(code) = code {
            Self::Network(format!("HTTP {}: {}", code, message))
        } else {
            Self::Network(message.to_string())
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout => "The request timed out. Try again in a moment.".to_string(),
            Self::Network(detail) => format!("Network unavailable: {}", detail),
            Self::Authentication => "The service rejected our credentials.".to_string(),
            Self::MalformedResponse(_) => "The service returned an unreadable answer.".to_string(),
            Self::Evaluation(detail) => format!("Cannot evaluate: {}", detail),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Network(detail) => write!(f, "network error: {}", detail),
            Self::Authentication => write!(f, "authentication failed"),
            Self::MalformedResponse(detail) => write!(f, "malformed response: {}", detail),
            Self::Evaluation(detail) => write!(f, "evaluation failed: {}", detail),
        }
    }
}

impl std::error::Error for ServiceError {}
