use thiserror::Error;

/// Failure of a single search. Every variant ends the search in the error panel;
/// none of them poisons the controller.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("City \"{city}\" not found. Please check the spelling and try again.")]
    NotFound { city: String },

    #[error("{service} service unavailable: {reason}")]
    ServiceUnavailable {
        service: &'static str,
        reason: String,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SearchError {
    pub fn not_found(city: impl Into<String>) -> Self {
        Self::NotFound { city: city.into() }
    }

    pub fn unavailable(service: &'static str, reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service,
            reason: reason.into(),
        }
    }

    pub fn unexpected(message: impl std::fmt::Display) -> Self {
        Self::Unexpected(message.to_string())
    }

    /// Failures a user can cause or wait out. Only `Unexpected` points at a bug
    /// or a changed provider contract.
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}
