use thiserror::Error;

use crate::FetchError;

/// Errors surfaced by [`BymaClient`](crate::BymaClient).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The symbol is absent from every collection that was searched.
    #[error("{entity} '{symbol}' not found")]
    NotFound { entity: &'static str, symbol: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("inconsistent series: column lengths differ ({0})")]
    InconsistentSeries(String),
}

impl ClientError {
    pub fn not_found(entity: &'static str, symbol: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            symbol: symbol.into(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub const fn as_fetch(&self) -> Option<&FetchError> {
        match self {
            Self::Fetch(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_display_transparently() {
        let error = ClientError::from(FetchError::unavailable("bymadata is down"));
        assert_eq!(error.to_string(), "bymadata is down (fetch.unavailable)");
        assert!(error.as_fetch().is_some());
        assert!(!error.is_not_found());
    }

    #[test]
    fn not_found_names_entity_and_symbol() {
        let error = ClientError::not_found("security", "ZZZ");
        assert_eq!(error.to_string(), "security 'ZZZ' not found");
        assert!(error.is_not_found());
    }
}
