// ⚠️ Selector errors
//
// Loading paths return anyhow::Result with context. Selector values coming
// from UI controls or query strings are parsed into typed values and fail
// with SelectorError when malformed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    #[error("invalid year range '{0}' (expected START-END)")]
    InvalidYearRange(String),

    #[error("invalid year '{0}'")]
    InvalidYear(String),

    #[error("unknown topic '{0}'")]
    UnknownTopic(String),

    #[error("unknown table '{0}'")]
    UnknownTable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_value() {
        let err = SelectorError::InvalidYearRange("2019".to_string());
        assert!(err.to_string().contains("'2019'"));

        let err = SelectorError::UnknownTopic("ventas".to_string());
        assert_eq!(err.to_string(), "unknown topic 'ventas'");
    }
}
