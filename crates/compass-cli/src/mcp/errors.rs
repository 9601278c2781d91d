//! Error handling utilities for the MCP server

use compass_core::CompassError;
use rmcp::ErrorData;

/// Convert a core error into an MCP error.
///
/// Caller mistakes become `invalid_params`; generation failures carry only
/// the fixed user-facing message.
pub fn to_mcp_error(error: &CompassError) -> ErrorData {
    match error {
        CompassError::InvalidInput { .. } => ErrorData::invalid_params(error.to_string(), None),
        other => ErrorData::internal_error(other.user_message(), None),
    }
}

#[cfg(test)]
mod tests {
    use compass_core::GENERATION_FAILED_MESSAGE;
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_generation_failure_keeps_detail_private() {
        let err = to_mcp_error(&CompassError::generation("unexpected EOF at line 4"));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, GENERATION_FAILED_MESSAGE);
    }

    #[test]
    fn test_invalid_input_is_invalid_params() {
        let err = to_mcp_error(&CompassError::invalid_input("name").with_reason("Name must not be empty"));
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("name"));
    }
}
