#![forbid(unsafe_code)]

use poem_openapi::Object;
use thiserror::Error;

/// Error enumerates the errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("twosum_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Unusable logger configuration.
    #[error("Unable to initialize Log4rs using: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),

    #[error("Invalid configuration: {}", .0)]
    InvalidConfig(String),

    /// The request body could not be read as a pair-sum query.
    #[error("Malformed input: {}", .0)]
    MalformedInput(String),

    /// Fewer than two numbers were supplied.
    #[error("Array must have at least 2 numbers (received {})", .0)]
    InsufficientInput(usize),
}

// ---------------------------------------------------------------------------
// HttpResult:
// ---------------------------------------------------------------------------
/// The body returned with every non-2xx response.
#[derive(Object, Debug)]
pub struct HttpResult {
    pub result_code: String,
    pub result_msg: String,
}

impl HttpResult {
    pub fn new(result_code: String, result_msg: String) -> Self {
        Self {result_code, result_msg}
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::Errors;

    #[test]
    fn insufficient_input_message() {
        let msg = Errors::InsufficientInput(1).to_string();
        assert!(msg.starts_with("Array must have at least 2 numbers"));
        assert!(msg.contains("received 1"));
    }

    #[test]
    fn malformed_input_message() {
        let msg = Errors::MalformedInput("missing required field 'nums'".to_string()).to_string();
        assert_eq!(msg, "Malformed input: missing required field 'nums'");
    }
}
