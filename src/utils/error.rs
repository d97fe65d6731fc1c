use thiserror::Error;

use crate::modbus::transform::Transform;

#[derive(Error, Debug)]
pub enum MeterError {
    #[error("Decode error: {transform} expects {expected} bytes, got {actual}")]
    DecodeError {
        transform: Transform,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported device model: {0}")]
    UnsupportedModel(String),

    #[error("Device model already registered: {0}")]
    DuplicateModel(String),

    #[error("Unknown measurement: {0}")]
    UnknownMeasurement(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MeterError {
    /// True for errors caused by a misbuilt or misconfigured system.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MeterError::UnsupportedModel(_)
                | MeterError::DuplicateModel(_)
                | MeterError::UnknownMeasurement(_)
                | MeterError::ConfigError(_)
        )
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self, MeterError::DecodeError { .. })
    }
}

impl From<serde_json::Error> for MeterError {
    fn from(err: serde_json::Error) -> Self {
        MeterError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for MeterError {
    fn from(err: toml::de::Error) -> Self {
        MeterError::ConfigError(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for MeterError {
    fn from(err: toml::ser::Error) -> Self {
        MeterError::SerializationError(format!("TOML error: {}", err))
    }
}

impl From<std::io::Error> for MeterError {
    fn from(err: std::io::Error) -> Self {
        MeterError::ConfigError(format!("IO error: {}", err))
    }
}
