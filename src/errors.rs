use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Value out of range for {field}: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error("Unknown mode for {field}: {value:?}")]
    UnknownMode { field: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] serde_json::Error),
}
