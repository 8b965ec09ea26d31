use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: not a valid number: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: must not be negative, got {value}")]
    OutOfRange { var: &'static str, value: i64 },
}
