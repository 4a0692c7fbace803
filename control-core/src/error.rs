use thiserror::Error;

/// Errors raised while bringing the control plane up.
///
/// The store itself never fails. These cover configuration and process setup.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Failed to read or deserialize the layered configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// An id scheme name that no generator implements.
    #[error("Unknown id scheme '{0}', expected 'sequential' or 'uuid'")]
    InvalidIdScheme(String),

    /// Global logger was already installed.
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// A specialized Result type for control plane setup.
pub type Result<T> = std::result::Result<T, DashboardError>;
