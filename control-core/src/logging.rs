use crate::error::Result;

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` takes precedence over `default_level`.
///
/// # Returns
///
/// * `Err(DashboardError::Logger)` if a logger is already installed.
pub fn init(default_level: &str) -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init()?;
    Ok(())
}
