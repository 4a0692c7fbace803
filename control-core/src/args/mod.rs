//! Defines the standard command-line arguments of the dashboard processes.
//!
//! Every value here is optional. When given, it overrides the same key from
//! the config file and the environment (see [`crate::config`]).

use clap::Parser;
use std::path::PathBuf;

use crate::store::ids::IdScheme;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct CommonArgs {
    /// Path to the configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind the HTTP server to
    #[arg(long)]
    bind_address: Option<String>,

    /// Port for the HTTP / WebSocket server
    #[arg(short, long)]
    port: Option<u16>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Notification id generator: sequential or uuid
    #[arg(long)]
    id_scheme: Option<IdScheme>,
}

impl CommonArgs {
    /// Parses command-line arguments into a `CommonArgs` struct.
    ///
    /// This function automatically handles `--help` and `--version` flags via `clap`.
    /// If an argument is invalid, it prints an error and exits.
    pub fn parse_args(args: Vec<String>) -> Self {
        CommonArgs::parse_from(args)
    }

    pub fn get_config_path(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    pub fn get_bind_address(&self) -> Option<&str> {
        self.bind_address.as_deref()
    }

    pub fn get_port(&self) -> Option<u16> {
        self.port
    }

    pub fn get_log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    pub fn get_id_scheme(&self) -> Option<IdScheme> {
        self.id_scheme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommonArgs {
        CommonArgs::parse_args(args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_no_flags_means_no_overrides() {
        let args = parse(&["dashboard-backend"]);
        assert!(args.get_config_path().is_none());
        assert!(args.get_port().is_none());
        assert!(args.get_id_scheme().is_none());
    }

    #[test]
    fn test_overrides_parsed() {
        let args = parse(&[
            "dashboard-backend",
            "--config",
            "conf/desk.toml",
            "--port",
            "4100",
            "--id-scheme",
            "uuid",
        ]);
        assert_eq!(args.get_config_path(), Some(&PathBuf::from("conf/desk.toml")));
        assert_eq!(args.get_port(), Some(4100));
        assert_eq!(args.get_id_scheme(), Some(IdScheme::Uuid));
    }

    #[test]
    fn test_rejects_unknown_id_scheme() {
        let res = CommonArgs::try_parse_from(["dashboard-backend", "--id-scheme", "snowflake"]);
        assert!(res.is_err());
    }
}
