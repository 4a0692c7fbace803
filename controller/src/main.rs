mod client;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::DashboardClient;
use control::{ControlSnapshot, NotificationDraft, NotificationKind, Role, User};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "controller")]
#[command(about = "CLI Controller for the Trading Dashboard control plane")]
struct Cli {
    /// Base URL of the dashboard backend
    #[arg(long, global = true, default_value = "http://127.0.0.1:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show run state, current user and notifications
    Status,
    /// Start the trading system (also clears a latched emergency stop)
    Start,
    /// Stop the trading system
    Stop,
    /// Latch the emergency stop
    EmergencyStop,
    /// Record the logged-in user
    Login {
        #[arg(long)]
        id: String,
        #[arg(long)]
        username: String,
        /// trader, analyst, risk_manager or admin
        #[arg(long)]
        role: Role,
        #[arg(long)]
        email: String,
    },
    /// Clear the current user
    Logout,
    /// Post a notification to the feed
    Notify {
        /// info, warning, error or success
        #[arg(short, long, default_value = "info")]
        kind: NotificationKind,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        message: String,
    },
    /// List notifications, newest first
    Notifications,
    /// Mark a notification as read
    Read {
        /// Notification ID
        id: String,
    },
    /// Remove all notifications
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = DashboardClient::new(&cli.url)?;

    let response = match cli.command {
        Commands::Status => {
            let response = client.state().await?;
            let snapshot: ControlSnapshot = serde_json::from_value(response["state"].clone())
                .context("Unexpected state payload")?;
            println!("{}", format_status(&snapshot));
            response
        }
        Commands::Start => client.set_running(true).await?,
        Commands::Stop => client.set_running(false).await?,
        Commands::EmergencyStop => client.emergency_stop().await?,
        Commands::Login {
            id,
            username,
            role,
            email,
        } => client.login(&User::new(id, username, role, email)).await?,
        Commands::Logout => client.logout().await?,
        Commands::Notify {
            kind,
            title,
            message,
        } => {
            client
                .notify(&NotificationDraft::new(kind, title, message))
                .await?
        }
        Commands::Notifications => client.notifications().await?,
        Commands::Read { id } => client.mark_read(&id).await?,
        Commands::Clear => client.clear().await?,
    };

    print_response(&response)
}

fn print_response(resp: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(resp)?);
    Ok(())
}

fn format_status(snapshot: &ControlSnapshot) -> String {
    let run_state = snapshot
        .run_state()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Inconsistent".to_string());
    let user = snapshot
        .current_user
        .as_ref()
        .map(|u| format!("{} ({})", u.username(), u.role()))
        .unwrap_or_else(|| "-".to_string());

    let mut out = format!("{:<16} | {:<24} | {:<6}\n", "RUN STATE", "USER", "UNREAD");
    out.push_str(&format!("{:-<16}-+-{:-<24}-+-{:-<6}\n", "", "", ""));
    out.push_str(&format!(
        "{:<16} | {:<24} | {:<6}",
        run_state,
        user,
        snapshot.unread_count()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from([
            "controller",
            "login",
            "--id",
            "u-1",
            "--username",
            "alice",
            "--role",
            "risk_manager",
            "--email",
            "a@desk.io",
        ])
        .unwrap();

        match cli.command {
            Commands::Login { role, .. } => assert_eq!(role, Role::RiskManager),
            _ => panic!("expected login"),
        }
        assert_eq!(cli.url, "http://127.0.0.1:3000");
    }

    #[test]
    fn test_parse_notify_defaults_to_info() {
        let cli =
            Cli::try_parse_from(["controller", "notify", "-t", "Deploy", "-m", "done"]).unwrap();
        match cli.command {
            Commands::Notify { kind, title, .. } => {
                assert_eq!(kind, NotificationKind::Info);
                assert_eq!(title, "Deploy");
            }
            _ => panic!("expected notify"),
        }
    }

    #[test]
    fn test_rejects_unknown_role() {
        let res = Cli::try_parse_from([
            "controller",
            "login",
            "--id",
            "1",
            "--username",
            "x",
            "--role",
            "god",
            "--email",
            "e",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_global_url_flag_after_subcommand() {
        let cli = Cli::try_parse_from([
            "controller",
            "emergency-stop",
            "--url",
            "http://10.0.0.5:3000",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::EmergencyStop));
        assert_eq!(cli.url, "http://10.0.0.5:3000");
    }

    #[test]
    fn test_format_status_summary() {
        let mut snapshot = ControlSnapshot {
            emergency_stop: true,
            current_user: Some(User::new("u-1", "alice", Role::RiskManager, "a@desk.io")),
            ..Default::default()
        };
        let out = format_status(&snapshot);
        let row = out.lines().last().unwrap();
        assert!(row.starts_with("EmergencyHalted"));
        assert!(row.contains("alice (risk_manager)"));
        assert!(row.trim_end().ends_with('0'));

        snapshot.is_system_running = true;
        assert!(format_status(&snapshot).contains("Inconsistent"));
    }
}
