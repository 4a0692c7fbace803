use axum::extract::ws::{Message, WebSocket};
use control::ControlSnapshot;
use log::{info, warn};
use tokio::sync::broadcast::error::RecvError;

use crate::api::AppState;

/// Pushes the current snapshot, then one snapshot per store mutation, until
/// the client goes away.
pub async fn handle_socket(mut socket: WebSocket, state: AppState) {
    // Subscribe before reading the current state so no mutation falls in between
    let mut rx = state.bus.subscribe();
    let initial = state.store().snapshot();
    info!("WebSocket client connected");

    if let Err(e) = send_snapshot(&mut socket, &initial).await {
        warn!("Failed to send initial snapshot: {}", e);
        return;
    }

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Ok(snapshot) => {
                    if let Err(e) = send_snapshot(&mut socket, &snapshot).await {
                        warn!("WebSocket send failed: {}", e);
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("WebSocket client lagging, skipped {} snapshots", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // The read side only carries pings; mutations go through REST
                Some(Ok(_)) => {}
            },
        }
    }

    info!("WebSocket client disconnected");
}

async fn send_snapshot(socket: &mut WebSocket, snapshot: &ControlSnapshot) -> anyhow::Result<()> {
    let text = serde_json::to_string(snapshot)?;
    socket.send(Message::Text(text)).await?;
    Ok(())
}
