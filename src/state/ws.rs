//! WebSocket stream of state change events.
//!
//! Push-only: clients get a full `sync` on connect, then every change event
//! as it happens. Mutations go through the REST surface.

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use tracing::{debug, info, warn};

use super::container::StateContainer;
use super::model::StateEvent;

/// Build the WebSocket route.
pub fn ws_routes(container: Arc<StateContainer>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(container)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(container): State<Arc<StateContainer>>,
) -> impl IntoResponse {
    info!("WebSocket client connecting");
    ws.on_upgrade(|socket| handle_socket(socket, container))
}

async fn handle_socket(mut socket: WebSocket, container: Arc<StateContainer>) {
    info!("WebSocket client connected");

    // Subscribe before snapshotting so no change can fall between the two.
    let mut rx = container.subscribe();

    if !send_sync(&mut socket, &container).await {
        warn!("Failed to send initial sync, client disconnected");
        return;
    }

    loop {
        tokio::select! {
            // Forward broadcast events to this client
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if let Ok(json) = serde_json::to_string(&event) {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                debug!("Client disconnected during send");
                                break;
                            }
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        warn!(missed = n, "WS client lagged behind broadcast");
                        // The missed events are gone; a fresh snapshot covers them.
                        if !send_sync(&mut socket, &container).await {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }

            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket client disconnected");
                        break;
                    }
                    Some(Ok(Message::Text(text))) => {
                        debug!(text = %text, "Ignoring inbound WS message");
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    info!("WebSocket connection closed");
}

/// Send a full-state sync event. Returns false if the client is gone.
async fn send_sync(socket: &mut WebSocket, container: &StateContainer) -> bool {
    let sync = StateEvent::Sync {
        session: container.snapshot().await,
    };
    match serde_json::to_string(&sync) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(_) => true,
    }
}
