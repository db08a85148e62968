//! Notification hub WebSocket.
//!
//! Browsers cannot set headers on a WebSocket handshake, so the access
//! token travels in the `access_token` query parameter.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use filestore_auth::Claims;
use filestore_core::error::AppError;
use filestore_realtime::NotificationHub;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters of the hub handshake.
#[derive(Debug, serde::Deserialize)]
pub struct HubQuery {
    /// JWT access token.
    pub access_token: Option<String>,
}

/// GET /hubs/notifications?access_token={jwt}
pub async fn notifications_hub(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<HubQuery>,
) -> Result<Response, ApiError> {
    let token = query
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing access token"))?;

    // Authenticate before upgrade
    let claims = state.jwt_decoder.decode_access_token(&token)?;

    Ok(ws.on_upgrade(move |socket| handle_hub_connection(state, claims, socket)))
}

/// Streams the user's notifications until either side closes.
async fn handle_hub_connection(state: AppState, claims: Claims, socket: WebSocket) {
    let user_id = claims.user_id();
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut notifications = state.notification_hub.subscribe(user_id);

    info!(
        %user_id,
        group = %NotificationHub::group_name(user_id),
        "Notification socket connected"
    );

    let outbound_task = tokio::spawn(async move {
        loop {
            let message = match notifications.recv().await {
                Ok(message) => message,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%user_id, skipped, "Notification receiver lagged");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let text = match message.to_json() {
                Ok(text) => text,
                Err(e) => {
                    warn!(%user_id, error = %e, "Dropping unserializable notification");
                    continue;
                }
            };

            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Clients only listen; inbound frames are drained until close.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(%user_id, error = %e, "Notification socket error");
                break;
            }
        }
    }

    outbound_task.abort();
    let _ = outbound_task.await;
    state.notification_hub.release(user_id);

    info!(%user_id, "Notification socket closed");
}
