use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::server::{
    error::AppError,
    middleware::auth::AuthGuard,
    model::user::User,
    service::realtime::RealtimeHub,
    state::AppState,
};

#[derive(Deserialize)]
pub struct SocketParams {
    pub token: Option<String>,
}

/// Open the real-time notification stream.
///
/// Browsers cannot set headers on WebSocket requests, so the bearer token is passed as
/// the `token` query parameter. Frames are JSON objects `{"event": ..., "data": ...}`.
///
/// # Returns
/// - `101 Switching Protocols` - Stream opened
/// - `401 Unauthorized` - Missing or invalid token
/// - `403 Forbidden` - Account deactivated
pub async fn socket(
    State(state): State<AppState>,
    Query(params): Query<SocketParams>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::with_token(&state.db, &state.tokens, params.token.as_deref())
        .require(&[])
        .await?;

    let realtime = state.realtime.clone();

    Ok(ws.on_upgrade(move |socket| stream_events(socket, user, realtime)))
}

async fn stream_events(mut socket: WebSocket, user: User, realtime: RealtimeHub) {
    let mut events = realtime.subscribe();

    tracing::debug!(user_id = user.id, "Realtime connection opened");

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Ping(payload))) => {
                        if socket.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if !event.is_for(user.id, user.role) {
                            continue;
                        }
                        let frame = match event.to_frame() {
                            Ok(frame) => frame,
                            Err(e) => {
                                tracing::warn!("Failed to serialize realtime event: {}", e);
                                continue;
                            }
                        };
                        if socket.send(Message::Text(frame.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(user_id = user.id, skipped, "Realtime connection lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!(user_id = user.id, "Realtime connection closed");
}
