//! WebSocket connection handlers.
//!
//! Each socket gets a fresh connection id. Inbound frames are decoded and handed to the
//! relay hub; outbound frames arrive on the connection's channel and are pushed to the
//! socket by `pusher_loop`. Whatever ends the session, the hub hears about it exactly once.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, InboundMessage},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::RelayHandle,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Sends CLOSE to the hub when the session is torn down
///
/// Held by `handle_socket`, so normal close, transport errors and task
/// cancellation all end in exactly one close event.
struct ConnectionGuard {
    relay: RelayHandle,
    connection_id: ConnectionId,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.relay.close(self.connection_id);
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for messages addressed to this connection
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Decode one text frame into a relay message
///
/// Anything that does not decode or fails validation is dropped with a warning.
pub(crate) fn decode(connection_id: ConnectionId, text: &str) -> Option<InboundMessage> {
    let dto = match serde_json::from_str::<ClientMessage>(text) {
        Ok(dto) => dto,
        Err(e) => {
            tracing::warn!("Dropping undecodable frame from '{}': {}", connection_id, e);
            return None;
        }
    };

    match InboundMessage::try_from(dto) {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::warn!("Dropping invalid message from '{}': {}", connection_id, e);
            None
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    state.relay.open(connection_id, tx);
    let _guard = ConnectionGuard {
        relay: state.relay.clone(),
        connection_id,
    };

    let (sender, mut receiver) = socket.split();
    let relay = state.relay.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", connection_id, text.as_str());
                    if let Some(message) = decode(connection_id, text.as_str()) {
                        relay.dispatch(connection_id, message);
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to push relayed messages to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };
}
