//! WebSocket handler bridging controllers to the host actor.
//!
//! One socket is one player. On connect the handler registers the player
//! with the host actor, which assigns a card and answers with the
//! card-assignment frame through the player's subscriber channel. From
//! then on, two flows run until disconnect:
//!
//! - outbound: frames from the actor (card assignment, number calls,
//!   game-state broadcasts) are serialized onto the socket in order
//! - inbound: SET_NAME and BINGO frames from the controller become host
//!   actor commands
//!
//! On disconnect the player is unsubscribed; their card stays assigned so
//! a reconnect gets the same card back.

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message as WsMessage, WebSocket, WebSocketUpgrade, close_code},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use party_bingo::{ClaimOutcome, HostCommand, Message, PlayerId};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use super::AppState;

/// Upgrade the HTTP connection to a controller WebSocket.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established controller connection.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let player: PlayerId = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();

    info!("controller connected: player={player}");

    // Register with the host actor; the subscriber channel carries every
    // frame destined for this player, starting with the card assignment.
    let (subscriber, mut frames) = mpsc::channel::<Message>(64);
    let (tx, rx) = oneshot::channel();
    if state
        .host
        .send(HostCommand::Connect {
            player,
            subscriber,
            response: tx,
        })
        .await
        .is_err()
    {
        error!("host actor is gone, dropping connection for {player}");
        return;
    }

    match rx.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            // No card for this player (game over or pool spent); refuse
            // the connection with a reason instead of leaving it idle.
            info!("refusing controller {player}: {e}");
            let _ = sender
                .send(WsMessage::Close(Some(CloseFrame {
                    code: close_code::POLICY,
                    reason: e.to_string().into(),
                })))
                .await;
            return;
        }
        Err(_) => {
            error!("host actor dropped the join response for {player}");
            return;
        }
    }

    // Forward actor frames onto the socket.
    let send_task = tokio::spawn(async move {
        while let Some(frame) = frames.recv().await {
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    error!("failed to serialize frame: {e}");
                    continue;
                }
            };
            if sender.send(WsMessage::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Process controller frames.
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(WsMessage::Text(text)) => match serde_json::from_str::<Message>(&text) {
                Ok(message) => handle_controller_message(message, player, &state).await,
                Err(e) => {
                    warn!("unparseable frame from {player}: {e}");
                }
            },
            Ok(WsMessage::Close(_)) => {
                debug!("controller closed: player={player}");
                break;
            }
            Err(e) => {
                warn!("socket error for {player}: {e}");
                break;
            }
            _ => {}
        }
    }

    // Cleanup: stop broadcasting to this player. The card stays assigned.
    send_task.abort();
    let _ = state.host.send(HostCommand::Disconnect { player }).await;
    info!("controller disconnected: player={player}");
}

/// Translate one controller frame into a host actor command.
async fn handle_controller_message(message: Message, player: PlayerId, state: &AppState) {
    match message {
        Message::SetName { name } => {
            let (tx, rx) = oneshot::channel();
            if state
                .host
                .send(HostCommand::SetName {
                    player,
                    name,
                    response: tx,
                })
                .await
                .is_err()
            {
                return;
            }
            match rx.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("name registration from {player} failed: {e}"),
                Err(_) => warn!("host dropped the name response for {player}"),
            }
        }

        Message::Bingo => {
            let (tx, rx) = oneshot::channel();
            if state
                .host
                .send(HostCommand::ClaimBingo {
                    player,
                    response: tx,
                })
                .await
                .is_err()
            {
                return;
            }
            match rx.await {
                Ok(Ok(ClaimOutcome::Won { winner_label })) => {
                    info!("{winner_label} won the game");
                }
                Ok(Ok(ClaimOutcome::Ignored)) => {
                    debug!("ignored out-of-phase claim from {player}");
                }
                Ok(Err(e)) => warn!("claim from {player} rejected: {e}"),
                Err(_) => warn!("host dropped the claim response for {player}"),
            }
        }

        // Host-to-controller types have no business arriving here.
        other => {
            warn!("unexpected frame from {player}: {other}");
        }
    }
}
