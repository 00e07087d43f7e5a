//! Host actor with async message handling.
//!
//! The actor owns the [`GameSession`] and is its only writer. Transport
//! handlers talk to it through a [`HostHandle`]; the call ticker lives
//! inside the actor's own select loop. Commands run to completion between
//! ticks, so session mutation is fully serialized and no number call can
//! ever fire after the game is over.

use std::collections::HashMap;

use log::{debug, info, warn};
use tokio::{
    sync::mpsc,
    time::interval,
};

use super::{config::HostConfig, messages::HostCommand};
use crate::game::session::{DisplayName, GamePhase, GameSession, PlayerId, SessionEvent};
use crate::net::messages::Message;

/// Handle for sending commands to the host actor.
#[derive(Clone, Debug)]
pub struct HostHandle {
    sender: mpsc::Sender<HostCommand>,
}

impl HostHandle {
    /// Send a command to the host.
    pub async fn send(&self, command: HostCommand) -> Result<(), String> {
        self.sender
            .send(command)
            .await
            .map_err(|_| "host is closed".to_string())
    }
}

/// The actor driving one hosted game.
pub struct HostActor {
    config: HostConfig,
    session: GameSession,
    inbox: mpsc::Receiver<HostCommand>,
    subscribers: HashMap<PlayerId, mpsc::Sender<Message>>,
}

impl HostActor {
    #[must_use]
    pub fn new(config: HostConfig) -> (Self, HostHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let session = GameSession::new(config.game.clone());
        let actor = Self {
            config,
            session,
            inbox,
            subscribers: HashMap::new(),
        };
        (actor, HostHandle { sender })
    }

    /// Run the actor event loop until shutdown or until every handle is
    /// dropped.
    pub async fn run(mut self) {
        info!(
            "host starting, calling a number every {:?}",
            self.config.tick_interval()
        );
        let mut ticker = interval(self.config.tick_interval());

        loop {
            tokio::select! {
                command = self.inbox.recv() => {
                    match command {
                        Some(command) => {
                            if self.handle_command(command).await {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        info!("host stopped");
    }

    /// Handle one command. Returns true when the actor should stop.
    async fn handle_command(&mut self, command: HostCommand) -> bool {
        match command {
            HostCommand::Connect {
                player,
                subscriber,
                response,
            } => {
                match self.session.join(player) {
                    Ok(card) => {
                        self.subscribers.insert(player, subscriber);
                        let _ = response.send(Ok(()));
                        self.send_to(
                            player,
                            Message::CardAssignment {
                                numbers: *card.numbers(),
                            },
                        )
                        .await;
                        // Late joiners missed the start broadcast.
                        let phase = self.session.phase();
                        if phase != GamePhase::Waiting {
                            self.send_to(
                                player,
                                Message::SetGameState {
                                    state: phase,
                                    autoplay: Some(self.session.settings().autoplay),
                                },
                            )
                            .await;
                        }
                    }
                    Err(e) => {
                        warn!("rejecting join from {player}: {e}");
                        let _ = response.send(Err(e));
                    }
                }
            }

            HostCommand::Disconnect { player } => {
                if self.subscribers.remove(&player).is_some() {
                    debug!("player {player} disconnected");
                }
            }

            HostCommand::SetName {
                player,
                name,
                response,
            } => {
                let result = self.session.set_name(player, DisplayName::new(&name));
                let _ = response.send(result);
            }

            HostCommand::ClaimBingo { player, response } => {
                let result = self.session.claim_bingo(player);
                let _ = response.send(result);
            }

            HostCommand::Shutdown => {
                return true;
            }
        }

        self.flush_events().await;
        false
    }

    /// Advance the call sequence on the ticker. The phase guard plus the
    /// serialized loop guarantee nothing is called after the game ends.
    async fn tick(&mut self) {
        if self.session.phase() != GamePhase::Playing {
            return;
        }
        self.session.next_call();
        self.flush_events().await;
    }

    /// Turn queued session events into broadcast frames.
    async fn flush_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::GameStarted { autoplay } => {
                    self.broadcast(Message::SetGameState {
                        state: GamePhase::Playing,
                        autoplay: Some(autoplay),
                    })
                    .await;
                }
                SessionEvent::NumberCalled(call) => {
                    info!("calling {call}");
                    self.broadcast(Message::NumberCall {
                        number: call.number,
                    })
                    .await;
                }
                SessionEvent::CallsExhausted => {
                    // Already logged by the session; nothing to broadcast.
                }
                SessionEvent::GameOver { winner_label, .. } => {
                    info!("congratulations {winner_label}");
                    self.broadcast(Message::SetGameState {
                        state: GamePhase::Over,
                        autoplay: None,
                    })
                    .await;
                }
            }
        }
    }

    /// Push a frame to a single subscriber.
    async fn send_to(&mut self, player: PlayerId, message: Message) {
        let Some(sender) = self.subscribers.get(&player) else {
            return;
        };
        if sender.send(message).await.is_err() {
            debug!("subscriber {player} closed, removing");
            self.subscribers.remove(&player);
        }
    }

    /// Fan a frame out to every subscriber, pruning the dead ones.
    async fn broadcast(&mut self, message: Message) {
        self.subscribers.retain(|player, sender| {
            match sender.try_send(message.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!("subscriber {player} channel full, dropping frame");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!("subscriber {player} disconnected, removing");
                    false
                }
            }
        });
    }
}
