//! WebSocket client driving the controller game logic.

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use party_bingo::{Call, Controller, GamePhase, Message};
use tokio::io::AsyncBufReadExt;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};

/// One controller session against a bingo host.
pub struct GameClient {
    url: String,
    name: String,
    autoplay: bool,
}

impl GameClient {
    pub fn new(url: String, name: String, autoplay: bool) -> Self {
        Self {
            url,
            name,
            autoplay,
        }
    }

    /// Connect to the host and run the session until the game ends or the
    /// player quits.
    pub async fn connect_and_play(self) -> Result<()> {
        println!("Connecting to {}...", self.url);

        let (ws_stream, _) = connect_async(&self.url)
            .await
            .context("Failed to connect to host")?;

        let (mut write, mut read) = ws_stream.split();

        // Register the display name right away; the game starts once
        // enough players have done so.
        send_frame(
            &mut write,
            &Message::SetName {
                name: self.name.clone(),
            },
        )
        .await?;
        println!("Connected as {}. Waiting for the game to start...\n", self.name);

        let mut controller = Controller::new();
        controller.set_autoplay(self.autoplay);

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            tokio::select! {
                incoming = read.next() => {
                    match incoming {
                        Some(Ok(WsMessage::Text(text))) => {
                            match serde_json::from_str::<Message>(&text) {
                                Ok(message) => {
                                    let game_over = self
                                        .apply_host_frame(&message, &mut controller, &mut write)
                                        .await?;
                                    if game_over {
                                        break;
                                    }
                                }
                                Err(e) => {
                                    eprintln!("Unreadable frame from host: {e}");
                                }
                            }
                        }
                        Some(Ok(WsMessage::Close(frame))) => {
                            match frame {
                                Some(frame) if !frame.reason.is_empty() => {
                                    println!("Host closed the connection: {}", frame.reason);
                                }
                                _ => println!("Host closed the connection"),
                            }
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            eprintln!("Connection error: {e}");
                            break;
                        }
                        None => break,
                    }
                }
                line = lines.next_line() => {
                    match line {
                        Ok(Some(input)) => {
                            if !self
                                .handle_command(input.trim(), &mut controller, &mut write)
                                .await?
                            {
                                break;
                            }
                        }
                        Ok(None) => break, // EOF
                        Err(e) => {
                            eprintln!("Error reading input: {e}");
                            break;
                        }
                    }
                }
            }
        }

        let _ = write.close().await;
        Ok(())
    }

    /// Apply one host frame; returns whether the game is over.
    async fn apply_host_frame<W>(
        &self,
        message: &Message,
        controller: &mut Controller,
        write: &mut W,
    ) -> Result<bool>
    where
        W: SinkExt<WsMessage> + Unpin,
        W::Error: std::error::Error + Send + Sync + 'static,
    {
        let was_ready = controller.claim_ready();
        controller.handle_message(message);

        match message {
            Message::CardAssignment { .. } => {
                println!("Your card:");
                if let Some(card) = controller.card() {
                    println!("{card}\n");
                }
            }
            Message::NumberCall { number } => {
                let call = Call { number: *number };
                println!("Called: {call}");
            }
            Message::SetGameState { state, .. } => match state {
                GamePhase::Playing => println!("The game is on!"),
                GamePhase::Over => {
                    println!("Game over.");
                    return Ok(true);
                }
                GamePhase::Waiting => {}
            },
            _ => {}
        }

        if controller.claim_ready() && !was_ready {
            println!("You have a line! Type 'bingo' to claim it.");
            if self.autoplay
                && let Some(claim) = controller.claim()
            {
                send_frame(write, &claim).await?;
                println!("(autoplay) Claim submitted.");
            }
        }

        Ok(false)
    }

    /// Execute one typed command; returns false to quit.
    async fn handle_command<W>(
        &self,
        input: &str,
        controller: &mut Controller,
        write: &mut W,
    ) -> Result<bool>
    where
        W: SinkExt<WsMessage> + Unpin,
        W::Error: std::error::Error + Send + Sync + 'static,
    {
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(true);
        }

        match parts[0].to_lowercase().as_str() {
            "mark" => {
                let coords = parts
                    .get(1)
                    .zip(parts.get(2))
                    .and_then(|(r, c)| Some((r.parse::<usize>().ok()?, c.parse::<usize>().ok()?)));
                match coords {
                    Some((row, col)) => {
                        if controller.try_mark(row, col) {
                            println!("Marked ({row}, {col})");
                        } else {
                            println!("Can't mark ({row}, {col}) - not an active call");
                        }
                    }
                    None => println!("Usage: mark <row> <col>"),
                }
            }

            "bingo" => match controller.claim() {
                Some(claim) => {
                    send_frame(write, &claim).await?;
                    println!("Claim submitted!");
                }
                None => println!("No complete line yet"),
            },

            "card" => match controller.card() {
                Some(card) => {
                    println!("{card}");
                    print_tokens(controller);
                }
                None => println!("No card assigned yet"),
            },

            "calls" => {
                let calls: Vec<String> = controller
                    .active_calls()
                    .map(|n| Call { number: n }.to_string())
                    .collect();
                if calls.is_empty() {
                    println!("Nothing has been called yet");
                } else {
                    println!("Markable: {}", calls.join(", "));
                }
            }

            "help" | "?" => {
                println!("Commands: mark <row> <col>, card, calls, bingo, quit");
            }

            "quit" | "exit" => {
                println!("Disconnecting...");
                return Ok(false);
            }

            other => {
                println!("Unknown command: '{other}'. Type 'help' for available commands.");
            }
        }

        Ok(true)
    }
}

/// Serialize and send one protocol frame.
async fn send_frame<W>(write: &mut W, message: &Message) -> Result<()>
where
    W: SinkExt<WsMessage> + Unpin,
    W::Error: std::error::Error + Send + Sync + 'static,
{
    let json = serde_json::to_string(message)?;
    write
        .send(WsMessage::Text(json.into()))
        .await
        .context("Failed to send frame")?;
    Ok(())
}

/// Show which cells hold tokens.
fn print_tokens(controller: &Controller) {
    for row in controller.tokens() {
        let line: String = row.iter().map(|&m| if m { " X" } else { " ." }).collect();
        println!("{line}");
    }
}
