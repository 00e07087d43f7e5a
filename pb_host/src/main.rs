//! Bingo host server.
//!
//! Spawns the host actor that owns the game session and the call ticker,
//! then serves the WebSocket endpoint controllers connect through.

mod api;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Error;
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use party_bingo::{GameSettings, HostActor, HostConfig};

const HELP: &str = "\
Run a bingo game host

USAGE:
  pb_host [OPTIONS]

OPTIONS:
  --bind              IP:PORT  Server socket bind address   [default: env SERVER_BIND or 127.0.0.1:6969]
  --min-players       N        Named players needed to start [default: env MIN_PLAYERS or 2]
  --call-interval-ms  MS       Delay between number calls    [default: env CALL_INTERVAL_MS or 5000]

FLAGS:
  --fast                       Divide the call interval by 10 (test acceleration)
  --autoplay                   Tell controllers to mark their own cards
  --no-replenish               Refuse joins once the 15-card pool is spent
  -h, --help                   Print help information

ENVIRONMENT:
  SERVER_BIND                  Server bind address (e.g., 0.0.0.0:8080)
  MIN_PLAYERS                  Named players needed to start
  CALL_INTERVAL_MS             Delay between number calls in milliseconds
  (See .env file for all configuration options)
";

struct Args {
    bind: SocketAddr,
    config: HostConfig,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let fast_mode = pargs.contains("--fast")
        || std::env::var("FAST_MODE").is_ok_and(|v| v == "1" || v == "true");
    let autoplay = pargs.contains("--autoplay")
        || std::env::var("AUTOPLAY").is_ok_and(|v| v == "1" || v == "true");
    let replenish_cards = !pargs.contains("--no-replenish");

    let args = Args {
        bind: pargs.value_from_str("--bind").unwrap_or_else(|_| {
            std::env::var("SERVER_BIND")
                .unwrap_or_else(|_| "127.0.0.1:6969".to_string())
                .parse()
                .expect("Invalid SERVER_BIND address")
        }),
        config: HostConfig {
            game: GameSettings {
                min_players: pargs.value_from_str("--min-players").unwrap_or_else(|_| {
                    std::env::var("MIN_PLAYERS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(2)
                }),
                replenish_cards,
                autoplay,
            },
            call_interval: Duration::from_millis(
                pargs
                    .value_from_str("--call-interval-ms")
                    .unwrap_or_else(|_| {
                        std::env::var("CALL_INTERVAL_MS")
                            .ok()
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(5000)
                    }),
            ),
            fast_mode,
        },
    };

    args.config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();
    info!("Starting bingo host at {}", args.bind);
    info!(
        "Game: {} players to start, one call every {:?}{}{}",
        args.config.game.min_players,
        args.config.tick_interval(),
        if args.config.fast_mode {
            " (fast mode)"
        } else {
            ""
        },
        if args.config.game.autoplay {
            ", autoplay"
        } else {
            ""
        },
    );

    let (actor, handle) = HostActor::new(args.config);
    tokio::spawn(actor.run());

    let state = api::AppState { host: handle };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", args.bind, e))?;

    info!(
        "Host is running at http://{}. Press Ctrl+C to stop.",
        args.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down host...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
