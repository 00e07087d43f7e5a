//! Bingo controller client.
//!
//! Connects to a bingo host over WebSocket, registers a display name, and
//! plays one card: marking cells against the recent-call window, arming
//! the claim once a line completes, and submitting it. With `--autoplay`
//! the controller marks its own card and claims automatically, which is
//! how automated end-to-end runs exercise a whole game.

mod game_client;

use anyhow::Error;
use pico_args::Arguments;

use game_client::GameClient;

const HELP: &str = "\
Connect to a bingo host and play a card

USAGE:
  pb_controller [OPTIONS]

OPTIONS:
  --url    URL     Host WebSocket address  [default: env BINGO_URL or ws://127.0.0.1:6969/ws]
  --name   NAME    Display name            [default: your login name]

FLAGS:
  --autoplay       Mark cells and claim without input
  -h, --help       Print help information

COMMANDS (while playing):
  mark <row> <col>   Place a token (0-indexed)
  card               Show your card and tokens
  calls              Show the markable numbers
  bingo              Submit your claim
  quit               Disconnect
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let autoplay = pargs.contains("--autoplay");
    let url: String = pargs.value_from_str("--url").unwrap_or_else(|_| {
        std::env::var("BINGO_URL").unwrap_or_else(|_| "ws://127.0.0.1:6969/ws".to_string())
    });
    let name: String = pargs
        .value_from_str("--name")
        .unwrap_or_else(|_| whoami::username());

    let client = GameClient::new(url, name, autoplay);
    client.connect_and_play().await
}
