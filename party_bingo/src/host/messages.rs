//! Host actor command types.

use tokio::sync::{mpsc, oneshot};

use crate::game::session::{ClaimOutcome, GameError, PlayerId};
use crate::net::messages::Message;

/// Commands the transport layer sends to the host actor.
#[derive(Debug)]
pub enum HostCommand {
    /// A controller connected. On success the actor registers the
    /// subscriber channel and pushes the card assignment (and, for a
    /// late joiner, the current game state) through it.
    Connect {
        player: PlayerId,
        subscriber: mpsc::Sender<Message>,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// A controller went away; stop broadcasting to it. The player stays
    /// on the roster with their card.
    Disconnect { player: PlayerId },

    /// Register or update the controller's display name.
    SetName {
        player: PlayerId,
        name: String,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// A bingo claim to arbitrate.
    ClaimBingo {
        player: PlayerId,
        response: oneshot::Sender<Result<ClaimOutcome, GameError>>,
    },

    /// Stop the actor loop.
    Shutdown,
}
