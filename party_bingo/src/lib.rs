//! # Party Bingo
//!
//! A networked multi-player bingo engine: one host runs the game loop and
//! any number of controller clients track their own cards and submit
//! claims.
//!
//! The crate is transport-agnostic. The host side is an actor
//! ([`HostActor`]) that owns the authoritative [`GameSession`] and drives
//! the call ticker; a transport layer feeds it [`HostCommand`]s and
//! forwards the [`Message`] frames it emits. The controller side
//! ([`Controller`]) consumes the same frames and mirrors the host's win
//! detection through the shared line check, so an armed claim always
//! survives host-side validation.
//!
//! ## Core modules
//!
//! - [`game`]: cards, calls, lines, and the session state machine
//! - [`net`]: the integer-tagged wire envelope
//! - [`host`]: the host actor and its configuration
//! - [`controller`]: controller-local game logic
//!
//! ## Example
//!
//! ```
//! use party_bingo::{GameSession, GameSettings};
//!
//! // A session waiting on players.
//! let session = GameSession::new(GameSettings::default());
//! ```

/// Controller-local game logic.
pub mod controller;
pub use controller::Controller;

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    calls::{Call, CallSequence, column_of},
    cards::{Card, CardNumber, CardPool},
    constants,
    session::{
        ClaimOutcome, DisplayName, GameError, GamePhase, GameSession, GameSettings, PlayerId,
        SessionEvent,
    },
};

/// The host actor and its configuration.
pub mod host;
pub use host::{HostActor, HostCommand, HostConfig, HostHandle};

/// Wire protocol between host and controllers.
pub mod net;
pub use net::messages::{Message, MessageError};
