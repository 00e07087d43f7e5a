//! The host/controller wire protocol.
//!
//! Every frame is a JSON object tagged with an integer `message_type`
//! field, matching the envelope the controllers already speak:
//!
//! | type | direction        | payload                      |
//! |------|------------------|------------------------------|
//! | 0    | host -> client   | `numbers` (5x5 grid)         |
//! | 1    | host -> all      | `number`                     |
//! | 2    | client -> host   | -                            |
//! | 3    | client -> host   | `name`                       |
//! | 4    | host -> client   | `screen`                     |
//! | 5    | reserved         | -                            |
//! | 6    | host -> all      | `state`, optional `autoplay` |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::{
    cards::CardNumber,
    constants::GRID_SIZE,
    session::GamePhase,
};

/// Wire codes for each message type.
pub mod message_type {
    pub const CARD_ASSIGNMENT: u8 = 0;
    pub const NUMBER_CALL: u8 = 1;
    pub const BINGO: u8 = 2;
    pub const SET_NAME: u8 = 3;
    pub const SET_SCREEN: u8 = 4;
    /// Reserved; never sent and rejected on receipt.
    pub const SET_WIN_STAGE: u8 = 5;
    pub const SET_GAME_STATE: u8 = 6;
}

/// Errors decoding a wire frame.
#[derive(Debug, Eq, thiserror::Error, PartialEq)]
pub enum MessageError {
    #[error("message type {0} is reserved")]
    ReservedMessageType(u8),
    #[error("unknown message type {0}")]
    UnknownMessageType(u8),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid game state code {0}")]
    InvalidGameState(u8),
}

/// A protocol message between the host and a controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Envelope", into = "Envelope")]
pub enum Message {
    /// Assign a card to the receiving controller on join.
    CardAssignment {
        numbers: [[CardNumber; GRID_SIZE]; GRID_SIZE],
    },
    /// A freshly drawn number, broadcast to everyone.
    NumberCall { number: CardNumber },
    /// A controller claims a completed line.
    Bingo,
    /// A controller registers or updates its display name.
    SetName { name: String },
    /// Navigation hint for one controller. Carried for protocol
    /// completeness; the engine itself never emits it.
    SetScreen { screen: String },
    /// Phase transition broadcast; `autoplay` rides along on game start.
    SetGameState {
        state: GamePhase,
        autoplay: Option<bool>,
    },
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::CardAssignment { .. } => "card assignment".to_string(),
            Self::NumberCall { number } => format!("number call {number}"),
            Self::Bingo => "bingo claim".to_string(),
            Self::SetName { name } => format!("set name to {name}"),
            Self::SetScreen { screen } => format!("set screen to {screen}"),
            Self::SetGameState { state, .. } => format!("set game state to {state}"),
        };
        write!(f, "{repr}")
    }
}

/// The flat JSON shape every frame shares.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
struct Envelope {
    message_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    numbers: Option<[[CardNumber; GRID_SIZE]; GRID_SIZE]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    number: Option<CardNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    screen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    autoplay: Option<bool>,
}

impl From<Message> for Envelope {
    fn from(message: Message) -> Self {
        match message {
            Message::CardAssignment { numbers } => Self {
                message_type: message_type::CARD_ASSIGNMENT,
                numbers: Some(numbers),
                ..Self::default()
            },
            Message::NumberCall { number } => Self {
                message_type: message_type::NUMBER_CALL,
                number: Some(number),
                ..Self::default()
            },
            Message::Bingo => Self {
                message_type: message_type::BINGO,
                ..Self::default()
            },
            Message::SetName { name } => Self {
                message_type: message_type::SET_NAME,
                name: Some(name),
                ..Self::default()
            },
            Message::SetScreen { screen } => Self {
                message_type: message_type::SET_SCREEN,
                screen: Some(screen),
                ..Self::default()
            },
            Message::SetGameState { state, autoplay } => Self {
                message_type: message_type::SET_GAME_STATE,
                state: Some(state.code()),
                autoplay,
                ..Self::default()
            },
        }
    }
}

impl TryFrom<Envelope> for Message {
    type Error = MessageError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        match envelope.message_type {
            message_type::CARD_ASSIGNMENT => Ok(Self::CardAssignment {
                numbers: envelope
                    .numbers
                    .ok_or(MessageError::MissingField("numbers"))?,
            }),
            message_type::NUMBER_CALL => Ok(Self::NumberCall {
                number: envelope.number.ok_or(MessageError::MissingField("number"))?,
            }),
            message_type::BINGO => Ok(Self::Bingo),
            message_type::SET_NAME => Ok(Self::SetName {
                name: envelope.name.ok_or(MessageError::MissingField("name"))?,
            }),
            message_type::SET_SCREEN => Ok(Self::SetScreen {
                screen: envelope.screen.ok_or(MessageError::MissingField("screen"))?,
            }),
            message_type::SET_WIN_STAGE => {
                Err(MessageError::ReservedMessageType(envelope.message_type))
            }
            message_type::SET_GAME_STATE => {
                let code = envelope.state.ok_or(MessageError::MissingField("state"))?;
                let state =
                    GamePhase::from_code(code).ok_or(MessageError::InvalidGameState(code))?;
                Ok(Self::SetGameState {
                    state,
                    autoplay: envelope.autoplay,
                })
            }
            other => Err(MessageError::UnknownMessageType(other)),
        }
    }
}
