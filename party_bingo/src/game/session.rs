//! The game session: phase machine, player roster, and claim arbitration.
//!
//! One `GameSession` is the single authority for one game. It owns the
//! card pool, the call sequencer, the full call history, and the roster,
//! and it is the only place game state is ever mutated. Side effects that
//! interest the transport layer (broadcasts) are queued as events and
//! drained by the owner after each mutation.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::{HashMap, HashSet, VecDeque},
    fmt,
};
use thiserror::Error;
use uuid::Uuid;

use super::calls::{Call, CallSequence};
use super::cards::{Card, CardNumber, CardPool};
use super::constants::{
    CALL_SHUFFLE_PASSES, DEFAULT_MIN_PLAYERS, FREE_COL, FREE_ROW, GRID_SIZE, MAX_NAME_LENGTH,
};
use super::lines::{self, MarkGrid};

/// Players are keyed by the id the transport layer mints per connection.
pub type PlayerId = Uuid;

/// Errors that can occur during gameplay operations.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("card pool exhausted")]
    CardPoolExhausted,
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("unknown player")]
    UnknownPlayer,
    #[error("claim rejected: no completed line on record")]
    ClaimRejected,
}

/// Global game phase. Transitions are monotonic: Waiting -> Playing ->
/// Over, and no phase is ever re-entered.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GamePhase {
    Waiting,
    Playing,
    Over,
}

impl GamePhase {
    /// Wire code for the phase (0/1/2).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Waiting => 0,
            Self::Playing => 1,
            Self::Over => 2,
        }
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Waiting),
            1 => Some(Self::Playing),
            2 => Some(Self::Over),
            _ => None,
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Waiting => "waiting on players",
            Self::Playing => "playing",
            Self::Over => "game over",
        };
        write!(f, "{repr}")
    }
}

/// A player's display name, sanitized for broadcast text.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct DisplayName(String);

impl DisplayName {
    #[must_use]
    pub fn new(s: &str) -> Self {
        // Truncate by chars, not bytes; names arrive off the wire and
        // String::truncate panics mid-character.
        let name: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_control())
            .take(MAX_NAME_LENGTH)
            .collect();
        Self(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for DisplayName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for DisplayName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// Session configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameSettings {
    /// Named players required before the game auto-starts.
    pub min_players: usize,
    /// Generate a fresh card set when the pool runs out instead of
    /// refusing the join.
    pub replenish_cards: bool,
    /// Propagated to controllers on game start; controllers mark their
    /// own cards automatically when set.
    pub autoplay: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            min_players: DEFAULT_MIN_PLAYERS,
            replenish_cards: true,
            autoplay: false,
        }
    }
}

/// One roster entry: the immutably assigned card plus the mutable name.
#[derive(Clone, Debug)]
pub struct PlayerRecord {
    pub card: Card,
    pub name: Option<DisplayName>,
    pub joined_at: DateTime<Utc>,
}

/// Broadcast-worthy things that happened inside the session. Drained by
/// the owner after every mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    GameStarted { autoplay: bool },
    NumberCalled(Call),
    CallsExhausted,
    GameOver { winner: PlayerId, winner_label: String },
}

/// Outcome of a bingo claim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClaimOutcome {
    /// First valid claim; the game is over and this label names the winner.
    Won { winner_label: String },
    /// Claim arrived outside the Playing phase and changed nothing.
    Ignored,
}

/// The authoritative state of one bingo game.
#[derive(Debug)]
pub struct GameSession {
    settings: GameSettings,
    phase: GamePhase,
    pool: CardPool,
    roster: HashMap<PlayerId, PlayerRecord>,
    sequence: Option<CallSequence>,
    history: Vec<Call>,
    called: HashSet<CardNumber>,
    winner: Option<PlayerId>,
    events: VecDeque<SessionEvent>,
    exhaustion_reported: bool,
}

impl GameSession {
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_pool(settings, CardPool::standard())
    }

    #[must_use]
    pub fn with_pool(settings: GameSettings, pool: CardPool) -> Self {
        Self {
            settings,
            phase: GamePhase::Waiting,
            pool,
            roster: HashMap::new(),
            sequence: None,
            history: Vec::new(),
            called: HashSet::new(),
            winner: None,
            events: VecDeque::new(),
            exhaustion_reported: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    #[must_use]
    pub fn card_of(&self, player: PlayerId) -> Option<&Card> {
        self.roster.get(&player).map(|record| &record.card)
    }

    #[must_use]
    pub fn name_of(&self, player: PlayerId) -> Option<&DisplayName> {
        self.roster.get(&player)?.name.as_ref()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Every call made so far, in call order.
    #[must_use]
    pub fn history(&self) -> &[Call] {
        &self.history
    }

    /// Take everything that happened since the last drain.
    pub fn drain_events(&mut self) -> VecDeque<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Admit a player and assign a card. Joins are accepted while Waiting
    /// or Playing; once the game is over no card is handed out. A player
    /// that already holds a card gets the same card back.
    pub fn join(&mut self, player: PlayerId) -> Result<Card, GameError> {
        if self.phase == GamePhase::Over {
            return Err(GameError::GameAlreadyOver);
        }
        if let Some(record) = self.roster.get(&player) {
            return Ok(record.card);
        }
        let card = match self.pool.draw() {
            Ok(card) => card,
            Err(_) if self.settings.replenish_cards => {
                debug!("card pool exhausted, generating another set");
                self.pool.replenish();
                self.pool.draw()?
            }
            Err(e) => return Err(e),
        };
        self.roster.insert(
            player,
            PlayerRecord {
                card,
                name: None,
                joined_at: Utc::now(),
            },
        );
        debug!(
            "player {player} joined, {} cards left in the pool",
            self.pool.remaining()
        );
        Ok(card)
    }

    /// Register or update a display name. Reaching the minimum named
    /// player count while Waiting starts the game; the transition fires
    /// exactly once and later name changes are plain updates. Once the
    /// game is over the message is a no-op.
    pub fn set_name(&mut self, player: PlayerId, name: DisplayName) -> Result<(), GameError> {
        if self.phase == GamePhase::Over {
            debug!("ignoring name registration from {player} after game over");
            return Ok(());
        }
        let record = self
            .roster
            .get_mut(&player)
            .ok_or(GameError::UnknownPlayer)?;
        record.name = Some(name);
        if self.phase == GamePhase::Waiting && self.named_players() >= self.settings.min_players {
            self.start();
        }
        Ok(())
    }

    fn named_players(&self) -> usize {
        self.roster
            .values()
            .filter(|record| record.name.is_some())
            .count()
    }

    fn start(&mut self) {
        self.phase = GamePhase::Playing;
        self.sequence = Some(CallSequence::generate(CALL_SHUFFLE_PASSES));
        info!("game starting with {} players", self.roster.len());
        self.events.push_back(SessionEvent::GameStarted {
            autoplay: self.settings.autoplay,
        });
    }

    /// Advance the call sequence by one. Returns `None` outside the
    /// Playing phase and after the sequence is exhausted; exhaustion is
    /// reported as an event exactly once.
    pub fn next_call(&mut self) -> Option<Call> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let sequence = self.sequence.as_mut()?;
        match sequence.advance() {
            Some(call) => {
                self.history.push(call);
                self.called.insert(call.number);
                self.events.push_back(SessionEvent::NumberCalled(call));
                Some(call)
            }
            None => {
                if !self.exhaustion_reported {
                    self.exhaustion_reported = true;
                    warn!("call sequence exhausted, waiting on a claim to end the game");
                    self.events.push_back(SessionEvent::CallsExhausted);
                }
                None
            }
        }
    }

    /// Arbitrate a bingo claim.
    ///
    /// Claims outside the Playing phase are no-ops. While Playing, the
    /// claim is validated against the call history and the claimant's own
    /// card: the claimed win must be a complete row, column, or main
    /// diagonal under the marks the history supports (center free). The
    /// first valid claim ends the game.
    pub fn claim_bingo(&mut self, player: PlayerId) -> Result<ClaimOutcome, GameError> {
        if self.phase != GamePhase::Playing {
            debug!("ignoring bingo claim from {player} while {}", self.phase);
            return Ok(ClaimOutcome::Ignored);
        }
        let record = self.roster.get(&player).ok_or(GameError::UnknownPlayer)?;
        let marks = self.supported_marks(&record.card);
        if !lines::has_any_line(&marks) {
            warn!("rejecting bingo claim from {player}: no completed line on record");
            return Err(GameError::ClaimRejected);
        }
        self.phase = GamePhase::Over;
        self.winner = Some(player);
        let winner_label = self.winner_label(player);
        info!("bingo! {winner_label} wins after {} calls", self.history.len());
        self.events.push_back(SessionEvent::GameOver {
            winner: player,
            winner_label: winner_label.clone(),
        });
        Ok(ClaimOutcome::Won { winner_label })
    }

    /// The marks the call history can justify on a card: the free center
    /// plus every cell whose number has been called. Controllers mark from
    /// a bounded trailing window, which is a subset of this, so any line a
    /// controller can honestly complete passes this check.
    fn supported_marks(&self, card: &Card) -> MarkGrid {
        let mut marks = [[false; GRID_SIZE]; GRID_SIZE];
        for (row, marks_row) in marks.iter_mut().enumerate() {
            for (col, mark) in marks_row.iter_mut().enumerate() {
                *mark = (row == FREE_ROW && col == FREE_COL)
                    || self.called.contains(&card.number_at(row, col));
            }
        }
        marks
    }

    /// Broadcast-ready name for a player, falling back to a label derived
    /// from the id when no usable name was ever registered.
    #[must_use]
    pub fn winner_label(&self, player: PlayerId) -> String {
        match self.name_of(player) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let mut short = player.as_simple().to_string();
                short.truncate(8);
                format!("player-{short}")
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}
