//! Controller-side game logic.
//!
//! Everything a player client needs besides a transport: the assigned
//! card, the token grid, the bounded window of recently called numbers,
//! and optimistic win detection. The win check is the same `lines` code
//! the host uses to validate claims, so a controller that arms its claim
//! button is guaranteed to pass host-side validation.

use log::debug;
use std::collections::VecDeque;

use crate::game::cards::{Card, CardNumber};
use crate::game::constants::{FREE_COL, FREE_ROW, GRID_SIZE, MAX_ACTIVE_CALLS};
use crate::game::lines::{self, MarkGrid};
use crate::game::session::GamePhase;
use crate::net::messages::Message;

/// Local state of one player's controller.
#[derive(Debug)]
pub struct Controller {
    card: Option<Card>,
    tokens: MarkGrid,
    active_calls: VecDeque<CardNumber>,
    phase: GamePhase,
    autoplay: bool,
    claim_ready: bool,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        let mut tokens = [[false; GRID_SIZE]; GRID_SIZE];
        tokens[FREE_ROW][FREE_COL] = true;
        Self {
            card: None,
            tokens,
            active_calls: VecDeque::with_capacity(MAX_ACTIVE_CALLS),
            phase: GamePhase::Waiting,
            autoplay: false,
            claim_ready: false,
        }
    }

    #[must_use]
    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    #[must_use]
    pub fn tokens(&self) -> &MarkGrid {
        &self.tokens
    }

    /// The numbers currently eligible for marking, oldest first.
    #[must_use]
    pub fn active_calls(&self) -> impl Iterator<Item = CardNumber> + '_ {
        self.active_calls.iter().copied()
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn claim_ready(&self) -> bool {
        self.claim_ready
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    /// Apply one host frame to local state.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::CardAssignment { numbers } => {
                self.card = Some(Card::new(*numbers));
            }
            Message::NumberCall { number } => {
                self.receive_number(*number);
            }
            Message::SetGameState { state, autoplay } => {
                self.phase = *state;
                if let Some(autoplay) = autoplay {
                    self.autoplay = *autoplay;
                }
            }
            Message::SetScreen { screen } => {
                debug!("screen change hint: {screen}");
            }
            // Controller-to-host traffic; nothing to do if echoed back.
            Message::Bingo | Message::SetName { .. } => {}
        }
    }

    /// Record a called number in the bounded active window, evicting the
    /// oldest entry when full. In autoplay mode, a callable cell is
    /// marked immediately.
    fn receive_number(&mut self, number: CardNumber) {
        if self.active_calls.len() >= MAX_ACTIVE_CALLS {
            self.active_calls.pop_front();
        }
        self.active_calls.push_back(number);

        if self.autoplay {
            let position = self.card.as_ref().and_then(|card| card.position_of(number));
            if let Some((row, col)) = position {
                self.try_mark(row, col);
            }
        }
    }

    /// Attempt to place a token. A cell is markable only when it is the
    /// free center or its number is in the active window, and it holds no
    /// token yet. Completing a line through the cell arms the claim.
    /// Returns whether a token was placed.
    pub fn try_mark(&mut self, row: usize, col: usize) -> bool {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return false;
        }
        let Some(card) = &self.card else {
            return false;
        };
        if self.tokens[row][col] {
            return false;
        }
        let free = row == FREE_ROW && col == FREE_COL;
        if !free && !self.active_calls.contains(&card.number_at(row, col)) {
            return false;
        }
        self.tokens[row][col] = true;
        if lines::completes_line(&self.tokens, row, col) {
            self.claim_ready = true;
        }
        true
    }

    /// The claim frame, available only once a line is complete.
    #[must_use]
    pub fn claim(&self) -> Option<Message> {
        self.claim_ready.then_some(Message::Bingo)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::generate_set;
    use crate::game::session::GamePhase;

    fn controller_with_card() -> (Controller, Card) {
        let card = generate_set()[0];
        let mut controller = Controller::new();
        controller.handle_message(&Message::CardAssignment {
            numbers: *card.numbers(),
        });
        (controller, card)
    }

    #[test]
    fn test_center_is_premarked() {
        let controller = Controller::new();
        assert!(controller.tokens()[FREE_ROW][FREE_COL]);
        assert!(!controller.claim_ready());
    }

    #[test]
    fn test_card_assignment_is_stored() {
        let (controller, card) = controller_with_card();
        assert_eq!(controller.card(), Some(&card));
    }

    #[test]
    fn test_window_keeps_only_recent_calls() {
        let (mut controller, _) = controller_with_card();
        for number in [1, 2, 3, 4] {
            controller.handle_message(&Message::NumberCall { number });
        }
        let window: Vec<_> = controller.active_calls().collect();
        assert_eq!(window, vec![2, 3, 4]);
    }

    #[test]
    fn test_mark_requires_an_active_call() {
        let (mut controller, card) = controller_with_card();
        // (0, 0) has not been called.
        assert!(!controller.try_mark(0, 0));

        controller.handle_message(&Message::NumberCall {
            number: card.number_at(0, 0),
        });
        assert!(controller.try_mark(0, 0));
        assert!(controller.tokens()[0][0]);
    }

    #[test]
    fn test_mark_expires_with_the_window() {
        let (mut controller, card) = controller_with_card();
        controller.handle_message(&Message::NumberCall {
            number: card.number_at(0, 0),
        });
        // Three newer calls push it out of the window.
        for number in [70, 71, 72] {
            controller.handle_message(&Message::NumberCall { number });
        }
        assert!(!controller.try_mark(0, 0));
    }

    #[test]
    fn test_marked_cell_is_not_remarked() {
        let (mut controller, card) = controller_with_card();
        controller.handle_message(&Message::NumberCall {
            number: card.number_at(1, 1),
        });
        assert!(controller.try_mark(1, 1));
        assert!(!controller.try_mark(1, 1));
    }

    #[test]
    fn test_out_of_bounds_mark_is_rejected() {
        let (mut controller, _) = controller_with_card();
        assert!(!controller.try_mark(5, 0));
        assert!(!controller.try_mark(0, 9));
    }

    #[test]
    fn test_completing_a_row_arms_the_claim() {
        let (mut controller, card) = controller_with_card();
        // Row 2 contains the free center, so four marks complete it.
        for col in [0, 1, 3, 4] {
            controller.handle_message(&Message::NumberCall {
                number: card.number_at(2, col),
            });
            assert!(controller.try_mark(2, col));
        }
        assert!(controller.claim_ready());
        assert_eq!(controller.claim(), Some(Message::Bingo));
    }

    #[test]
    fn test_claim_unavailable_before_a_line() {
        let (controller, _) = controller_with_card();
        assert_eq!(controller.claim(), None);
    }

    #[test]
    fn test_game_state_updates_phase_and_autoplay() {
        let (mut controller, _) = controller_with_card();
        controller.handle_message(&Message::SetGameState {
            state: GamePhase::Playing,
            autoplay: Some(true),
        });
        assert_eq!(controller.phase(), GamePhase::Playing);

        // Absent flag leaves the mode unchanged.
        controller.handle_message(&Message::SetGameState {
            state: GamePhase::Over,
            autoplay: None,
        });
        assert_eq!(controller.phase(), GamePhase::Over);
    }

    #[test]
    fn test_autoplay_marks_called_cells() {
        let (mut controller, card) = controller_with_card();
        controller.set_autoplay(true);
        controller.handle_message(&Message::NumberCall {
            number: card.number_at(0, 3),
        });
        assert!(controller.tokens()[0][3]);
        // A call that is not on the card marks nothing.
        let marked_before: usize = count_tokens(&controller);
        controller.handle_message(&Message::NumberCall { number: 75 });
        assert_eq!(count_tokens(&controller), marked_before);
    }

    #[test]
    fn test_autoplay_completes_a_column() {
        let (mut controller, card) = controller_with_card();
        controller.set_autoplay(true);
        for row in 0..GRID_SIZE {
            controller.handle_message(&Message::NumberCall {
                number: card.number_at(row, 0),
            });
        }
        assert!(controller.claim_ready());
    }

    fn count_tokens(controller: &Controller) -> usize {
        controller
            .tokens()
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&marked| marked)
            .count()
    }
}
