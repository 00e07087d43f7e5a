//! Bingo game engine - cards, calls, and the authoritative session.
//!
//! This module provides the reusable core of the game:
//! - Column-partitioned card generation with in-set uniqueness
//! - The non-repeating number-call sequencer
//! - The shared line-completion check
//! - The game session owning phase, roster, and claim arbitration

pub mod calls;
pub mod cards;
pub mod constants;
pub mod lines;
pub mod session;
pub mod shuffle;
