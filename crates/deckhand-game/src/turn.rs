//! Seat-order traversal: current-actor pointer and direction.

use deckhand_protocol::Direction;

/// Tracks whose turn it is and which way the turn order runs.
///
/// The engine holds only an index and a direction; the seat list itself
/// lives in the table. Every operation takes the live player count so a
/// mid-game leave cannot desynchronize the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEngine {
    current: usize,
    direction: Direction,
}

impl TurnEngine {
    /// A fresh engine: seat 0, forward.
    pub fn new() -> Self {
        Self {
            current: 0,
            direction: Direction::Forward,
        }
    }

    /// Index of the current seat.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Moves the pointer one seat in the current direction, modulo the
    /// player count.
    ///
    /// Advancing with zero players is an invariant violation: loud in
    /// development, a no-op in release.
    pub fn advance(&mut self, player_count: usize) {
        debug_assert!(player_count > 0, "advance with zero players");
        if player_count == 0 {
            return;
        }
        self.current = Self::step(self.current, self.direction, player_count);
    }

    /// Flips forward/backward without moving the pointer.
    pub fn reverse(&mut self) {
        self.direction = self.direction.flipped();
    }

    /// The seat `advance` would select, without mutating. Used for
    /// draw-effect targeting.
    pub fn peek_next(&self, player_count: usize) -> Option<usize> {
        if player_count == 0 {
            return None;
        }
        Some(Self::step(self.current, self.direction, player_count))
    }

    /// Re-fits the pointer after the seat list shrank.
    pub fn clamp(&mut self, player_count: usize) {
        if player_count > 0 {
            self.current %= player_count;
        } else {
            self.current = 0;
        }
    }

    /// Back to seat 0, forward. Called on game start.
    pub fn reset(&mut self) {
        self.current = 0;
        self.direction = Direction::Forward;
    }

    fn step(current: usize, direction: Direction, player_count: usize) -> usize {
        match direction {
            Direction::Forward => (current + 1) % player_count,
            Direction::Backward => (current + player_count - 1) % player_count,
        }
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}
