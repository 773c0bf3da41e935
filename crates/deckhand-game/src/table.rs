//! The authoritative per-room game state and its atomic transactions.
//!
//! A [`Table`] owns everything rule-relevant about one room: the seat
//! list in join order, the draw and discard piles, the turn engine,
//! status, and the active wild color. Every public operation either
//! fully validates and fully mutates, or mutates nothing.
//!
//! The table is deliberately synchronous. The room actor that owns it
//! serializes access; no other code ever sees an intermediate state.

use std::collections::VecDeque;

use deckhand_protocol::{
    Card, CardId, CardKind, Color, Direction, HandSnapshot, PlayerId, PlayerSummary, RoomId,
    RoomSnapshot, RoomStatus,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{GameError, TurnEngine, deck, rules};

/// Cards dealt to each player on start.
pub const HAND_SIZE: usize = 7;

/// Fewest players a room may be configured for, and the minimum to start.
pub const MIN_PLAYERS: usize = 2;

/// Most players a room may be configured for.
pub const MAX_PLAYERS: usize = 6;

/// One seated player: identity, display name, hand.
#[derive(Debug, Clone)]
struct Seat {
    id: PlayerId,
    name: String,
    hand: Vec<Card>,
}

/// Result of a successful [`Table::play_card`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    /// The card that was played (now the top of the discard pile).
    pub card: Card,
    /// Set when the play emptied the actor's hand and ended the game.
    pub winner: Option<PlayerId>,
    /// A draw effect's target and how many cards it was forced to
    /// draw. Only the count — the cards themselves are part of the
    /// target's private hand and reach them through their own hand
    /// snapshot.
    pub forced_draw: Option<(PlayerId, usize)>,
}

/// Result of a [`Table::leave`].
#[derive(Debug, Clone, Copy)]
pub struct LeaveOutcome {
    /// Whether the player was actually seated (leave is a no-op otherwise).
    pub removed: bool,
    /// The room has no players left and is eligible for removal.
    pub now_empty: bool,
}

/// Authoritative state of one room's game.
#[derive(Debug)]
pub struct Table {
    seats: Vec<Seat>,
    /// Front = next card to draw.
    draw_pile: VecDeque<Card>,
    /// Last = currently active top card.
    discard_pile: Vec<Card>,
    turn: TurnEngine,
    status: RoomStatus,
    /// Set only while a played wild's chosen color is in effect.
    active_color: Option<Color>,
    max_players: usize,
    winner: Option<PlayerId>,
    rng: StdRng,
}

impl Table {
    /// A fresh, waiting table. `max_players` is clamped to [2, 6].
    pub fn new(max_players: usize) -> Self {
        Self::with_rng(max_players, StdRng::from_os_rng())
    }

    /// A table with a deterministic RNG, for tests.
    pub fn seeded(max_players: usize, seed: u64) -> Self {
        Self::with_rng(max_players, StdRng::seed_from_u64(seed))
    }

    fn with_rng(max_players: usize, rng: StdRng) -> Self {
        Self {
            seats: Vec::new(),
            draw_pile: VecDeque::new(),
            discard_pile: Vec::new(),
            turn: TurnEngine::new(),
            status: RoomStatus::Waiting,
            active_color: None,
            max_players: max_players.clamp(MIN_PLAYERS, MAX_PLAYERS),
            winner: None,
            rng,
        }
    }

    // -- Read-only accessors ------------------------------------------------

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn direction(&self) -> Direction {
        self.turn.direction()
    }

    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// IDs of all seated players, in turn order.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.seats.iter().map(|s| s.id).collect()
    }

    /// The actor whose turn it is. `None` unless a game is in progress.
    pub fn current_player(&self) -> Option<PlayerId> {
        if !self.status.is_active() {
            return None;
        }
        self.seats.get(self.turn.current()).map(|s| s.id)
    }

    /// A player's hand. Server-side only; never handed to other actors.
    pub fn hand(&self, actor: PlayerId) -> Option<&[Card]> {
        self.seat(actor).map(|s| s.hand.as_slice())
    }

    /// The active top card, if any.
    pub fn top_card(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    pub fn active_color(&self) -> Option<Color> {
        self.active_color
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    // -- Mutating transactions ---------------------------------------------

    /// Seats a player at the end of the turn order.
    ///
    /// Fails if the room is full, already started, or the player is
    /// already seated.
    pub fn join(&mut self, actor: PlayerId, name: impl Into<String>) -> Result<(), GameError> {
        if !self.status.is_joinable() {
            return Err(GameError::WrongStatus(self.status));
        }
        if self.seats.len() >= self.max_players {
            return Err(GameError::RoomFull);
        }
        if self.seat(actor).is_some() {
            return Err(GameError::AlreadyJoined(actor));
        }
        self.seats.push(Seat {
            id: actor,
            name: name.into(),
            hand: Vec::new(),
        });
        Ok(())
    }

    /// Removes a player if present; a no-op (`removed: false`) otherwise.
    ///
    /// Mid-game, the departed hand goes to the bottom of the draw pile
    /// so the 108-card population stays intact, and the game finishes
    /// if fewer than two players remain. The turn pointer is clamped by
    /// modulo; no further adjustment.
    pub fn leave(&mut self, actor: PlayerId) -> LeaveOutcome {
        let Some(idx) = self.seats.iter().position(|s| s.id == actor) else {
            return LeaveOutcome {
                removed: false,
                now_empty: self.seats.is_empty(),
            };
        };

        let seat = self.seats.remove(idx);
        if self.status.is_active() {
            self.draw_pile.extend(seat.hand);
            if self.seats.len() < MIN_PLAYERS {
                self.status = RoomStatus::Finished;
            }
        }
        self.turn.clamp(self.seats.len());

        LeaveOutcome {
            removed: true,
            now_empty: self.seats.is_empty(),
        }
    }

    /// Starts the game: fresh shuffled deck, seven cards per player in
    /// turn order, first non-wild deck card as the opening top card.
    ///
    /// Fails unless the room is waiting with at least two players.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != RoomStatus::Waiting {
            return Err(GameError::WrongStatus(self.status));
        }
        if self.seats.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }

        let mut fresh = deck::standard_deck();
        deck::shuffle(&mut fresh, &mut self.rng);
        self.draw_pile = fresh.into();
        self.discard_pile.clear();

        for seat in &mut self.seats {
            seat.hand.clear();
            for _ in 0..HAND_SIZE {
                if let Some(card) = self.draw_pile.pop_front() {
                    seat.hand.push(card);
                }
            }
        }

        // The opening top card is the first non-wild card from the deck
        // front. A deck with no non-wild card left is astronomically
        // unlikely but tolerated: no top card is set.
        if let Some(pos) = self.draw_pile.iter().position(|c| !c.is_wild()) {
            if let Some(top) = self.draw_pile.remove(pos) {
                self.discard_pile.push(top);
            }
        }

        self.status = RoomStatus::InProgress;
        self.turn.reset();
        self.active_color = None;
        self.winner = None;

        tracing::debug!(
            players = self.seats.len(),
            draw_pile = self.draw_pile.len(),
            "game started"
        );
        Ok(())
    }

    /// Read-only legality check, identical to the one `play_card` runs.
    pub fn validate_play(&self, actor: PlayerId, card_id: CardId) -> Result<(), GameError> {
        rules::validate_play(self, actor, card_id)
    }

    /// Plays a card: validates, moves it to the discard pile, applies
    /// wild color choice, detects a win, and applies the card's effect.
    pub fn play_card(
        &mut self,
        actor: PlayerId,
        card_id: CardId,
        chosen_color: Option<Color>,
    ) -> Result<PlayOutcome, GameError> {
        rules::validate_play(self, actor, card_id)?;

        // Everything is checked before the first mutation, so a failure
        // here leaves the table untouched.
        let idx = self.turn.current();
        let pos = self.seats[idx]
            .hand
            .iter()
            .position(|c| c.id == card_id)
            .ok_or(GameError::CardNotInHand(card_id))?;
        let card = self.seats[idx].hand[pos];

        if card.is_wild() {
            match chosen_color {
                Some(color) if color.is_concrete() => {}
                _ => return Err(GameError::MustChooseColor),
            }
        }

        self.seats[idx].hand.remove(pos);
        self.discard_pile.push(card);
        self.active_color = if card.is_wild() { chosen_color } else { None };

        if self.seats[idx].hand.is_empty() {
            // Terminal: no effect application after a win.
            self.status = RoomStatus::Finished;
            self.winner = Some(actor);
            tracing::debug!(%actor, card = %card, "game won");
            return Ok(PlayOutcome {
                card,
                winner: Some(actor),
                forced_draw: None,
            });
        }

        let forced_draw = self.apply_effect(&card);
        Ok(PlayOutcome {
            card,
            winner: None,
            forced_draw,
        })
    }

    /// Draws one card for the current actor and passes the turn.
    /// Returns the drawn card(s) for private delivery.
    pub fn draw_for_current(&mut self, actor: PlayerId) -> Result<Vec<Card>, GameError> {
        if !self.status.is_active() {
            return Err(GameError::WrongStatus(self.status));
        }
        if self.current_player() != Some(actor) {
            return Err(GameError::NotYourTurn);
        }
        let drawn = self.draw_cards(self.turn.current(), 1);
        self.turn.advance(self.seats.len());
        Ok(drawn)
    }

    // -- Internals ----------------------------------------------------------

    fn seat(&self, actor: PlayerId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == actor)
    }

    /// Applies a played card's effect and advances the turn.
    fn apply_effect(&mut self, card: &Card) -> Option<(PlayerId, usize)> {
        let count = self.seats.len();
        match card.kind {
            CardKind::Skip => {
                // Pass over exactly one player.
                self.turn.advance(count);
                self.turn.advance(count);
                None
            }
            CardKind::Reverse => {
                self.turn.reverse();
                if count == 2 {
                    // Reverse degrades to skip in a two-player game.
                    self.turn.advance(count);
                }
                self.turn.advance(count);
                None
            }
            CardKind::DrawTwo | CardKind::WildDrawFour => {
                let draw = if card.kind == CardKind::DrawTwo { 2 } else { 4 };
                let target_idx = self.turn.peek_next(count)?;
                let target = self.seats[target_idx].id;
                let drawn = self.draw_cards(target_idx, draw);
                // The target draws and is passed over.
                self.turn.advance(count);
                self.turn.advance(count);
                Some((target, drawn.len()))
            }
            _ => {
                self.turn.advance(count);
                None
            }
        }
    }

    /// Moves up to `count` cards from the draw pile into a seat's hand,
    /// recycling the discard pile when the draw pile runs dry. Stops
    /// early (never fails) if replenishment is impossible.
    fn draw_cards(&mut self, seat_idx: usize, count: usize) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                self.reshuffle();
            }
            match self.draw_pile.pop_front() {
                Some(card) => {
                    self.seats[seat_idx].hand.push(card);
                    drawn.push(card);
                }
                // Only possible when the cards in play total <= 1.
                None => break,
            }
        }
        drawn
    }

    /// Recycles the discard pile into the draw pile, keeping only the
    /// current top card. No-op when there is nothing below the top.
    fn reshuffle(&mut self) {
        if self.discard_pile.len() <= 1 {
            return;
        }
        let top = self.discard_pile.pop();
        self.draw_pile.extend(self.discard_pile.drain(..));
        if let Some(top) = top {
            self.discard_pile.push(top);
        }
        deck::shuffle(self.draw_pile.make_contiguous(), &mut self.rng);
        tracing::debug!(recycled = self.draw_pile.len(), "discard pile reshuffled");
    }

    // -- Views --------------------------------------------------------------

    /// The broadcast-safe public view of this table.
    pub fn room_snapshot(&self, room_id: RoomId, name: &str) -> RoomSnapshot {
        let current = self.current_player();
        RoomSnapshot {
            room_id,
            name: name.to_string(),
            status: self.status,
            direction: self.turn.direction(),
            current,
            top_card: self.top_card(),
            active_color: self.active_color,
            players: self
                .seats
                .iter()
                .map(|s| PlayerSummary {
                    player: s.id,
                    name: s.name.clone(),
                    cards: s.hand.len(),
                    is_current: current == Some(s.id),
                })
                .collect(),
            draw_pile: self.draw_pile.len(),
            winner: self.winner,
        }
    }

    /// The private view of one player's hand.
    pub fn hand_snapshot(&self, actor: PlayerId) -> Option<HandSnapshot> {
        self.seat(actor).map(|s| HandSnapshot {
            player: s.id,
            cards: s.hand.clone(),
        })
    }
}

// =========================================================================
// Tests
// =========================================================================
