//! Pure legality checks, separated from mutation.
//!
//! [`validate_play`] is the single source of truth for "is this move
//! legal": [`Table::play_card`](crate::Table::play_card) re-runs it
//! before mutating, and read-only callers (UI hinting, tests) can
//! invoke it directly with no side effects.

use deckhand_protocol::{Card, CardId, CardKind, Color, PlayerId};

use crate::{GameError, Table};

/// The color a non-wild card must match: the active wild override if
/// one is set, else the top card's own color.
pub fn effective_color(top: &Card, active_color: Option<Color>) -> Color {
    active_color.unwrap_or(top.color)
}

/// Whether `candidate` may be nominated on top of `top`.
///
/// Wild and WildDrawFour are always nominable here; the hand-contents
/// restriction on WildDrawFour is enforced one level up in
/// [`validate_play`]. A non-wild candidate follows if its color equals
/// the effective color, its non-number kind equals the top's kind, or
/// both are numbers of equal value.
pub fn can_follow(candidate: &Card, top: &Card, active_color: Option<Color>) -> bool {
    if candidate.is_wild() {
        return true;
    }
    if candidate.color == effective_color(top, active_color) {
        return true;
    }
    if candidate.kind == top.kind {
        return match candidate.kind {
            CardKind::Number => candidate.number == top.number,
            _ => true,
        };
    }
    false
}

/// Full legality verdict for playing `card_id`, identical to the check
/// inside `play_card`. Read-only.
///
/// Failure reasons, in check order: wrong room status, not-your-turn,
/// card-not-in-hand, no-top-card, then either the WildDrawFour hand
/// restriction or the follow rule.
pub fn validate_play(table: &Table, actor: PlayerId, card_id: CardId) -> Result<(), GameError> {
    if !table.status().is_active() {
        return Err(GameError::WrongStatus(table.status()));
    }
    if table.current_player() != Some(actor) {
        return Err(GameError::NotYourTurn);
    }
    let hand = table.hand(actor).ok_or(GameError::UnknownPlayer(actor))?;
    let card = hand
        .iter()
        .find(|c| c.id == card_id)
        .copied()
        .ok_or(GameError::CardNotInHand(card_id))?;
    let top = table.top_card().ok_or(GameError::NoTopCard)?;
    let active = table.active_color();

    if card.kind == CardKind::WildDrawFour {
        // Legal only when no other hand card matches the effective
        // color. The candidate itself is excluded from the scan.
        let effective = effective_color(&top, active);
        let holds_match = hand
            .iter()
            .any(|c| c.id != card.id && c.color == effective);
        if holds_match {
            return Err(GameError::WildDrawFourRestricted);
        }
        return Ok(());
    }

    if !can_follow(&card, &top, active) {
        return Err(GameError::DoesNotFollow);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red5() -> Card {
        Card::number(CardId(1), Color::Red, 5)
    }

    #[test]
    fn test_can_follow_matches_color() {
        let candidate = Card::number(CardId(2), Color::Red, 9);
        assert!(can_follow(&candidate, &red5(), None));
    }

    #[test]
    fn test_can_follow_matches_number_across_colors() {
        let candidate = Card::number(CardId(2), Color::Blue, 5);
        assert!(can_follow(&candidate, &red5(), None));
    }

    #[test]
    fn test_can_follow_rejects_mismatched_number_card() {
        let candidate = Card::number(CardId(2), Color::Blue, 6);
        assert!(!can_follow(&candidate, &red5(), None));
    }

    #[test]
    fn test_can_follow_matches_action_kind() {
        let top = Card::action(CardId(1), Color::Red, CardKind::Skip);
        let candidate = Card::action(CardId(2), Color::Green, CardKind::Skip);
        assert!(can_follow(&candidate, &top, None));
    }

    #[test]
    fn test_can_follow_wilds_always_nominable() {
        assert!(can_follow(&Card::wild(CardId(2), CardKind::Wild), &red5(), None));
        assert!(can_follow(
            &Card::wild(CardId(3), CardKind::WildDrawFour),
            &red5(),
            None
        ));
    }

    #[test]
    fn test_can_follow_honors_active_wild_color() {
        // A wild on top with Green chosen: only green (or wild) follows.
        let top = Card::wild(CardId(1), CardKind::Wild);
        let green = Card::number(CardId(2), Color::Green, 3);
        let red = Card::number(CardId(3), Color::Red, 3);
        assert!(can_follow(&green, &top, Some(Color::Green)));
        assert!(!can_follow(&red, &top, Some(Color::Green)));
    }

    #[test]
    fn test_active_color_overrides_top_card_color() {
        // Red 5 on top but Blue is the active color: red no longer follows
        // by color, blue does.
        let red9 = Card::number(CardId(2), Color::Red, 9);
        let blue9 = Card::number(CardId(3), Color::Blue, 9);
        assert!(!can_follow(&red9, &red5(), Some(Color::Blue)));
        assert!(can_follow(&blue9, &red5(), Some(Color::Blue)));
    }

    #[test]
    fn test_effective_color() {
        assert_eq!(effective_color(&red5(), None), Color::Red);
        assert_eq!(effective_color(&red5(), Some(Color::Yellow)), Color::Yellow);
    }
}
