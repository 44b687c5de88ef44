//! Card, board, and score formatters for terminal display.
//!
//! Pure functions turning engine state into display strings. Cards render
//! through their token form (`+3`, `[+/-]2`, `[flip 3&6]`, ...), so what the
//! user sees is exactly what the deck builder accepts back.

use pazaak_engine::cards::Card;
use pazaak_engine::events::GameSnapshot;

/// Format a hand as a numbered list: `1) +3  2) [+/-]2  ...`
pub fn format_hand(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(empty)".to_string();
    }
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}) {}", i + 1, c))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Format a deck as a comma-separated token list.
pub fn format_deck(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Multi-line board/score block rendered after state changes.
pub fn format_snapshot(s: &GameSnapshot) -> String {
    let fmt_entries = |entries: &[i8]| {
        entries
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    let stand = |flag: bool| if flag { " (standing)" } else { "" };
    format!(
        "  you:    [{}] = {}{}\n  dealer: [{}] = {}{}\n  score:  you {} - {} dealer",
        fmt_entries(&s.player_board),
        s.player_total,
        stand(s.player_standing),
        fmt_entries(&s.dealer_board),
        s.dealer_total,
        stand(s.dealer_standing),
        s.player_score,
        s.dealer_score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hand_numbers_cards() {
        let hand = vec![Card::Number(3), Card::Dual(2)];
        assert_eq!(format_hand(&hand), "1) +3  2) [+/-]2");
    }

    #[test]
    fn test_format_hand_empty() {
        assert_eq!(format_hand(&[]), "(empty)");
    }

    #[test]
    fn test_format_deck_joins_tokens() {
        let deck = vec![Card::Number(-4), Card::Double];
        assert_eq!(format_deck(&deck), "-4, [double]");
    }

    #[test]
    fn test_format_snapshot_shows_boards_and_score() {
        use pazaak_engine::events::GameSnapshot;
        use pazaak_engine::session::{Phase, Seat};

        let snap = GameSnapshot {
            phase: Phase::AwaitingPlay(Seat::Player),
            turn: Seat::Player,
            player_board: vec![5, -2],
            player_total: 3,
            dealer_board: vec![9],
            dealer_total: 9,
            player_hand: vec![],
            dealer_hand_size: 4,
            player_standing: false,
            dealer_standing: true,
            player_score: 1,
            dealer_score: 2,
        };
        let text = format_snapshot(&snap);
        assert!(text.contains("you:    [5 -2] = 3"));
        assert!(text.contains("dealer: [9] = 9 (standing)"));
        assert!(text.contains("score:  you 1 - 2 dealer"));
    }

}
