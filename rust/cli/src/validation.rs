//! Input parsing and validation for interactive commands.
//!
//! Turn prompts and the deck builder both accept free-form lines; the
//! functions here turn those lines into structured commands or clear error
//! messages. Card tokens are parsed once, through `Card::from_str`, so the
//! accepted syntax is exactly the persisted token format.

use pazaak_engine::cards::Card;
use pazaak_engine::session::TurnAction;

/// Result type for parsing user input during a turn.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid turn action (play a card, stand, or end the turn)
    Action(TurnAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// One line of deck-builder input.
#[derive(Debug, PartialEq)]
pub enum DeckCommand {
    Add(Card),
    Remove(Card),
    List,
    Confirm,
    Clear,
    Quit,
    Invalid(String),
}

/// Parse user input into a [`TurnAction`] or special commands.
///
/// Accepted forms (command word is case-insensitive):
/// - "stand" or "s" → stand
/// - "end" or "e" → end the turn (take the next forced draw)
/// - "play TOKEN" → play a side card, e.g. `play +3` or `play [flip 2&4]`
/// - "play TOKEN SIGN" → play a card that needs a sign choice, e.g.
///   `play [+/-]3 -` or `play [+/-][1/2] +2`
/// - "q" or "quit" → leave the match
///
/// # Example
///
/// ```rust
/// # use pazaak_cli::validation::{parse_turn_command, ParseResult};
/// use pazaak_engine::cards::Card;
/// use pazaak_engine::session::TurnAction;
///
/// assert_eq!(parse_turn_command("stand"), ParseResult::Action(TurnAction::Stand));
/// assert_eq!(
///     parse_turn_command("play [+/-]3 -"),
///     ParseResult::Action(TurnAction::Play { card: Card::Dual(3), choice: Some(-3) })
/// );
/// assert_eq!(parse_turn_command("q"), ParseResult::Quit);
/// ```
pub fn parse_turn_command(input: &str) -> ParseResult {
    let input = input.trim();
    if input.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (input, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "q" | "quit" => ParseResult::Quit,
        "stand" | "s" => ParseResult::Action(TurnAction::Stand),
        "end" | "e" => ParseResult::Action(TurnAction::EndTurn),
        "play" | "p" => parse_play(rest),
        _ => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: play <card> [sign], stand, end, q",
            word
        )),
    }
}

fn parse_play(rest: &str) -> ParseResult {
    if rest.is_empty() {
        return ParseResult::Invalid("Play requires a card token, e.g. 'play +3'".to_string());
    }

    // The whole remainder may itself be one token ("[flip 2&4]" contains a
    // space), so try that before splitting off a trailing sign choice.
    if let Ok(card) = rest.parse::<Card>() {
        if card.needs_choice() {
            return ParseResult::Invalid(format!(
                "{} needs a sign choice, e.g. 'play {} -'",
                card, card
            ));
        }
        return ParseResult::Action(TurnAction::Play { card, choice: None });
    }

    let Some((head, sign)) = rest.rsplit_once(char::is_whitespace) else {
        return ParseResult::Invalid(format!("Unknown card token '{}'", rest));
    };
    let card = match head.trim().parse::<Card>() {
        Ok(c) => c,
        Err(_) => return ParseResult::Invalid(format!("Unknown card token '{}'", rest)),
    };
    if !card.needs_choice() {
        return ParseResult::Invalid(format!("{} does not take a sign choice", card));
    }

    match parse_choice(card, sign.trim()) {
        Some(choice) => ParseResult::Action(TurnAction::Play {
            card,
            choice: Some(choice),
        }),
        None => ParseResult::Invalid(format!("Invalid sign choice '{}' for {}", sign, card)),
    }
}

/// Resolve a sign argument against the card it modifies.
///
/// Dual cards take `+`/`-` (or the explicit signed value); the variable dual
/// takes one of `+1`, `-1`, `+2`, `-2`.
fn parse_choice(card: Card, sign: &str) -> Option<i8> {
    match card {
        Card::Dual(n) => match sign {
            "+" => Some(n),
            "-" => Some(-n),
            other => {
                let v: i8 = other.parse().ok()?;
                (v == n || v == -n).then_some(v)
            }
        },
        Card::VariableDual => {
            let v: i8 = sign.parse().ok()?;
            matches!(v, 1 | -1 | 2 | -2).then_some(v)
        }
        _ => None,
    }
}

/// Parse one deck-builder line.
///
/// Accepted forms: `add TOKEN`, `sub TOKEN` (or `remove TOKEN`), `list`,
/// `confirm`, `clear`, `q`.
pub fn parse_deck_command(input: &str) -> DeckCommand {
    let input = input.trim();
    if input.is_empty() {
        return DeckCommand::Invalid("Empty input".to_string());
    }
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (input, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "q" | "quit" => DeckCommand::Quit,
        "list" | "l" => DeckCommand::List,
        "confirm" => DeckCommand::Confirm,
        "clear" => DeckCommand::Clear,
        "add" => match rest.parse::<Card>() {
            Ok(card) => DeckCommand::Add(card),
            Err(_) => DeckCommand::Invalid(format!("Unknown card token '{}'", rest)),
        },
        "sub" | "remove" => match rest.parse::<Card>() {
            Ok(card) => DeckCommand::Remove(card),
            Err(_) => DeckCommand::Invalid(format!("Unknown card token '{}'", rest)),
        },
        _ => DeckCommand::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: add <card>, sub <card>, list, confirm, clear, q",
            word
        )),
    }
}
