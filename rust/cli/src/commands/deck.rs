//! Interactive side-deck builder.
//!
//! Walks the user through assembling a 10-card side deck from the fixed
//! inventory pool. Commands: `add TOKEN`, `sub TOKEN`, `list`, `confirm`
//! (persists the deck), `clear` (deletes the saved deck), `q`.
//!
//! The builder is also the fallback path of `pazaak play` when no saved
//! deck exists, so it returns the confirmed deck to the caller.

use std::io::{BufRead, Write};

use pazaak_engine::cards::{side_pool, Card};
use pazaak_engine::provider::SIDE_DECK_SIZE;

use crate::config;
use crate::error::CliError;
use crate::formatters::format_deck;
use crate::io_utils::read_stdin_line;
use crate::store::DeckStore;
use crate::ui;
use crate::validation::{parse_deck_command, DeckCommand};

/// Handle the deck command: run the builder against the configured store.
pub fn handle_deck_command(
    path: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let store = DeckStore::new(path.unwrap_or(cfg.deck_path));
    build_deck_interactive(&store, out, err, stdin)?;
    Ok(())
}

fn count_of(cards: &[Card], card: Card) -> usize {
    cards.iter().filter(|&&c| c == card).count()
}

/// Unique cards of the pool in first-seen order, with total copy counts.
fn inventory(pool: &[Card]) -> Vec<(Card, usize)> {
    let mut items: Vec<(Card, usize)> = Vec::new();
    for &card in pool {
        match items.iter_mut().find(|(c, _)| *c == card) {
            Some((_, n)) => *n += 1,
            None => items.push((card, 1)),
        }
    }
    items
}

fn print_inventory(
    out: &mut dyn Write,
    pool: &[Card],
    deck: &[Card],
) -> Result<(), CliError> {
    writeln!(out, "Available cards (copies left):")?;
    for (card, total) in inventory(pool) {
        let left = total - count_of(deck, card).min(total);
        writeln!(out, "  {:<12} x{}", card.to_string(), left)?;
    }
    if deck.is_empty() {
        writeln!(out, "Current deck: (empty)")?;
    } else {
        writeln!(
            out,
            "Current deck ({}/{}): {}",
            deck.len(),
            SIDE_DECK_SIZE,
            format_deck(deck)
        )?;
    }
    Ok(())
}

/// Drive the builder loop until the user confirms a full deck or quits.
///
/// Returns the confirmed deck, or `None` on quit/EOF. A previously saved
/// deck is loaded as the starting point, so editing an existing deck works.
pub fn build_deck_interactive(
    store: &DeckStore,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Option<Vec<Card>>, CliError> {
    let pool = side_pool();
    let mut deck = store.load().unwrap_or_default();

    writeln!(
        out,
        "Side deck builder. Commands: add <card>, sub <card>, list, confirm, clear, q"
    )?;
    print_inventory(out, &pool, &deck)?;

    loop {
        write!(out, "deck ({}/{})> ", deck.len(), SIDE_DECK_SIZE)?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out, "Deck not saved.")?;
            return Ok(None);
        };

        match parse_deck_command(&line) {
            DeckCommand::Add(card) => {
                if deck.len() >= SIDE_DECK_SIZE {
                    ui::write_error(err, "Deck is full; 'sub' a card first or 'confirm'")?;
                } else if count_of(&deck, card) >= count_of(&pool, card) {
                    ui::write_error(err, &format!("No copies of {} left", card))?;
                } else {
                    deck.push(card);
                    writeln!(out, "Added {}.", card)?;
                }
            }
            DeckCommand::Remove(card) => match deck.iter().position(|&c| c == card) {
                Some(idx) => {
                    deck.remove(idx);
                    writeln!(out, "Removed {}.", card)?;
                }
                None => ui::write_error(err, &format!("{} is not in the deck", card))?,
            },
            DeckCommand::List => print_inventory(out, &pool, &deck)?,
            DeckCommand::Confirm => {
                if deck.len() == SIDE_DECK_SIZE {
                    store.save(&deck)?;
                    writeln!(out, "Deck saved to {}.", store.path().display())?;
                    return Ok(Some(deck));
                }
                ui::write_error(
                    err,
                    &format!(
                        "Deck must have exactly {} cards (have {})",
                        SIDE_DECK_SIZE,
                        deck.len()
                    ),
                )?;
            }
            DeckCommand::Clear => {
                store.clear()?;
                deck.clear();
                writeln!(out, "Saved deck cleared.")?;
            }
            DeckCommand::Quit => {
                writeln!(out, "Deck not saved.")?;
                return Ok(None);
            }
            DeckCommand::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
}
