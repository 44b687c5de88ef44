use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Malformed card token: {token}")]
    MalformedToken { token: String },
    #[error("Card is not in hand")]
    CardNotInHand,
    #[error("A side card was already played this turn")]
    AlreadyPlayedThisTurn,
    #[error("Cannot double: the board is empty")]
    EmptyBoardDouble,
    #[error("This card requires a sign choice")]
    ChoiceRequired,
    #[error("Invalid sign choice: {value}")]
    InvalidChoice { value: i8 },
    #[error("Action not valid in the current phase")]
    OutOfPhase,
    #[error("It's not {seat}'s turn")]
    NotYourTurn { seat: crate::session::Seat },
    #[error("A side deck must hold exactly {expected} cards, got {actual}")]
    WrongDeckSize { expected: usize, actual: usize },
}
