//! Errors for evaluation, simulation and parsing.
//!
//! Every variant is a caller-input error; they are raised before any
//! sampling starts, so a failed call never returns partial counts.

use crate::card::Card;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum OddsError {
    #[error("a hand must have exactly 5 cards, got {0}")]
    InvalidHandSize(usize),

    #[error("need at least 5 cards to pick a best hand, got {0}")]
    InsufficientCards(usize),

    #[error("at most 7 cards can form a hold'em hand, got {0}")]
    TooManyCards(usize),

    #[error("deck cannot complete a 7-card hand: need {needed} more cards, {available} available")]
    DeckExhausted { needed: usize, available: usize },

    #[error("duplicate card {0}")]
    DuplicateCard(Card),

    #[error("card {0} is not in the deck")]
    CardNotInDeck(Card),

    #[error("trial count must be positive")]
    InvalidTrialCount,

    #[error("between 2 and 7 known cards are required, got {0}")]
    InvalidKnownCount(usize),

    #[error("malformed card token {0:?}")]
    ParseCard(String),
}

pub type Result<T> = std::result::Result<T, OddsError>;
