//! Texas Hold'em hand-category odds by Monte Carlo completion.
//!
//! Given 2..=7 known cards, repeatedly deal the rest of a 7-card hand from
//! the deck, classify the best 5-card subset, and count categories.

pub mod card;
pub mod bitboard;
pub mod deck;
pub mod category;
pub mod evaluator;
pub mod selector;
pub mod simulator;
pub mod aggregate;
pub mod config;
pub mod error;

pub use card::{parse_cards, Card, Rank, Suit};
pub use bitboard::{CardSet, MASK13};
pub use deck::Deck;
pub use category::{Category, Classification};
pub use evaluator::{classify, classify5, classify_with, AceRule};
pub use selector::{best_category, best_category_with, best_classification, for_each_five};
pub use simulator::{simulate, simulate_with, SimulationOutcome, Simulator, MIN_KNOWN};
pub use aggregate::{aggregate, CategoryShare};
pub use config::{SimulationConfig, DEFAULT_TRIALS};
pub use error::{OddsError, Result};

#[cfg(feature = "parallel")]
pub use simulator::simulate_par;
