//! Decks: ordered sequences of unique cards.

use crate::bitboard::CardSet;
use crate::card::{Card, Rank, Suit};
use crate::error::{OddsError, Result};

/// An ordered collection of distinct cards.
///
/// The standard deck holds all 52 cards; custom decks may hold any subset
/// (a short deck, a deck with cards already burned, ...).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
    set: CardSet,
}

impl Deck {
    /// All 52 cards, suit-major then rank ascending.
    pub fn standard() -> Self {
        let cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(s, r)))
            .collect();
        let set = CardSet::from_cards(cards.iter().copied());
        Self { cards, set }
    }

    /// Build a deck from arbitrary cards, rejecting duplicates.
    pub fn custom<I: IntoIterator<Item = Card>>(cards: I) -> Result<Self> {
        let cards: Vec<Card> = cards.into_iter().collect();
        let mut set = CardSet::new();
        set.insert_unique(&cards).map_err(OddsError::DuplicateCard)?;
        Ok(Self { cards, set })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.set.contains(card)
    }

    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards of this deck not in `excluded`, in deck order.
    pub fn without(&self, excluded: &CardSet) -> Vec<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|&c| !excluded.contains(c))
            .collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
