//! 4×13 bitboard card set: 4 suits, 13 ranks per suit.

use crate::card::{Card, Suit};

pub const MASK13: u16 = (1u16 << 13) - 1;

/// A set of cards stored as one 13-bit rank mask per suit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct CardSet {
    suits: [u16; 4],
}

impl CardSet {
    #[inline(always)]
    pub const fn new() -> Self {
        Self { suits: [0; 4] }
    }

    #[inline]
    pub fn from_cards<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut b = Self::new();
        for c in iter {
            let _ = b.insert(c);
        }
        b
    }

    #[inline(always)]
    pub const fn suit_mask(&self, suit: Suit) -> u16 {
        self.suits[suit.idx()]
    }

    #[inline(always)]
    const fn bit(card: Card) -> u16 {
        1u16 << (card.rank.idx() as u16)
    }

    /// Returns true if card was already present.
    #[inline(always)]
    pub fn insert(&mut self, card: Card) -> bool {
        let s = card.suit.idx();
        let bit = Self::bit(card);
        let old = self.suits[s];
        let already = (old & bit) != 0;
        self.suits[s] = (old | bit) & MASK13;
        already
    }

    #[inline(always)]
    pub fn remove(&mut self, card: Card) {
        let s = card.suit.idx();
        self.suits[s] &= !Self::bit(card) & MASK13;
    }

    #[inline(always)]
    pub const fn contains(&self, card: Card) -> bool {
        (self.suits[card.suit.idx()] & Self::bit(card)) != 0
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        (self.suits[0].count_ones()
            + self.suits[1].count_ones()
            + self.suits[2].count_ones()
            + self.suits[3].count_ones()) as usize
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert every card, failing on the first one already present.
    pub fn insert_unique<'a, I>(&mut self, cards: I) -> Result<(), Card>
    where
        I: IntoIterator<Item = &'a Card>,
    {
        for &c in cards {
            if self.insert(c) {
                return Err(c);
            }
        }
        Ok(())
    }
}
