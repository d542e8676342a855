//! 5-card hand classifier.
//!
//! Counts ranks, flattens the counts into an ascending rank sequence, checks
//! flush/straight, then picks the category from the number of distinct ranks.

use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};
use crate::category::{Category, Classification};
use crate::error::{OddsError, Result};

/// How an Ace takes part in straights.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AceRule {
    /// Ace plays high (T-J-Q-K-A) or low (A-2-3-4-5).
    #[default]
    HighOrLow,
    /// Ace plays high only; A-2-3-4-5 is not a straight.
    HighOnly,
}

const WHEEL: [Rank; 5] = [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Ace];

#[inline(always)]
fn is_straight(ranks: &[Rank; 5], rule: AceRule) -> bool {
    if ranks.windows(2).all(|w| w[1].value() == w[0].value() + 1) {
        return true;
    }
    rule == AceRule::HighOrLow && *ranks == WHEEL
}

#[inline(always)]
fn is_flush(hand: &[Card; 5]) -> bool {
    let suit = hand[0].suit;
    hand.iter().all(|c| c.suit == suit)
}

/// Classify exactly five cards. Input order does not matter.
#[inline]
pub fn classify5(hand: &[Card; 5], rule: AceRule) -> Classification {
    let mut counts = [0u8; 13];
    for c in hand {
        counts[c.rank.idx() as usize] += 1;
    }

    let mut ranks = [Rank::Two; 5];
    let mut n = 0usize;
    let mut distinct = 0usize;
    let mut min_count = u8::MAX;
    let mut max_count = 0u8;
    for (i, &k) in counts.iter().enumerate() {
        if k == 0 {
            continue;
        }
        distinct += 1;
        min_count = min_count.min(k);
        max_count = max_count.max(k);
        for _ in 0..k {
            ranks[n] = Rank::from_u8(i as u8);
            n += 1;
        }
    }

    let flush = is_flush(hand);
    let straight = is_straight(&ranks, rule);

    let category = if flush && straight {
        Category::StraightFlush
    } else if distinct == 2 {
        // 4+1 or 3+2
        if min_count == 1 {
            Category::Quads
        } else {
            Category::FullHouse
        }
    } else if flush {
        Category::Flush
    } else if straight {
        Category::Straight
    } else if distinct == 3 {
        // 3+1+1 or 2+2+1
        if max_count == 3 {
            Category::Trips
        } else {
            Category::TwoPair
        }
    } else if distinct == 4 {
        Category::OnePair
    } else {
        Category::HighCard
    };

    Classification { category, ranks }
}

/// Classify a hand that must hold exactly five cards, Ace high or low.
pub fn classify(hand: &[Card]) -> Result<Classification> {
    classify_with(hand, AceRule::default())
}

pub fn classify_with(hand: &[Card], rule: AceRule) -> Result<Classification> {
    let five: &[Card; 5] = hand
        .try_into()
        .map_err(|_| OddsError::InvalidHandSize(hand.len()))?;
    Ok(classify5(five, rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{parse_cards, Rank::*};

    fn cat(s: &str) -> Category {
        classify(&parse_cards(s).unwrap()).unwrap().category
    }

    #[test]
    fn reference_hands() {
        assert_eq!(cat("2S 3S 4S 5S 6S"), Category::StraightFlush);
        assert_eq!(cat("AS AH AD AC 2S"), Category::Quads);
        assert_eq!(cat("2S 2H 3D 3C 3S"), Category::FullHouse);
        assert_eq!(cat("2S 7H 9D JC AS"), Category::HighCard);
    }

    #[test]
    fn every_category() {
        assert_eq!(cat("TH JH QH KH AH"), Category::StraightFlush);
        assert_eq!(cat("9C 9D 9H 9S KD"), Category::Quads);
        assert_eq!(cat("KC KD KH 4S 4D"), Category::FullHouse);
        assert_eq!(cat("2D 8D TD JD KD"), Category::Flush);
        assert_eq!(cat("6C 7D 8H 9S TC"), Category::Straight);
        assert_eq!(cat("5C 5D 5H 9S KC"), Category::Trips);
        assert_eq!(cat("5C 5D 9H 9S KC"), Category::TwoPair);
        assert_eq!(cat("5C 5D 8H 9S KC"), Category::OnePair);
        assert_eq!(cat("2C 5D 8H 9S KC"), Category::HighCard);
    }

    #[test]
    fn wheel_depends_on_ace_rule() {
        let wheel = parse_cards("AS 2H 3D 4C 5S").unwrap();
        assert_eq!(classify(&wheel).unwrap().category, Category::Straight);
        assert_eq!(
            classify_with(&wheel, AceRule::HighOnly).unwrap().category,
            Category::HighCard
        );

        let steel = parse_cards("AD 2D 3D 4D 5D").unwrap();
        assert_eq!(classify(&steel).unwrap().category, Category::StraightFlush);
        assert_eq!(
            classify_with(&steel, AceRule::HighOnly).unwrap().category,
            Category::Flush
        );
    }

    #[test]
    fn no_wraparound_straight() {
        assert_eq!(cat("QS KH AD 2C 3S"), Category::HighCard);
    }

    #[test]
    fn ranks_are_sorted_with_repeats() {
        let c = classify(&parse_cards("KD 3C KS 3H 3D").unwrap()).unwrap();
        assert_eq!(c.category, Category::FullHouse);
        assert_eq!(c.ranks, [Three, Three, Three, King, King]);
    }

    #[test]
    fn input_order_is_irrelevant() {
        let mut hand = parse_cards("5C 5D 9H 9S KC").unwrap();
        let expected = classify(&hand).unwrap();
        hand.reverse();
        assert_eq!(classify(&hand).unwrap(), expected);
        hand.rotate_left(2);
        assert_eq!(classify(&hand).unwrap(), expected);
    }

    #[test]
    fn wrong_size_is_rejected() {
        let cards = parse_cards("2S 3S 4S 5S 6S 7S").unwrap();
        assert_eq!(classify(&cards), Err(OddsError::InvalidHandSize(6)));
        assert_eq!(classify(&cards[..4]), Err(OddsError::InvalidHandSize(4)));
        assert_eq!(classify(&[]), Err(OddsError::InvalidHandSize(0)));
    }
}
