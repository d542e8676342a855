//! Best-of-n selection: classify every 5-card subset of 5..=7 cards and keep
//! the strongest category.

use crate::card::Card;
use crate::category::{Category, Classification};
use crate::error::{OddsError, Result};
use crate::evaluator::{classify5, AceRule};

pub const MIN_CARDS: usize = 5;
pub const MAX_CARDS: usize = 7;

/// Call `f` once per 5-card subset of `cards`, in lexicographic index order.
/// Implemented as nested index loops: C(5,5)=1, C(6,5)=6, C(7,5)=21 calls.
#[inline]
pub fn for_each_five(cards: &[Card], mut f: impl FnMut([Card; 5])) {
    let n = cards.len();
    for a in 0..n.saturating_sub(4) {
        for b in (a + 1)..n.saturating_sub(3) {
            for c in (b + 1)..n.saturating_sub(2) {
                for d in (c + 1)..n.saturating_sub(1) {
                    for e in (d + 1)..n {
                        f([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
}

#[inline]
fn check_len(n: usize) -> Result<()> {
    if n < MIN_CARDS {
        return Err(OddsError::InsufficientCards(n));
    }
    if n > MAX_CARDS {
        return Err(OddsError::TooManyCards(n));
    }
    Ok(())
}

/// Hot-path variant for callers that already validated the length.
#[inline]
pub(crate) fn best_category_unchecked(cards: &[Card], rule: AceRule) -> Category {
    let mut best = Category::HighCard;
    for_each_five(cards, |hand| {
        let c = classify5(&hand, rule).category;
        if c > best {
            best = c;
        }
    });
    best
}

/// Strongest category among all 5-card subsets, Ace high or low.
pub fn best_category(cards: &[Card]) -> Result<Category> {
    best_category_with(cards, AceRule::default())
}

pub fn best_category_with(cards: &[Card], rule: AceRule) -> Result<Category> {
    check_len(cards.len())?;
    Ok(best_category_unchecked(cards, rule))
}

/// Classification of the first subset (in enumeration order) that reaches
/// the strongest category. Kickers are not compared.
pub fn best_classification(cards: &[Card], rule: AceRule) -> Result<Classification> {
    check_len(cards.len())?;
    let first = [cards[0], cards[1], cards[2], cards[3], cards[4]];
    let mut best = classify5(&first, rule);
    for_each_five(cards, |hand| {
        let c = classify5(&hand, rule);
        if c.category > best.category {
            best = c;
        }
    });
    Ok(best)
}
