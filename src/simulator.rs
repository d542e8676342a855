//! Monte Carlo completion of partially known hands.
//!
//! Each trial fills the hand up to seven cards with cards drawn uniformly
//! without replacement from the rest of the deck, then records the best
//! category. Randomness is injected so tests can seed it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::bitboard::CardSet;
use crate::card::Card;
use crate::category::Category;
use crate::config::SimulationConfig;
use crate::deck::Deck;
use crate::error::{OddsError, Result};
use crate::evaluator::AceRule;
use crate::selector::{best_category_unchecked, MAX_CARDS};

/// Fewest known cards a simulation accepts (the hole cards).
pub const MIN_KNOWN: usize = 2;

/// Per-category counts of a simulation run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SimulationOutcome {
    counts: [u64; Category::COUNT],
}

impl SimulationOutcome {
    pub const fn from_counts(counts: [u64; Category::COUNT]) -> Self {
        Self { counts }
    }

    #[inline(always)]
    pub fn record(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    #[inline(always)]
    pub fn count(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    pub fn counts(&self) -> &[u64; Category::COUNT] {
        &self.counts
    }

    /// Total of all counts; equals the trial count of the run.
    pub fn trials(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Sum two outcomes. Associative and commutative.
    pub fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.counts.iter_mut().zip(other.counts) {
            *a += b;
        }
        self
    }

    /// (category, count) in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.iter().map(move |&c| (c, self.count(c)))
    }
}

/// Check every precondition and return the cards left to draw from.
fn prepare(deck: &Deck, known: &[Card], trials: u64) -> Result<Vec<Card>> {
    if trials == 0 {
        return Err(OddsError::InvalidTrialCount);
    }
    if !(MIN_KNOWN..=MAX_CARDS).contains(&known.len()) {
        return Err(OddsError::InvalidKnownCount(known.len()));
    }

    let mut used = CardSet::new();
    used.insert_unique(known).map_err(OddsError::DuplicateCard)?;
    if let Some(&missing) = known.iter().find(|&&c| !deck.contains(c)) {
        return Err(OddsError::CardNotInDeck(missing));
    }

    let needed = MAX_CARDS - known.len();
    let available = deck.len() - known.len();
    if available < needed {
        return Err(OddsError::DeckExhausted { needed, available });
    }

    Ok(deck.without(&used))
}

/// Partial Fisher–Yates: `out[i]` is drawn uniformly from `pool[i..]`.
///
/// The pool keeps the same cards whatever order earlier calls left it in,
/// and every draw is uniform over the cards not yet taken, so reusing it
/// across trials is equivalent to copying the deck each time.
#[inline(always)]
fn draw_into<R: Rng + ?Sized>(pool: &mut [Card], out: &mut [Card], rng: &mut R) {
    let n = pool.len();
    for (i, slot) in out.iter_mut().enumerate() {
        let j = rng.random_range(i..n);
        pool.swap(i, j);
        *slot = pool[i];
    }
}

fn run_trials<R: Rng + ?Sized>(
    known: &[Card],
    pool: &mut [Card],
    trials: u64,
    rule: AceRule,
    rng: &mut R,
) -> SimulationOutcome {
    let k = known.len();
    let mut hand = [known[0]; MAX_CARDS];
    hand[..k].copy_from_slice(known);

    let mut outcome = SimulationOutcome::default();
    for _ in 0..trials {
        draw_into(pool, &mut hand[k..], rng);
        outcome.record(best_category_unchecked(&hand, rule));
    }
    outcome
}

/// Estimate the category distribution of `known` completed to seven cards
/// from `deck`, Ace high or low.
///
/// - `known`: 2..=7 distinct cards, all in `deck`
/// - `trials`: positive; the returned counts sum to it
pub fn simulate<R: Rng + ?Sized>(
    deck: &Deck,
    known: &[Card],
    trials: u64,
    rng: &mut R,
) -> Result<SimulationOutcome> {
    simulate_with(deck, known, trials, AceRule::default(), rng)
}

pub fn simulate_with<R: Rng + ?Sized>(
    deck: &Deck,
    known: &[Card],
    trials: u64,
    rule: AceRule,
    rng: &mut R,
) -> Result<SimulationOutcome> {
    let mut pool = prepare(deck, known, trials)?;
    Ok(run_trials(known, &mut pool, trials, rule, rng))
}

/// Runs simulations according to a [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run `config.trials` trials. Unseeded runs draw a fresh seed and log it
    /// at debug level so a surprising result can be replayed.
    pub fn run(&self, deck: &Deck, known: &[Card]) -> Result<SimulationOutcome> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let trials = self.config.trials;
        let rule = self.config.ace_rule;
        log::debug!(
            "simulating {} trials: known={} deck={} seed={} rule={:?} parallel={}",
            trials,
            known.len(),
            deck.len(),
            seed,
            rule,
            self.config.parallel,
        );

        let outcome = if self.config.parallel {
            self.run_parallel(deck, known, seed)?
        } else {
            let mut rng = SmallRng::seed_from_u64(seed);
            simulate_with(deck, known, trials, rule, &mut rng)?
        };

        log::debug!("finished {} trials", outcome.trials());
        Ok(outcome)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self, deck: &Deck, known: &[Card], seed: u64) -> Result<SimulationOutcome> {
        simulate_par(deck, known, self.config.trials, self.config.ace_rule, seed)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel(&self, deck: &Deck, known: &[Card], seed: u64) -> Result<SimulationOutcome> {
        log::warn!("built without the `parallel` feature; running sequentially");
        let mut rng = SmallRng::seed_from_u64(seed);
        simulate_with(deck, known, self.config.trials, self.config.ace_rule, &mut rng)
    }
}

#[cfg(feature = "parallel")]
mod par {
    use super::*;
    use rayon::prelude::*;

    /// Trials per rayon task. Fixed so the split, and therefore a seeded
    /// result, does not depend on the number of threads.
    pub const CHUNK_TRIALS: u64 = 4096;

    /// splitmix64 finalizer; spreads (seed, chunk) pairs into unrelated streams.
    fn chunk_seed(seed: u64, chunk: u64) -> u64 {
        let mut z = seed ^ chunk.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Parallel [`simulate_with`]: each chunk owns its RNG and pool, and the
    /// per-chunk counts are summed at the end.
    pub fn simulate_par(
        deck: &Deck,
        known: &[Card],
        trials: u64,
        rule: AceRule,
        seed: u64,
    ) -> Result<SimulationOutcome> {
        let pool = prepare(deck, known, trials)?;
        let chunks = trials.div_ceil(CHUNK_TRIALS);

        let outcome = (0..chunks)
            .into_par_iter()
            .map(|i| {
                let n = CHUNK_TRIALS.min(trials - i * CHUNK_TRIALS);
                let mut rng = SmallRng::seed_from_u64(chunk_seed(seed, i));
                let mut local = pool.clone();
                run_trials(known, &mut local, n, rule, &mut rng)
            })
            .reduce(SimulationOutcome::default, SimulationOutcome::merge);
        Ok(outcome)
    }
}

#[cfg(feature = "parallel")]
pub use par::simulate_par;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::parse_cards;
    use crate::selector::best_category;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn counts_sum_to_trials() {
        let deck = Deck::standard();
        let known = parse_cards("2S AH").unwrap();
        let out = simulate(&deck, &known, 10_000, &mut rng(123)).unwrap();
        assert_eq!(out.trials(), 10_000);
    }

    #[test]
    fn seeded_runs_repeat() {
        let deck = Deck::standard();
        let known = parse_cards("KD KC 7H 2S 9C").unwrap();
        let a = simulate(&deck, &known, 2_000, &mut rng(99)).unwrap();
        let b = simulate(&deck, &known, 2_000, &mut rng(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seven_known_cards_is_deterministic() {
        let deck = Deck::standard();
        let known = parse_cards("2H 9H KS 4H QH 4D 7H").unwrap();
        let expected = best_category(&known).unwrap();
        let out = simulate(&deck, &known, 500, &mut rng(1)).unwrap();
        assert_eq!(out.count(expected), 500);
    }

    #[test]
    fn known_pair_never_ends_below_one_pair() {
        let deck = Deck::standard();
        let known = parse_cards("QS QH").unwrap();
        let out = simulate(&deck, &known, 3_000, &mut rng(5)).unwrap();
        assert_eq!(out.count(Category::HighCard), 0);
    }

    #[test]
    fn exact_custom_deck_has_one_completion() {
        // deck = known + exactly the five missing cards
        let cards = parse_cards("AS KS QS JS TS 2D 3C").unwrap();
        let deck = Deck::custom(cards.iter().copied()).unwrap();
        let out = simulate(&deck, &cards[..2], 200, &mut rng(8)).unwrap();
        assert_eq!(out.count(Category::StraightFlush), 200);
    }

    #[test]
    fn preconditions() {
        let deck = Deck::standard();
        let two = parse_cards("2S AH").unwrap();

        assert_eq!(
            simulate(&deck, &two, 0, &mut rng(0)),
            Err(OddsError::InvalidTrialCount)
        );
        assert_eq!(
            simulate(&deck, &two[..1], 10, &mut rng(0)),
            Err(OddsError::InvalidKnownCount(1))
        );
        let eight = parse_cards("2S 3S 4S 5S 6S 7S 8S 9S").unwrap();
        assert_eq!(
            simulate(&deck, &eight, 10, &mut rng(0)),
            Err(OddsError::InvalidKnownCount(8))
        );

        let dup = parse_cards("2S 2S").unwrap();
        assert_eq!(
            simulate(&deck, &dup, 10, &mut rng(0)),
            Err(OddsError::DuplicateCard(dup[0]))
        );

        let short = Deck::custom(parse_cards("2S AH KD QC JH").unwrap()).unwrap();
        assert_eq!(
            simulate(&short, &two, 10, &mut rng(0)),
            Err(OddsError::DeckExhausted { needed: 5, available: 3 })
        );

        let absent = parse_cards("2S 3C").unwrap();
        assert_eq!(
            simulate(&short, &absent, 10, &mut rng(0)),
            Err(OddsError::CardNotInDeck(absent[1]))
        );
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = SimulationOutcome::default();
        a.record(Category::Flush);
        a.record(Category::HighCard);
        let mut b = SimulationOutcome::default();
        b.record(Category::Flush);
        let m = a.merge(b);
        assert_eq!(m.count(Category::Flush), 2);
        assert_eq!(m.trials(), 3);
        assert_eq!(m, b.merge(a));
    }

    #[test]
    fn simulator_uses_config() {
        let cfg = SimulationConfig::default().with_trials(1_000).with_seed(42);
        let sim = Simulator::new(cfg);
        let deck = Deck::standard();
        let known = parse_cards("AS AD").unwrap();
        let a = sim.run(&deck, &known).unwrap();
        let b = sim.run(&deck, &known).unwrap();
        assert_eq!(a.trials(), 1_000);
        assert_eq!(a, b);
    }

    #[test]
    fn simulator_without_seed_still_counts_all_trials() {
        let sim = Simulator::new(SimulationConfig::default().with_trials(300));
        let out = sim.run(&Deck::standard(), &parse_cards("7C 8C").unwrap()).unwrap();
        assert_eq!(out.trials(), 300);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_is_seeded_and_complete() {
        let deck = Deck::standard();
        let known = parse_cards("2S AH").unwrap();
        let trials = 3 * par::CHUNK_TRIALS + 17;
        let a = simulate_par(&deck, &known, trials, AceRule::default(), 11).unwrap();
        let b = simulate_par(&deck, &known, trials, AceRule::default(), 11).unwrap();
        assert_eq!(a.trials(), trials);
        assert_eq!(a, b);
        assert_eq!(
            simulate_par(&deck, &known, 0, AceRule::default(), 11),
            Err(OddsError::InvalidTrialCount)
        );
    }
}
