//! Command-line front end.
//!
//! Usage:
//!   holdem-odds AS 2H                # one run over the given cards
//!   holdem-odds                      # interactive: hole, flop, turn, river
//!   holdem-odds -n 100000 --seed 7 --json KD KC 7H 2S 9C
//!
//! Logging goes through env_logger; set RUST_LOG or pass -v.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;

use holdem_odds::{
    aggregate, parse_cards, AceRule, Card, CardSet, CategoryShare, Deck, SimulationConfig,
    Simulator, DEFAULT_TRIALS,
};

#[derive(Parser, Debug)]
#[command(
    name = "holdem-odds",
    version,
    about = "Estimate final hand-category odds for a partially known hold'em hand",
    long_about = "Completes the known cards to seven at random many times and reports how \
                  often each hand category comes out on top.\n\
                  Without cards on the command line, prompts street by street; \
                  type q to quit."
)]
struct Args {
    /// Known cards, e.g. "AS" "2h" "Td" (2 to 7 of them)
    cards: Vec<String>,

    /// Number of random completions per run
    #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
    trials: u64,

    /// Seed for reproducible results
    #[arg(long)]
    seed: Option<u64>,

    /// Ace plays high only (A-2-3-4-5 is not a straight)
    #[arg(long)]
    legacy_ace: bool,

    /// Spread trials across threads (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        let rule = if self.legacy_ace {
            AceRule::HighOnly
        } else {
            AceRule::HighOrLow
        };
        let mut config = SimulationConfig::default()
            .with_trials(self.trials)
            .with_ace_rule(rule)
            .with_parallel(self.parallel);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[derive(Serialize)]
struct Report<'a> {
    known: Vec<String>,
    trials: u64,
    categories: &'a [CategoryShare],
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn render_table(known: &[Card], trials: u64, rows: &[CategoryShare]) -> String {
    let cards: Vec<String> = known.iter().map(Card::to_string).collect();
    let mut out = format!("Odds for [{}] over {} trials\n", cards.join(" "), trials);
    out.push_str(&format!("{:<18} {:>10} {:>9}\n", "Category", "Count", "Percent"));
    out.push_str(&format!("{:-<39}\n", ""));
    for r in rows {
        out.push_str(&format!(
            "{:<18} {:>10} {:>8.3}%\n",
            r.category.name(),
            r.count,
            r.percentage
        ));
    }
    out
}

fn report(sim: &Simulator, deck: &Deck, known: &[Card], json: bool) -> anyhow::Result<()> {
    let outcome = sim.run(deck, known)?;
    let trials = sim.config().trials;
    let rows = aggregate(&outcome, trials)?;
    if json {
        let report = Report {
            known: known.iter().map(Card::to_string).collect(),
            trials,
            categories: &rows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_table(known, trials, &rows));
    }
    Ok(())
}

const STREETS: [(&str, usize); 4] = [("hole cards", 2), ("flop", 3), ("turn", 1), ("river", 1)];

fn is_sentinel(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}

/// Parse one street's input and make sure it adds `count` new cards.
fn street_cards(line: &str, count: usize, known: &[Card]) -> anyhow::Result<Vec<Card>> {
    let cards = parse_cards(line)?;
    if cards.len() != count {
        bail!("expected {} card(s), got {}", count, cards.len());
    }
    let mut seen = CardSet::from_cards(known.iter().copied());
    if let Err(dup) = seen.insert_unique(&cards) {
        bail!("card {} was already dealt", dup);
    }
    Ok(cards)
}

fn interactive(sim: &Simulator, deck: &Deck, json: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    'hands: loop {
        let mut known: Vec<Card> = Vec::with_capacity(7);
        for (street, count) in STREETS {
            loop {
                print!("{} ({} card(s), q to quit): ", street, count);
                stdout.flush()?;
                let line = match lines.next() {
                    Some(line) => line.context("reading stdin")?,
                    None => break 'hands,
                };
                if is_sentinel(&line) {
                    break 'hands;
                }
                match street_cards(&line, count, &known) {
                    Ok(cards) => {
                        known.extend(cards);
                        break;
                    }
                    Err(e) => eprintln!("{e:#}"),
                }
            }
            report(sim, deck, &known, json)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let sim = Simulator::new(args.config());
    let deck = Deck::standard();

    if args.cards.is_empty() {
        return interactive(&sim, &deck, args.json);
    }

    let known = parse_cards(&args.cards.join(" ")).context("parsing known cards")?;
    report(&sim, &deck, &known, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_odds::SimulationOutcome;

    #[test]
    fn args_map_onto_config() {
        let args = Args::parse_from(["holdem-odds", "-n", "500", "--seed", "3", "--legacy-ace", "AS", "2H"]);
        let c = args.config();
        assert_eq!(c.trials, 500);
        assert_eq!(c.seed, Some(3));
        assert_eq!(c.ace_rule, AceRule::HighOnly);
        assert_eq!(args.cards, vec!["AS", "2H"]);
    }

    #[test]
    fn street_input_is_checked() {
        let known = parse_cards("AS 2H").unwrap();
        assert_eq!(street_cards("kd qc jh", 3, &known).unwrap().len(), 3);
        assert!(street_cards("kd qc", 3, &known).is_err());
        assert!(street_cards("kd qc as", 3, &known).is_err());
        assert!(street_cards("kd qc zz", 3, &known).is_err());
    }

    #[test]
    fn sentinels() {
        assert!(is_sentinel("q"));
        assert!(is_sentinel(" QUIT "));
        assert!(!is_sentinel("qs"));
    }

    #[test]
    fn table_lists_every_category() {
        let out = SimulationOutcome::from_counts([6, 4, 0, 0, 0, 0, 0, 0, 0]);
        let rows = aggregate(&out, 10).unwrap();
        let known = parse_cards("AS 2H").unwrap();
        let table = render_table(&known, 10, &rows);
        assert!(table.starts_with("Odds for [As 2h] over 10 trials"));
        assert!(table.contains("High Card"));
        assert!(table.contains("60.000%"));
        assert!(table.contains("Straight Flush"));
    }
}
