//! Turn raw category counts into a ranked percentage table.

use serde::Serialize;

use crate::category::Category;
use crate::error::{OddsError, Result};
use crate::simulator::SimulationOutcome;

/// One row of an aggregated outcome.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub count: u64,
    /// `count / trials * 100`
    pub percentage: f64,
}

/// All nine categories, most frequent first. Equal counts keep category order.
pub fn aggregate(outcome: &SimulationOutcome, trials: u64) -> Result<Vec<CategoryShare>> {
    if trials == 0 {
        return Err(OddsError::InvalidTrialCount);
    }
    let total = trials as f64;
    let mut rows: Vec<CategoryShare> = outcome
        .iter()
        .map(|(category, count)| CategoryShare {
            category,
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(rows)
}
