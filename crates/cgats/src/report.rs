//! Statistical summary of a delta-E data set

use std::fmt;

use crate::color::DeMethod;
use crate::error::{CgatsError, CgatsResult};
use crate::object::CgatsObject;

/// Fraction of sorted values counted as the best group
const BEST_FRACTION: f64 = 0.9;

/// Statistics of one group of delta-E values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (0 for fewer than two values)
    pub stdev: f64,
}

impl DeSummary {
    /// Summarize a non-empty, ascending slice
    fn from_sorted(values: &[f64]) -> Self {
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let stdev = if count < 2 {
            0.0
        } else {
            let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            (sum_sq / (count - 1) as f64).sqrt()
        };

        Self {
            count,
            mean,
            min: values[0],
            max: values[count - 1],
            stdev,
        }
    }
}

impl fmt::Display for DeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\t{:>10}: {:.4}", "Average DE", self.mean)?;
        writeln!(f, "\t{:>10}: {:.4}", "Max DE", self.max)?;
        writeln!(f, "\t{:>10}: {:.4}", "Min DE", self.min)?;
        writeln!(f, "\t{:>10}: {:.4}", "StdDev DE", self.stdev)
    }
}

/// Overall, best 90% and worst 10% statistics of a delta-E column
#[derive(Debug, Clone, PartialEq)]
pub struct DeReport {
    pub method: DeMethod,
    pub overall: DeSummary,
    pub best_90: DeSummary,
    pub worst_10: DeSummary,
}

impl DeReport {
    /// Build a report from the first delta-E column of `cgo`
    pub fn new(cgo: &CgatsObject) -> CgatsResult<Self> {
        let (position, method) = cgo
            .data_format()?
            .iter()
            .enumerate()
            .find_map(|(i, tag)| DeMethod::from_field(*tag).map(|m| (i, m)))
            .ok_or(CgatsError::NoDataFormat)?;

        let mut values = cgo
            .data()?
            .column(position)
            .into_iter()
            .filter_map(|v| v.float)
            .collect::<Vec<_>>();

        if values.is_empty() {
            return Err(CgatsError::NoData);
        }
        values.sort_by(f64::total_cmp);

        let (best, worst) = values.split_at(split_index(values.len()));

        // A single value cannot be split
        let (best, worst) = if worst.is_empty() { (best, best) } else { (best, worst) };

        Ok(Self {
            method,
            overall: DeSummary::from_sorted(&values),
            best_90: DeSummary::from_sorted(best),
            worst_10: DeSummary::from_sorted(worst),
        })
    }
}

/// Index splitting `len` sorted values into best and worst groups
///
/// Clamped so that both groups are non-empty when `len > 1`.
fn split_index(len: usize) -> usize {
    let index = (len as f64 * BEST_FRACTION) as usize;
    index.clamp(1, len.saturating_sub(1).max(1))
}

impl fmt::Display for DeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of Samples: {}", self.overall.count)?;
        writeln!(f, "DE Formula: {}\n", self.method)?;

        writeln!(f, "OVERALL - ({} colors)", self.overall.count)?;
        writeln!(f, "{}", self.overall)?;

        writeln!(f, "BEST 90% - ({} colors)", self.best_90.count)?;
        writeln!(f, "{}", self.best_90)?;

        writeln!(f, "WORST 10% - ({} colors)", self.worst_10.count)?;
        writeln!(f, "{}", self.worst_10)
    }
}
