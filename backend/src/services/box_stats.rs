//! Box-plot order statistics and IQR outlier classification.

use serde::{Deserialize, Serialize};

/// Multiplier applied to the IQR to place the outlier fences.
pub const FENCE_MULTIPLIER: f64 = 1.5;

/// Summary statistics for one category's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStatistics {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Lower whisker end; never above `q1`.
    pub whisker_min: f64,
    /// Upper whisker end; never below `q3`.
    pub whisker_max: f64,
    /// Values outside the fences, ascending.
    pub outliers: Vec<f64>,
}

/// Where a value falls relative to the fences.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Classification {
    Within,
    Outlier,
}

/// Outlier fences derived from a set of statistics.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fences {
    pub lower: f64,
    pub upper: f64,
}

impl Fences {
    pub fn classify(&self, value: f64) -> Classification {
        if value < self.lower || value > self.upper {
            Classification::Outlier
        } else {
            Classification::Within
        }
    }
}

impl BoxStatistics {
    pub fn fences(&self) -> Fences {
        Fences {
            lower: self.lower_fence,
            upper: self.upper_fence,
        }
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        self.fences().classify(value) == Classification::Outlier
    }

    /// Smallest and largest value the glyph needs on the numeric axis.
    pub fn extent(&self) -> (f64, f64) {
        let lo = self
            .outliers
            .first()
            .copied()
            .map_or(self.whisker_min, |o| o.min(self.whisker_min));
        let hi = self
            .outliers
            .last()
            .copied()
            .map_or(self.whisker_max, |o| o.max(self.whisker_max));
        (lo, hi)
    }
}

/// Linear-interpolation quantile of an ascending slice (R/NumPy type 7).
///
/// Returns `None` for an empty slice. `p` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let max_index = sorted.len() - 1;
    let position = p * max_index as f64;
    let lower = position.floor() as usize;
    if lower >= max_index {
        return Some(sorted[max_index]);
    }
    let fraction = position - lower as f64;
    let a = sorted[lower];
    let b = sorted[lower + 1];
    Some((a + (b - a) * fraction).min(b).max(a))
}

/// Compute box-plot statistics for a collection of values.
///
/// Callers filter invalid values first; non-finite entries that slip through
/// are ignored here as well. Returns `None` when nothing is left, which the
/// renderer treats as "no glyph".
pub fn summarize(values: &[f64]) -> Option<BoxStatistics> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile_sorted(&sorted, 0.25)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let lower_fence = q1 - FENCE_MULTIPLIER * iqr;
    let upper_fence = q3 + FENCE_MULTIPLIER * iqr;

    let fences = Fences {
        lower: lower_fence,
        upper: upper_fence,
    };
    let (within, outliers): (Vec<f64>, Vec<f64>) = sorted
        .iter()
        .partition(|v| fences.classify(**v) == Classification::Within);

    // With few points the interpolated quartile can sit outside every
    // in-fence value; the whiskers still have to reach the box.
    let whisker_min = within.first().map_or(q1, |v| v.min(q1));
    let whisker_max = within.last().map_or(q3, |v| v.max(q3));

    Some(BoxStatistics {
        count: sorted.len(),
        q1,
        median,
        q3,
        iqr,
        lower_fence,
        upper_fence,
        whisker_min,
        whisker_max,
        outliers,
    })
}
