//! Axis scales mapping data values to pixel positions.

use crate::models::ScaleType;

/// Step between "nice" ticks (1, 2 or 5 times a power of ten) covering
/// `[lo, hi]` with roughly `count` ticks.
pub fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let span = (hi - lo).abs();
    if span == 0.0 || !span.is_finite() || count == 0 {
        return 1.0;
    }
    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Padded and rounded domain covering `[lo, hi]`. A non-negative extent
    /// never gets a negative lower bound.
    pub fn nice_domain(lo: f64, hi: f64, tick_count: usize) -> (f64, f64) {
        let span = hi - lo;
        let pad = if span > 0.0 {
            span * 0.05
        } else {
            (hi.abs() * 0.1).max(1.0)
        };
        let mut padded_lo = lo - pad;
        if lo >= 0.0 && padded_lo < 0.0 {
            padded_lo = 0.0;
        }
        let padded_hi = hi + pad;
        let step = tick_step(padded_lo, padded_hi, tick_count);
        (
            (padded_lo / step).floor() * step,
            (padded_hi / step).ceil() * step,
        )
    }

    pub fn map(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return Some((r0 + r1) / 2.0);
        }
        Some(r0 + (value - d0) / (d1 - d0) * (r1 - r0))
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = (self.domain.0.min(self.domain.1), self.domain.0.max(self.domain.1));
        let step = tick_step(lo, hi, count);
        let start = (lo / step).ceil() as i64;
        let stop = (hi / step).floor() as i64;
        (start..=stop).map(|i| i as f64 * step).collect()
    }
}

/// Logarithmic mapping; undefined (and therefore `None`) at or below zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LogScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LogScale {
    /// Build a log scale. Non-positive domain bounds are replaced so the
    /// domain always starts at a positive value.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let lo = if domain.0 > 0.0 { domain.0 } else { 1.0 };
        let hi = if domain.1 > lo { domain.1 } else { lo * 10.0 };
        Self {
            domain: (lo, hi),
            range,
        }
    }

    /// Domain widened to whole powers of ten around `[min_positive, hi]`.
    pub fn nice_domain(min_positive: f64, hi: f64) -> (f64, f64) {
        let lo = if min_positive > 0.0 { min_positive } else { 1.0 };
        let hi = hi.max(lo);
        let lo_exp = lo.log10().floor();
        let mut hi_exp = hi.log10().ceil();
        if hi_exp <= lo_exp {
            hi_exp = lo_exp + 1.0;
        }
        (10f64.powf(lo_exp), 10f64.powf(hi_exp))
    }

    pub fn map(&self, value: f64) -> Option<f64> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        let (d0, d1) = (self.domain.0.ln(), self.domain.1.ln());
        let (r0, r1) = self.range;
        Some(r0 + (value.ln() - d0) / (d1 - d0) * (r1 - r0))
    }

    /// Powers of ten inside the domain, with 2x and 5x multiples added when
    /// the domain spans less than two decades.
    pub fn ticks(&self) -> Vec<f64> {
        let (lo, hi) = self.domain;
        let lo_exp = lo.log10().floor() as i32;
        let hi_exp = hi.log10().ceil() as i32;
        let dense = hi_exp - lo_exp < 2;
        let multipliers: &[f64] = if dense { &[1.0, 2.0, 5.0] } else { &[1.0] };

        let tolerance = 1e-9;
        (lo_exp..=hi_exp)
            .flat_map(|e| multipliers.iter().map(move |m| m * 10f64.powi(e)))
            .filter(|v| *v >= lo * (1.0 - tolerance) && *v <= hi * (1.0 + tolerance))
            .collect()
    }
}

/// The chart's numeric axis, linear or logarithmic.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NumericScale {
    Linear(LinearScale),
    Log(LogScale),
}

impl NumericScale {
    /// Scale covering `extent`. On a log axis the lower bound comes from
    /// `min_positive`, the smallest positive value present.
    pub fn for_extent(
        scale_type: ScaleType,
        extent: Option<(f64, f64)>,
        min_positive: Option<f64>,
        range: (f64, f64),
        tick_count: usize,
    ) -> Self {
        match scale_type {
            ScaleType::Linear => {
                let (lo, hi) = extent.unwrap_or((0.0, 1.0));
                NumericScale::Linear(LinearScale::new(
                    LinearScale::nice_domain(lo, hi, tick_count),
                    range,
                ))
            }
            ScaleType::Log => {
                let hi = extent.map(|(_, hi)| hi).unwrap_or(10.0);
                let lo = min_positive.unwrap_or(1.0);
                NumericScale::Log(LogScale::new(LogScale::nice_domain(lo, hi), range))
            }
        }
    }

    pub fn map(&self, value: f64) -> Option<f64> {
        match self {
            NumericScale::Linear(s) => s.map(value),
            NumericScale::Log(s) => s.map(value),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        match self {
            NumericScale::Linear(s) => s.domain,
            NumericScale::Log(s) => s.domain,
        }
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            NumericScale::Linear(s) => s.ticks(count),
            NumericScale::Log(s) => s.ticks(),
        }
    }
}

/// Evenly spaced bands for categorical positions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub range: (f64, f64),
    /// Fraction of each step left empty between bands.
    pub padding: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        Self {
            count,
            range,
            padding: padding.clamp(0.0, 0.95),
        }
    }

    pub fn step(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.count as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Left edge of band `index`.
    pub fn start(&self, index: usize) -> f64 {
        self.range.0 + index as f64 * self.step() + self.step() * self.padding / 2.0
    }

    pub fn center(&self, index: usize) -> f64 {
        self.start(index) + self.bandwidth() / 2.0
    }
}
