//! Selectable numeric metrics and axis scale modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Listing;

/// How values of a metric are shown to the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Whole dollars with thousands separators (`$1,250,000`).
    Currency,
    /// Square feet with thousands separators (`1,800 sqft`).
    Area,
    /// Multiplier with one decimal (`7.6x`).
    Ratio,
    /// Plain number with thousands separators.
    Plain,
}

/// Numeric columns a user can select for the box plot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Price,
    PricePerSqft,
    Sqft,
    PriceToIncomeRatio,
    MedianIncome,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Price,
        Metric::PricePerSqft,
        Metric::Sqft,
        Metric::PriceToIncomeRatio,
        Metric::MedianIncome,
    ];

    /// Axis and selector label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Price => "Price ($)",
            Metric::PricePerSqft => "Price per Sqft ($)",
            Metric::Sqft => "Square Feet",
            Metric::PriceToIncomeRatio => "Price-to-Income Ratio",
            Metric::MedianIncome => "Median Household Income ($)",
        }
    }

    /// Column key in the merged table.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::PricePerSqft => "pricePerSqft",
            Metric::Sqft => "sqft",
            Metric::PriceToIncomeRatio => "priceToIncomeRatio",
            Metric::MedianIncome => "medianIncome",
        }
    }

    pub fn format(&self) -> ValueFormat {
        match self {
            Metric::Price | Metric::PricePerSqft | Metric::MedianIncome => ValueFormat::Currency,
            Metric::Sqft => ValueFormat::Area,
            Metric::PriceToIncomeRatio => ValueFormat::Ratio,
        }
    }

    /// Raw value of this metric for a listing, before validity filtering.
    pub fn value_of(&self, listing: &Listing) -> Option<f64> {
        match self {
            Metric::Price => listing.price,
            Metric::PricePerSqft => listing.effective_price_per_sqft(),
            Metric::Sqft => listing.sqft,
            Metric::PriceToIncomeRatio => listing.effective_price_to_income(),
            Metric::MedianIncome => listing.median_income,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| {
                m.column().eq_ignore_ascii_case(key)
                    || m.column().replace('_', "").eq_ignore_ascii_case(&key.replace(['_', '-'], ""))
            })
            .ok_or_else(|| {
                format!(
                    "Invalid metric: {}. Must be one of: price, pricePerSqft, sqft, priceToIncomeRatio, medianIncome",
                    s
                )
            })
    }
}

/// Numeric axis mapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    #[default]
    Linear,
    Log,
}

impl ScaleType {
    pub fn from_log_flag(use_log: bool) -> Self {
        if use_log {
            ScaleType::Log
        } else {
            ScaleType::Linear
        }
    }

    pub fn is_log(&self) -> bool {
        matches!(self, ScaleType::Log)
    }

    /// The other mode, used by the scale toggle.
    pub fn toggled(&self) -> Self {
        match self {
            ScaleType::Linear => ScaleType::Log,
            ScaleType::Log => ScaleType::Linear,
        }
    }
}

/// User-selectable chart controls.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub metric: Metric,
    #[serde(default)]
    pub scale: ScaleType,
}

impl ChartOptions {
    pub fn new(metric: Metric, scale: ScaleType) -> Self {
        Self { metric, scale }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::new(Metric::Price, ScaleType::Linear)
    }
}
