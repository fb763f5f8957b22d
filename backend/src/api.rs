//! Public API surface for the chart library.
//!
//! This file consolidates the serializable output types.
//! All types derive Serialize for JSON output.

pub use crate::models::{ChartOptions, Listing, Metric, PropertyType, ScaleType};
pub use crate::render::Tooltip;
pub use crate::services::AffordabilityExtremes;
pub use crate::services::BoxPlotData;
pub use crate::services::BoxStatistics;
pub use crate::services::CategorySummary;
pub use crate::services::Observation;
pub use crate::services::TownSummary;

use serde::{Deserialize, Serialize};

use crate::data::Dataset;
use crate::services::{aggregate_by_town, affordability_extremes, top_by_price};

/// Towns shown in the risk breakdown unless a caller asks for another count.
pub const DEFAULT_RISK_TOWNS: usize = 30;

/// Basic facts about a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub source: String,
    pub listing_count: usize,
    pub city_count: usize,
}

impl DatasetInfo {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut cities: Vec<&str> = dataset.listings().iter().map(|l| l.city.as_str()).collect();
        cities.sort_unstable();
        cities.dedup();
        Self {
            source: dataset.source().to_string(),
            listing_count: dataset.len(),
            city_count: cities.len(),
        }
    }
}

/// Box-plot statistics for one metric, with the dataset they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub dataset: DatasetInfo,
    pub options: ChartOptions,
    pub box_plot: BoxPlotData,
}

/// Town rankings: affordability extremes plus the most expensive towns
/// used for the risk breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TownsReport {
    pub dataset: DatasetInfo,
    pub extremes: AffordabilityExtremes,
    /// The `risk_towns` most expensive towns, sized independently of `extremes`.
    pub top_by_price: Vec<TownSummary>,
}

impl TownsReport {
    /// `extremes` holds `n` towns at each end; `top_by_price` holds `risk_towns`.
    pub fn from_dataset(dataset: &Dataset, n: usize, risk_towns: usize) -> Self {
        let towns = aggregate_by_town(dataset.listings());
        Self {
            dataset: DatasetInfo::from_dataset(dataset),
            extremes: affordability_extremes(&towns, n),
            top_by_price: top_by_price(&towns, risk_towns),
        }
    }
}
