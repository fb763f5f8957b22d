//! Service layer: statistics and aggregations over a loaded dataset.
//!
//! Everything here is pure. Services take borrowed listings and return new
//! values, so the loaded dataset is never mutated by a recompute.

pub mod box_plot;
pub mod box_stats;
pub mod grouping;
pub mod towns;

pub use box_plot::{compute_box_plot_data, BoxPlotData, CategorySummary};
pub use box_stats::{quantile_sorted, summarize, BoxStatistics, Classification, Fences};
pub use grouping::{group_by_category, CategoryGroup, GroupedObservations, Observation};
pub use towns::{
    aggregate_by_town, affordability_extremes, top_by_price, AffordabilityExtremes, TownSummary,
};
