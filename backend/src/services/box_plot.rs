//! Box-plot data assembly: grouping, statistics and outlier records.

use log::debug;
use serde::{Deserialize, Serialize};

use super::box_stats::{summarize, BoxStatistics};
use super::grouping::{group_by_category, Observation};
use crate::models::{Listing, Metric, PropertyType};

/// Statistics and outlier observations for one property type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub property_type: PropertyType,
    pub stats: BoxStatistics,
    /// Observations outside the fences, ascending by value.
    pub outliers: Vec<Observation>,
}

/// Everything the renderer needs for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotData {
    pub metric: Metric,
    /// Non-empty categories in axis order.
    pub categories: Vec<CategorySummary>,
    /// Observations that made it into a group.
    pub observation_count: usize,
    /// Rows dropped for a missing or non-positive value.
    pub skipped_count: usize,
}

impl BoxPlotData {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, property_type: PropertyType) -> Option<&CategorySummary> {
        self.categories
            .iter()
            .find(|c| c.property_type == property_type)
    }

    /// Smallest and largest value any glyph reaches, including outliers.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        self.categories
            .iter()
            .map(|c| c.stats.extent())
            .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)))
    }

    /// Smallest strictly positive value any glyph reaches.
    pub fn min_positive(&self) -> Option<f64> {
        self.categories
            .iter()
            .flat_map(|c| {
                let (lo, _) = c.stats.extent();
                [lo, c.stats.q1, c.stats.median]
            })
            .filter(|v| *v > 0.0)
            .reduce(f64::min)
    }
}

/// Recompute box-plot data for `metric` from scratch.
pub fn compute_box_plot_data(listings: &[Listing], metric: Metric) -> BoxPlotData {
    let grouped = group_by_category(listings, metric);
    let mut observation_count = 0;

    let categories: Vec<CategorySummary> = grouped
        .groups
        .into_iter()
        .filter_map(|group| {
            let stats = summarize(&group.values())?;
            observation_count += group.len();

            let mut outliers: Vec<Observation> = group
                .observations
                .into_iter()
                .filter(|o| stats.is_outlier(o.value))
                .collect();
            outliers.sort_by(|a, b| a.value.total_cmp(&b.value));

            Some(CategorySummary {
                property_type: group.property_type,
                stats,
                outliers,
            })
        })
        .collect();

    debug!(
        "Computed box plot for {}: {} categories, {} observations",
        metric,
        categories.len(),
        observation_count
    );

    BoxPlotData {
        metric,
        categories,
        observation_count,
        skipped_count: grouped.skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings_from(prices: &[(PropertyType, f64)]) -> Vec<Listing> {
        prices
            .iter()
            .map(|(pt, price)| Listing::new("Lowell", *pt, Some(*price)))
            .collect()
    }

    #[test]
    fn test_compute_box_plot_data() {
        let listings = listings_from(&[
            (PropertyType::Condo, 10.0),
            (PropertyType::Condo, 20.0),
            (PropertyType::Condo, 30.0),
            (PropertyType::Condo, 40.0),
            (PropertyType::Condo, 1000.0),
            (PropertyType::Townhouse, 55.0),
            (PropertyType::Townhouse, -1.0),
        ]);

        let data = compute_box_plot_data(&listings, Metric::Price);

        assert_eq!(data.metric, Metric::Price);
        assert_eq!(data.categories.len(), 2);
        assert_eq!(data.observation_count, 6);
        assert_eq!(data.skipped_count, 1);

        let condo = data.category(PropertyType::Condo).unwrap();
        assert_eq!(condo.stats.median, 30.0);
        assert_eq!(condo.outliers.len(), 1);
        assert_eq!(condo.outliers[0].listing_index, 4);
        assert_eq!(condo.outliers[0].value, 1000.0);

        assert!(data.category(PropertyType::MultiFamily).is_none());
        assert_eq!(data.value_extent(), Some((10.0, 1000.0)));
        assert_eq!(data.min_positive(), Some(10.0));
    }

    #[test]
    fn test_empty_input_yields_no_categories() {
        let data = compute_box_plot_data(&[], Metric::Price);
        assert!(data.is_empty());
        assert_eq!(data.value_extent(), None);
        assert_eq!(data.min_positive(), None);
    }

    #[test]
    fn test_every_observation_classified_once() {
        let listings = listings_from(&[
            (PropertyType::SingleFamily, 1.0),
            (PropertyType::SingleFamily, 2.0),
            (PropertyType::SingleFamily, 2.5),
            (PropertyType::SingleFamily, 3.0),
            (PropertyType::SingleFamily, 50.0),
        ]);
        let data = compute_box_plot_data(&listings, Metric::Price);
        let sf = &data.categories[0];

        let within = listings
            .iter()
            .filter_map(|l| l.price)
            .filter(|v| *v >= sf.stats.whisker_min && *v <= sf.stats.whisker_max)
            .count();
        assert_eq!(within + sf.outliers.len(), sf.stats.count);
    }
}
