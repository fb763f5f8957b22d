//! Hover tooltip content for boxes and outlier points.

use serde::{Deserialize, Serialize};

use super::format::{format_value, group_thousands};
use crate::models::{Listing, Metric, ValueFormat};
use crate::services::CategorySummary;

/// Title plus labelled rows, rendered as plain text in SVG `<title>` elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    pub title: String,
    pub rows: Vec<(String, String)>,
}

impl Tooltip {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push((label.into(), value.into()));
        self
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// One line per row under the title.
    pub fn to_text(&self) -> String {
        let mut lines = vec![self.title.clone()];
        lines.extend(self.rows.iter().map(|(l, v)| format!("{}: {}", l, v)));
        lines.join("\n")
    }
}

/// Tooltip for a category's box: count and the three quartiles.
pub fn box_tooltip(summary: &CategorySummary, metric: Metric) -> Tooltip {
    let fmt = metric.format();
    Tooltip::new(summary.property_type.label())
        .row("Count", group_thousands(summary.stats.count as f64))
        .row("Median", format_value(summary.stats.median, fmt))
        .row("Q1", format_value(summary.stats.q1, fmt))
        .row("Q3", format_value(summary.stats.q3, fmt))
}

/// Tooltip for one outlier point, identifying the listing it came from.
pub fn outlier_tooltip(listing: &Listing, value: f64, metric: Metric) -> Tooltip {
    let mut tip = Tooltip::new(listing.city.clone()).row("Type", listing.property_type.label());
    if metric != Metric::Price {
        if let Some(price) = listing.price {
            tip = tip.row("Price", format_value(price, ValueFormat::Currency));
        }
    }
    if metric != Metric::Sqft {
        if let Some(sqft) = listing.sqft {
            tip = tip.row("Sqft", format_value(sqft, ValueFormat::Area));
        }
    }
    if let Some(beds) = listing.bedrooms {
        tip = tip.row("Beds", format!("{}", beds));
    }
    if let Some(baths) = listing.bathrooms {
        tip = tip.row("Baths", format!("{}", baths));
    }
    tip.row(metric_short_label(metric), format_value(value, metric.format()))
}

fn metric_short_label(metric: Metric) -> &'static str {
    match metric {
        Metric::Price => "Price",
        Metric::PricePerSqft => "$/Sqft",
        Metric::Sqft => "Sqft",
        Metric::PriceToIncomeRatio => "Price/Income",
        Metric::MedianIncome => "Median Income",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyType;
    use crate::services::summarize;

    #[test]
    fn test_box_tooltip_rows() {
        let summary = CategorySummary {
            property_type: PropertyType::Condo,
            stats: summarize(&[300_000.0, 400_000.0, 500_000.0]).unwrap(),
            outliers: vec![],
        };
        let tip = box_tooltip(&summary, Metric::Price);

        assert_eq!(tip.title, "Condo");
        assert_eq!(tip.value("Count"), Some("3"));
        assert_eq!(tip.value("Median"), Some("$400,000"));
        assert_eq!(tip.value("Q1"), Some("$350,000"));
        assert_eq!(tip.value("Q3"), Some("$450,000"));
        assert_eq!(
            tip.to_text(),
            "Condo\nCount: 3\nMedian: $400,000\nQ1: $350,000\nQ3: $450,000"
        );
    }

    #[test]
    fn test_outlier_tooltip_identifies_listing() {
        let mut listing = Listing::new("Nantucket", PropertyType::SingleFamily, Some(9_500_000.0));
        listing.sqft = Some(5000.0);
        listing.bedrooms = Some(6.0);

        let tip = outlier_tooltip(&listing, 1900.0, Metric::PricePerSqft);
        assert_eq!(tip.title, "Nantucket");
        assert_eq!(tip.value("Type"), Some("Single Family"));
        assert_eq!(tip.value("Price"), Some("$9,500,000"));
        assert_eq!(tip.value("Sqft"), Some("5,000 sqft"));
        assert_eq!(tip.value("Beds"), Some("6"));
        assert_eq!(tip.value("Baths"), None);
        assert_eq!(tip.value("$/Sqft"), Some("$1,900"));
    }

    #[test]
    fn test_outlier_tooltip_does_not_repeat_metric() {
        let listing = Listing::new("Weston", PropertyType::SingleFamily, Some(4_000_000.0));
        let tip = outlier_tooltip(&listing, 4_000_000.0, Metric::Price);
        let price_rows = tip.rows.iter().filter(|(l, _)| l == "Price").count();
        assert_eq!(price_rows, 1);
    }
}
