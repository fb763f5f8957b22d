//! Group listings by property type for a selected metric.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{Listing, Metric, PropertyType};

/// One valid metric value, pointing back at the listing it came from.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Index of the originating row in the dataset.
    pub listing_index: usize,
    pub value: f64,
}

/// All valid observations sharing a property type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub property_type: PropertyType,
    pub observations: Vec<Observation>,
}

impl CategoryGroup {
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Result of grouping: non-empty groups in axis order plus the number of
/// rows dropped for having no usable value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedObservations {
    pub groups: Vec<CategoryGroup>,
    pub skipped: usize,
}

/// A metric value is usable when it is finite and strictly positive.
pub fn is_valid_value(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Split `listings` into one group per property type for `metric`.
///
/// Missing, non-finite and non-positive values are skipped. Groups come out
/// in [`PropertyType::ALL`] order and empty groups are omitted.
pub fn group_by_category(listings: &[Listing], metric: Metric) -> GroupedObservations {
    let mut buckets: Vec<Vec<Observation>> = vec![Vec::new(); PropertyType::ALL.len()];
    let mut skipped = 0;

    for (listing_index, listing) in listings.iter().enumerate() {
        match metric.value_of(listing) {
            Some(value) if is_valid_value(value) => {
                buckets[listing.property_type as usize].push(Observation {
                    listing_index,
                    value,
                });
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(
            "Skipped {} of {} listings without a usable {} value",
            skipped,
            listings.len(),
            metric
        );
    }

    let groups = PropertyType::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, observations)| !observations.is_empty())
        .map(|(property_type, observations)| CategoryGroup {
            property_type,
            observations,
        })
        .collect();

    GroupedObservations { groups, skipped }
}
