//! Town-level aggregation for the income, livability and risk views.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::grouping::is_valid_value;
use crate::models::Listing;

/// Aggregated metrics for all listings in one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TownSummary {
    pub city: String,
    pub listing_count: usize,
    pub mean_price: Option<f64>,
    pub median_income: Option<f64>,
    pub population: Option<f64>,
    /// Mean of the town's mean walk, bike and transit scores.
    pub livability: Option<f64>,
    /// Mean of whichever of the town's five mean risk scores are present.
    pub avg_risk: Option<f64>,
    pub price_to_income: Option<f64>,
}

/// The cheapest and most expensive towns by mean listing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityExtremes {
    /// Ascending by mean price.
    pub most_affordable: Vec<TownSummary>,
    /// Descending by mean price.
    pub most_expensive: Vec<TownSummary>,
}

#[derive(Default)]
struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| v.is_finite()) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Default)]
struct TownAccumulator {
    listing_count: usize,
    price: RunningMean,
    median_income: Option<f64>,
    population: Option<f64>,
    scores: [RunningMean; 3],
    risks: [RunningMean; 5],
}

/// Mean of the components, absent if any component is absent.
fn mean_of_all(means: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let values: Option<Vec<f64>> = means.into_iter().collect();
    let values = values?;
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of the components that are present, absent only if none are.
fn mean_of_present(means: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let mut acc = RunningMean::default();
    for mean in means {
        acc.push(mean);
    }
    acc.mean()
}

/// Aggregate listings by city, sorted by city name.
///
/// Prices that are missing, non-finite or not positive are left out of the
/// mean. Census fields (income, population) take the first non-missing value
/// seen for the town. Livability is absent unless walk, bike and transit
/// scores all have a value; risk averages whichever risk scores exist.
pub fn aggregate_by_town(listings: &[Listing]) -> Vec<TownSummary> {
    let mut towns: BTreeMap<&str, TownAccumulator> = BTreeMap::new();

    for listing in listings {
        let acc = towns.entry(listing.city.as_str()).or_default();
        acc.listing_count += 1;
        acc.price.push(listing.price.filter(|p| is_valid_value(*p)));
        if acc.median_income.is_none() {
            acc.median_income = listing.median_income.filter(|v| v.is_finite());
        }
        if acc.population.is_none() {
            acc.population = listing.population.filter(|v| v.is_finite());
        }
        acc.scores[0].push(listing.walk_score);
        acc.scores[1].push(listing.bike_score);
        acc.scores[2].push(listing.transit_score);
        for (slot, risk) in acc.risks.iter_mut().zip(listing.risks()) {
            slot.push(risk);
        }
    }

    towns
        .into_iter()
        .map(|(city, acc)| {
            let mean_price = acc.price.mean();
            let price_to_income = match (mean_price, acc.median_income) {
                (Some(price), Some(income)) if income > 0.0 => Some(price / income),
                _ => None,
            };
            TownSummary {
                city: city.to_string(),
                listing_count: acc.listing_count,
                mean_price,
                median_income: acc.median_income,
                population: acc.population,
                livability: mean_of_all(acc.scores.iter().map(RunningMean::mean)),
                avg_risk: mean_of_present(acc.risks.iter().map(RunningMean::mean)),
                price_to_income,
            }
        })
        .collect()
}

fn priced(towns: &[TownSummary]) -> Vec<(f64, &TownSummary)> {
    let mut priced: Vec<(f64, &TownSummary)> = towns
        .iter()
        .filter_map(|t| t.mean_price.map(|p| (p, t)))
        .collect();
    priced.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.city.cmp(&b.1.city)));
    priced
}

/// The `n` cheapest and `n` most expensive towns. Towns without a price are ignored.
pub fn affordability_extremes(towns: &[TownSummary], n: usize) -> AffordabilityExtremes {
    let priced = priced(towns);
    let most_affordable = priced.iter().take(n).map(|(_, t)| (*t).clone()).collect();
    let most_expensive = priced
        .iter()
        .rev()
        .take(n)
        .map(|(_, t)| (*t).clone())
        .collect();
    AffordabilityExtremes {
        most_affordable,
        most_expensive,
    }
}

/// The `n` most expensive towns, descending by mean price.
pub fn top_by_price(towns: &[TownSummary], n: usize) -> Vec<TownSummary> {
    affordability_extremes(towns, n).most_expensive
}
