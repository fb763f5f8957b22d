//! A single row of the merged housing + census table.

use serde::{Deserialize, Deserializer, Serialize};

use super::PropertyType;

/// Lenient numeric deserializer.
///
/// The merged table is produced by several cleaning scripts, so numeric
/// cells may arrive as JSON numbers, numeric strings, empty strings or null.
/// Anything that does not parse to a number becomes `None` and is later
/// excluded from statistics.
fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::String(s)) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| *c != '$' && *c != ',')
                .collect();
            cleaned.parse::<f64>().ok()
        }
        Some(NumberOrString::Other(_)) | None => None,
    })
}

/// One property listing.
///
/// Only `city` and `property_type` are required; every numeric column is
/// optional because the census merge leaves gaps for unmatched towns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub city: String,
    #[serde(rename = "propertyType")]
    pub property_type: PropertyType,

    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub sqft: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub bathrooms: Option<f64>,
    #[serde(
        rename = "pricePerSqft",
        default,
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub price_per_sqft: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub walk_score: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub bike_score: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub transit_score: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub flood_risk: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub fire_risk: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub wind_risk: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub air_risk: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub heat_risk: Option<f64>,

    #[serde(
        rename = "medianIncome",
        default,
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub median_income: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub population: Option<f64>,
    #[serde(
        rename = "priceToIncomeRatio",
        default,
        deserialize_with = "deserialize_lenient_f64"
    )]
    pub price_to_income_ratio: Option<f64>,
}

impl Listing {
    /// Create a listing with only the identifying fields and a price.
    pub fn new(city: impl Into<String>, property_type: PropertyType, price: Option<f64>) -> Self {
        Self {
            city: city.into(),
            property_type,
            price,
            sqft: None,
            bedrooms: None,
            bathrooms: None,
            price_per_sqft: None,
            walk_score: None,
            bike_score: None,
            transit_score: None,
            flood_risk: None,
            fire_risk: None,
            wind_risk: None,
            air_risk: None,
            heat_risk: None,
            median_income: None,
            population: None,
            price_to_income_ratio: None,
        }
    }

    /// Price per square foot, derived from price and sqft when the column is absent.
    pub fn effective_price_per_sqft(&self) -> Option<f64> {
        self.price_per_sqft.or_else(|| match (self.price, self.sqft) {
            (Some(price), Some(sqft)) if sqft > 0.0 => Some(price / sqft),
            _ => None,
        })
    }

    /// Price-to-income ratio, derived from price and median income when the column is absent.
    pub fn effective_price_to_income(&self) -> Option<f64> {
        self.price_to_income_ratio
            .or_else(|| match (self.price, self.median_income) {
                (Some(price), Some(income)) if income > 0.0 => Some(price / income),
                _ => None,
            })
    }

    /// The five environmental risk scores, in flood/fire/wind/air/heat order.
    pub fn risks(&self) -> [Option<f64>; 5] {
        [
            self.flood_risk,
            self.fire_risk,
            self.wind_risk,
            self.air_risk,
            self.heat_risk,
        ]
    }
}
