//! Property type categories and their display attributes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Closed set of property types present in the housing dataset.
///
/// Declaration order is the order categories appear on the chart axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyType {
    SingleFamily,
    Condo,
    Townhouse,
    MultiFamily,
}

impl PropertyType {
    /// All property types in axis order.
    pub const ALL: [PropertyType; 4] = [
        PropertyType::SingleFamily,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::MultiFamily,
    ];

    /// Human-readable label, as written in the cleaned dataset.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "Single Family",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::MultiFamily => "Multi Family",
        }
    }

    /// Fill colour used for this category's box and outlier marks.
    pub fn color(&self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "#3A7CA5",
            PropertyType::Condo => "#F4845F",
            PropertyType::Townhouse => "#2ECC71",
            PropertyType::MultiFamily => "#9B59B6",
        }
    }

    /// Stable slug used in element ids and CSS classes.
    pub fn slug(&self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "single-family",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::MultiFamily => "multi-family",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a property type label is not one of the known aliases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown property type '{0}'")]
pub struct UnknownPropertyType(pub String);

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    /// Accepts the canonical labels plus the aliases normalised by the cleaning step.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "single family" | "singlefamily" | "single-family" | "house" => {
                Ok(PropertyType::SingleFamily)
            }
            "condo" | "condominium" => Ok(PropertyType::Condo),
            "townhouse" | "townhome" => Ok(PropertyType::Townhouse),
            "multi family" | "multifamily" | "multi-family" => Ok(PropertyType::MultiFamily),
            _ => Err(UnknownPropertyType(s.to_string())),
        }
    }
}

impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PropertyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
