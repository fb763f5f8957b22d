//! Domain models for the housing dataset.

pub mod listing;
pub mod metric;
pub mod property_type;

pub use listing::Listing;
pub use metric::{ChartOptions, Metric, ScaleType, ValueFormat};
pub use property_type::{PropertyType, UnknownPropertyType};
