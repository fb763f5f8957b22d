//! Timeout-bounded dataset loading.

use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::error::{ErrorContext, LoadError, LoadResult};
use super::source::DatasetSource;
use crate::models::Listing;

/// Default upper bound on a single dataset fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The loaded housing table. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    listings: Vec<Listing>,
    source: String,
}

impl Dataset {
    pub fn new(listings: Vec<Listing>, source: impl Into<String>) -> Self {
        Self {
            listings,
            source: source.into(),
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Where the rows came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Lifecycle of the dataset as seen by the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetState {
    Loading,
    Ready(Arc<Dataset>),
    Failed { message: String },
}

impl DatasetState {
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match self {
            Self::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<LoadResult<Dataset>> for DatasetState {
    fn from(result: LoadResult<Dataset>) -> Self {
        match result {
            Ok(dataset) => Self::Ready(Arc::new(dataset)),
            Err(e) => Self::Failed {
                message: e.user_message(),
            },
        }
    }
}

/// Fetch the dataset from `source`, giving up after `timeout`.
pub async fn load_dataset(source: &dyn DatasetSource, timeout: Duration) -> LoadResult<Dataset> {
    let description = source.describe();
    info!("Loading housing data from {}", description);

    match tokio::time::timeout(timeout, source.fetch()).await {
        Ok(Ok(listings)) => {
            info!("Loaded {} listings from {}", listings.len(), description);
            Ok(Dataset::new(listings, description))
        }
        Ok(Err(e)) => {
            warn!("Failed to load housing data: {}", e);
            Err(e)
        }
        Err(_) => {
            warn!(
                "Loading housing data from {} timed out after {:?}",
                description, timeout
            );
            Err(LoadError::timeout(format!("no response within {:?}", timeout))
                .with_context(ErrorContext::new("fetch").with_source(description)))
        }
    }
}

/// Load and fold the outcome into a [`DatasetState`].
pub async fn load_state(source: &dyn DatasetSource, timeout: Duration) -> DatasetState {
    load_dataset(source, timeout).await.into()
}
