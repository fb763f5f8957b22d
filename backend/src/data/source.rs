//! Dataset sources: where the merged housing table comes from.

use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::{ErrorContext, LoadError, LoadResult};
use crate::models::Listing;

/// A place the housing table can be fetched from.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Short description used in logs and error context.
    fn describe(&self) -> String;

    /// Fetch and parse every row.
    ///
    /// # Returns
    /// * `Ok(Vec<Listing>)` - All rows, in file order
    /// * `Err(LoadError)` - If the source cannot be read or parsed
    async fn fetch(&self) -> LoadResult<Vec<Listing>>;
}

/// Parse a JSON array of row objects.
pub fn parse_listings(bytes: &[u8]) -> LoadResult<Vec<Listing>> {
    let listings: Vec<Listing> = serde_json::from_slice(bytes)?;
    Ok(listings)
}

/// Reads the table from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> LoadResult<Vec<Listing>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            LoadError::from(e)
                .with_context(ErrorContext::new("read_file").with_source(self.describe()))
        })?;
        debug!("Read {} bytes from {}", bytes.len(), self.describe());

        parse_listings(&bytes).map_err(|e| {
            e.with_context(ErrorContext::new("parse_rows").with_source(self.describe()))
        })
    }
}

/// In-memory source for tests and embedding.
///
/// Can be configured to respond slowly or to fail, which makes the loader's
/// timeout and error paths deterministic to exercise.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    listings: Vec<Listing>,
    delay: Option<Duration>,
    failure: Option<String>,
}

impl InMemorySource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            delay: None,
            failure: None,
        }
    }

    /// Wait `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every fetch with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl DatasetSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory ({} rows)", self.listings.len())
    }

    async fn fetch(&self) -> LoadResult<Vec<Listing>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref message) = self.failure {
            return Err(LoadError::unavailable(message.clone())
                .with_context(ErrorContext::new("fetch").with_source(self.describe())));
        }
        Ok(self.listings.clone())
    }
}
