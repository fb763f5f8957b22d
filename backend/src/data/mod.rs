//! Dataset access: sources, loading with a timeout, and load errors.

pub mod error;
pub mod loader;
pub mod source;

pub use error::{ErrorContext, LoadError, LoadResult};
pub use loader::{load_dataset, load_state, Dataset, DatasetState, DEFAULT_FETCH_TIMEOUT};
pub use source::{parse_listings, DatasetSource, FileSource, InMemorySource};
