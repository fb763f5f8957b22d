//! Error types for dataset loading.
//!
//! Loading is the only place an error can reach the rendering boundary:
//! statistics and grouping never fail, they filter.

use std::fmt;

/// Result type for dataset loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Structured context for load errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "read_file", "parse_rows")
    pub operation: Option<String>,
    /// Path or name of the data source
    pub source: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref source) = self.source {
            parts.push(format!("source={}", source));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for dataset loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// The data file could not be read.
    #[error("I/O error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
    },

    /// The data was read but is not a valid table of listings.
    #[error("Parse error: {message} {context}")]
    Parse {
        message: String,
        context: ErrorContext,
    },

    /// The fetch did not complete within the configured timeout.
    #[error("Timeout error: {message} {context}")]
    Timeout {
        message: String,
        context: ErrorContext,
    },

    /// The source is unavailable for any other reason.
    #[error("Source unavailable: {message} {context}")]
    Unavailable {
        message: String,
        context: ErrorContext,
    },
}

impl LoadError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Replace the error's context.
    pub fn with_context(self, context: ErrorContext) -> Self {
        match self {
            Self::Io { message, .. } => Self::Io { message, context },
            Self::Parse { message, .. } => Self::Parse { message, context },
            Self::Timeout { message, .. } => Self::Timeout { message, context },
            Self::Unavailable { message, .. } => Self::Unavailable { message, context },
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Io { context, .. }
            | Self::Parse { context, .. }
            | Self::Timeout { context, .. }
            | Self::Unavailable { context, .. } => context,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Io { message, .. }
            | Self::Parse { message, .. }
            | Self::Timeout { message, .. }
            | Self::Unavailable { message, .. } => message,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Short text suitable for showing in the chart area.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { .. } | Self::Unavailable { .. } => {
                format!("Housing data could not be loaded: {}", self.message())
            }
            Self::Parse { .. } => format!("Housing data is malformed: {}", self.message()),
            Self::Timeout { .. } => {
                "Housing data took too long to load. Please try again.".to_string()
            }
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::io(err.to_string())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::parse(err.to_string())
    }
}
