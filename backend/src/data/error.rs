//! Error types for dataset source operations.

use std::fmt;

use super::source::DatasetKind;

/// Result type for dataset source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Where a source error happened.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g. "load", "health_check")
    pub operation: Option<String>,
    /// The dataset involved
    pub dataset: Option<DatasetKind>,
    /// File path, when the source is file-backed
    pub path: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_dataset(mut self, kind: DatasetKind) -> Self {
        self.dataset = Some(kind);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(kind) = self.dataset {
            parts.push(format!("dataset={}", kind));
        }
        if let Some(ref path) = self.path {
            parts.push(format!("path={}", path));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for dataset sources.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The underlying storage could not be read.
    #[error("I/O error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
    },

    /// The content is not valid UTF-8 text.
    #[error("Decode error: {message} {context}")]
    Decode {
        message: String,
        context: ErrorContext,
    },
}

impl SourceError {
    pub fn io(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Io {
            message: message.into(),
            context,
        }
    }

    pub fn decode(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Decode {
            message: message.into(),
            context,
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Io { context, .. } | Self::Decode { context, .. } => context,
        }
    }
}
