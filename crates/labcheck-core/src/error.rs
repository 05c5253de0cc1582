//! Error taxonomy for labcheck.
//!
//! None of these are fatal to a run: the orchestrator folds every one of
//! them into a [`VerificationOutcome`](crate::outcome::VerificationOutcome).

/// Errors produced by a [`LineSource`](crate::source::LineSource).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("io error reading {id}: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Whether this error means the resource is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

/// Errors produced while decoding a solution fixture.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("missing solution file: {0}")]
    Missing(String),

    #[error("malformed solution: {0}")]
    Malformed(String),

    #[error(transparent)]
    Source(SourceError),
}

impl From<SourceError> for FixtureError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound(id) => FixtureError::Missing(id),
            other => FixtureError::Source(other),
        }
    }
}

/// Unexpected failure inside a single check.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("check panicked: {0}")]
    Panicked(String),
}

/// Errors produced by a [`ReportSink`](crate::sink::ReportSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("io error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for line-source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type for fixture decoding.
pub type FixtureResult<T> = std::result::Result<T, FixtureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_missing_fixture() {
        let err: FixtureError = SourceError::NotFound("Matrix solution.txt".to_string()).into();
        assert!(matches!(err, FixtureError::Missing(ref p) if p == "Matrix solution.txt"));
    }

    #[test]
    fn test_io_error_stays_a_source_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FixtureError = SourceError::Io {
            id: "x.txt".to_string(),
            source: io,
        }
        .into();
        assert!(matches!(err, FixtureError::Source(_)));
        assert!(err.to_string().contains("x.txt"));
    }

    #[test]
    fn test_error_display() {
        let err = FixtureError::Malformed("abc".to_string());
        assert_eq!(err.to_string(), "malformed solution: abc");

        let err = SourceError::NotFound("File test 1.txt".to_string());
        assert!(err.is_not_found());
        assert!(err.to_string().contains("File test 1.txt"));
    }
}
