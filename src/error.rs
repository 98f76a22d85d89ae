use std::path::PathBuf;

/// Errors surfaced by route projection and the commands built on it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("GPX parsing error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("FIT parsing error: {0}")]
    Fit(#[from] fitparser::Error),

    #[error("hike data has no route path")]
    MissingRoute,

    #[error("unsupported track file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("route is out of sync with track: {}", .0.join("; "))]
    OutOfSync(Vec<String>),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
