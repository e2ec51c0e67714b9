use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, RatingError>;

#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    /// A bout names the same competitor on both sides. Halts the pass.
    #[error("bout #{bout_index} lists {name:?} as both competitors")]
    IdentityCollision { bout_index: usize, name: String },

    #[error("I/O error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("failed to parse config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    #[error("cannot write {path:?}: extension must be csv or json")]
    UnsupportedFormat { path: PathBuf },
}

impl RatingError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
