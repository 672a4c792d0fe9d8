use thiserror::Error;
use ys_storage::StorageError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid URL in {field}: {value:?}")]
    InvalidUrl { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("stored value is not valid JSON for this list: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored value has no schema version")]
    MissingVersion,
    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u64),
    #[error("stored value is neither a list nor a versioned envelope")]
    UnexpectedShape,
    #[error("stored ids leave no room for new ones")]
    IdsExhausted,
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode list: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Why a load fell back to an empty list.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: StorageError,
    },
    #[error("failed to parse {key}: {source}")]
    Parse {
        key: String,
        #[source]
        source: CodecError,
    },
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("no ids left in this list")]
    IdsExhausted,
}
