use prefs_store::StoreError;

use crate::serializer::SerializerError;

/// Errors surfaced by the codecs.
///
/// Malformed persisted data is never reported here: decoding degrades to
/// defaults instead. Only store failures and values that cannot be encoded
/// reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The underlying store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A value could not be serialized for writing.
    #[error("cannot serialize value for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: SerializerError,
    },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
