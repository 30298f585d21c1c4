use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preferences not initialized: call prefs::global::init() at startup")]
    NotInitialized,

    #[error("preferences already initialized")]
    AlreadyInitialized,

    #[error("no serializer configured: set one with PrefsBuilder::serializer()")]
    SerializerNotConfigured,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("value at {key} is not a valid {expected}: {found:?}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("store error: {0}")]
    Store(#[from] prefs_store::StoreError),

    #[error("codec error: {0}")]
    Codec(#[from] prefs_codec::CodecError),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PrefsResult<T> = Result<T, PrefsError>;
