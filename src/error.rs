use std::io;

/// Error returned by a [`Serializer`](crate::serializer::Serializer) when a
/// record could not be written to the output sink.
///
/// Every variant is treated the same way by the logger: it is handed to the
/// configured [`Diagnostics`](crate::diagnostics::Diagnostics) and dropped.
#[derive(thiserror::Error, Debug)]
pub enum SerializeError {
    #[error("sink write failed: {0}")]
    Io(#[from] io::Error),

    #[error("encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("field `{key}` holds a value that cannot be encoded")]
    Unrepresentable { key: String },
}

/// Error returned when the diagnostic subscriber cannot be installed.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}
