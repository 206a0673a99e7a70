use crate::error::SerializeError;
use crate::record::Record;
use std::io::Write;

/// Encode-and-write step that turns a [`Record`] into bytes on a sink.
///
/// A serializer is chosen when the [`Logger`](crate::Logger) is built and
/// never changes afterwards. Implementations hold no per-record state.
pub trait Serializer: Send + Sync {
    /// Write a single record to `sink`.
    ///
    /// **Parameters**
    /// - `record`: fully merged [`Record`] for one emission.
    /// - `sink`: the logger's output destination.
    ///
    /// **Returns**
    /// - `Ok(())` once the record has been written.
    /// - `Err(..)` if the record could not be encoded or the sink write
    ///   failed. The logger reports the error to its diagnostics channel
    ///   and does not retry.
    fn serialize(&self, record: &Record, sink: &mut dyn Write) -> Result<(), SerializeError>;
}

impl<F> Serializer for F
where
    F: Fn(&Record, &mut dyn Write) -> Result<(), SerializeError> + Send + Sync,
{
    fn serialize(&self, record: &Record, sink: &mut dyn Write) -> Result<(), SerializeError> {
        self(record, sink)
    }
}

/// Default serializer: one compact JSON object per record, newline
/// terminated, keys in sorted order.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, record: &Record, sink: &mut dyn Write) -> Result<(), SerializeError> {
        // serde_json silently turns NaN/inf into null.
        if let Some((key, _)) = record.iter().find(|(_, v)| !v.is_representable()) {
            return Err(SerializeError::Unrepresentable { key: key.to_string() });
        }

        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        sink.write_all(&line)?;
        sink.flush()?;
        Ok(())
    }
}
