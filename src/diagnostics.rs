use crate::error::SerializeError;
use std::io::{self, Write};

/// Fallback channel for records that could not be written.
///
/// Emission never surfaces errors to the caller; they are handed here
/// instead. The channel must be distinct from the logger's primary sink.
pub trait Diagnostics: Send + Sync {
    fn report(&self, err: &SerializeError);
}

impl<F> Diagnostics for F
where
    F: Fn(&SerializeError) + Send + Sync,
{
    fn report(&self, err: &SerializeError) {
        self(err)
    }
}

/// Writes one best-effort line per failure to standard error.
///
/// A failing stderr is ignored, the report is simply lost.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn report(&self, err: &SerializeError) {
        report_to(io::stderr(), err);
    }
}

fn report_to<W: Write>(mut w: W, err: &SerializeError) {
    let _ = writeln!(w, "ERROR: Could not serialize log message: {}", err);
}

/// Emits a `tracing` error event per failure.
///
/// Pair with [`init_diagnostics`](crate::init::init_diagnostics) or any
/// other subscriber the host already installs.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, err: &SerializeError) {
        tracing::error!(target: "request_log", error = %err, "could not serialize log message");
    }
}
