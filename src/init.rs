use crate::error::InitError;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Configuration of the diagnostic subscriber.
///
/// **Fields**
/// - `ansi`: colorize diagnostic lines. Off by default since Lambda log
///   streams do not render escape codes.
/// - `with_target`: include the event target (`request_log`) in each line.
#[derive(Clone, Debug)]
pub struct DiagnosticsConfig {
    pub ansi: bool,
    pub with_target: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            ansi: false,
            with_target: true,
        }
    }
}

/// Install a global `tracing` subscriber that prints events to stderr.
///
/// **Parameters**
/// - `config`: [`DiagnosticsConfig`] controlling line formatting.
///
/// **Effects**
///
/// Installs a [`Registry`] with a `fmt` layer as the process-wide default
/// subscriber, so events from
/// [`TracingDiagnostics`](crate::diagnostics::TracingDiagnostics) become
/// visible. Output never goes to stdout, which is where records are written
/// by default.
///
/// **Returns**
/// - `Err(InitError::AlreadyInstalled)` if the host already set a global
///   subscriber; that subscriber stays in place.
pub fn init_diagnostics_with_config(config: DiagnosticsConfig) -> Result<(), InitError> {
    let subscriber = diagnostics_subscriber(&config, std::io::stderr);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn diagnostics_subscriber<W>(config: &DiagnosticsConfig, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(config.ansi)
        .with_target(config.with_target);
    Registry::default().with(fmt_layer)
}

/// Equivalent to [`init_diagnostics_with_config`] with
/// [`DiagnosticsConfig::default`].
pub fn init_diagnostics() -> Result<(), InitError> {
    init_diagnostics_with_config(DiagnosticsConfig::default())
}
