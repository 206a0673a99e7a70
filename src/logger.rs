use crate::context::ContextStore;
use crate::diagnostics::{Diagnostics, StderrDiagnostics};
use crate::env::EnvMapping;
use crate::record::Record;
use crate::request::{extract_request, ApiGatewayRequest};
use crate::serializer::{JsonSerializer, Serializer};
use crate::sink::{self, Sink};
use crate::value::FieldValue;
use chrono::{SecondsFormat, Utc};
use std::fmt;
use std::io::Write;

/// Default field for `println`/`printf` text. Log aggregators commonly
/// reserve `message`, so it is avoided.
pub const DEFAULT_MESSAGE_KEY: &str = "log";

/// Default field for `error`/`errorf` text.
pub const DEFAULT_ERROR_KEY: &str = "error";

/// Request-scoped structured logger.
///
/// Context bound through the `bind_*` methods is written into every
/// subsequent record next to the per-call text. Each emission produces one
/// record which is serialized synchronously to the logger's sink.
///
/// A logger is meant to be owned by one unit of work (typically one
/// request). Emission never fails from the caller's point of view: encoding
/// or write errors go to the configured [`Diagnostics`].
pub struct Logger {
    message_key: String,
    error_key: String,
    timestamp_key: Option<String>,
    context: ContextStore,
    env: EnvMapping,
    sink: Sink,
    serializer: Box<dyn Serializer>,
    diagnostics: Box<dyn Diagnostics>,
}

#[derive(Clone, Copy)]
enum Reserved {
    Message,
    Error,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("message_key", &self.message_key)
            .field("error_key", &self.error_key)
            .field("timestamp_key", &self.timestamp_key)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Logger with empty context writing JSON lines to stdout.
    pub fn new() -> Self {
        Logger {
            message_key: DEFAULT_MESSAGE_KEY.to_string(),
            error_key: DEFAULT_ERROR_KEY.to_string(),
            timestamp_key: None,
            context: ContextStore::new(),
            env: EnvMapping::default(),
            sink: sink::stdout(),
            serializer: Box::new(JsonSerializer),
            diagnostics: Box::new(StderrDiagnostics),
        }
    }

    /// Logger whose context is seeded from `req`, see [`Logger::bind_request`].
    pub fn from_request(req: &ApiGatewayRequest) -> Self {
        let mut logger = Self::new();
        logger.bind_request(req);
        logger
    }

    pub fn with_sink<W>(mut self, sink: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_serializer<S>(mut self, serializer: S) -> Self
    where
        S: Serializer + 'static,
    {
        self.serializer = Box::new(serializer);
        self
    }

    pub fn with_diagnostics<D>(mut self, diagnostics: D) -> Self
    where
        D: Diagnostics + 'static,
    {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    /// Replace the variable-to-field mapping used by [`Logger::bind_env`].
    pub fn with_env_mapping(mut self, mapping: EnvMapping) -> Self {
        self.env = mapping;
        self
    }

    pub fn set_message_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.message_key = key.into();
        self
    }

    pub fn set_error_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.error_key = key.into();
        self
    }

    /// Stamp each record with the current UTC time (RFC 3339) under `key`,
    /// or stop doing so with `None`.
    ///
    /// Bound context and the per-call text both take precedence over the
    /// timestamp when they use the same field name.
    pub fn set_timestamp_key(&mut self, key: Option<String>) -> &mut Self {
        self.timestamp_key = key;
        self
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    pub fn error_key(&self) -> &str {
        &self.error_key
    }

    pub fn context(&self) -> &ContextStore {
        &self.context
    }

    /// Bind any scalar value; a later bind on the same key replaces it.
    pub fn bind(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.context.bind(key, value);
        self
    }

    pub fn bind_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.bind(key, FieldValue::Str(value.into()))
    }

    pub fn bind_int(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.bind(key, FieldValue::Int(value))
    }

    pub fn bind_num(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        self.bind(key, FieldValue::Num(value))
    }

    /// Bind the function name and version from the process environment.
    ///
    /// Unset variables are bound as empty strings.
    pub fn bind_env(&mut self) -> &mut Self {
        let fields = self.env.extract();
        self.context.extend(fields);
        self
    }

    /// Bind method, path, request id, stage and, when present, the Cognito
    /// identity of `req`.
    pub fn bind_request(&mut self, req: &ApiGatewayRequest) -> &mut Self {
        self.context.extend(extract_request(req));
        self
    }

    pub fn println(&mut self, text: &str) {
        self.emit(Reserved::Message, text.to_string());
    }

    /// Format `args` and log the result, e.g.
    /// `log.printf(format_args!("{} nr {}", "Message", 1))`.
    pub fn printf(&mut self, args: fmt::Arguments<'_>) {
        self.emit(Reserved::Message, fmt::format(args));
    }

    pub fn error(&mut self, text: &str) {
        self.emit(Reserved::Error, text.to_string());
    }

    pub fn errorf(&mut self, args: fmt::Arguments<'_>) {
        self.emit(Reserved::Error, fmt::format(args));
    }

    fn emit(&mut self, field: Reserved, text: String) {
        let key = match field {
            Reserved::Message => &self.message_key,
            Reserved::Error => &self.error_key,
        };
        let mut record = Record::merge(key, text, self.context.snapshot());
        if let Some(ts_key) = &self.timestamp_key {
            if record.get(ts_key).is_none() {
                let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
                record.insert(ts_key.clone(), FieldValue::Str(now));
            }
        }

        if let Err(err) = self.serializer.serialize(&record, &mut self.sink) {
            self.diagnostics.report(&err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SharedBuffer;

    fn buffered() -> (Logger, SharedBuffer) {
        let out = SharedBuffer::new();
        (Logger::new().with_sink(out.clone()), out)
    }

    #[test]
    fn defaults() {
        let log = Logger::new();
        assert_eq!(log.message_key(), "log");
        assert_eq!(log.error_key(), "error");
        assert!(log.context().is_empty());
    }

    #[test]
    fn key_changes_are_not_retroactive() {
        let (mut log, out) = buffered();
        log.println("first");
        log.set_message_key("msg").set_error_key("err");
        log.println("second");
        log.error("third");
        assert_eq!(
            out.lines(),
            vec![r#"{"log":"first"}"#, r#"{"msg":"second"}"#, r#"{"err":"third"}"#]
        );
    }

    #[test]
    fn typed_binds() {
        let (mut log, out) = buffered();
        log.bind_string("s", "x").bind_int("i", -3).bind_num("n", 2.5);
        log.println("m");
        assert_eq!(out.contents(), "{\"i\":-3,\"log\":\"m\",\"n\":2.5,\"s\":\"x\"}\n");
    }

    #[test]
    fn env_binding_uses_configured_mapping() {
        let out = SharedBuffer::new();
        let mut log = Logger::new()
            .with_sink(out.clone())
            .with_env_mapping(EnvMapping::empty().with("REQUEST_LOG_TEST_SURELY_UNSET", "missing"));
        log.bind_env().println("m");
        assert_eq!(out.contents(), "{\"log\":\"m\",\"missing\":\"\"}\n");
    }

    #[test]
    fn env_binding_reads_process_environment() {
        std::env::set_var("REQUEST_LOG_TEST_FUNCTION_NAME", "checkout-handler");
        let out = SharedBuffer::new();
        let mut log = Logger::new().with_sink(out.clone()).with_env_mapping(
            EnvMapping::default().with("REQUEST_LOG_TEST_FUNCTION_NAME", "handlerName"),
        );
        log.bind_env().println("m");

        let value: serde_json::Value = serde_json::from_str(&out.contents()).unwrap();
        assert_eq!(value["handlerName"].as_str(), Some("checkout-handler"));
        assert!(value["functionName"].is_string());
        assert!(value["functionVersion"].is_string());
    }

    #[test]
    fn usize_binds_directly() {
        let (mut log, out) = buffered();
        log.bind("count", [1, 2, 3].len()).println("m");
        assert_eq!(out.contents(), "{\"count\":3,\"log\":\"m\"}\n");
    }

    #[test]
    fn timestamp_is_added_when_enabled() {
        let (mut log, out) = buffered();
        log.set_timestamp_key(Some("ts".to_string())).println("m");
        let value: serde_json::Value = serde_json::from_str(&out.contents()).unwrap();
        let ts = value["ts"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn bound_field_beats_timestamp() {
        let (mut log, out) = buffered();
        log.set_timestamp_key(Some("ts".to_string()))
            .bind_string("ts", "fixed")
            .println("m");
        assert_eq!(out.contents(), "{\"log\":\"m\",\"ts\":\"fixed\"}\n");
    }

    #[test]
    fn unrepresentable_value_goes_to_diagnostics() {
        use std::sync::{Arc, Mutex};

        let reports = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&reports);
        let out = SharedBuffer::new();
        let mut log = Logger::new()
            .with_sink(out.clone())
            .with_diagnostics(move |e: &crate::error::SerializeError| {
                seen.lock().unwrap().push(e.to_string())
            });

        log.bind_num("ratio", f64::INFINITY).println("m");

        assert_eq!(out.contents(), "");
        assert_eq!(reports.lock().unwrap().len(), 1);
    }
}
