//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! Log output goes through a [`LogSink`]: stderr by default, or a writer the
//! caller redirects to while a line editor holds the terminal in raw mode, so
//! log lines are printed above the prompt instead of over it.
//!
//! # Usage
//!
//! ```no_run
//! use debatobot_observe::tracing_setup::{filter_for_verbosity, init_tracing};
//!
//! let sink = init_tracing(filter_for_verbosity(0, false), false).unwrap();
//! // sink.redirect(line_editor_writer);
//! sink.reset();
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tracing_subscriber::fmt::MakeWriter;

use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

type RedirectTarget = Arc<Mutex<Option<Box<dyn Write + Send>>>>;

/// Destination of formatted log lines.
///
/// Writes to stderr until [`LogSink::redirect`] installs another writer. A
/// failing redirect target (or a poisoned lock) falls back to stderr, so log
/// lines are never dropped.
#[derive(Clone, Default)]
pub struct LogSink {
    target: RedirectTarget,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send subsequent log lines to `writer`.
    pub fn redirect<W: Write + Send + 'static>(&self, writer: W) {
        if let Ok(mut target) = self.target.lock() {
            *target = Some(Box::new(writer));
        }
    }

    /// Go back to stderr, dropping the redirect target.
    pub fn reset(&self) {
        if let Ok(mut target) = self.target.lock() {
            *target = None;
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogSinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogSinkWriter {
            target: Arc::clone(&self.target),
        }
    }
}

/// Per-event writer handed out by [`LogSink`].
pub struct LogSinkWriter {
    target: RedirectTarget,
}

impl Write for LogSinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut target) = self.target.lock() {
            if let Some(writer) = target.as_mut() {
                // Flush per write: line editors only print completed chunks.
                if writer.write_all(buf).and_then(|()| writer.flush()).is_ok() {
                    return Ok(buf.len());
                }
            }
        }
        io::stderr().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Ok(mut target) = self.target.lock() {
            if let Some(writer) = target.as_mut() {
                if writer.flush().is_ok() {
                    return Ok(());
                }
            }
        }
        io::stderr().flush()
    }
}

/// Default filter directive for a `-v` count and `--quiet` flag.
///
/// Errors stay visible even when quiet.
pub fn filter_for_verbosity(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber and return its [`LogSink`].
///
/// - Always installs a `fmt` layer writing to the returned sink (stderr until
///   redirected) with target visibility and span close timing.
/// - `RUST_LOG` takes precedence over `default_filter`.
/// - When `enable_otel` is true, additionally bridges tracing spans to
///   OpenTelemetry using a stdout exporter (local development only).
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(
    default_filter: &str,
    enable_otel: bool,
) -> Result<LogSink, Box<dyn std::error::Error + Send + Sync>> {
    let sink = LogSink::new();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(sink.clone())
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    if enable_otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("debatobot");
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(sink)
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// No-op when OTel was not enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
