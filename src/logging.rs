//! Logging and tracing setup.
//!
//! Views emit `trace!` events for device reads and `warn!` events for reads
//! outside a region; the image boundary logs opens and validation failures.
//! Nothing is printed until a subscriber is installed with one of the
//! functions below.

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// This should be called once at program startup.
/// Subsequent calls are ignored.
pub fn init_tracing() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer = fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();

        info!("flash-objects tracing initialized");
    });
}

/// Initialize tracing with JSON output for structured logging.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer = fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_current_span(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();

        info!("flash-objects tracing initialized (JSON mode)");
    });
}

/// Macro for creating spans with automatic error logging
#[macro_export]
macro_rules! span_trace {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Macro for logging and returning errors
#[macro_export]
macro_rules! log_error {
    ($err:expr) => {{
        let e = $err;
        tracing::error!(error = %e, "Operation failed");
        e
    }};
    ($err:expr, $msg:expr) => {{
        let e = $err;
        tracing::error!(error = %e, message = $msg, "Operation failed");
        e
    }};
}

/// Run `f` with a plain-text subscriber installed on this thread and return
/// everything it logged.
#[cfg(test)]
pub(crate) fn capture_logs<F: FnOnce()>(f: F) -> String {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
