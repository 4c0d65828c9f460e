use std::fs::OpenOptions;
use std::sync::{Mutex, Once};

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

use crate::LoggingConfig;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber described by `config`.
///
/// Only the first call has an effect. If another global subscriber is already installed
/// (e.g. by a host application or test harness), this is a no-op.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let file = config.file.as_ref().and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

        let writer = match (config.stderr, file) {
            (true, Some(file)) => BoxMakeWriter::new(std::io::stderr.and(Mutex::new(file))),
            (true, None) => BoxMakeWriter::new(std::io::stderr),
            (false, Some(file)) => BoxMakeWriter::new(Mutex::new(file)),
            (false, None) => BoxMakeWriter::new(std::io::sink),
        };

        let fmt_layer: Box<dyn Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!(
                target: "vigil.config",
                json = config.json,
                stderr = config.stderr,
                file = ?config.file,
                "tracing initialized"
            );
        }
    });
}
