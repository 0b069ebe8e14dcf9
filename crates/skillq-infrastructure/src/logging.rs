//! Logging setup and diagnostic forwarding.
//!
//! Failures of fire-and-forget writes only ever reach the logs. The
//! `DiagnosticLayer` lets a host shell observe those WARN/ERROR events
//! through a channel instead of scraping log files.

use crate::paths::SkillqPaths;
use serde_json::Value;
use skillq_core::config::LoggingConfig;
use skillq_core::{Result, SkillqError};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "skillq.log";

/// A WARN or ERROR event captured for the host shell.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DiagnosticEvent {
    pub target: String,
    pub level: String,
    pub message: String,
    pub fields: HashMap<String, Value>,
    pub timestamp: String,
}

/// Tracing layer that forwards WARN and ERROR events to a channel.
pub struct DiagnosticLayer {
    sender: mpsc::UnboundedSender<DiagnosticEvent>,
}

impl DiagnosticLayer {
    pub fn new(sender: mpsc::UnboundedSender<DiagnosticEvent>) -> Self {
        Self { sender }
    }
}

impl<S> Layer<S> for DiagnosticLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level > Level::WARN {
            return;
        }

        let mut fields = HashMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        let message = fields
            .remove("message")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let diagnostic = DiagnosticEvent {
            target: event.metadata().target().to_string(),
            level: level.to_string(),
            message,
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver may be gone during shutdown
        let _ = self.sender.send(diagnostic);
    }
}

/// Field visitor that extracts tracing event fields into a HashMap
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}

/// Options for `init_logging`.
#[derive(Default)]
pub struct LoggingOptions {
    pub config: LoggingConfig,
    pub paths: SkillqPaths,
    /// When set, WARN/ERROR events are also forwarded here.
    pub diagnostics: Option<mpsc::UnboundedSender<DiagnosticEvent>>,
}

/// Keeps the non-blocking file writer alive; drop it at shutdown to flush.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `config.level`. Fails if a global subscriber is
/// already installed.
pub fn init_logging(options: LoggingOptions) -> Result<LoggingGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.config.level))
        .map_err(|e| SkillqError::config(format!("Invalid log level: {}", e)))?;

    let (file_layer, file_guard) = if options.config.file {
        let logs_dir = options.paths.logs_dir()?;
        std::fs::create_dir_all(&logs_dir)?;
        let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .with(options.diagnostics.map(DiagnosticLayer::new))
        .try_init()
        .map_err(|e| SkillqError::config(format!("Failed to install logger: {}", e)))?;

    tracing::debug!("Logging initialized");

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
