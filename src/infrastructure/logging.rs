//! Logging setup
//!
//! Logging is off unless `DISPLAY_LOG` enables it. The fmt layer is built from an
//! explicit [`LogSettings`] and a writer, so tests can capture output with
//! `tracing::subscriber::with_default` instead of installing a global subscriber.

use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::config::Settings;
use crate::infrastructure::{InfraError, InfraResult};

/// Timestamp format of log lines, minute resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub enabled: bool,
}

impl LogSettings {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// INFO when enabled, nothing otherwise.
    pub fn level(&self) -> LevelFilter {
        if self.enabled {
            LevelFilter::INFO
        } else {
            LevelFilter::OFF
        }
    }
}

impl From<&Settings> for LogSettings {
    fn from(settings: &Settings) -> Self {
        Self::new(settings.display_log)
    }
}

/// Event format `<timestamp> - <LEVEL>: <message>`, without span context or target.
pub struct LineFormat {
    timer: ChronoLocal,
}

impl LineFormat {
    pub fn new() -> Self {
        Self {
            timer: ChronoLocal::new(TIMESTAMP_FORMAT.to_string()),
        }
    }
}

impl Default for LineFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        self.timer.format_time(&mut writer)?;
        write!(writer, " - {}: ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Plain-text fmt layer writing [`LineFormat`] lines, no ANSI.
pub fn fmt_layer<S, W>(settings: &LogSettings, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .event_format(LineFormat::new())
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(settings.level())
}

/// Install the global subscriber writing to stderr. No-op when disabled.
pub fn init(settings: &LogSettings) -> InfraResult<()> {
    if !settings.enabled {
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(fmt_layer(settings, std::io::stderr))
        .try_init()
        .map_err(|e| InfraError::Logging {
            message: e.to_string(),
        })?;

    tracing::debug!("logging enabled");
    Ok(())
}
