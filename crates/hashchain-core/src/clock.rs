//! Sources of the rendered creation timestamp.

use std::fmt::{Display, Write};

use chrono::{DateTime, Local, Utc};

use crate::error::CoreError;

/// Default rendering, close to a JavaScript `Date()` string.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Supplies the rendered "now" stamped onto new records.
pub trait Clock: Send + Sync {
    /// Render the current time using the given `strftime` format.
    ///
    /// Fails with [`CoreError::InvalidTimestampFormat`] when `format` holds a
    /// specifier chrono cannot render.
    fn now(&self, format: &str) -> Result<String, CoreError>;
}

/// Render `formatted` into a string, turning a bad specifier into an error.
fn render(formatted: impl Display, format: &str) -> Result<String, CoreError> {
    let mut out = String::new();
    write!(out, "{formatted}")
        .map_err(|_| CoreError::InvalidTimestampFormat(format.to_string()))?;
    Ok(out)
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self, format: &str) -> Result<String, CoreError> {
        render(Local::now().format(format), format)
    }
}

/// A clock frozen at one instant, for tests and reproducible chains.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freeze at the given Unix timestamp (seconds).
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self, format: &str) -> Result<String, CoreError> {
        render(self.0.format(format), format)
    }
}
