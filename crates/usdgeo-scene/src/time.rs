//! Time codes used to resolve attribute values.

use std::fmt;

/// The time at which an attribute is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeCode {
    /// The non-time-varying (default) value. Time samples are never
    /// consulted.
    #[default]
    Default,
    /// The earliest authored time sample, or the default value when the
    /// attribute has no samples.
    EarliestTime,
    /// A specific time.
    Time(f64),
}

impl TimeCode {
    /// Time code for an integer frame sample.
    #[must_use]
    pub fn frame(frame: i32) -> Self {
        Self::Time(f64::from(frame))
    }
}

impl From<f64> for TimeCode {
    fn from(time: f64) -> Self {
        Self::Time(time)
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::EarliestTime => f.write_str("earliest"),
            Self::Time(t) => write!(f, "{t}"),
        }
    }
}
