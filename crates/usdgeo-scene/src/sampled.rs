//! Time-sampled values with held resolution.

use serde::{Deserialize, Serialize};

use crate::TimeCode;

/// A value with an optional default and zero or more time samples.
///
/// Resolution follows held semantics: a time between two samples resolves
/// to the earlier sample, a time before the first sample resolves to the
/// first sample and a time after the last resolves to the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SampledFile<T>")]
pub struct Sampled<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<T>,
    /// Sorted by time, unique times.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    samples: Vec<(f64, T)>,
}

/// Samples as authored in a file, in any order.
#[derive(Deserialize)]
struct SampledFile<T> {
    #[serde(default = "Option::default")]
    default: Option<T>,
    #[serde(default = "Vec::new")]
    samples: Vec<(f64, T)>,
}

impl<T> From<SampledFile<T>> for Sampled<T> {
    fn from(file: SampledFile<T>) -> Self {
        let mut sampled = Self {
            default: file.default,
            samples: Vec::with_capacity(file.samples.len()),
        };
        // Later entries win on repeated times.
        for (time, value) in file.samples {
            sampled.set_sample(time, value);
        }
        sampled
    }
}

impl<T> Default for Sampled<T> {
    fn default() -> Self {
        Self {
            default: None,
            samples: Vec::new(),
        }
    }
}

impl<T> Sampled<T> {
    pub fn set_default(&mut self, value: T) {
        self.default = Some(value);
    }

    /// Author a sample, replacing any sample already at `time`.
    pub fn set_sample(&mut self, time: f64, value: T) {
        match self.samples.binary_search_by(|(t, _)| t.total_cmp(&time)) {
            Ok(i) => self.samples[i].1 = value,
            Err(i) => self.samples.insert(i, (time, value)),
        }
    }

    #[must_use]
    pub fn num_time_samples(&self) -> usize {
        self.samples.len()
    }

    /// Resolve the value at `time`.
    #[must_use]
    pub fn get(&self, time: TimeCode) -> Option<&T> {
        match time {
            TimeCode::Default => self.default.as_ref(),
            TimeCode::EarliestTime => self
                .samples
                .first()
                .map(|(_, v)| v)
                .or(self.default.as_ref()),
            TimeCode::Time(t) => self.held_sample(t).or(self.default.as_ref()),
        }
    }

    fn held_sample(&self, time: f64) -> Option<&T> {
        let first = self.samples.first()?;
        let index = self.samples.partition_point(|(t, _)| *t <= time);
        if index == 0 {
            Some(&first.1)
        } else {
            Some(&self.samples[index - 1].1)
        }
    }
}
