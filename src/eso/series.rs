//! Sub-hourly sample series and their reduction to an hourly year.

use tracing::{debug, warn};

use super::HOURS_PER_YEAR;
use crate::error::{ExtractError, ExtractResult};
use crate::select::ReductionMode;

/// Seconds per hour, for energy-to-power conversion.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Samples for one variable in log order, restricted to the run period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    samples: Vec<f64>,
}

impl RawSeries {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Inferred sub-hourly sampling rate, `floor(len / 8760)`.
    pub fn samples_per_hour(&self) -> usize {
        self.samples.len() / HOURS_PER_YEAR
    }

    /// Samples past `8760 * samples_per_hour` that reduction will drop.
    pub fn truncated_len(&self) -> usize {
        self.samples.len() - HOURS_PER_YEAR * self.samples_per_hour()
    }

    /// Converts per-timestep energy in joules to mean power in watts.
    ///
    /// Each sample covers `1 / samples_per_hour` of an hour, so the rate is
    /// `value * samples_per_hour / 3600`. A series too short to infer a rate
    /// is returned unchanged.
    pub fn joules_to_watts(self) -> Self {
        let samples_per_hour = self.samples_per_hour();
        if samples_per_hour == 0 {
            return self;
        }
        let factor = samples_per_hour as f64 / SECONDS_PER_HOUR;
        Self {
            samples: self.samples.into_iter().map(|v| v * factor).collect(),
        }
    }
}

impl FromIterator<f64> for RawSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Exactly one value per hour of a non-leap year.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    values: Vec<f64>,
}

impl HourlySeries {
    /// Reduces a raw series at its inferred sampling rate.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnexpectedSeriesLength`] when fewer than 8760
    /// samples were collected.
    pub fn from_raw(raw: &RawSeries, mode: ReductionMode) -> ExtractResult<Self> {
        let samples_per_hour = raw.samples_per_hour();
        if samples_per_hour == 0 {
            return Err(ExtractError::UnexpectedSeriesLength {
                collected: raw.len(),
                required: HOURS_PER_YEAR,
            });
        }
        debug!(samples_per_hour, %mode, "reducing to hourly");
        let truncated = raw.truncated_len();
        if truncated > 0 {
            warn!(truncated, "samples beyond the last full hour are dropped");
        }
        Self::reduce(raw.samples(), samples_per_hour, mode)
    }

    /// Reduces `samples` in contiguous blocks of `samples_per_hour`.
    ///
    /// Sample `i` lands in hour `i / samples_per_hour`. Samples past hour
    /// 8759 are dropped; hours that receive nothing stay at zero.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnexpectedSeriesLength`] if `samples_per_hour`
    /// is zero.
    pub fn reduce(samples: &[f64], samples_per_hour: usize, mode: ReductionMode) -> ExtractResult<Self> {
        if samples_per_hour == 0 {
            return Err(ExtractError::UnexpectedSeriesLength {
                collected: samples.len(),
                required: HOURS_PER_YEAR,
            });
        }

        let mut values = vec![0.0; HOURS_PER_YEAR];
        let divisor = samples_per_hour as f64;
        for (i, &value) in samples
            .iter()
            .take(HOURS_PER_YEAR * samples_per_hour)
            .enumerate()
        {
            let hour = (i / samples_per_hour).min(HOURS_PER_YEAR - 1);
            values[hour] += match mode {
                ReductionMode::Sum => value,
                ReductionMode::Average => value / divisor,
            };
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}
