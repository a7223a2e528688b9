//! Streaming reader over the two sections of an output log.

use std::io::Read;

use csv::StringRecord;
use tracing::{debug, info, warn};

use super::series::RawSeries;
use super::types::{Dictionary, VariableDescriptor, VariableKey};
use super::{DICTIONARY_END_MARKER, RUN_PERIOD_MARKER};
use crate::error::{ExtractError, ExtractResult};

/// Single forward pass over an output log.
///
/// [`read_dictionary`](Self::read_dictionary) consumes the header section and
/// stops right after its terminator; [`collect_series`](Self::collect_series)
/// then scans whatever remains of the same stream.
pub struct EsoReader<R> {
    inner: csv::Reader<R>,
    record: StringRecord,
}

impl<R: Read> EsoReader<R> {
    pub fn new(rdr: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(rdr);
        Self {
            inner,
            record: StringRecord::new(),
        }
    }

    fn next_record(&mut self) -> ExtractResult<bool> {
        Ok(self.inner.read_record(&mut self.record)?)
    }

    fn line(&self) -> u64 {
        self.record.position().map_or(0, |p| p.line())
    }

    /// Reads dictionary lines up to and excluding the terminator line.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MalformedHeader`] if the stream ends before the
    /// terminator is seen.
    pub fn read_dictionary(&mut self) -> ExtractResult<Dictionary> {
        let mut dictionary = Dictionary::new();

        while self.next_record()? {
            if self
                .record
                .iter()
                .any(|field| field.contains(DICTIONARY_END_MARKER))
            {
                info!(
                    variables = dictionary.len(),
                    line = self.line(),
                    "data dictionary parsed"
                );
                return Ok(dictionary);
            }

            let Some(descriptor) = descriptor_from_record(&self.record) else {
                continue;
            };
            if let Some(previous) = dictionary.insert(descriptor) {
                warn!(key = %previous.key, "duplicate dictionary key, later entry wins");
            }
        }

        Err(ExtractError::MalformedHeader {
            marker: DICTIONARY_END_MARKER,
        })
    }

    /// Collects every `key,value` sample for `key` seen after the first
    /// run-period marker, in log order.
    ///
    /// Lines for other keys and lines with a field count other than two are
    /// skipped. Marker lines never contribute a sample.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidSample`] if a matching value does not
    /// parse as a number.
    pub fn collect_series(&mut self, key: &VariableKey) -> ExtractResult<RawSeries> {
        let mut in_run_period = false;
        let mut samples = Vec::new();

        while self.next_record()? {
            if self.record.get(1).map(str::trim) == Some(RUN_PERIOD_MARKER) {
                // Only the first marker flips the flag; later ones are plain lines.
                if !in_run_period {
                    in_run_period = true;
                    debug!(line = self.line(), "run period started");
                }
                continue;
            }
            if !in_run_period || self.record.len() != 2 || &self.record[0] != key.as_str() {
                continue;
            }

            let raw = self.record[1].trim();
            let value = raw.parse::<f64>().map_err(|_| ExtractError::InvalidSample {
                line: self.line(),
                value: raw.to_string(),
            })?;
            samples.push(value);
        }

        if !in_run_period {
            warn!("no run period marker found, series is empty");
        }
        debug!(key = %key, samples = samples.len(), "series collected");
        Ok(RawSeries::new(samples))
    }
}

fn descriptor_from_record(record: &StringRecord) -> Option<VariableDescriptor> {
    if record.len() < 3 {
        return None;
    }
    Some(VariableDescriptor {
        key: VariableKey::new(&record[0]),
        name: record[2].to_string(),
        unit_or_extra: record.get(3).unwrap_or_default().to_string(),
    })
}
