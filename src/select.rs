//! Variable and reduction-mode selection.
//!
//! Prompts read from and write to caller-supplied streams so the binary can
//! pass stdin/stdout and tests can pass byte buffers.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use serde::Deserialize;
use tracing::info;

use crate::error::{ExtractError, ExtractResult};
use crate::eso::{Dictionary, VariableDescriptor, VariableKey};

/// How sub-hourly samples are combined into one hourly value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionMode {
    /// Hourly value is the sum of its samples (energy-like quantities).
    #[serde(alias = "s")]
    Sum,
    /// Hourly value is the mean of its samples (rates and states).
    #[serde(alias = "a")]
    Average,
}

impl FromStr for ReductionMode {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sum" => Ok(Self::Sum),
            "a" | "average" => Ok(Self::Average),
            _ => Err(ExtractError::InvalidMode(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ReductionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => f.write_str("sum"),
            Self::Average => f.write_str("average"),
        }
    }
}

/// A resolved target variable and reduction mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub descriptor: VariableDescriptor,
    pub mode: ReductionMode,
}

impl Selection {
    /// Resolves caller-supplied tokens without prompting.
    ///
    /// # Errors
    ///
    /// [`ExtractError::UnknownVariable`] if `key` is not in `dictionary`,
    /// [`ExtractError::InvalidMode`] if `mode` is not a mode token.
    pub fn resolve(dictionary: &Dictionary, key: &str, mode: &str) -> ExtractResult<Self> {
        Ok(Self {
            descriptor: resolve_key(dictionary, key)?,
            mode: mode.parse()?,
        })
    }

    pub fn key(&self) -> &VariableKey {
        &self.descriptor.key
    }

    /// Output file name derived from the variable's display name.
    pub fn file_name(&self) -> String {
        format!("{}.csv", sanitize_file_stem(&self.descriptor.display_name()))
    }
}

/// Looks up `key` in the dictionary.
pub fn resolve_key(dictionary: &Dictionary, key: &str) -> ExtractResult<VariableDescriptor> {
    let key = VariableKey::from(key);
    dictionary
        .get(&key)
        .cloned()
        .ok_or_else(|| ExtractError::UnknownVariable(key.to_string()))
}

/// Strips characters that are awkward in file names: `[ ] / : ! % ,` and
/// whitespace.
///
/// ```
/// use eso_hourly::select::sanitize_file_stem;
///
/// assert_eq!(
///     sanitize_file_stem("ZONE ONE, Zone Mean Air Temperature [C] !Hourly"),
///     "ZONEONEZoneMeanAirTemperatureCHourly"
/// );
/// ```
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '[' | ']' | '/' | ':' | '!' | '%' | ','))
        .collect()
}

/// Writes every dictionary entry, one per line, in dictionary order.
pub fn write_listing(dictionary: &Dictionary, output: &mut impl Write) -> std::io::Result<()> {
    for descriptor in dictionary.iter() {
        writeln!(output, "{descriptor}")?;
    }
    Ok(())
}

fn read_token(input: &mut impl BufRead) -> ExtractResult<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Lists the dictionary and asks for a key.
///
/// # Errors
///
/// [`ExtractError::UnknownVariable`] if the answer is not a dictionary key.
/// A closed input stream reads as an empty answer.
pub fn prompt_key(
    dictionary: &Dictionary,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> ExtractResult<VariableDescriptor> {
    write_listing(dictionary, output)?;
    writeln!(output)?;
    writeln!(output, "Enter key for variable of interest from list above:")?;
    output.flush()?;
    let token = read_token(input)?;
    resolve_key(dictionary, &token)
}

/// Asks whether samples are summed or averaged.
///
/// # Errors
///
/// [`ExtractError::InvalidMode`] for anything other than `s` or `a`.
pub fn prompt_mode(input: &mut impl BufRead, output: &mut impl Write) -> ExtractResult<ReductionMode> {
    writeln!(output)?;
    writeln!(output, "Does the variable need to be summed or averaged? Enter 's' or 'a':")?;
    output.flush()?;
    read_token(input)?.parse()
}

/// Runs both prompts in order.
pub fn prompt_selection(
    dictionary: &Dictionary,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> ExtractResult<Selection> {
    let descriptor = prompt_key(dictionary, input, output)?;
    let mode = prompt_mode(input, output)?;
    info!(key = %descriptor.key, %mode, "variable selected");
    Ok(Selection { descriptor, mode })
}
