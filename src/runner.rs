//! End-to-end extraction: dictionary, selection, scan, reduction, export.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ExtractConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::eso::{Dictionary, EsoReader, HourlySeries, VariableDescriptor, VariableKey};
use crate::io::export::{export_csv, write_dictionary_csv};
use crate::select::{self, ReductionMode, Selection};

/// Outcome of a completed extraction.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub key: VariableKey,
    pub variable: String,
    pub mode: ReductionMode,
    pub output: PathBuf,
    pub samples_collected: usize,
    pub samples_per_hour: usize,
    /// Samples past the last full hour that were not reduced.
    pub samples_dropped: usize,
    pub hourly: HourlySeries,
}

impl fmt::Display for ExtractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Extraction Report ---")?;
        writeln!(f, "Variable:          {} (key {})", self.variable, self.key)?;
        writeln!(f, "Reduction:         {}", self.mode)?;
        writeln!(f, "Samples collected: {}", self.samples_collected)?;
        writeln!(f, "Samples per hour:  {}", self.samples_per_hour)?;
        writeln!(f, "Samples dropped:   {}", self.samples_dropped)?;
        write!(f, "Written to:        {}", self.output.display())
    }
}

fn open_log(path: &Path) -> ExtractResult<EsoReader<BufReader<File>>> {
    let file = File::open(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(EsoReader::new(BufReader::new(file)))
}

/// Parses only the dictionary section of the log at `path`.
///
/// # Errors
///
/// Returns [`ExtractError::Read`] if the log cannot be opened and
/// [`ExtractError::MalformedHeader`] if the dictionary is unterminated.
pub fn load_dictionary(path: &Path) -> ExtractResult<Dictionary> {
    open_log(path)?.read_dictionary()
}

/// Writes the dictionary of the log at `path` as CSV, optionally only the
/// entries whose display name contains `find` (case-insensitive).
///
/// Returns the number of entries written.
pub fn list_variables(path: &Path, find: Option<&str>, output: impl Write) -> ExtractResult<usize> {
    let dictionary = load_dictionary(path)?;
    let entries: Vec<&VariableDescriptor> = match find {
        Some(needle) => dictionary.find_by_name(needle),
        None => dictionary.iter().collect(),
    };
    write_dictionary_csv(entries.iter().copied(), output)?;
    Ok(entries.len())
}

/// Resolves the selection from configuration, prompting for whatever is unset.
fn resolve_selection(
    dictionary: &Dictionary,
    cfg: &ExtractConfig,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> ExtractResult<Selection> {
    let descriptor = match cfg.key.as_deref() {
        Some(key) => select::resolve_key(dictionary, key)?,
        None => select::prompt_key(dictionary, input, output)?,
    };
    let mode = match cfg.mode {
        Some(mode) => mode,
        None => select::prompt_mode(input, output)?,
    };
    Ok(Selection { descriptor, mode })
}

/// Runs one extraction.
///
/// The log is opened once: the dictionary is read, the selection resolved
/// (prompting on `input`/`output` for any key or mode the configuration
/// leaves unset), and the rest of the same stream is scanned for samples.
/// The output file is only created once a full hourly series exists.
///
/// # Errors
///
/// Any [`ExtractError`]; all are terminal and leave no output behind.
pub fn run_extraction(
    cfg: &ExtractConfig,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> ExtractResult<ExtractReport> {
    let mut reader = open_log(&cfg.input)?;
    let dictionary = reader.read_dictionary()?;

    let selection = resolve_selection(&dictionary, cfg, input, output)?;
    let variable = selection.descriptor.display_name();
    let target = cfg
        .output
        .clone()
        .unwrap_or_else(|| cfg.output_dir.join(selection.file_name()));
    writeln!(
        output,
        "'{variable}' will be written to file '{}' at hourly timesteps",
        target.display()
    )?;

    let mut raw = reader.collect_series(selection.key())?;
    let samples_collected = raw.len();
    let samples_per_hour = raw.samples_per_hour();
    let samples_dropped = raw.truncated_len();
    info!(
        key = %selection.key(),
        samples_collected,
        samples_per_hour,
        "series scanned"
    );

    if cfg.joules_to_watts {
        raw = raw.joules_to_watts();
    }
    let hourly = HourlySeries::from_raw(&raw, selection.mode)?;
    export_csv(&hourly, &target)?;

    Ok(ExtractReport {
        key: selection.key().clone(),
        variable,
        mode: selection.mode,
        output: target,
        samples_collected,
        samples_per_hour,
        samples_dropped,
        hourly,
    })
}
