//! CSV export for hourly series.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ExtractError, ExtractResult};
use crate::eso::{HourlySeries, VariableDescriptor};

/// Exports an hourly series to a CSV file at the given path.
///
/// Writes one record per hour, one value per record, no header. The data is
/// written to a temporary sibling file first and renamed over `path`, so a
/// failed write leaves no partial artifact behind.
///
/// # Errors
///
/// Returns [`ExtractError::WriteFailure`] if the file cannot be created,
/// written, or moved into place.
pub fn export_csv(series: &HourlySeries, path: &Path) -> ExtractResult<()> {
    let tmp = temp_path(path);
    let written = File::create(&tmp)
        .and_then(|file| write_csv(series, io::BufWriter::new(file)))
        .and_then(|()| fs::rename(&tmp, path));

    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        return Err(ExtractError::WriteFailure {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(path = %path.display(), hours = series.len(), "hourly series written");
    Ok(())
}

/// Writes an hourly series as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(series: &HourlySeries, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for value in series.iter() {
        wtr.write_record([value.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Column header for dictionary listings.
const DICTIONARY_HEADER: [&str; 4] = ["key", "name", "unit_or_extra", "frequency"];

/// Writes dictionary entries as CSV, one row per variable, with the
/// reporting frequency split out into its own column.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_dictionary_csv<'a>(
    entries: impl IntoIterator<Item = &'a VariableDescriptor>,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(DICTIONARY_HEADER)?;

    for d in entries {
        wtr.write_record([
            d.key.as_str(),
            d.name.as_str(),
            d.unit_or_extra.as_str(),
            d.reporting_frequency().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eso::HOURS_PER_YEAR;
    use crate::select::ReductionMode;

    fn make_series(value: f64) -> HourlySeries {
        let samples = vec![value; HOURS_PER_YEAR];
        HourlySeries::reduce(&samples, 1, ReductionMode::Sum).expect("should reduce")
    }

    #[test]
    fn row_count_matches_hours_without_header() {
        let mut buf = Vec::new();
        write_csv(&make_series(21.5), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        assert_eq!(lines.len(), HOURS_PER_YEAR);
        assert!(lines.iter().all(|l| *l == "21.5"));
    }

    #[test]
    fn untouched_hours_render_as_zero() {
        let series = HourlySeries::reduce(&[2.0], 1, ReductionMode::Sum).expect("should reduce");
        let mut buf = Vec::new();
        write_csv(&series, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let mut lines = output.as_deref().unwrap_or("").lines();
        assert_eq!(lines.next(), Some("2"));
        assert_eq!(lines.next(), Some("0"));
    }

    #[test]
    fn deterministic_output() {
        let series = make_series(0.125);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&series, &mut buf1).ok();
        write_csv(&series, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn missing_directory_is_write_failure() {
        let path = std::env::temp_dir()
            .join("eso-hourly-no-such-dir")
            .join("nested")
            .join("out.csv");
        let err = export_csv(&make_series(1.0), &path).expect_err("must fail");
        assert!(matches!(err, ExtractError::WriteFailure { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn dictionary_listing_has_frequency_column() {
        let entries = [
            VariableDescriptor {
                key: "7".into(),
                name: "ZONE ONE".into(),
                unit_or_extra: "Zone Mean Air Temperature [C] !TimeStep".into(),
            },
            VariableDescriptor {
                key: "9".into(),
                name: "Whole Building".into(),
                unit_or_extra: String::new(),
            },
        ];
        let mut buf = Vec::new();
        write_dictionary_csv(&entries, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        assert_eq!(
            lines,
            vec![
                "key,name,unit_or_extra,frequency",
                "7,ZONE ONE,Zone Mean Air Temperature [C] !TimeStep,TimeStep",
                "9,Whole Building,,",
            ]
        );
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let tmp = temp_path(Path::new("out/Zone.csv"));
        assert_eq!(tmp, Path::new("out/.Zone.csv.tmp"));
    }
}
