//! Command-line arguments.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::config::ExtractConfig;
use crate::select::ReductionMode;

/// Extract one variable from an EnergyPlus `.eso` log as an hourly CSV.
#[derive(Debug, Parser)]
#[command(name = "eso-hourly", version)]
#[command(about = "Reduce one .eso report variable to 8760 hourly values", long_about = None)]
pub struct Cli {
    /// Load settings from a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Simulation output log to read [default: eplusout.eso]
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Dictionary key of the variable (prompted if omitted)
    #[arg(short, long)]
    pub key: Option<String>,
    /// Reduction mode: s (sum) or a (average) (prompted if omitted)
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<ReductionMode>,
    /// Output CSV path (defaults to a name derived from the variable)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Directory for the derived output file
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Convert per-timestep energy in J to mean power in W
    #[arg(long)]
    pub joules_to_watts: bool,
    /// Print the variable dictionary as CSV and exit
    #[arg(long)]
    pub list: bool,
    /// Print only dictionary entries whose name contains this text, then exit
    #[arg(long, value_name = "SUBSTRING")]
    pub find: Option<String>,
}

/// Writes a failure to `out` as a single `error: ...` line.
///
/// Used for every failure path of the binary so messages appear regardless
/// of the log filter.
pub fn report_error(err: &impl Display, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "error: {err}")
}

fn parse_mode(s: &str) -> Result<ReductionMode, String> {
    s.parse().map_err(|e: crate::error::ExtractError| e.to_string())
}

impl Cli {
    /// Whether the run only lists dictionary entries.
    pub fn listing_only(&self) -> bool {
        self.list || self.find.is_some()
    }

    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply(&self, cfg: &mut ExtractConfig) {
        if let Some(ref input) = self.input {
            cfg.input = input.clone();
        }
        if let Some(ref key) = self.key {
            cfg.key = Some(key.clone());
        }
        if let Some(mode) = self.mode {
            cfg.mode = Some(mode);
        }
        if let Some(ref output) = self.output {
            cfg.output = Some(output.clone());
        }
        if let Some(ref dir) = self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if self.joules_to_watts {
            cfg.joules_to_watts = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_non_interactive_flags() {
        let cli = Cli::try_parse_from(["eso-hourly", "--input", "run.eso", "-k", "7", "-m", "a"])
            .expect("parse should succeed");
        let mut cfg = ExtractConfig::default();
        cli.apply(&mut cfg);

        assert_eq!(cfg.input, PathBuf::from("run.eso"));
        assert_eq!(cfg.key.as_deref(), Some("7"));
        assert_eq!(cfg.mode, Some(ReductionMode::Average));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["eso-hourly", "--mode", "x"]).is_err());
    }

    #[test]
    fn flags_override_config_only_when_given() {
        let cli = Cli::try_parse_from(["eso-hourly", "--joules-to-watts"]).expect("parse should succeed");
        let mut cfg = ExtractConfig {
            key: Some("12".into()),
            mode: Some(ReductionMode::Sum),
            ..ExtractConfig::default()
        };
        cli.apply(&mut cfg);

        assert_eq!(cfg.key.as_deref(), Some("12"));
        assert_eq!(cfg.mode, Some(ReductionMode::Sum));
        assert!(cfg.joules_to_watts);
        assert!(!cli.listing_only());
    }

    #[test]
    fn find_implies_listing() {
        let cli = Cli::try_parse_from(["eso-hourly", "--find", "chiller"]).expect("parse should succeed");
        assert!(cli.listing_only());
        assert_eq!(cli.find.as_deref(), Some("chiller"));
    }

    #[test]
    fn errors_are_reported_as_plain_lines() {
        let mut out = Vec::new();
        report_error(&crate::error::ExtractError::InvalidMode("q".into()), &mut out).ok();
        assert_eq!(
            String::from_utf8(out).ok().as_deref(),
            Some("error: invalid reduction mode \"q\" (expected 's' or 'a')\n")
        );
    }
}
