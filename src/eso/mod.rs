//! EnergyPlus output log (`.eso`) parsing and hourly reduction.

pub mod reader;
pub mod series;
pub mod types;

pub use reader::EsoReader;
pub use series::{HourlySeries, RawSeries};
pub use types::{Dictionary, VariableDescriptor, VariableKey};

/// Hours in a non-leap simulation year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Line text that terminates the dictionary section.
pub const DICTIONARY_END_MARKER: &str = "End of Data Dictionary";

/// Second-field token of the line that opens the annual run period.
pub const RUN_PERIOD_MARKER: &str = "RUN PERIOD 1";
