//! Hourly extraction of a single report variable from EnergyPlus `.eso` logs.

pub mod cli;
pub mod config;
pub mod error;
/// Output log parsing and hourly reduction.
pub mod eso;
pub mod io;
pub mod runner;
pub mod select;

pub use error::{ExtractError, ExtractResult};
