//! Shared test fixtures for integration tests.

use std::fs;
use std::path::PathBuf;

use eso_hourly::eso::HOURS_PER_YEAR;

/// Dictionary section with the zone-temperature variable under key 7.
pub const DICTIONARY: &str = "\
Program Version,EnergyPlus, Version 9.4.0-998c4b761e, YMD=2021.05.13 10:12
1,5,Environment Title[],Latitude[deg],Longitude[deg],Time Zone[],Elevation[m]
2,8,Day of Simulation[],Month[],Day of Month[],DST Indicator[1=yes 0=no],Hour[],StartMinute[],EndMinute[],DayType
7,1,Zone Mean Air Temperature,C
8,1,CHILLER 1,Chiller Electricity Energy [J] !TimeStep
End of Data Dictionary
";

/// Builds a full log: dictionary, a design-day block before the run period,
/// the run-period marker, then `samples_per_hour * 8760` samples for key 7
/// cycling through `pattern`, interleaved with timestep and key 8 lines.
pub fn annual_log(samples_per_hour: usize, pattern: &[f64]) -> String {
    let mut log = String::from(DICTIONARY);
    log.push_str("1,CHICAGO ANN HTG 99.6% CONDNS DB,41.77,-87.75,-6.00,190.00\n");
    log.push_str("7,-99.0\n");
    log.push_str("1,RUN PERIOD 1,41.78,-87.75,-6.00,190.00\n");
    let total = samples_per_hour * HOURS_PER_YEAR;
    for (i, value) in pattern.iter().cycle().take(total).enumerate() {
        log.push_str(&format!("2,1, 1, 1, 0,{}, 0.00,15.00,Tuesday\n", i / samples_per_hour + 1));
        log.push_str(&format!("7,{value}\n"));
        log.push_str("8,3600.0\n");
    }
    log.push_str("End of Data\n");
    log
}

/// Fresh scratch directory unique to `name`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("eso-hourly-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}

/// Writes `contents` as `eplusout.eso` in a fresh scratch directory.
pub fn write_log(name: &str, contents: &str) -> PathBuf {
    let dir = scratch_dir(name);
    let path = dir.join("eplusout.eso");
    fs::write(&path, contents).expect("log should be writable");
    path
}
