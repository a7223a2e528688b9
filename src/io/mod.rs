/// CSV export of hourly series.
pub mod export;
