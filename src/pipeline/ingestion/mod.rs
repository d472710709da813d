// Pipeline ingestion: normalization of upstream pitch tables into canonical events

pub mod statcast;

pub use statcast::{parse_statcast_csv, StatcastTable};
