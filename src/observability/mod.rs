// Observability: metric counters per pipeline phase

pub mod metrics;

pub use metrics::{identity, ingest, output, processing};
