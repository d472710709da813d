//! Counters for the fetch, processing and output phases.
//!
//! Recording is a no-op until a `metrics` recorder is installed by the host.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Ingestion
    FetchAttempts,
    FetchErrors,
    FetchRowsSkipped,
    SubjectsFetchFailed,

    // Processing
    EventsSequenced,
    ReliefEventsDropped,
    PitchesClassified,
    SubjectsEmpty,

    // Identity
    SubjectsUnresolved,

    // Output
    ReportsWritten,
    ReportWriteErrors,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::FetchAttempts => "first_pitch_fetch_attempts_total",
            MetricName::FetchErrors => "first_pitch_fetch_errors_total",
            MetricName::FetchRowsSkipped => "first_pitch_fetch_rows_skipped_total",
            MetricName::SubjectsFetchFailed => "first_pitch_subjects_fetch_failed_total",
            MetricName::EventsSequenced => "first_pitch_events_sequenced_total",
            MetricName::ReliefEventsDropped => "first_pitch_relief_events_dropped_total",
            MetricName::PitchesClassified => "first_pitch_pitches_classified_total",
            MetricName::SubjectsEmpty => "first_pitch_subjects_empty_total",
            MetricName::SubjectsUnresolved => "first_pitch_subjects_unresolved_total",
            MetricName::ReportsWritten => "first_pitch_reports_written_total",
            MetricName::ReportWriteErrors => "first_pitch_report_write_errors_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn incr(name: MetricName, by: u64) {
    ::metrics::counter!(name.as_str()).increment(by);
}

pub mod ingest {
    use super::{incr, MetricName};

    pub fn attempt() {
        incr(MetricName::FetchAttempts, 1);
    }

    pub fn error() {
        incr(MetricName::FetchErrors, 1);
    }

    /// Rows dropped during normalization because a required field did not parse.
    pub fn rows_skipped(count: usize) {
        incr(MetricName::FetchRowsSkipped, count as u64);
    }

    pub fn subject_failed() {
        incr(MetricName::SubjectsFetchFailed, 1);
    }
}

pub mod processing {
    use super::{incr, MetricName};

    pub fn events_sequenced(count: usize) {
        incr(MetricName::EventsSequenced, count as u64);
    }

    pub fn relief_events_dropped(count: usize) {
        incr(MetricName::ReliefEventsDropped, count as u64);
    }

    pub fn pitches_classified(count: usize) {
        incr(MetricName::PitchesClassified, count as u64);
    }

    pub fn subject_empty() {
        incr(MetricName::SubjectsEmpty, 1);
    }
}

pub mod identity {
    use super::{incr, MetricName};

    pub fn unresolved() {
        incr(MetricName::SubjectsUnresolved, 1);
    }
}

pub mod output {
    use super::{incr, MetricName};

    pub fn report_written() {
        incr(MetricName::ReportsWritten, 1);
    }

    pub fn write_error() {
        incr(MetricName::ReportWriteErrors, 1);
    }
}
