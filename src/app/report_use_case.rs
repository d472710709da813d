use crate::app::ports::{EventSourcePort, ReportFiles, ReportOutputPort};
use crate::config::Config;
use crate::error::{FirstPitchError, Result};
use crate::observability::{ingest, output, processing};
use crate::pipeline::Pipeline;
use crate::types::{PitchEvent, Subject};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{info, info_span, warn, Instrument};

/// Run parameters shared by every subject in a batch.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub game_types: Vec<String>,
    pub fetch_attempts: u32,
    pub retry_backoff: Duration,
}

impl ReportSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            start_date: config.start_date,
            end_date: config.end_date_or_today(),
            game_types: config.game_types.clone(),
            fetch_attempts: config.fetch.attempts.max(1),
            retry_backoff: Duration::from_millis(config.fetch.retry_backoff_ms),
        }
    }
}

/// What happened to one subject.
#[derive(Debug, Clone, PartialEq)]
pub enum SubjectOutcome {
    Written { files: ReportFiles, detail_rows: usize, summary_rows: usize },
    /// Nothing survived the starter filter and classification.
    Empty,
    FetchFailed { attempts: u32, error: String },
    WriteFailed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRun {
    pub subject: Subject,
    pub outcome: SubjectOutcome,
}

/// Use case for producing first-pitch bucket reports, one subject at a time
pub struct ReportUseCase {
    source: Box<dyn EventSourcePort>,
    output: Box<dyn ReportOutputPort>,
    settings: ReportSettings,
}

impl ReportUseCase {
    pub fn new(source: Box<dyn EventSourcePort>, output: Box<dyn ReportOutputPort>, settings: ReportSettings) -> Self {
        Self { source, output, settings }
    }

    /// Process every subject in order. A failing subject never stops the batch.
    pub async fn run(&self, subjects: &[Subject]) -> Vec<SubjectRun> {
        let mut runs = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let span = info_span!("subject", name = %subject.name, id = subject.id);
            let outcome = self.run_subject(subject).instrument(span).await;
            runs.push(SubjectRun { subject: subject.clone(), outcome });
        }
        runs
    }

    pub async fn run_subject(&self, subject: &Subject) -> SubjectOutcome {
        let events = match self.fetch_with_retry(subject.id).await {
            Ok(events) => events,
            Err((attempts, e)) => {
                warn!(attempts, error = %e, "giving up on subject after failed fetches");
                ingest::subject_failed();
                return SubjectOutcome::FetchFailed { attempts, error: e.to_string() };
            }
        };
        info!(rows = events.len(), "downloaded rows");

        let result = Pipeline::process(events, &self.settings.game_types);
        if result.report.is_empty() {
            info!("no bucketed pitches; skipping output");
            processing::subject_empty();
            return SubjectOutcome::Empty;
        }

        match self.output.write_report(subject, &result.report).await {
            Ok(files) => {
                info!(
                    detail = %files.detail.display(),
                    summary = %files.summary.display(),
                    "wrote report"
                );
                output::report_written();
                SubjectOutcome::Written {
                    files,
                    detail_rows: result.report.detail.len(),
                    summary_rows: result.report.summary.len(),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to write report");
                output::write_error();
                SubjectOutcome::WriteFailed { error: e.to_string() }
            }
        }
    }

    /// Fetch with a fixed backoff between attempts. Non-transient errors stop
    /// retrying immediately. On failure returns the attempts made and the last error.
    async fn fetch_with_retry(&self, subject_id: u64) -> std::result::Result<Vec<PitchEvent>, (u32, FirstPitchError)> {
        let attempts = self.settings.fetch_attempts.max(1);
        let mut attempt = 1;
        loop {
            ingest::attempt();
            match self.fetch_once(subject_id).await {
                Ok(events) => return Ok(events),
                Err(e) => {
                    ingest::error();
                    if attempt >= attempts || !e.is_transient() {
                        return Err((attempt, e));
                    }
                    warn!(attempt, error = %e, "fetch failed; retrying");
                    tokio::time::sleep(self.settings.retry_backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn fetch_once(&self, subject_id: u64) -> Result<Vec<PitchEvent>> {
        self.source
            .fetch_events(subject_id, self.settings.start_date, self.settings.end_date)
            .await
    }
}
