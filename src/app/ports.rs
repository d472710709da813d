use crate::error::Result;
use crate::types::{BucketReport, PitchEvent, Subject};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Source of a pitcher's pitch-by-pitch events over a date range.
#[async_trait]
pub trait EventSourcePort: Send + Sync {
    async fn fetch_events(&self, subject_id: u64, start: NaiveDate, end: NaiveDate) -> Result<Vec<PitchEvent>>;
}

/// Display name to player identifier lookup.
#[async_trait]
pub trait IdentityResolverPort: Send + Sync {
    async fn resolve(&self, display_name: &str) -> Result<Option<u64>>;
}

/// Persists a subject's detail and summary tables.
#[async_trait]
pub trait ReportOutputPort: Send + Sync {
    async fn write_report(&self, subject: &Subject, report: &BucketReport) -> Result<ReportFiles>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportFiles {
    pub detail: PathBuf,
    pub summary: PathBuf,
}
