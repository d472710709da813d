use crate::app::ports::{ReportFiles, ReportOutputPort};
use crate::constants::{DETAIL_FILE_SUFFIX, SUMMARY_FILE_SUFFIX};
use crate::error::{FirstPitchError, Result};
use crate::types::{BucketReport, Subject};
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Writes `<Name>_first_pitch.csv` and `<Name>_first_pitch_summary.csv`
/// into a single output directory.
pub struct CsvReportOutputAdapter {
    output_dir: PathBuf,
}

impl CsvReportOutputAdapter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn paths_for(&self, subject: &Subject) -> ReportFiles {
        let stem = file_stem(&subject.name);
        ReportFiles {
            detail: self.output_dir.join(format!("{}{}", stem, DETAIL_FILE_SUFFIX)),
            summary: self.output_dir.join(format!("{}{}", stem, SUMMARY_FILE_SUFFIX)),
        }
    }
}

/// Subject names become file prefixes: whitespace to underscores, path
/// separators dropped.
fn file_stem(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| !matches!(c, '/' | '\\'))
        .collect()
}

fn to_csv<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| FirstPitchError::Io(e.into_error()))
}

#[async_trait]
impl ReportOutputPort for CsvReportOutputAdapter {
    async fn write_report(&self, subject: &Subject, report: &BucketReport) -> Result<ReportFiles> {
        // Serialize both tables before touching the filesystem so a bad row
        // cannot leave one file behind without the other.
        let detail = to_csv(&report.detail)?;
        let summary = to_csv(&report.summary)?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let files = self.paths_for(subject);
        tokio::fs::write(&files.detail, detail).await?;
        tokio::fs::write(&files.summary, summary).await?;

        debug!(
            detail_rows = report.detail.len(),
            summary_rows = report.summary.len(),
            "report files written"
        );
        Ok(files)
    }
}
