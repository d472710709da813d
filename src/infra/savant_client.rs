use crate::app::ports::EventSourcePort;
use crate::constants::SAVANT_CSV_URL;
use crate::error::{FirstPitchError, Result};
use crate::observability::ingest;
use crate::pipeline::ingestion::parse_statcast_csv;
use crate::types::PitchEvent;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Baseball Savant pitch-level search, CSV flavour.
pub struct SavantClient {
    client: reqwest::Client,
    base_url: String,
}

impl SavantClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(SAVANT_CSV_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("first_pitch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn query(subject_id: u64, start: NaiveDate, end: NaiveDate) -> Vec<(&'static str, String)> {
        vec![
            ("all", "true".to_string()),
            ("type", "details".to_string()),
            ("player_type", "pitcher".to_string()),
            ("pitchers_lookup[]", subject_id.to_string()),
            ("game_date_gt", start.format("%Y-%m-%d").to_string()),
            ("game_date_lt", end.format("%Y-%m-%d").to_string()),
            // Regular season, postseason and spring; game types are filtered downstream.
            ("hfGT", "R|PO|S|".to_string()),
            ("min_pitches", "0".to_string()),
            ("min_results", "0".to_string()),
            ("group_by", "name".to_string()),
            ("sort_col", "pitches".to_string()),
            ("sort_order", "desc".to_string()),
        ]
    }
}

#[async_trait]
impl EventSourcePort for SavantClient {
    #[instrument(skip(self))]
    async fn fetch_events(&self, subject_id: u64, start: NaiveDate, end: NaiveDate) -> Result<Vec<PitchEvent>> {
        debug!("requesting statcast csv");
        let resp = self
            .client
            .get(&self.base_url)
            .query(&Self::query(subject_id, start, end))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FirstPitchError::Status {
                status: status.as_u16(),
                url: self.base_url.clone(),
            });
        }

        let payload = resp.bytes().await?;
        if payload.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(FirstPitchError::EmptyPayload { subject_id });
        }

        let table = parse_statcast_csv(&payload)?;
        if table.skipped_rows > 0 {
            warn!(skipped = table.skipped_rows, "dropped unparseable statcast rows");
            ingest::rows_skipped(table.skipped_rows);
        }
        info!(rows = table.events.len(), bytes = payload.len(), "fetched statcast events");
        Ok(table.events)
    }
}
