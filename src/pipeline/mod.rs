// Data processing pipeline: ingestion normalization and per-subject processing

pub mod ingestion;
pub mod processing;

use crate::observability::processing as metrics;
use crate::pipeline::processing::{attach_leadoff_recurrence, build_report, classify, retain_starts, sequence};
use crate::types::{BucketReport, ClassifiedPitch, PitchEvent};
use tracing::{debug, info, instrument};

/// Result of processing one subject's event table
#[derive(Debug, Clone, Default)]
pub struct PipelineResult {
    pub total_events: usize,
    pub off_type_events: usize,
    pub relief_events: usize,
    pub classified_events: usize,
    pub report: BucketReport,
}

pub struct Pipeline;

impl Pipeline {
    /// Run sequencing, starter filtering, classification and aggregation over
    /// a subject's full event table.
    ///
    /// `game_types` restricts which games are reported (empty keeps all). The
    /// restriction is applied after sequencing, like every other filter.
    #[instrument(skip(events, game_types), fields(events = events.len()))]
    pub fn process(events: Vec<PitchEvent>, game_types: &[String]) -> PipelineResult {
        let total_events = events.len();

        let sequenced = sequence(events);
        metrics::events_sequenced(sequenced.len());

        let before = sequenced.len();
        let sequenced: Vec<_> = sequenced
            .into_iter()
            .filter(|e| game_types.is_empty() || game_types.iter().any(|t| *t == e.event.game_type))
            .collect();
        let off_type_events = before - sequenced.len();

        let (starts, relief_events) = retain_starts(sequenced);
        metrics::relief_events_dropped(relief_events);
        debug!(kept = starts.len(), relief_events, off_type_events, "filtered to starts");

        let classified: Vec<ClassifiedPitch> = attach_leadoff_recurrence(starts)
            .iter()
            .filter_map(|ctx| {
                let bucket = classify(ctx)?;
                Some(ClassifiedPitch {
                    game_id: ctx.event.game_id,
                    game_date: ctx.event.game_date,
                    at_bat_id: ctx.event.at_bat_id,
                    bucket,
                    pitch_name: ctx.event.display_pitch_name()?,
                })
            })
            .collect();
        let classified_events = classified.len();
        metrics::pitches_classified(classified_events);

        let report = build_report(classified);
        info!(
            total_events,
            classified_events,
            summary_rows = report.summary.len(),
            "processed event table"
        );

        PipelineResult {
            total_events,
            off_type_events,
            relief_events,
            classified_events,
            report,
        }
    }
}
