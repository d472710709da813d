use crate::types::{Bucket, BucketReport, ClassifiedPitch, DetailRow, SummaryRow};
use std::collections::{BTreeMap, HashMap};

/// Build the detail and summary tables for one subject.
pub fn build_report(mut pitches: Vec<ClassifiedPitch>) -> BucketReport {
    pitches.sort_by(|a, b| {
        (a.game_date, a.game_id, a.at_bat_id).cmp(&(b.game_date, b.game_id, b.at_bat_id))
    });

    let detail: Vec<DetailRow> = pitches
        .into_iter()
        .map(|p| DetailRow {
            game_id: p.game_id,
            game_date: p.game_date,
            bucket: p.bucket,
            pitch_name: p.pitch_name,
        })
        .collect();

    let summary = summarize(&detail);
    BucketReport { detail, summary }
}

/// Count and within-bucket percentage per (bucket, pitch name), ordered by
/// bucket label then pitch name.
pub fn summarize(detail: &[DetailRow]) -> Vec<SummaryRow> {
    let mut counts: BTreeMap<(Bucket, &str), usize> = BTreeMap::new();
    let mut totals: HashMap<Bucket, usize> = HashMap::new();
    for row in detail {
        *counts.entry((row.bucket, row.pitch_name.as_str())).or_insert(0) += 1;
        *totals.entry(row.bucket).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((bucket, pitch_name), count)| {
            let total = totals.get(&bucket).copied().unwrap_or(count);
            SummaryRow {
                bucket,
                pitch_name: pitch_name.to_string(),
                count,
                pct: round1(count as f64 / total as f64 * 100.0),
            }
        })
        .collect()
}

/// Ties go to the even digit, so 6.25 becomes 6.2.
fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
