//! Plate-appearance sequencing.
//!
//! Must see the subject's full event set: ranks computed after rows have been
//! dropped would shift every later plate appearance in the half-inning.

use crate::types::{Half, PitchEvent, SequencedEvent};
use std::collections::{BTreeSet, HashMap};

type HalfInningKey = (u64, u8, Half);

/// Attach `pa_order` and `is_first_pitch` to every event. Output order matches input order.
pub fn sequence(events: Vec<PitchEvent>) -> Vec<SequencedEvent> {
    let ranks = pa_ranks(&events);
    let first_pitches = first_pitch_indices(&events);

    events
        .into_iter()
        .enumerate()
        .map(|(idx, event)| {
            let key = (event.game_id, event.inning, event.half);
            let pa_order = ranks
                .get(&key)
                .and_then(|ids| ids.get(&event.at_bat_id))
                .copied()
                .unwrap_or(0);
            SequencedEvent {
                is_first_pitch: first_pitches.contains(&idx),
                pa_order,
                event,
            }
        })
        .collect()
}

/// Dense rank of each distinct at-bat id within its (game, inning, half), starting at 1.
fn pa_ranks(events: &[PitchEvent]) -> HashMap<HalfInningKey, HashMap<u32, u32>> {
    let mut at_bats: HashMap<HalfInningKey, BTreeSet<u32>> = HashMap::new();
    for event in events {
        at_bats
            .entry((event.game_id, event.inning, event.half))
            .or_default()
            .insert(event.at_bat_id);
    }

    at_bats
        .into_iter()
        .map(|(key, ids)| {
            let ranked = ids
                .into_iter()
                .zip(1u32..)
                .collect::<HashMap<u32, u32>>();
            (key, ranked)
        })
        .collect()
}

/// Index of the lowest-numbered classified pitch of every (game, at-bat).
/// Rows without a pitch classification never count, so a blank feed row in
/// the nominal pitch-1 slot hands the marker to the next real pitch.
fn first_pitch_indices(events: &[PitchEvent]) -> BTreeSet<usize> {
    let mut best: HashMap<(u64, u32), (u32, usize)> = HashMap::new();
    for (idx, event) in events.iter().enumerate() {
        if !event.has_classification() {
            continue;
        }
        let candidate = (event.pitch_number, idx);
        best.entry((event.game_id, event.at_bat_id))
            .and_modify(|current| {
                if candidate < *current {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }
    best.into_values().map(|(_, idx)| idx).collect()
}
