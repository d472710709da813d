//! Starter detection and leadoff-batter recurrence.

use crate::types::{PitchContext, SequencedEvent};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Games in which the subject faced the first batter of the first inning.
pub fn starter_games(events: &[SequencedEvent]) -> BTreeSet<u64> {
    events
        .iter()
        .filter(|e| e.event.inning == 1 && e.pa_order == 1)
        .map(|e| e.event.game_id)
        .collect()
}

/// Keep only events from games the subject started. Returns the kept events
/// and the number of relief-appearance events dropped.
pub fn retain_starts(events: Vec<SequencedEvent>) -> (Vec<SequencedEvent>, usize) {
    let starts = starter_games(&events);
    let before = events.len();
    let kept: Vec<SequencedEvent> = events
        .into_iter()
        .filter(|e| starts.contains(&e.event.game_id))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

/// How the leadoff batter of a game is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadoffIdentity {
    /// The feed carries lineup slots for the game; slot 1 is trusted as-is.
    BattingOrder,
    /// No lineup slot in the feed: whoever batted in the inning-1 pa_order-1
    /// plate appearance. Approximate, since a mid-game change of the slot's
    /// occupant is invisible to it.
    FirstBatter(u64),
}

/// Determine the leadoff identity for every game present in `events`.
/// Games with neither a lineup slot nor a first plate appearance are absent.
pub fn leadoff_identities(events: &[SequencedEvent]) -> HashMap<u64, LeadoffIdentity> {
    let mut has_order: BTreeSet<u64> = BTreeSet::new();
    let mut first_batter: HashMap<u64, (u32, u64)> = HashMap::new();

    for e in events {
        let ev = &e.event;
        if ev.batting_order.is_some() {
            has_order.insert(ev.game_id);
        }
        if ev.inning == 1 && e.pa_order == 1 {
            let candidate = (ev.at_bat_id, ev.batter_id);
            first_batter
                .entry(ev.game_id)
                .and_modify(|current| {
                    if candidate.0 < current.0 {
                        *current = candidate;
                    }
                })
                .or_insert(candidate);
        }
    }

    let mut identities: HashMap<u64, LeadoffIdentity> = first_batter
        .into_iter()
        .map(|(game_id, (_, batter_id))| (game_id, LeadoffIdentity::FirstBatter(batter_id)))
        .collect();
    for game_id in has_order {
        identities.insert(game_id, LeadoffIdentity::BattingOrder);
    }
    identities
}

/// Attach the leadoff recurrence counter to every event.
///
/// A qualifying trip is the leadoff batter's marked first pitch on a 0-0
/// count. Within a game these are numbered 0, 1, 2... in at-bat order; all
/// other events carry `None`.
pub fn attach_leadoff_recurrence(events: Vec<SequencedEvent>) -> Vec<PitchContext> {
    let identities = leadoff_identities(&events);

    let mut trips: HashMap<u64, Vec<(u32, u32, usize)>> = HashMap::new();
    for (idx, e) in events.iter().enumerate() {
        let ev = &e.event;
        if !(e.is_first_pitch && ev.is_fresh_count()) {
            continue;
        }
        let is_leadoff = match identities.get(&ev.game_id) {
            Some(LeadoffIdentity::BattingOrder) => ev.batting_order == Some(1),
            Some(LeadoffIdentity::FirstBatter(batter_id)) => ev.batter_id == *batter_id,
            None => false,
        };
        if is_leadoff {
            trips
                .entry(ev.game_id)
                .or_default()
                .push((ev.at_bat_id, ev.pitch_number, idx));
        }
    }

    for (game_id, identity) in &identities {
        if let LeadoffIdentity::FirstBatter(batter_id) = identity {
            debug!(game_id, batter_id, "leadoff batter inferred from first plate appearance");
        }
    }

    let mut recurrence: HashMap<usize, u32> = HashMap::new();
    for mut game_trips in trips.into_values() {
        game_trips.sort_unstable();
        for (n, (_, _, idx)) in game_trips.into_iter().enumerate() {
            recurrence.insert(idx, n as u32);
        }
    }

    events
        .into_iter()
        .enumerate()
        .map(|(idx, e)| PitchContext {
            leadoff_recurrence: recurrence.get(&idx).copied(),
            event: e.event,
            pa_order: e.pa_order,
            is_first_pitch: e.is_first_pitch,
        })
        .collect()
}
