use crate::types::{Bucket, PitchContext};

/// Map one pitch to its bucket, if any.
///
/// Only a marked first pitch on a 0-0 count can qualify. The first batter
/// of the game is never bucketed.
pub fn classify(ctx: &PitchContext) -> Option<Bucket> {
    if !(ctx.is_first_pitch && ctx.event.is_fresh_count()) {
        return None;
    }

    match (ctx.event.inning, ctx.pa_order) {
        (1, 2) => return Some(Bucket::Batter2),
        (1, 3) => return Some(Bucket::Batter3),
        (2, 1) => return Some(Bucket::Inning2Leadoff),
        (3, 1) => return Some(Bucket::Inning3Leadoff),
        _ => {}
    }

    if ctx.leadoff_recurrence == Some(1) {
        return Some(Bucket::Leadoff2ndPa);
    }

    None
}
