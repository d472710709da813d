// Pipeline processing: sequencing, starter tracking, classification and aggregation

pub mod aggregate;
pub mod classifier;
pub mod sequencer;
pub mod starter;

pub use aggregate::build_report;
pub use classifier::classify;
pub use sequencer::sequence;
pub use starter::{attach_leadoff_recurrence, retain_starts};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::{Half, PitchEvent};
    use chrono::NaiveDate;

    /// A classified fastball on a 0-0 count.
    pub fn pitch(game_id: u64, inning: u8, half: Half, at_bat_id: u32, pitch_number: u32) -> PitchEvent {
        PitchEvent {
            game_id,
            game_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            game_type: "R".to_string(),
            inning,
            half,
            at_bat_id,
            pitch_number,
            balls: 0,
            strikes: 0,
            batter_id: 100 + at_bat_id as u64,
            batting_order: None,
            pitch_type: Some("FF".to_string()),
            pitch_name: None,
        }
    }

    /// First pitch of an at-bat by a given batter, top half.
    pub fn at_bat(game_id: u64, inning: u8, at_bat_id: u32, batter_id: u64, batting_order: Option<u8>) -> PitchEvent {
        PitchEvent {
            batter_id,
            batting_order,
            ..pitch(game_id, inning, Half::Top, at_bat_id, 1)
        }
    }
}
