use crate::constants::pitch_name_for_code;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top or bottom of an inning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Half {
    Top,
    Bottom,
}

impl FromStr for Half {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "t" => Ok(Half::Top),
            "bot" | "bottom" | "b" => Ok(Half::Bottom),
            other => Err(format!("unknown inning half '{}'", other)),
        }
    }
}

/// One observed pitch, in the canonical shape produced at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchEvent {
    pub game_id: u64,
    pub game_date: NaiveDate,
    pub game_type: String,
    pub inning: u8,
    pub half: Half,
    pub at_bat_id: u32,
    /// 1-based within the at-bat.
    pub pitch_number: u32,
    /// Count before this pitch.
    pub balls: u8,
    pub strikes: u8,
    pub batter_id: u64,
    /// Explicit lineup slot, when the feed carries one.
    pub batting_order: Option<u8>,
    pub pitch_type: Option<String>,
    pub pitch_name: Option<String>,
}

impl PitchEvent {
    /// Human-readable pitch label: the feed's name if present, otherwise the
    /// code looked up in the pitch table (unknown codes pass through).
    pub fn display_pitch_name(&self) -> Option<String> {
        match (&self.pitch_name, &self.pitch_type) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(code)) => Some(pitch_name_for_code(code)),
            (None, None) => None,
        }
    }

    pub fn has_classification(&self) -> bool {
        self.pitch_name.is_some() || self.pitch_type.is_some()
    }

    pub fn is_fresh_count(&self) -> bool {
        self.balls == 0 && self.strikes == 0
    }
}

/// A pitch with its plate-appearance position attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedEvent {
    pub event: PitchEvent,
    /// Dense rank of the at-bat within its (game, inning, half).
    pub pa_order: u32,
    pub is_first_pitch: bool,
}

/// Everything the classifier looks at for one pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchContext {
    pub event: PitchEvent,
    pub pa_order: u32,
    pub is_first_pitch: bool,
    /// 0-based count of the game's leadoff batter's fresh-count trips to the
    /// plate. `None` unless this pitch is one of those trips.
    pub leadoff_recurrence: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "Batter_2")]
    Batter2,
    #[serde(rename = "Batter_3")]
    Batter3,
    #[serde(rename = "Inning_2_leadoff")]
    Inning2Leadoff,
    #[serde(rename = "Inning_3_leadoff")]
    Inning3Leadoff,
    #[serde(rename = "Leadoff_2nd_PA")]
    Leadoff2ndPa,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Batter2 => "Batter_2",
            Bucket::Batter3 => "Batter_3",
            Bucket::Inning2Leadoff => "Inning_2_leadoff",
            Bucket::Inning3Leadoff => "Inning_3_leadoff",
            Bucket::Leadoff2ndPa => "Leadoff_2nd_PA",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pitch that landed in a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPitch {
    pub game_id: u64,
    pub game_date: NaiveDate,
    pub at_bat_id: u32,
    pub bucket: Bucket,
    pub pitch_name: String,
}

/// Row of the detail CSV. Field order is the file's column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub game_id: u64,
    pub game_date: NaiveDate,
    pub bucket: Bucket,
    pub pitch_name: String,
}

/// Row of the summary CSV. Field order is the file's column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub bucket: Bucket,
    pub pitch_name: String,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketReport {
    pub detail: Vec<DetailRow>,
    pub summary: Vec<SummaryRow>,
}

impl BucketReport {
    pub fn is_empty(&self) -> bool {
        self.detail.is_empty()
    }
}

/// A pitcher with a resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub id: u64,
}
