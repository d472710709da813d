//! Normalization of the Statcast pitch-level CSV into canonical `PitchEvent`s.
//!
//! All feed schema quirks stop here: header BOMs, the `pitch_name` /
//! `pitch_type` pair, and the several names the lineup slot has gone by.

use crate::constants::BATTING_ORDER_COLUMNS;
use crate::error::{FirstPitchError, Result};
use crate::types::{Half, PitchEvent};
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::HashMap;
use tracing::debug;

/// Events parsed from one payload plus the number of rows that had to be dropped.
#[derive(Debug, Default)]
pub struct StatcastTable {
    pub events: Vec<PitchEvent>,
    pub skipped_rows: usize,
}

struct Columns {
    game_id: usize,
    game_date: usize,
    game_type: usize,
    inning: usize,
    half: usize,
    at_bat_id: usize,
    pitch_number: usize,
    balls: usize,
    strikes: usize,
    batter_id: usize,
    batting_order: Option<usize>,
    pitch_type: Option<usize>,
    pitch_name: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim_start_matches('\u{feff}').trim().to_string(), i))
            .collect();

        let required = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| FirstPitchError::MissingColumn(name.to_string()))
        };

        let pitch_type = index.get("pitch_type").copied();
        let pitch_name = index.get("pitch_name").copied();
        if pitch_type.is_none() && pitch_name.is_none() {
            return Err(FirstPitchError::MissingColumn("pitch_name or pitch_type".into()));
        }

        Ok(Self {
            game_id: required("game_pk")?,
            game_date: required("game_date")?,
            game_type: required("game_type")?,
            inning: required("inning")?,
            half: required("inning_topbot")?,
            at_bat_id: required("at_bat_number")?,
            pitch_number: required("pitch_number")?,
            balls: required("balls")?,
            strikes: required("strikes")?,
            batter_id: required("batter")?,
            batting_order: BATTING_ORDER_COLUMNS.iter().find_map(|c| index.get(*c).copied()),
            pitch_type,
            pitch_name,
        })
    }

    fn event(&self, record: &StringRecord) -> Option<PitchEvent> {
        let field = |i: usize| record.get(i).map(str::trim).filter(|v| !v.is_empty());
        let optional = |i: Option<usize>| i.and_then(field).map(str::to_string);

        Some(PitchEvent {
            game_id: parse_uint(field(self.game_id)?)?,
            game_date: NaiveDate::parse_from_str(field(self.game_date)?, "%Y-%m-%d").ok()?,
            game_type: field(self.game_type)?.to_string(),
            inning: narrow(parse_uint(field(self.inning)?)?)?,
            half: field(self.half)?.parse::<Half>().ok()?,
            at_bat_id: narrow(parse_uint(field(self.at_bat_id)?)?)?,
            pitch_number: narrow(parse_uint(field(self.pitch_number)?)?)?,
            balls: narrow(parse_uint(field(self.balls)?)?)?,
            strikes: narrow(parse_uint(field(self.strikes)?)?)?,
            batter_id: parse_uint(field(self.batter_id)?)?,
            batting_order: self
                .batting_order
                .and_then(field)
                .and_then(parse_uint)
                .and_then(narrow),
            pitch_type: optional(self.pitch_type),
            pitch_name: optional(self.pitch_name),
        })
    }
}

/// Accepts "7" as well as "7.0", which some exports write for integer columns.
fn parse_uint(raw: &str) -> Option<u64> {
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let f = raw.parse::<f64>().ok()?;
    (f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

fn narrow<T: TryFrom<u64>>(v: u64) -> Option<T> {
    T::try_from(v).ok()
}

/// Parse a Statcast CSV payload. Missing required columns fail the whole
/// payload; rows that cannot be decoded or whose required fields do not
/// parse are skipped and counted. Only read I/O errors abort.
pub fn parse_statcast_csv(payload: &[u8]) -> Result<StatcastTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(payload);

    let columns = Columns::from_headers(reader.headers()?)?;

    let mut table = StatcastTable::default();
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                debug!(row, error = %err, "skipping undecodable statcast row");
                table.skipped_rows += 1;
                continue;
            }
        };
        match columns.event(&record) {
            Some(event) => table.events.push(event),
            None => {
                debug!(row, "skipping statcast row with unparseable required field");
                table.skipped_rows += 1;
            }
        }
    }
    Ok(table)
}
