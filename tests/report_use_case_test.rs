use async_trait::async_trait;
use chrono::NaiveDate;
use first_pitch::app::ports::{EventSourcePort, ReportFiles, ReportOutputPort};
use first_pitch::app::{ReportSettings, ReportUseCase, SubjectOutcome};
use first_pitch::error::{FirstPitchError, Result};
use first_pitch::infra::CsvReportOutputAdapter;
use first_pitch::types::{BucketReport, Half, PitchEvent, Subject};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

fn first_pitch(game_id: u64, inning: u8, at_bat_id: u32, batter_id: u64, code: &str) -> PitchEvent {
    PitchEvent {
        game_id,
        game_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        game_type: "R".to_string(),
        inning,
        half: Half::Top,
        at_bat_id,
        pitch_number: 1,
        balls: 0,
        strikes: 0,
        batter_id,
        batting_order: None,
        pitch_type: Some(code.to_string()),
        pitch_name: None,
    }
}

/// A short start: batters 1-3 of the first inning plus the 2nd-inning leadoff.
fn start_events() -> Vec<PitchEvent> {
    vec![
        first_pitch(1, 1, 1, 11, "FF"),
        first_pitch(1, 1, 2, 12, "SL"),
        first_pitch(1, 1, 3, 13, "SI"),
        first_pitch(1, 2, 7, 14, "CH"),
    ]
}

enum Script {
    /// Fail this many times with a transient error, then return the events.
    FlakyThen(u32, Vec<PitchEvent>),
    /// Always fail with a non-transient error.
    Fatal,
}

struct ScriptedSource {
    scripts: Mutex<HashMap<u64, Script>>,
    calls: Arc<Mutex<HashMap<u64, u32>>>,
}

impl ScriptedSource {
    fn new(scripts: Vec<(u64, Script)>) -> (Self, Arc<Mutex<HashMap<u64, u32>>>) {
        let calls = Arc::new(Mutex::new(HashMap::new()));
        let source = Self {
            scripts: Mutex::new(scripts.into_iter().collect()),
            calls: calls.clone(),
        };
        (source, calls)
    }
}

#[async_trait]
impl EventSourcePort for ScriptedSource {
    async fn fetch_events(&self, subject_id: u64, _start: NaiveDate, _end: NaiveDate) -> Result<Vec<PitchEvent>> {
        *self.calls.lock().unwrap().entry(subject_id).or_insert(0) += 1;
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(&subject_id) {
            Some(Script::FlakyThen(remaining, events)) => {
                if *remaining > 0 {
                    *remaining -= 1;
                    Err(FirstPitchError::EmptyPayload { subject_id })
                } else {
                    Ok(events.clone())
                }
            }
            Some(Script::Fatal) => Err(FirstPitchError::Config("bad request shape".into())),
            None => Ok(Vec::new()),
        }
    }
}

struct FailingOutput;

#[async_trait]
impl ReportOutputPort for FailingOutput {
    async fn write_report(&self, _subject: &Subject, _report: &BucketReport) -> Result<ReportFiles> {
        Err(FirstPitchError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only")))
    }
}

fn settings() -> ReportSettings {
    ReportSettings {
        start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
        game_types: vec!["R".to_string()],
        fetch_attempts: 2,
        retry_backoff: Duration::from_millis(1),
    }
}

fn subject(name: &str, id: u64) -> Subject {
    Subject { name: name.to_string(), id }
}

fn files_in(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[tokio::test]
async fn test_two_failed_fetches_skip_subject_and_batch_continues() {
    let dir = tempdir().unwrap();
    let (source, calls) = ScriptedSource::new(vec![
        (1, Script::FlakyThen(2, start_events())),
        (2, Script::FlakyThen(0, start_events())),
    ]);
    let use_case = ReportUseCase::new(
        Box::new(source),
        Box::new(CsvReportOutputAdapter::new(dir.path())),
        settings(),
    );

    let runs = use_case.run(&[subject("Flaky Arm", 1), subject("Steady Arm", 2)]).await;

    assert!(matches!(runs[0].outcome, SubjectOutcome::FetchFailed { attempts: 2, .. }));
    assert!(matches!(runs[1].outcome, SubjectOutcome::Written { detail_rows: 3, .. }));
    assert_eq!(calls.lock().unwrap()[&1], 2);
    assert_eq!(calls.lock().unwrap()[&2], 1);
    assert_eq!(
        files_in(dir.path()),
        vec![
            "Steady_Arm_first_pitch.csv".to_string(),
            "Steady_Arm_first_pitch_summary.csv".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_single_transient_failure_is_retried() {
    let dir = tempdir().unwrap();
    let (source, calls) = ScriptedSource::new(vec![(1, Script::FlakyThen(1, start_events()))]);
    let use_case = ReportUseCase::new(
        Box::new(source),
        Box::new(CsvReportOutputAdapter::new(dir.path())),
        settings(),
    );

    let outcome = use_case.run_subject(&subject("Zack_Wheeler", 1)).await;

    match outcome {
        SubjectOutcome::Written { files, detail_rows, summary_rows } => {
            assert_eq!(detail_rows, 3);
            assert_eq!(summary_rows, 3);
            let detail = std::fs::read_to_string(files.detail).unwrap();
            assert_eq!(
                detail,
                "game_id,game_date,bucket,pitch_name\n\
                 1,2025-04-01,Batter_2,Slider\n\
                 1,2025-04-01,Batter_3,Sinker\n\
                 1,2025-04-01,Inning_2_leadoff,Changeup\n"
            );
        }
        other => panic!("expected written report, got {:?}", other),
    }
    assert_eq!(calls.lock().unwrap()[&1], 2);
}

#[tokio::test]
async fn test_non_transient_error_is_not_retried() {
    let dir = tempdir().unwrap();
    let (source, calls) = ScriptedSource::new(vec![(1, Script::Fatal)]);
    let use_case = ReportUseCase::new(
        Box::new(source),
        Box::new(CsvReportOutputAdapter::new(dir.path())),
        settings(),
    );

    let outcome = use_case.run_subject(&subject("Broken", 1)).await;

    assert!(matches!(outcome, SubjectOutcome::FetchFailed { attempts: 1, .. }));
    assert_eq!(calls.lock().unwrap()[&1], 1);
    assert!(files_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_empty_result_writes_nothing() {
    let dir = tempdir().unwrap();
    let relief_only = vec![first_pitch(5, 6, 40, 1, "FF"), first_pitch(5, 7, 48, 2, "SL")];
    let (source, _calls) = ScriptedSource::new(vec![(1, Script::FlakyThen(0, relief_only)), (2, Script::FlakyThen(0, vec![]))]);
    let use_case = ReportUseCase::new(
        Box::new(source),
        Box::new(CsvReportOutputAdapter::new(dir.path().join("out"))),
        settings(),
    );

    let runs = use_case.run(&[subject("Reliever", 1), subject("Idle", 2)]).await;

    assert_eq!(runs[0].outcome, SubjectOutcome::Empty);
    assert_eq!(runs[1].outcome, SubjectOutcome::Empty);
    assert!(!dir.path().join("out").exists());
}

#[tokio::test]
async fn test_write_failure_is_isolated_per_subject() {
    let (source, calls) = ScriptedSource::new(vec![
        (1, Script::FlakyThen(0, start_events())),
        (2, Script::FlakyThen(0, start_events())),
    ]);
    let use_case = ReportUseCase::new(Box::new(source), Box::new(FailingOutput), settings());

    let runs = use_case.run(&[subject("One", 1), subject("Two", 2)]).await;

    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|r| matches!(r.outcome, SubjectOutcome::WriteFailed { .. })));
    assert_eq!(calls.lock().unwrap().len(), 2);
}
