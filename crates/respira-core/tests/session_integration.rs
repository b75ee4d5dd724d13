//! Integration tests for sessions persisted through SQLite.

use std::rc::Rc;

use respira_core::{
    BlobStore, BreathController, Database, Event, Intensity, ManualClock, Phase,
    RecordingHaptics, Statistics, VisualState, STATS_KEY,
};

fn open_controller(
    db: Rc<Database>,
    clock: &ManualClock,
    haptics: &RecordingHaptics,
) -> BreathController {
    BreathController::new(
        Box::new(clock.clone()),
        Box::new(db),
        Box::new(haptics.clone()),
        VisualState::default(),
    )
}

#[test]
fn statistics_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("respira.db");
    let clock = ManualClock::new(1_700_000_000_000);
    let haptics = RecordingHaptics::new();

    {
        let db = Rc::new(Database::open_at(&path).unwrap());
        let mut controller = open_controller(db, &clock, &haptics);
        controller.start();
        for _ in 0..6 {
            clock.advance_secs(4.0);
            controller.tick();
        }
        clock.advance_secs(6.0);
        controller.stop();
    }

    let db = Rc::new(Database::open_at(&path).unwrap());
    let controller = open_controller(db, &clock, &haptics);
    let stats = *controller.statistics();
    assert_eq!(stats.sessions_completed, 1);
    assert_eq!(stats.total_cycles, 2);
    assert!((stats.total_minutes - 0.5).abs() < 1e-9);
    assert_eq!(controller.statistics().display().minutes, "0.5");
}

#[test]
fn session_history_is_recorded_from_completion_event() {
    let db = Rc::new(Database::open_memory().unwrap());
    let clock = ManualClock::new(1_700_000_000_000);
    let haptics = RecordingHaptics::new();
    let mut controller = open_controller(db.clone(), &clock, &haptics);

    controller.start();
    clock.advance_secs(90.0);
    match controller.stop() {
        Some(Event::SessionCompleted {
            started_at,
            cycles,
            minutes,
            at,
            ..
        }) => {
            db.record_session(started_at, at, cycles, minutes).unwrap();
        }
        other => panic!("Expected SessionCompleted, got {other:?}"),
    }

    let history = db.recent_sessions(5).unwrap();
    assert_eq!(history.len(), 1);
    assert!((history[0].minutes - 1.5).abs() < 1e-9);
    assert_eq!((history[0].completed_at - history[0].started_at).num_seconds(), 90);
}

#[test]
fn malformed_stored_statistics_start_from_zero() {
    let db = Rc::new(Database::open_memory().unwrap());
    db.set(STATS_KEY, r#"{"sessionsCompleted":"many"}"#).unwrap();
    let clock = ManualClock::new(0);
    let haptics = RecordingHaptics::new();
    let mut controller = open_controller(db.clone(), &clock, &haptics);
    assert_eq!(*controller.statistics(), Statistics::default());

    controller.start();
    clock.advance_secs(60.0);
    controller.stop();
    let stored = Statistics::from_blob(&db.get(STATS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.sessions_completed, 1);
}

#[test]
fn reset_is_persisted_and_pulses_heavy() {
    let db = Rc::new(Database::open_memory().unwrap());
    Statistics {
        sessions_completed: 12,
        total_cycles: 140,
        total_minutes: 61.2,
    }
    .save(&*db)
    .unwrap();

    let clock = ManualClock::new(0);
    let haptics = RecordingHaptics::new();
    let mut controller = open_controller(db.clone(), &clock, &haptics);
    assert_eq!(controller.statistics().sessions_completed, 12);

    controller.reset_statistics();
    assert_eq!(haptics.take(), vec![Intensity::Heavy]);
    let stored = Statistics::from_blob(&db.get(STATS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored, Statistics::default());
    assert_eq!(controller.phase(), Phase::Idle);
}
