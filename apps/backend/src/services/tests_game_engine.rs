use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{DiceCup, DieState, LowerCategory, UpperCategory};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::services::game_engine::{GameEngine, ALREADY_SCORED};
use crate::services::sessions::{ConnectionId, SessionFactory, UserId};
use crate::services::statistics::{CompletedGame, StatisticsSink};

#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<CompletedGame>>,
}

impl StatisticsSink for RecordingSink {
    fn submit(&self, record: CompletedGame) {
        self.records.lock().push(record);
    }
}

fn engine() -> (GameEngine, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let engine = GameEngine::new(SessionFactory::seeded(1234), sink.clone());
    (engine, sink)
}

/// Put a rolled cup showing `values` in front of the player.
fn set_dice(engine: &GameEngine, conn: ConnectionId, values: [u8; 5]) {
    let session = engine.registry().get(conn).expect("session exists");
    session.lock().dice_cup = DiceCup::from_values(values, 1).expect("valid dice");
}

const LOWER_ROLLS: [(&str, [u8; 5]); 7] = [
    ("threeOfAKind", [4, 4, 4, 2, 1]),
    ("fourOfAKind", [6, 6, 6, 6, 3]),
    ("fullHouse", [2, 2, 3, 3, 3]),
    ("smallStraight", [1, 2, 3, 4, 6]),
    ("largeStraight", [2, 3, 4, 5, 6]),
    ("chance", [6, 6, 5, 5, 4]),
    ("yahtzee", [1, 1, 1, 1, 1]),
];

/// Three of each face, 63 in total.
fn upper_rolls() -> [[u8; 5]; 6] {
    [
        [1, 1, 1, 2, 2],
        [2, 2, 2, 1, 1],
        [3, 3, 3, 1, 1],
        [4, 4, 4, 1, 1],
        [5, 5, 5, 1, 1],
        [6, 6, 6, 1, 1],
    ]
}

#[test]
fn three_rolls_then_final_noop() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);

    for expected in 1..=3u8 {
        let outcome = engine.roll_dice(conn).expect("roll allowed");
        assert_eq!(outcome.roll_count, expected);
        assert_eq!(outcome.is_final, expected == 3);
    }
    assert_eq!(engine.roll_dice(conn), None);
}

#[test]
fn toggle_hold_requires_rolled_non_final_cup() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);

    assert_eq!(engine.toggle_hold_die(conn, 0), None, "unrolled");

    engine.roll_dice(conn);
    let held = engine.toggle_hold_die(conn, 2).unwrap();
    assert_eq!((held.index, held.die_state), (2, DieState::Held));
    let freed = engine.toggle_hold_die(conn, 2).unwrap();
    assert_eq!(freed.die_state, DieState::Free);

    assert_eq!(engine.toggle_hold_die(conn, 5), None, "out of range");
    assert_eq!(engine.toggle_hold_die(conn, -1), None, "negative");

    engine.roll_dice(conn);
    engine.roll_dice(conn);
    assert_eq!(engine.toggle_hold_die(conn, 0), None, "final");
}

#[test]
fn held_die_survives_engine_rolls() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);

    let first = engine.roll_dice(conn).unwrap();
    engine.toggle_hold_die(conn, 0);
    engine.toggle_hold_die(conn, 4);

    let second = engine.roll_dice(conn).unwrap();
    let third = engine.roll_dice(conn).unwrap();
    assert_eq!([second.dice[0], second.dice[4]], [first.dice[0], first.dice[4]]);
    assert_eq!([third.dice[0], third.dice[4]], [first.dice[0], first.dice[4]]);
}

#[test]
fn yahtzee_scores_fifty() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);
    set_dice(&engine, conn, [5, 5, 5, 5, 5]);

    let scored = engine.take_lower_category(conn, "yahtzee").unwrap().unwrap();
    assert_eq!(scored.name, LowerCategory::Yahtzee);
    assert_eq!(scored.score, 50);
    assert!(!scored.is_lower_section_complete);
    assert_eq!(scored.lower_section_total, None);
    assert_eq!(scored.grand_total, None);
}

#[test]
fn small_straight_scores_but_large_does_not() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);

    set_dice(&engine, conn, [1, 2, 3, 4, 4]);
    let small = engine
        .take_lower_category(conn, "smallStraight")
        .unwrap()
        .unwrap();
    assert_eq!(small.score, 30);

    set_dice(&engine, conn, [1, 2, 3, 4, 4]);
    let large = engine
        .take_lower_category(conn, "largeStraight")
        .unwrap()
        .unwrap();
    assert_eq!(large.score, 0);
}

#[test]
fn scoring_resets_the_cup() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);
    set_dice(&engine, conn, [2, 2, 2, 3, 3]);

    engine.take_lower_category(conn, "fullHouse").unwrap();

    let session = engine.registry().get(conn).unwrap();
    assert_eq!(session.lock().dice_cup().roll_count(), 0);
    assert_eq!(
        engine.take_lower_category(conn, "chance").unwrap(),
        None,
        "scoring before the next roll is ignored"
    );
}

#[test]
fn upper_bonus_reported_when_section_complete() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);

    let mut last = None;
    for (category, values) in upper_rolls().into_iter().enumerate() {
        set_dice(&engine, conn, values);
        let scored = engine
            .take_upper_category(conn, category as i64)
            .unwrap();
        assert_eq!(scored.category as usize, category);
        assert_eq!(scored.score, 3 * (category as i32 + 1));
        if category < 5 {
            assert!(!scored.is_upper_section_complete);
            assert_eq!(scored.upper_section_bonus, None);
        }
        last = Some(scored);
    }

    let last = last.unwrap();
    assert!(last.is_upper_section_complete);
    assert_eq!(last.upper_section_score, Some(63));
    assert_eq!(last.upper_section_bonus, Some(35));
    assert_eq!(last.upper_section_total, Some(98));
    assert!(!last.is_score_sheet_complete);
    assert_eq!(last.grand_total, None);
}

#[test]
fn unknown_lower_category_is_rejected_without_mutation() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);
    set_dice(&engine, conn, [6, 6, 6, 6, 6]);

    let err = engine
        .take_lower_category(conn, "not-a-real-category")
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Category, _)));

    let session = engine.registry().get(conn).unwrap();
    let session = session.lock();
    assert!(LowerCategory::ALL
        .iter()
        .all(|c| session.score_sheet().lower(*c).is_none()));
    assert_eq!(session.dice_cup().roll_count(), 1, "cup untouched");
}

#[test]
fn unknown_lower_category_rejected_even_before_rolling() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);

    assert!(engine.take_lower_category(conn, "bonus").is_err());
}

#[test]
fn out_of_range_upper_category_is_noop() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);
    set_dice(&engine, conn, [1, 1, 1, 1, 1]);

    for bad in [6, -1, 255, i64::from(i32::MAX) + 1, i64::MIN] {
        assert_eq!(engine.take_upper_category(conn, bad), None);
    }

    // Cup untouched: the same dice still score.
    let scored = engine.take_upper_category(conn, 0).unwrap();
    assert_eq!(scored.score, 5);
}

#[test]
fn scoring_before_first_roll_is_noop() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);

    assert_eq!(engine.take_upper_category(conn, 0), None);
    assert_eq!(engine.take_lower_category(conn, "chance").unwrap(), None);

    let session = engine.registry().get(conn).unwrap();
    assert_eq!(session.lock().score_sheet().upper(UpperCategory::Ones), None);
}

#[test]
fn rescoring_filled_category_keeps_value_and_spends_cup() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);

    set_dice(&engine, conn, [3, 3, 1, 1, 1]);
    engine.take_lower_category(conn, "chance").unwrap();
    set_dice(&engine, conn, [1, 1, 1, 1, 1]);
    engine.take_upper_category(conn, 2).unwrap();

    set_dice(&engine, conn, [6, 6, 6, 6, 6]);
    let lower = engine.take_lower_category(conn, "chance").unwrap().unwrap();
    assert_eq!(lower.score, ALREADY_SCORED);
    let cup = engine.registry().get(conn).unwrap();
    assert_eq!(cup.lock().dice_cup().roll_count(), 0, "lower re-score spends the cup");

    engine.roll_dice(conn).unwrap();
    engine.roll_dice(conn).unwrap();
    let upper = engine.take_upper_category(conn, 2).unwrap();
    assert_eq!(upper.score, 0, "stored value is reported");

    let session = engine.registry().get(conn).unwrap();
    let session = session.lock();
    assert_eq!(session.score_sheet().lower(LowerCategory::Chance), Some(9));
    assert_eq!(session.score_sheet().upper(UpperCategory::Threes), Some(0));
    assert_eq!(session.dice_cup().roll_count(), 0, "upper re-score spends the cup");

    // A spent cup cannot be scored again until it is rolled.
    drop(session);
    assert_eq!(engine.take_upper_category(conn, 2), None);
}

#[test]
fn completing_the_sheet_reports_exactly_once() {
    let (engine, sink) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, Some(UserId::new("player-7")));

    for (category, values) in upper_rolls().into_iter().enumerate() {
        set_dice(&engine, conn, values);
        engine.take_upper_category(conn, category as i64).unwrap();
    }
    assert!(sink.records.lock().is_empty());

    let mut last = None;
    for (name, values) in LOWER_ROLLS {
        set_dice(&engine, conn, values);
        last = engine.take_lower_category(conn, name).unwrap();
    }

    let last = last.unwrap();
    assert!(last.is_lower_section_complete);
    assert_eq!(last.lower_section_total, Some(213));
    assert!(last.is_score_sheet_complete);
    assert_eq!(last.grand_total, Some(98 + 213));

    // Duplicate deliveries after completion must not report again.
    set_dice(&engine, conn, [1, 2, 3, 4, 5]);
    engine.take_lower_category(conn, "chance").unwrap();
    engine.take_upper_category(conn, 0).unwrap();

    let records = sink.records.lock();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.user_id, Some(UserId::new("player-7")));
    assert_eq!(record.final_score, 311);
    assert!(record.game_completed);
    assert!(record.game_start_time <= record.game_end_time);
}

#[test]
fn disconnect_discards_state() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, Some(UserId::new("u")));
    engine.roll_dice(conn);
    assert_eq!(engine.session_count(), 1);

    assert!(engine.on_disconnect(conn));
    assert!(!engine.on_disconnect(conn));
    assert_eq!(engine.session_count(), 0);

    // A stray action afterwards starts a fresh anonymous session.
    let outcome = engine.roll_dice(conn).unwrap();
    assert_eq!(outcome.roll_count, 1);
    let session = engine.registry().get(conn).unwrap();
    assert!(session.lock().user_id().is_none());
}

#[test]
fn sessions_are_independent_per_connection() {
    let (engine, _) = engine();
    let a = ConnectionId::new();
    let b = ConnectionId::new();
    engine.on_connect(a, None);
    engine.on_connect(b, None);

    engine.roll_dice(a);
    engine.roll_dice(a);
    let b_roll = engine.roll_dice(b).unwrap();
    assert_eq!(b_roll.roll_count, 1);
}

#[test]
fn payloads_serialize_with_wire_names() {
    let (engine, _) = engine();
    let conn = ConnectionId::new();
    engine.on_connect(conn, None);
    set_dice(&engine, conn, [2, 2, 2, 2, 5]);

    let lower = engine
        .take_lower_category(conn, "fourOfAKind")
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&lower).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "fourOfAKind",
            "score": 13,
            "isLowerSectionComplete": false,
            "lowerSectionTotal": null,
            "isScoreSheetComplete": false,
            "grandTotal": null,
        })
    );
}
