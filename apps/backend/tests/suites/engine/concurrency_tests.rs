// Racing callers against the session registry

use std::sync::{Arc, Barrier};
use std::thread;

use yahtzee_backend::services::{ConnectionId, GameEngine, SessionFactory};

use crate::support::recording_sink::RecordingSink;

const THREADS: usize = 32;

fn engine(seed: u64) -> Arc<GameEngine> {
    Arc::new(GameEngine::new(
        SessionFactory::seeded(seed),
        Arc::new(RecordingSink::new()),
    ))
}

#[test]
fn racing_first_contact_creates_one_session() {
    let engine = engine(41);
    let conn = ConnectionId::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let sessions: Vec<_> = (0..THREADS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine.on_connect(conn, None)
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().expect("thread panicked"))
        .collect();

    assert_eq!(engine.session_count(), 1);
    assert!(sessions.iter().all(|s| Arc::ptr_eq(s, &sessions[0])));
}

#[test]
fn racing_rolls_on_one_session_stop_at_three() {
    let engine = engine(42);
    let conn = ConnectionId::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let outcomes: Vec<_> = (0..THREADS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine.roll_dice(conn)
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().expect("thread panicked"))
        .collect();

    let mut counts: Vec<u8> = outcomes.iter().flatten().map(|o| o.roll_count).collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![1, 2, 3]);
    assert_eq!(engine.session_count(), 1);
}

#[test]
fn parallel_connections_get_independent_sessions() {
    let engine = engine(43);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let conn = ConnectionId::new();
                barrier.wait();
                engine.on_connect(conn, None);
                let first = engine.roll_dice(conn).map(|o| o.roll_count);
                let second = engine.roll_dice(conn).map(|o| o.roll_count);
                (conn, first, second)
            })
        })
        .collect();

    for handle in handles {
        let (conn, first, second) = handle.join().expect("thread panicked");
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
        assert!(engine.on_disconnect(conn));
    }
    assert_eq!(engine.session_count(), 0);
}
