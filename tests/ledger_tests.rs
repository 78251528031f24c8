use rbooker::core::booking::BookingLogic;
use rbooker::core::ledger;
use rbooker::db::pool::DbPool;
use rbooker::db::{bookings, sessions};
use rbooker::errors::AppError;
use rbooker::models::booking::BookingDetails;
use rbooker::models::person::{Person, PersonRole};
use rbooker::models::role::ActivityRole;
use std::thread;
use std::time::Duration;

mod common;
use common::{init_db, open, seed_person, seed_session, setup_test_db};

#[test]
fn test_reserve_until_exhausted() {
    let db_path = setup_test_db("reserve_exhausted");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let session = seed_session(
        &mut pool, "Spin Class", "2025-11-20", "07:00", "08:00", Some(2), None, false,
    );

    ledger::reserve(&pool.conn, &session.id, ActivityRole::Attendee).expect("seat 1");
    ledger::reserve(&pool.conn, &session.id, ActivityRole::Attendee).expect("seat 2");

    let third = ledger::reserve(&pool.conn, &session.id, ActivityRole::Attendee);
    assert!(matches!(third, Err(AppError::CapacityExhausted(_))));
}

#[test]
fn test_release_past_capacity_is_invariant_violation() {
    let db_path = setup_test_db("release_past_capacity");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let session = seed_session(
        &mut pool, "Quiz Night", "2025-11-21", "20:00", "22:00", Some(3), None, false,
    );

    // Nothing reserved: seats are already at capacity.
    let blocked = ledger::release(&pool.conn, &session.id, ActivityRole::Attendee);
    assert!(matches!(blocked, Err(AppError::InvariantViolation(_))));

    // Fails closed: the counter did not move.
    let s = sessions::load_session(&pool.conn, &session.id).expect("session");
    assert_eq!(s.attendees.expect("offered").seats, 3);

    // And the violation landed in the audit log.
    let logged: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'invariant_violation'",
            [],
            |row| row.get(0),
        )
        .expect("log query");
    assert!(logged >= 1);
}

#[test]
fn test_reserve_classifies_bad_targets() {
    let db_path = setup_test_db("reserve_classify");
    init_db(&db_path);

    let mut pool = open(&db_path);
    // Attendee-only session: volunteer role not offered.
    let session = seed_session(
        &mut pool, "Story Time", "2025-11-22", "10:00", "11:00", Some(5), None, false,
    );

    let missing = ledger::reserve(&pool.conn, "no-such-session", ActivityRole::Attendee);
    assert!(matches!(missing, Err(AppError::SessionNotFound(_))));

    let not_offered = ledger::reserve(&pool.conn, &session.id, ActivityRole::Volunteer);
    assert!(matches!(not_offered, Err(AppError::Validation(_))));
}

/// No oversell: N concurrent registrations against capacity C end with
/// exactly C successes, N-C SessionFull rejections, and zero seats left.
#[test]
fn test_concurrent_registers_never_oversell() {
    let db_path = setup_test_db("concurrent_oversell");
    init_db(&db_path);

    const CAPACITY: u32 = 3;
    const CALLERS: usize = 8;

    let session_id = {
        let mut pool = open(&db_path);
        let session = seed_session(
            &mut pool,
            "Kayak Intro",
            "2025-11-23",
            "13:00",
            "15:00",
            Some(CAPACITY),
            None,
            false,
        );

        for i in 0..CALLERS {
            seed_person(
                &pool,
                &format!("caller{}@example.com", i),
                &format!("Caller {}", i),
                PersonRole::Participant,
            );
        }

        session.id
    };

    let mut handles = Vec::new();
    for i in 0..CALLERS {
        let db_path = db_path.clone();
        let session_id = session_id.clone();

        handles.push(thread::spawn(move || {
            let mut pool = DbPool::new(&db_path).expect("open db");
            let person = Person::new(
                &format!("caller{}@example.com", i),
                &format!("Caller {}", i),
                PersonRole::Participant,
            );

            // Busy is the one transient outcome; callers back off and retry.
            loop {
                match BookingLogic::register(
                    &mut pool,
                    &person,
                    &session_id,
                    ActivityRole::Attendee,
                    &BookingDetails::default(),
                ) {
                    Ok(_) => return true,
                    Err(AppError::SessionFull(_)) => return false,
                    Err(AppError::Busy) => thread::sleep(Duration::from_millis(10)),
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }
        }));
    }

    let outcomes: Vec<bool> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();

    let successes = outcomes.iter().filter(|&&ok| ok).count();
    assert_eq!(successes, CAPACITY as usize);
    assert_eq!(outcomes.len() - successes, CALLERS - CAPACITY as usize);

    let pool = open(&db_path);
    let s = sessions::load_session(&pool.conn, &session_id).expect("session");
    assert_eq!(s.attendees.expect("offered").seats, 0);

    let live = bookings::booked_count(&pool.conn, &session_id, ActivityRole::Attendee)
        .expect("count");
    assert_eq!(live, CAPACITY);
}

/// Concurrent register + unregister churn keeps conservation intact.
#[test]
fn test_concurrent_churn_conserves_seats() {
    let db_path = setup_test_db("concurrent_churn");
    init_db(&db_path);

    const CAPACITY: u32 = 4;
    const CHURNERS: usize = 6;

    let session_id = {
        let mut pool = open(&db_path);
        let session = seed_session(
            &mut pool,
            "Drop-in Chess",
            "2025-11-24",
            "16:00",
            "18:00",
            Some(CAPACITY),
            None,
            false,
        );

        for i in 0..CHURNERS {
            seed_person(
                &pool,
                &format!("churner{}@example.com", i),
                &format!("Churner {}", i),
                PersonRole::Participant,
            );
        }

        session.id
    };

    let mut handles = Vec::new();
    for i in 0..CHURNERS {
        let db_path = db_path.clone();
        let session_id = session_id.clone();

        handles.push(thread::spawn(move || {
            let mut pool = DbPool::new(&db_path).expect("open db");
            let email = format!("churner{}@example.com", i);
            let person = Person::new(&email, &format!("Churner {}", i), PersonRole::Participant);

            for _ in 0..5 {
                loop {
                    match BookingLogic::register(
                        &mut pool,
                        &person,
                        &session_id,
                        ActivityRole::Attendee,
                        &BookingDetails::default(),
                    ) {
                        Ok(_) => break,
                        Err(AppError::SessionFull(_)) => break,
                        Err(AppError::Busy) => thread::sleep(Duration::from_millis(5)),
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }

                loop {
                    match BookingLogic::unregister(
                        &mut pool,
                        &email,
                        &session_id,
                        ActivityRole::Attendee,
                    ) {
                        Ok(()) => break,
                        Err(AppError::NotBooked { .. }) => break,
                        Err(AppError::Busy) => thread::sleep(Duration::from_millis(5)),
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
            }
        }));
    }

    for h in handles {
        h.join().expect("thread");
    }

    // Conservation at rest: seats = capacity - live bookings (here zero).
    let pool = open(&db_path);
    let s = sessions::load_session(&pool.conn, &session_id).expect("session");
    let live = bookings::booked_count(&pool.conn, &session_id, ActivityRole::Attendee)
        .expect("count");
    assert_eq!(s.attendees.expect("offered").seats, CAPACITY - live);
}
