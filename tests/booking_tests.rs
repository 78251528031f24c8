use rbooker::core::booking::BookingLogic;
use rbooker::db::bookings;
use rbooker::db::sessions;
use rbooker::errors::AppError;
use rbooker::models::booking::BookingDetails;
use rbooker::models::person::{MobilityStatus, PersonRole};
use rbooker::models::role::ActivityRole;

mod common;
use common::{init_db, open, seed_person, seed_person_with_mobility, seed_session, setup_test_db};

fn seats(pool: &rbooker::db::pool::DbPool, id: &str, role: ActivityRole) -> u32 {
    let s = sessions::load_session(&pool.conn, id).expect("session");
    s.role_seats(role).expect("role offered").seats
}

/// The capacity walkthrough: two seats, three people, one cancellation.
#[test]
fn test_register_scenario_capacity_two() {
    let db_path = setup_test_db("scenario_capacity_two");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let session = seed_session(
        &mut pool, "Chair Yoga", "2025-11-03", "10:00", "11:00", Some(2), None, true,
    );

    let alice = seed_person(&pool, "alice@example.com", "Alice", PersonRole::Participant);
    let bob = seed_person(&pool, "bob@example.com", "Bob", PersonRole::Participant);
    let carol = seed_person(&pool, "carol@example.com", "Carol", PersonRole::Participant);

    let details = BookingDetails::default();

    BookingLogic::register(&mut pool, &alice, &session.id, ActivityRole::Attendee, &details)
        .expect("alice registers");
    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 1);

    BookingLogic::register(&mut pool, &bob, &session.id, ActivityRole::Attendee, &details)
        .expect("bob registers");
    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 0);

    let full =
        BookingLogic::register(&mut pool, &carol, &session.id, ActivityRole::Attendee, &details);
    assert!(matches!(full, Err(AppError::SessionFull(_))));
    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 0);

    BookingLogic::unregister(&mut pool, &alice.email, &session.id, ActivityRole::Attendee)
        .expect("alice unregisters");
    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 1);

    BookingLogic::register(&mut pool, &carol, &session.id, ActivityRole::Attendee, &details)
        .expect("carol registers after the freed seat");
    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 0);
}

#[test]
fn test_register_twice_is_rejected() {
    let db_path = setup_test_db("register_twice");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let session = seed_session(
        &mut pool, "Pottery", "2025-11-04", "18:00", "20:00", Some(5), None, false,
    );
    let alice = seed_person(&pool, "alice@example.com", "Alice", PersonRole::Participant);

    let details = BookingDetails::default();

    BookingLogic::register(&mut pool, &alice, &session.id, ActivityRole::Attendee, &details)
        .expect("first registration");

    let dup =
        BookingLogic::register(&mut pool, &alice, &session.id, ActivityRole::Attendee, &details);
    assert!(matches!(dup, Err(AppError::AlreadyBooked { .. })));

    // The rejection must not have burned a seat.
    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 4);
}

/// A person may hold one attendee and one volunteer booking for the same
/// session; the uniqueness is per (session, email, role).
#[test]
fn test_same_session_other_role_is_allowed() {
    let db_path = setup_test_db("other_role_allowed");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let session = seed_session(
        &mut pool, "Repair Café", "2025-11-05", "14:00", "17:00", Some(10), Some(3), false,
    );
    let dan = seed_person(&pool, "dan@example.com", "Dan", PersonRole::Volunteer);

    let details = BookingDetails::default();

    BookingLogic::register(&mut pool, &dan, &session.id, ActivityRole::Attendee, &details)
        .expect("attendee booking");
    BookingLogic::register(&mut pool, &dan, &session.id, ActivityRole::Volunteer, &details)
        .expect("volunteer booking");

    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 9);
    assert_eq!(seats(&pool, &session.id, ActivityRole::Volunteer), 2);
}

#[test]
fn test_timing_clash_is_symmetric() {
    let db_path = setup_test_db("timing_clash");
    init_db(&db_path);

    let mut pool = open(&db_path);
    // Overlap: [10:00,12:00) vs [11:00,13:00) on the same day.
    let a = seed_session(
        &mut pool, "Morning Hike", "2025-11-08", "10:00", "12:00", Some(5), None, false,
    );
    let b = seed_session(
        &mut pool, "Brunch Club", "2025-11-08", "11:00", "13:00", Some(5), None, false,
    );

    let alice = seed_person(&pool, "alice@example.com", "Alice", PersonRole::Participant);
    let bob = seed_person(&pool, "bob@example.com", "Bob", PersonRole::Participant);
    let details = BookingDetails::default();

    // Alice books A first, then B must clash.
    BookingLogic::register(&mut pool, &alice, &a.id, ActivityRole::Attendee, &details)
        .expect("alice books A");
    let clash = BookingLogic::register(&mut pool, &alice, &b.id, ActivityRole::Attendee, &details);
    assert!(matches!(clash, Err(AppError::TimingClash { .. })));

    // Bob books B first, then A must clash: same rule, either order.
    BookingLogic::register(&mut pool, &bob, &b.id, ActivityRole::Attendee, &details)
        .expect("bob books B");
    let clash = BookingLogic::register(&mut pool, &bob, &a.id, ActivityRole::Attendee, &details);
    assert!(matches!(clash, Err(AppError::TimingClash { .. })));

    // No seat was taken by any rejected attempt.
    assert_eq!(seats(&pool, &a.id, ActivityRole::Attendee), 4);
    assert_eq!(seats(&pool, &b.id, ActivityRole::Attendee), 4);
}

/// Half-open intervals: a session ending exactly when the next starts is
/// not a clash.
#[test]
fn test_back_to_back_sessions_do_not_clash() {
    let db_path = setup_test_db("back_to_back");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let first = seed_session(
        &mut pool, "Watercolours", "2025-11-09", "09:00", "10:30", Some(5), None, false,
    );
    let second = seed_session(
        &mut pool, "Choir", "2025-11-09", "10:30", "12:00", Some(5), None, false,
    );

    let alice = seed_person(&pool, "alice@example.com", "Alice", PersonRole::Participant);
    let details = BookingDetails::default();

    BookingLogic::register(&mut pool, &alice, &first.id, ActivityRole::Attendee, &details)
        .expect("first");
    BookingLogic::register(&mut pool, &alice, &second.id, ActivityRole::Attendee, &details)
        .expect("back-to-back second");
}

#[test]
fn test_accessibility_mismatch_for_restricted_attendee() {
    let db_path = setup_test_db("accessibility");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let inaccessible = seed_session(
        &mut pool, "Attic Games", "2025-11-10", "19:00", "21:00", Some(5), Some(2), false,
    );
    let accessible = seed_session(
        &mut pool, "Hall Games", "2025-11-11", "19:00", "21:00", Some(5), None, true,
    );

    let erin = seed_person_with_mobility(
        &pool,
        "erin@example.com",
        "Erin",
        PersonRole::Participant,
        MobilityStatus::NoWalking,
    );
    let frank = seed_person_with_mobility(
        &pool,
        "frank@example.com",
        "Frank",
        PersonRole::Volunteer,
        MobilityStatus::NoLongWalks,
    );
    let details = BookingDetails::default();

    // Both restricted statuses are rejected as attendee on a non-accessible venue.
    let rejected =
        BookingLogic::register(&mut pool, &erin, &inaccessible.id, ActivityRole::Attendee, &details);
    assert!(matches!(rejected, Err(AppError::AccessibilityMismatch(_))));

    let rejected =
        BookingLogic::register(&mut pool, &frank, &inaccessible.id, ActivityRole::Attendee, &details);
    assert!(matches!(rejected, Err(AppError::AccessibilityMismatch(_))));

    // The check is skipped entirely for volunteer registrations.
    BookingLogic::register(&mut pool, &frank, &inaccessible.id, ActivityRole::Volunteer, &details)
        .expect("volunteer bypasses the accessibility check");

    // And an accessible venue accepts the restricted attendee.
    BookingLogic::register(&mut pool, &erin, &accessible.id, ActivityRole::Attendee, &details)
        .expect("accessible venue");
}

#[test]
fn test_unregister_twice_restores_exactly_once() {
    let db_path = setup_test_db("unregister_twice");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let session = seed_session(
        &mut pool, "Book Circle", "2025-11-12", "18:30", "20:00", Some(3), None, false,
    );
    let alice = seed_person(&pool, "alice@example.com", "Alice", PersonRole::Participant);
    let details = BookingDetails::default();

    BookingLogic::register(&mut pool, &alice, &session.id, ActivityRole::Attendee, &details)
        .expect("register");
    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 2);

    BookingLogic::unregister(&mut pool, &alice.email, &session.id, ActivityRole::Attendee)
        .expect("first unregister");
    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 3);

    let second =
        BookingLogic::unregister(&mut pool, &alice.email, &session.id, ActivityRole::Attendee);
    assert!(matches!(second, Err(AppError::NotBooked { .. })));

    // Restored exactly once, never past capacity.
    assert_eq!(seats(&pool, &session.id, ActivityRole::Attendee), 3);
}

/// Seat conservation: after any register/unregister sequence,
/// seats = capacity - live bookings.
#[test]
fn test_seat_conservation_over_sequences() {
    let db_path = setup_test_db("seat_conservation");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let session = seed_session(
        &mut pool, "Open Gym", "2025-11-13", "17:00", "19:00", Some(4), None, false,
    );
    let details = BookingDetails::default();

    let people: Vec<_> = ["p1", "p2", "p3", "p4"]
        .iter()
        .map(|n| {
            seed_person(
                &pool,
                &format!("{}@example.com", n),
                n,
                PersonRole::Participant,
            )
        })
        .collect();

    let check = |pool: &rbooker::db::pool::DbPool| {
        let live = bookings::booked_count(&pool.conn, &session.id, ActivityRole::Attendee)
            .expect("count");
        let s = sessions::load_session(&pool.conn, &session.id).expect("session");
        let rs = s.attendees.expect("offered");
        assert_eq!(rs.seats, 4 - live);
        assert_eq!(rs.booked(), live);
    };

    for p in &people {
        BookingLogic::register(&mut pool, p, &session.id, ActivityRole::Attendee, &details)
            .expect("register");
        check(&pool);
    }

    BookingLogic::unregister(&mut pool, "p2@example.com", &session.id, ActivityRole::Attendee)
        .expect("unregister");
    check(&pool);

    BookingLogic::unregister(&mut pool, "p4@example.com", &session.id, ActivityRole::Attendee)
        .expect("unregister");
    check(&pool);

    BookingLogic::register(&mut pool, &people[1], &session.id, ActivityRole::Attendee, &details)
        .expect("re-register");
    check(&pool);
}

#[test]
fn test_mark_attended_flips_flag() {
    let db_path = setup_test_db("mark_attended");
    init_db(&db_path);

    let mut pool = open(&db_path);
    let session = seed_session(
        &mut pool, "Litter Pick", "2025-11-14", "09:00", "11:00", None, Some(6), false,
    );
    let gina = seed_person(&pool, "gina@example.com", "Gina", PersonRole::Volunteer);
    let details = BookingDetails::default();

    let booking =
        BookingLogic::register(&mut pool, &gina, &session.id, ActivityRole::Volunteer, &details)
            .expect("register");
    assert!(!booking.attended);

    BookingLogic::mark_attended(&mut pool, &booking.id, true).expect("mark attended");
    let reloaded = bookings::load_booking(&pool.conn, &booking.id).expect("load");
    assert!(reloaded.attended);

    BookingLogic::mark_attended(&mut pool, &booking.id, false).expect("revoke");
    let reloaded = bookings::load_booking(&pool.conn, &booking.id).expect("load");
    assert!(!reloaded.attended);

    let missing = BookingLogic::mark_attended(&mut pool, "no-such-booking", true);
    assert!(matches!(missing, Err(AppError::BookingNotFound(_))));
}
