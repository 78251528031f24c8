use rbooker::core::audience::{AudienceLogic, EXPERIENCED_VOLUNTEER_MIN_ATTENDED};
use rbooker::core::booking::BookingLogic;
use rbooker::models::audience::Audience;
use rbooker::models::booking::BookingDetails;
use rbooker::models::person::PersonRole;
use rbooker::models::role::ActivityRole;

mod common;
use common::{init_db, open, seed_person, seed_session, setup_test_db};

#[test]
fn test_selectors_follow_person_role() {
    let db_path = setup_test_db("audience_selectors");
    init_db(&db_path);
    let pool = open(&db_path);

    seed_person(&pool, "ann@example.com", "Ann", PersonRole::Participant);
    seed_person(&pool, "ben@example.com", "Ben", PersonRole::Participant);
    seed_person(&pool, "vic@example.com", "Vic", PersonRole::Volunteer);
    seed_person(&pool, "sam@example.com", "Sam", PersonRole::Staff);

    let all = AudienceLogic::resolve(&pool.conn, Audience::All).expect("all");
    assert_eq!(all.len(), 4);

    let participants =
        AudienceLogic::resolve(&pool.conn, Audience::Participants).expect("participants");
    assert_eq!(participants.len(), 2);
    assert!(participants.contains("ann@example.com"));
    assert!(participants.contains("ben@example.com"));

    let volunteers = AudienceLogic::resolve(&pool.conn, Audience::Volunteers).expect("volunteers");
    assert_eq!(volunteers.len(), 1);
    assert!(volunteers.contains("vic@example.com"));
}

/// The threshold boundary: 4 attended volunteer bookings keep a volunteer
/// out of the cohort; the 5th brings them in on the next resolve.
#[test]
fn test_experienced_volunteer_threshold_boundary() {
    let db_path = setup_test_db("experienced_threshold");
    init_db(&db_path);
    let mut pool = open(&db_path);

    let vic = seed_person(&pool, "vic@example.com", "Vic", PersonRole::Volunteer);
    let details = BookingDetails::default();

    // One volunteer booking per day, all attended — threshold minus one.
    let mut booking_ids = Vec::new();
    for i in 0..EXPERIENCED_VOLUNTEER_MIN_ATTENDED {
        let session = seed_session(
            &mut pool,
            &format!("Shift {}", i),
            &format!("2025-11-{:02}", i + 1),
            "09:00",
            "12:00",
            None,
            Some(3),
            false,
        );
        let booking =
            BookingLogic::register(&mut pool, &vic, &session.id, ActivityRole::Volunteer, &details)
                .expect("register");
        booking_ids.push(booking.id);
    }

    for id in booking_ids.iter().take((EXPERIENCED_VOLUNTEER_MIN_ATTENDED - 1) as usize) {
        BookingLogic::mark_attended(&mut pool, id, true).expect("attend");
    }

    let cohort = AudienceLogic::resolve(&pool.conn, Audience::ExperiencedVolunteers)
        .expect("resolve");
    assert!(
        !cohort.contains("vic@example.com"),
        "4 attended bookings must not qualify"
    );

    // The 5th attended booking crosses the line.
    BookingLogic::mark_attended(
        &mut pool,
        &booking_ids[(EXPERIENCED_VOLUNTEER_MIN_ATTENDED - 1) as usize],
        true,
    )
    .expect("attend 5th");

    let cohort = AudienceLogic::resolve(&pool.conn, Audience::ExperiencedVolunteers)
        .expect("resolve");
    assert!(cohort.contains("vic@example.com"));
}

/// Attended bookings only count toward experience when played as volunteer,
/// and only for people whose profile role is volunteer.
#[test]
fn test_experience_counts_volunteer_bookings_only() {
    let db_path = setup_test_db("experience_role_scope");
    init_db(&db_path);
    let mut pool = open(&db_path);

    let pat = seed_person(&pool, "pat@example.com", "Pat", PersonRole::Participant);
    let details = BookingDetails::default();

    for i in 0..EXPERIENCED_VOLUNTEER_MIN_ATTENDED {
        let session = seed_session(
            &mut pool,
            &format!("Class {}", i),
            &format!("2025-10-{:02}", i + 1),
            "18:00",
            "19:00",
            Some(5),
            Some(2),
            false,
        );
        let booking =
            BookingLogic::register(&mut pool, &pat, &session.id, ActivityRole::Attendee, &details)
                .expect("register");
        BookingLogic::mark_attended(&mut pool, &booking.id, true).expect("attend");
    }

    // Five attended *attendee* bookings, profile role participant: excluded.
    let cohort = AudienceLogic::resolve(&pool.conn, Audience::ExperiencedVolunteers)
        .expect("resolve");
    assert!(cohort.is_empty());
}
