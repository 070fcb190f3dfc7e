use std::path::Path;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use tempfile::tempdir;

use super::{Hotel, TimeDefaults};
use crate::{
    clock::FixedClock,
    error::{ErrorKind, HotelError},
    models::{Account, Role, RoomStatus, RoomType},
    store::Store,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

/// Fresh or reopened hotel whose real clock reads 2025-06-10 at `time`.
fn open_at(dir: &Path, time: NaiveTime) -> Hotel {
    Hotel::open(
        Store::new(dir.join("hotel_data.json")),
        FixedClock::new(date(2025, 6, 10), time),
        TimeDefaults::default(),
    )
}

fn open(dir: &Path) -> Hotel {
    open_at(dir, at(15, 0))
}

fn status_of(hotel: &Hotel, room: u32) -> RoomStatus {
    hotel.room(room).expect("room exists").status
}

fn with_alice(hotel: &mut Hotel) {
    hotel
        .register_client("Alice", "Doe", 25, "alice", "pw")
        .expect("register alice");
}

#[test]
fn empty_store_is_seeded_once() -> Result<()> {
    let dir = tempdir()?;
    let hotel = open(dir.path());

    assert!(matches!(
        hotel.authenticate("admin", "123"),
        Some(Account::Admin(_))
    ));
    let cleaner = hotel.authenticate("cleaner", "123").expect("seeded cleaner");
    assert_eq!(cleaner.role(), Role::Cleaner);
    assert_eq!(cleaner.person().display_name(), "Alex Barmondius");

    let room = hotel.room(101).expect("seeded room");
    assert_eq!(room.room_type, RoomType::Single);
    assert_eq!(room.price_per_night, 100);
    assert_eq!(room.status, RoomStatus::Free);
    assert!(dir.path().join("hotel_data.json").exists());
    drop(hotel);

    let reopened = open(dir.path());
    assert_eq!(reopened.rooms().len(), 1);
    assert_eq!(reopened.cleaners().len(), 1);
    assert_eq!(reopened.snapshot().admins.len(), 1);
    Ok(())
}

#[test]
fn wrong_password_does_not_authenticate() -> Result<()> {
    let dir = tempdir()?;
    let hotel = open(dir.path());
    assert!(hotel.authenticate("admin", "1234").is_none());
    assert!(hotel.authenticate("Admin", "123").is_none());
    assert!(hotel.authenticate("nobody", "").is_none());
    Ok(())
}

#[test]
fn stay_lifecycle_from_booking_to_cleaning() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);

    hotel.make_reservation("alice", 101, date(2025, 6, 12), 3)?;
    assert_eq!(status_of(&hotel, 101), RoomStatus::Free);
    let booked = hotel.client_reservations("alice");
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].start_date, date(2025, 6, 12));
    assert_eq!(booked[0].end_date, date(2025, 6, 15));

    // not arrivable yet
    assert!(hotel.reservations_for_check_in("alice").is_empty());

    hotel.set_simulation_date(date(2025, 6, 12));
    assert_eq!(hotel.reservations_for_check_in("alice").len(), 1);
    hotel.self_check_in("alice", 101)?;
    assert_eq!(status_of(&hotel, 101), RoomStatus::Occupied);
    assert!(hotel.client_reservations("alice")[0].is_checked_in);
    assert_eq!(hotel.reservations_for_check_out("alice").len(), 1);

    hotel.self_check_out("alice", 101)?;
    assert_eq!(status_of(&hotel, 101), RoomStatus::Cleaning);
    let history = hotel.client_reservations("alice");
    assert!(history[0].is_checked_in && history[0].is_checked_out);
    assert_eq!(hotel.dirty_rooms().len(), 1);

    let cleaner = hotel.authenticate("cleaner", "123").expect("seeded cleaner");
    assert!(matches!(cleaner, Account::Cleaner(_)));
    hotel.clean_room(101)?;
    assert_eq!(status_of(&hotel, 101), RoomStatus::Free);

    let err = hotel.clean_room(101).unwrap_err();
    assert_eq!(err, HotelError::RoomNotDirty(101));
    assert_eq!(err.kind(), ErrorKind::StateViolation);
    Ok(())
}

#[test]
fn overlapping_booking_conflicts() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.register_client("Bob", "Roe", 30, "bob", "pw")?;
    hotel.make_reservation("alice", 101, date(2025, 6, 12), 3)?;

    let err = hotel
        .make_reservation("bob", 101, date(2025, 6, 12), 2)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        err,
        HotelError::Overlap {
            room: 101,
            start: date(2025, 6, 12),
            end: date(2025, 6, 15),
        }
    );

    assert!(hotel.make_reservation("bob", 101, date(2025, 6, 14), 1).is_err());
    assert!(hotel.make_reservation("bob", 101, date(2025, 6, 11), 10).is_err());
    assert!(hotel.client_reservations("bob").is_empty());
    Ok(())
}

#[test]
fn back_to_back_bookings_are_allowed() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.register_client("Bob", "Roe", 30, "bob", "pw")?;

    hotel.make_reservation("alice", 101, date(2025, 6, 12), 3)?;
    hotel.make_reservation("bob", 101, date(2025, 6, 15), 2)?;
    hotel.make_reservation("bob", 101, date(2025, 6, 11), 1)?;
    assert_eq!(hotel.client_reservations("bob").len(), 2);
    Ok(())
}

#[test]
fn checked_out_stays_release_their_dates() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.register_client("Bob", "Roe", 30, "bob", "pw")?;

    hotel.make_reservation("alice", 101, date(2025, 6, 20), 3)?;
    hotel.cancel_reservation("alice", 101)?;
    hotel.make_reservation("bob", 101, date(2025, 6, 20), 3)?;
    Ok(())
}

#[test]
fn booking_today_occupies_the_room() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.add_room(202, RoomType::Double, 180)?;

    hotel.make_reservation("alice", 101, date(2025, 6, 10), 1)?;
    assert_eq!(status_of(&hotel, 101), RoomStatus::Occupied);

    hotel.make_reservation("alice", 202, date(2025, 6, 11), 1)?;
    assert_eq!(status_of(&hotel, 202), RoomStatus::Free);
    Ok(())
}

#[test]
fn booking_preconditions() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);

    let err = hotel
        .make_reservation("alice", 101, date(2025, 6, 12), 0)
        .unwrap_err();
    assert_eq!(err, HotelError::EmptyStay);
    assert_eq!(err.kind(), ErrorKind::PolicyViolation);

    let err = hotel
        .make_reservation("alice", 101, date(2025, 6, 9), 2)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PolicyViolation);

    let err = hotel
        .make_reservation("alice", 999, date(2025, 6, 12), 2)
        .unwrap_err();
    assert_eq!(err, HotelError::RoomNotFound(999));

    hotel.set_room_status(101, "Indisponible")?;
    let err = hotel
        .make_reservation("alice", 101, date(2025, 6, 10), 2)
        .unwrap_err();
    assert_eq!(err, HotelError::RoomNotFree(101));
    // the status gate only applies to stays starting today
    hotel.make_reservation("alice", 101, date(2025, 6, 11), 2)?;
    Ok(())
}

#[test]
fn check_in_is_gated_by_wall_clock() -> Result<()> {
    let dir = tempdir()?;
    {
        let mut hotel = open(dir.path());
        with_alice(&mut hotel);
        hotel.make_reservation("alice", 101, date(2025, 6, 10), 2)?;
    }

    let mut early = open_at(dir.path(), at(13, 59));
    let err = early.self_check_in("alice", 101).unwrap_err();
    assert_eq!(
        err,
        HotelError::CheckInTooEarly {
            opens: at(14, 0),
            now: at(13, 59),
        }
    );
    assert_eq!(err.kind(), ErrorKind::PolicyViolation);
    drop(early);

    let mut on_time = open_at(dir.path(), at(14, 0));
    on_time.self_check_in("alice", 101)?;
    assert_eq!(status_of(&on_time, 101), RoomStatus::Occupied);
    Ok(())
}

#[test]
fn check_in_rejects_future_and_repeated_arrivals() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.make_reservation("alice", 101, date(2025, 6, 12), 2)?;

    let err = hotel.self_check_in("alice", 101).unwrap_err();
    assert_eq!(
        err,
        HotelError::NotStartedYet {
            start: date(2025, 6, 12),
            today: date(2025, 6, 10),
        }
    );

    hotel.set_simulation_date(date(2025, 6, 12));
    hotel.self_check_in("alice", 101)?;
    let err = hotel.self_check_in("alice", 101).unwrap_err();
    assert_eq!(err, HotelError::AlreadyCheckedIn(101));
    assert_eq!(err.kind(), ErrorKind::StateViolation);

    let err = hotel.self_check_in("alice", 202).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[test]
fn check_out_requires_a_checked_in_stay() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.make_reservation("alice", 101, date(2025, 6, 10), 2)?;

    let err = hotel.self_check_out("alice", 101).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(hotel.reservations_for_check_out("alice").is_empty());
    Ok(())
}

#[test]
fn cancelling_future_and_same_day_reservations() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.add_room(202, RoomType::Suite, 400)?;

    hotel.make_reservation("alice", 101, date(2025, 6, 20), 1)?;
    hotel.cancel_reservation("alice", 101)?;
    assert_eq!(status_of(&hotel, 101), RoomStatus::Free);
    let err = hotel.cancel_reservation("alice", 101).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    hotel.make_reservation("alice", 202, date(2025, 6, 10), 2)?;
    assert_eq!(status_of(&hotel, 202), RoomStatus::Occupied);
    hotel.cancel_reservation("alice", 202)?;
    assert_eq!(status_of(&hotel, 202), RoomStatus::Free);

    // history keeps both cancelled entries
    assert_eq!(hotel.client_reservations("alice").len(), 2);
    Ok(())
}

#[test]
fn cancelling_started_reservations_fails() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.add_room(202, RoomType::Double, 150)?;

    hotel.make_reservation("alice", 101, date(2025, 6, 10), 3)?;
    hotel.self_check_in("alice", 101)?;
    let err = hotel.cancel_reservation("alice", 101).unwrap_err();
    assert_eq!(err, HotelError::CancelAfterCheckIn(101));
    assert_eq!(err.kind(), ErrorKind::StateViolation);

    hotel.make_reservation("alice", 202, date(2025, 6, 11), 3)?;
    hotel.set_simulation_date(date(2025, 6, 12));
    let err = hotel.cancel_reservation("alice", 202).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PolicyViolation);
    assert!(hotel.client_reservations("alice")[1].is_active());
    Ok(())
}

#[test]
fn client_with_active_reservations_cannot_be_deleted() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.add_room(202, RoomType::Double, 150)?;
    hotel.make_reservation("alice", 101, date(2025, 6, 12), 3)?;
    hotel.make_reservation("alice", 202, date(2025, 6, 10), 1)?;

    let err = hotel.admin_delete_client("alice").unwrap_err();
    assert_eq!(err, HotelError::HasActiveReservations("alice".to_string()));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    for reservation in hotel.client_reservations("alice") {
        hotel.admin_cancel_reservation("alice", reservation.room_number)?;
    }
    assert_eq!(status_of(&hotel, 202), RoomStatus::Free);

    hotel.admin_delete_client("alice")?;
    assert!(hotel.client_reservations("alice").is_empty());
    assert!(hotel.authenticate("alice", "pw").is_none());

    let err = hotel.admin_delete_client("alice").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[test]
fn self_deletion_follows_the_same_guard() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.make_reservation("alice", 101, date(2025, 6, 10), 1)?;
    hotel.self_check_in("alice", 101)?;

    let err = hotel.delete_self_account("alice").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    hotel.self_check_out("alice", 101)?;
    hotel.delete_self_account("alice")?;
    assert!(hotel.clients().is_empty());
    assert!(hotel.client_reservations("alice").is_empty());

    // already gone
    hotel.delete_self_account("alice")?;
    Ok(())
}

#[test]
fn registration_rules() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());

    let err = hotel
        .register_client("Kid", "Doe", 17, "kid", "pw")
        .unwrap_err();
    assert_eq!(err, HotelError::Underage(17));
    assert_eq!(err.kind(), ErrorKind::PolicyViolation);

    hotel.register_client("Adult", "Doe", 18, "adult", "pw")?;
    let err = hotel
        .register_client("Other", "Doe", 40, "adult", "x")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // staff usernames are not reserved; the admin still wins at login
    hotel.register_client("Shadow", "Admin", 30, "admin", "123")?;
    assert!(matches!(
        hotel.authenticate("admin", "123"),
        Some(Account::Admin(_))
    ));
    Ok(())
}

#[test]
fn room_management() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());

    hotel.add_room(202, RoomType::Suite, 450)?;
    let err = hotel.add_room(202, RoomType::Single, 90).unwrap_err();
    assert_eq!(err, HotelError::RoomExists(202));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(hotel.free_rooms().len(), 2);

    hotel.set_room_status(202, "Renovating")?;
    assert_eq!(
        status_of(&hotel, 202),
        RoomStatus::Other("Renovating".to_string())
    );
    assert_eq!(hotel.free_rooms().len(), 1);
    assert_eq!(
        hotel.set_room_status(303, RoomStatus::Free),
        Err(HotelError::RoomNotFound(303))
    );

    hotel.remove_room(202)?;
    assert!(hotel.room(202).is_none());
    assert_eq!(hotel.remove_room(202), Err(HotelError::RoomNotFound(202)));
    Ok(())
}

#[test]
fn removed_rooms_leave_orphaned_history() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.make_reservation("alice", 101, date(2025, 6, 12), 2)?;

    hotel.remove_room(101)?;
    assert_eq!(hotel.client_reservations("alice").len(), 1);
    let err = hotel
        .make_reservation("alice", 101, date(2025, 6, 20), 1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    // cancelling the orphan still closes it
    hotel.admin_cancel_reservation("alice", 101)?;
    assert!(!hotel.client_reservations("alice")[0].is_active());
    Ok(())
}

#[test]
fn cleaner_management() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());

    hotel.add_cleaner("Ana", "Pop", "ana", "pw")?;
    assert_eq!(
        hotel.add_cleaner("Ana", "Pop", "ana", "other"),
        Err(HotelError::UsernameTaken("ana".to_string()))
    );
    assert!(matches!(
        hotel.authenticate("ana", "pw"),
        Some(Account::Cleaner(_))
    ));

    hotel.remove_cleaner("ghost");
    assert_eq!(hotel.cleaners().len(), 2);
    hotel.remove_cleaner("ana");
    assert_eq!(hotel.cleaners().len(), 1);
    Ok(())
}

#[test]
fn cleaning_requires_a_dirty_room() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    assert_eq!(hotel.clean_room(101), Err(HotelError::RoomNotDirty(101)));
    assert_eq!(hotel.clean_room(404), Err(HotelError::RoomNotFound(404)));

    hotel.set_room_status(101, "Cleaning")?;
    assert_eq!(hotel.dirty_rooms().len(), 1);
    hotel.clean_room(101)?;
    assert!(hotel.dirty_rooms().is_empty());
    Ok(())
}

#[test]
fn admin_period_change_skips_overlap_checks() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.register_client("Bob", "Roe", 30, "bob", "pw")?;
    hotel.make_reservation("alice", 101, date(2025, 6, 12), 2)?;
    hotel.make_reservation("bob", 101, date(2025, 6, 20), 2)?;

    let err = hotel
        .admin_change_reservation_period("alice", 101, date(2025, 6, 15), date(2025, 6, 15))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PolicyViolation);

    hotel.admin_change_reservation_period("alice", 101, date(2025, 6, 19), date(2025, 6, 22))?;
    let moved = &hotel.client_reservations("alice")[0];
    assert_eq!(moved.start_date, date(2025, 6, 19));
    assert_eq!(moved.end_date, date(2025, 6, 22));

    let err = hotel
        .admin_change_reservation_period("carol", 101, date(2025, 6, 1), date(2025, 6, 2))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[test]
fn admin_force_check_in_ignores_date_and_time() -> Result<()> {
    let dir = tempdir()?;
    {
        let mut hotel = open(dir.path());
        with_alice(&mut hotel);
        hotel.make_reservation("alice", 101, date(2025, 6, 25), 2)?;
    }
    let mut hotel = open_at(dir.path(), at(6, 0));
    hotel.admin_force_check_in("alice", 101)?;
    assert_eq!(status_of(&hotel, 101), RoomStatus::Occupied);
    assert_eq!(hotel.reservations_for_check_out("alice").len(), 1);
    Ok(())
}

#[test]
fn state_survives_reopen_except_simulated_date() -> Result<()> {
    let dir = tempdir()?;
    let before = {
        let mut hotel = open(dir.path());
        with_alice(&mut hotel);
        hotel.add_room(202, RoomType::Double, 150)?;
        hotel.make_reservation("alice", 202, date(2025, 6, 10), 2)?;
        hotel.update_check_in_time(at(15, 30));
        hotel.update_check_out_time(at(10, 0));
        hotel.set_simulation_date(date(2030, 1, 1));
        hotel.snapshot()
    };

    let reopened = open(dir.path());
    assert_eq!(reopened.snapshot(), before);
    assert_eq!(reopened.check_in_start(), at(15, 30));
    assert_eq!(reopened.check_out_limit(), at(10, 0));
    assert_eq!(reopened.current_date(), date(2025, 6, 10));
    Ok(())
}

#[test]
fn simulated_date_can_be_reset() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    hotel.set_simulation_date(date(2040, 2, 29));
    assert_eq!(hotel.current_date(), date(2040, 2, 29));
    hotel.reset_simulation_date();
    assert_eq!(hotel.current_date(), date(2025, 6, 10));
    assert_eq!(hotel.wall_clock_time(), at(15, 0));
    Ok(())
}

#[test]
fn failed_operations_leave_state_untouched() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);
    hotel.make_reservation("alice", 101, date(2025, 6, 12), 3)?;
    let before = hotel.snapshot();

    assert!(hotel.make_reservation("alice", 101, date(2025, 6, 13), 1).is_err());
    assert!(hotel.cancel_reservation("alice", 999).is_err());
    assert!(hotel.self_check_out("alice", 101).is_err());
    assert!(hotel.admin_delete_client("alice").is_err());
    assert!(hotel.clean_room(101).is_err());
    assert_eq!(hotel.snapshot(), before);
    Ok(())
}

#[test]
fn active_reservations_never_overlap() -> Result<()> {
    let dir = tempdir()?;
    let mut hotel = open(dir.path());
    with_alice(&mut hotel);

    for offset in 0..20u32 {
        let start = date(2025, 6, 10 + offset % 15);
        let _ = hotel.make_reservation("alice", 101, start, 1 + offset % 4);
        if offset % 5 == 0 {
            let _ = hotel.cancel_reservation("alice", 101);
        }
    }

    let active: Vec<_> = hotel
        .client_reservations("alice")
        .into_iter()
        .filter(|r| r.is_active())
        .collect();
    assert!(!active.is_empty());
    for (i, a) in active.iter().enumerate() {
        assert!(a.start_date < a.end_date);
        for b in &active[i + 1..] {
            assert!(!a.overlaps(b.start_date, b.end_date), "{a:?} overlaps {b:?}");
        }
    }
    Ok(())
}
