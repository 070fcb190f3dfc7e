use chrono::{Days, NaiveDate};
use tracing::info;

use super::Hotel;
use crate::{
    error::{HotelError, Result},
    models::{Person, Reservation, RoomStatus},
};

const MINIMUM_CLIENT_AGE: u32 = 18;

/// Client operations.
impl Hotel {
    /// Create a client account. Only existing clients are checked for a
    /// username clash.
    pub fn register_client(
        &mut self,
        first_name: &str,
        last_name: &str,
        age: u32,
        username: &str,
        password: &str,
    ) -> Result<()> {
        if age < MINIMUM_CLIENT_AGE {
            return Err(HotelError::Underage(age));
        }
        if self.clients.iter().any(|c| c.username == username) {
            return Err(HotelError::UsernameTaken(username.to_string()));
        }
        self.clients
            .push(Person::new(first_name, last_name, age, username, password));
        self.save_changes();
        info!(username, age, "client registered");
        Ok(())
    }

    /// Book `room` for `days` nights starting on `start`.
    pub fn make_reservation(
        &mut self,
        username: &str,
        room: u32,
        start: NaiveDate,
        days: u32,
    ) -> Result<()> {
        let today = self.current_date;
        if start < today {
            return Err(HotelError::BookingInPast { start, today });
        }
        if days < 1 {
            return Err(HotelError::EmptyStay);
        }
        let end = start
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or(HotelError::InvalidPeriod { start, end: start })?;

        let status = self
            .rooms
            .iter()
            .find(|r| r.number == room)
            .map(|r| r.status.clone())
            .ok_or(HotelError::RoomNotFound(room))?;
        if start == today && status != RoomStatus::Free {
            return Err(HotelError::RoomNotFree(room));
        }
        if let Some(existing) = self
            .reservations
            .iter()
            .find(|r| r.room_number == room && r.is_active() && r.overlaps(start, end))
        {
            return Err(HotelError::Overlap {
                room,
                start: existing.start_date,
                end: existing.end_date,
            });
        }

        self.reservations
            .push(Reservation::new(username, room, start, end));
        if start == today {
            self.mark_room(room, RoomStatus::Occupied);
        }
        self.save_changes();
        info!(username, room, %start, days, "client booked room");
        Ok(())
    }

    /// Reservations the client could check in to today.
    pub fn reservations_for_check_in(&self, username: &str) -> Vec<Reservation> {
        let today = self.current_date;
        self.reservations_where(|r| {
            r.client_username == username
                && !r.is_checked_in
                && !r.is_checked_out
                && r.start_date <= today
                && r.end_date > today
        })
    }

    /// Check in on arrival. Gated by the real time of day.
    pub fn self_check_in(&mut self, username: &str, room: u32) -> Result<()> {
        let now = self.clock.time_of_day();
        if now < self.check_in_start {
            return Err(HotelError::CheckInTooEarly {
                opens: self.check_in_start,
                now,
            });
        }

        let index = self
            .reservations
            .iter()
            .position(|r| r.matches(username, room) && !r.is_checked_in && !r.is_checked_out)
            .ok_or_else(|| {
                if self.active_reservation_index(username, room).is_ok() {
                    HotelError::AlreadyCheckedIn(room)
                } else {
                    HotelError::ReservationNotFound {
                        username: username.to_string(),
                        room,
                    }
                }
            })?;

        let start = self.reservations[index].start_date;
        if start > self.current_date {
            return Err(HotelError::NotStartedYet {
                start,
                today: self.current_date,
            });
        }

        self.reservations[index].is_checked_in = true;
        self.mark_room(room, RoomStatus::Occupied);
        self.save_changes();
        info!(username, room, "client checked in");
        Ok(())
    }

    /// Reservations the client is currently staying under.
    pub fn reservations_for_check_out(&self, username: &str) -> Vec<Reservation> {
        self.reservations_where(|r| {
            r.client_username == username && r.is_checked_in && !r.is_checked_out
        })
    }

    /// Check out and hand the room to housekeeping.
    pub fn self_check_out(&mut self, username: &str, room: u32) -> Result<()> {
        let index = self
            .reservations
            .iter()
            .position(|r| r.matches(username, room) && r.is_checked_in && !r.is_checked_out)
            .ok_or_else(|| HotelError::NotCheckedIn {
                username: username.to_string(),
                room,
            })?;

        self.reservations[index].is_checked_out = true;
        self.mark_room(room, RoomStatus::Cleaning);
        self.save_changes();
        info!(username, room, "client checked out");
        Ok(())
    }

    /// Cancel a reservation that has not started yet or starts today.
    pub fn cancel_reservation(&mut self, username: &str, room: u32) -> Result<()> {
        let index = self.active_reservation_index(username, room)?;
        let reservation = &self.reservations[index];
        if reservation.is_checked_in {
            return Err(HotelError::CancelAfterCheckIn(room));
        }
        let start = reservation.start_date;
        if start < self.current_date {
            return Err(HotelError::CancelInPast { start });
        }

        self.reservations[index].is_checked_out = true;
        if start == self.current_date {
            self.mark_room(room, RoomStatus::Free);
        }
        self.save_changes();
        info!(username, room, "client cancelled reservation");
        Ok(())
    }

    /// Delete the caller's own account and reservation history.
    ///
    /// An account that no longer exists is treated as already deleted.
    pub fn delete_self_account(&mut self, username: &str) -> Result<()> {
        if self.has_active_reservations(username) {
            return Err(HotelError::HasActiveReservations(username.to_string()));
        }
        if self.clients.iter().any(|c| c.username == username) {
            self.remove_client_with_history(username);
            self.save_changes();
            info!(username, "client deleted own account");
        }
        Ok(())
    }
}
