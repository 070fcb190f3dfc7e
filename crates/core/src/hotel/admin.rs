use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use super::Hotel;
use crate::{
    error::{HotelError, Result},
    models::{Person, Reservation, Room, RoomStatus, RoomType},
};

/// Administrator operations.
impl Hotel {
    /// Add a new, free room.
    pub fn add_room(&mut self, number: u32, room_type: RoomType, price_per_night: u32) -> Result<()> {
        if self.rooms.iter().any(|r| r.number == number) {
            return Err(HotelError::RoomExists(number));
        }
        self.rooms.push(Room::new(number, room_type, price_per_night));
        self.save_changes();
        info!(room = number, %room_type, price_per_night, "admin added room");
        Ok(())
    }

    /// Delete a room. Its reservations are left in place.
    pub fn remove_room(&mut self, number: u32) -> Result<()> {
        let index = self
            .rooms
            .iter()
            .position(|r| r.number == number)
            .ok_or(HotelError::RoomNotFound(number))?;
        self.rooms.remove(index);
        self.save_changes();
        info!(room = number, "admin removed room");
        Ok(())
    }

    /// Overwrite a room's status with any label, known or not.
    pub fn set_room_status(&mut self, number: u32, status: impl Into<RoomStatus>) -> Result<()> {
        let status = status.into();
        let room = self.room_mut(number)?;
        room.status = status.clone();
        self.save_changes();
        info!(room = number, %status, "admin set room status");
        Ok(())
    }

    /// Hire a cleaner. Only other cleaners are checked for a username clash.
    pub fn add_cleaner(
        &mut self,
        first_name: &str,
        last_name: &str,
        username: &str,
        password: &str,
    ) -> Result<()> {
        if self.cleaners.iter().any(|c| c.username == username) {
            return Err(HotelError::UsernameTaken(username.to_string()));
        }
        self.cleaners
            .push(Person::new(first_name, last_name, 0, username, password));
        self.save_changes();
        info!(username, "admin hired cleaner");
        Ok(())
    }

    /// Fire a cleaner; unknown usernames are ignored.
    pub fn remove_cleaner(&mut self, username: &str) {
        let before = self.cleaners.len();
        self.cleaners.retain(|c| c.username != username);
        if self.cleaners.len() != before {
            self.save_changes();
            info!(username, "admin removed cleaner");
        }
    }

    /// Change the earliest self check-in time.
    pub fn update_check_in_time(&mut self, time: NaiveTime) {
        self.check_in_start = time;
        self.save_changes();
        info!(%time, "admin changed check-in start");
    }

    /// Change the check-out deadline.
    pub fn update_check_out_time(&mut self, time: NaiveTime) {
        self.check_out_limit = time;
        self.save_changes();
        info!(%time, "admin changed check-out limit");
    }

    /// Every reservation ever made by `username`, including checked-out ones.
    pub fn client_reservations(&self, username: &str) -> Vec<Reservation> {
        self.reservations_where(|r| r.client_username == username)
    }

    /// Delete a client together with their reservation history.
    pub fn admin_delete_client(&mut self, username: &str) -> Result<()> {
        if !self.clients.iter().any(|c| c.username == username) {
            return Err(HotelError::ClientNotFound(username.to_string()));
        }
        if self.has_active_reservations(username) {
            return Err(HotelError::HasActiveReservations(username.to_string()));
        }
        self.remove_client_with_history(username);
        self.save_changes();
        info!(username, "admin deleted client and reservation history");
        Ok(())
    }

    /// Close an active reservation and free its room.
    pub fn admin_cancel_reservation(&mut self, username: &str, room: u32) -> Result<()> {
        let index = self.active_reservation_index(username, room)?;
        self.reservations[index].is_checked_out = true;
        self.mark_room(room, RoomStatus::Free);
        self.save_changes();
        info!(username, room, "admin cancelled reservation");
        Ok(())
    }

    /// Move an active reservation to `[start, end)`.
    ///
    /// Other reservations of the room are not re-checked for overlap.
    pub fn admin_change_reservation_period(
        &mut self,
        username: &str,
        room: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<()> {
        let index = self.active_reservation_index(username, room)?;
        if start >= end {
            return Err(HotelError::InvalidPeriod { start, end });
        }
        let reservation = &mut self.reservations[index];
        reservation.start_date = start;
        reservation.end_date = end;
        self.save_changes();
        info!(username, room, %start, %end, "admin changed reservation period");
        Ok(())
    }

    /// Check a guest in regardless of date or time of day.
    pub fn admin_force_check_in(&mut self, username: &str, room: u32) -> Result<()> {
        let index = self.active_reservation_index(username, room)?;
        self.reservations[index].is_checked_in = true;
        self.mark_room(room, RoomStatus::Occupied);
        self.save_changes();
        info!(username, room, "admin forced check-in");
        Ok(())
    }
}
