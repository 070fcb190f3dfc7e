//! The reservation engine: authoritative in-memory state plus every
//! operation that reads or mutates it.
//!
//! Operations validate all preconditions before touching state, so a failed
//! call leaves the hotel unchanged. Every successful mutation rewrites the
//! whole document through the [`Store`].

mod admin;
mod cleaner;
mod client;

#[cfg(test)]
mod tests;

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::{
    clock::Clock,
    error::{HotelError, Result},
    models::{Account, Person, Reservation, Room, RoomStatus, RoomType},
    store::{HotelData, Store},
};

/// Check-in/out times applied when the loaded document has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDefaults {
    /// Default check-in opening time.
    pub check_in_start: NaiveTime,
    /// Default check-out deadline.
    pub check_out_limit: NaiveTime,
}

impl Default for TimeDefaults {
    fn default() -> Self {
        Self {
            check_in_start: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or_default(),
            check_out_limit: NaiveTime::from_hms_opt(11, 0, 0).unwrap_or_default(),
        }
    }
}

/// Hotel state and the operations available to each role.
pub struct Hotel {
    rooms: Vec<Room>,
    clients: Vec<Person>,
    admins: Vec<Person>,
    cleaners: Vec<Person>,
    reservations: Vec<Reservation>,
    check_in_start: NaiveTime,
    check_out_limit: NaiveTime,
    current_date: NaiveDate,
    store: Store,
    clock: Box<dyn Clock>,
}

impl Hotel {
    /// Load the hotel from `store`, seeding default staff and a sample room
    /// when the document has no administrator.
    pub fn open(store: Store, clock: impl Clock + 'static, defaults: TimeDefaults) -> Self {
        let data = store.load();
        let current_date = clock.today();
        let mut hotel = Self {
            rooms: data.rooms,
            clients: data.clients,
            admins: data.admins,
            cleaners: data.cleaners,
            reservations: data.reservations,
            check_in_start: data.check_in_start.unwrap_or(defaults.check_in_start),
            check_out_limit: data.check_out_limit.unwrap_or(defaults.check_out_limit),
            current_date,
            store,
            clock: Box::new(clock),
        };
        info!(
            rooms = hotel.rooms.len(),
            clients = hotel.clients.len(),
            reservations = hotel.reservations.len(),
            path = %hotel.store.path().display(),
            "hotel loaded"
        );
        hotel.ensure_seed_data();
        hotel
    }

    fn ensure_seed_data(&mut self) {
        if !self.admins.is_empty() {
            return;
        }
        self.admins
            .push(Person::new("Mario", "Marica", 0, "admin", "123"));
        if !self.cleaners.iter().any(|c| c.username == "cleaner") {
            self.cleaners
                .push(Person::new("Alex", "Barmondius", 0, "cleaner", "123"));
        }
        if !self.rooms.iter().any(|r| r.number == 101) {
            self.rooms.push(Room::new(101, RoomType::Single, 100));
        }
        self.save_changes();
        info!("seeded default administrator, cleaner and room 101");
    }

    /// Copy of the persisted state.
    pub fn snapshot(&self) -> HotelData {
        HotelData {
            rooms: self.rooms.clone(),
            clients: self.clients.clone(),
            admins: self.admins.clone(),
            cleaners: self.cleaners.clone(),
            reservations: self.reservations.clone(),
            check_in_start: Some(self.check_in_start),
            check_out_limit: Some(self.check_out_limit),
        }
    }

    fn save_changes(&self) {
        self.store.save(&self.snapshot());
    }

    // --- simulated date ---

    /// The hotel's notion of today.
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Move the simulated date.
    pub fn set_simulation_date(&mut self, date: NaiveDate) {
        self.current_date = date;
        info!(%date, "simulated date set");
    }

    /// Reset the simulated date to the real calendar date.
    pub fn reset_simulation_date(&mut self) {
        let today = self.clock.today();
        self.set_simulation_date(today);
    }

    /// Real time of day, as seen by the check-in gate.
    pub fn wall_clock_time(&self) -> NaiveTime {
        self.clock.time_of_day()
    }

    // --- configuration ---

    /// Earliest time of day for self check-in.
    pub fn check_in_start(&self) -> NaiveTime {
        self.check_in_start
    }

    /// Configured check-out deadline. Informational only.
    pub fn check_out_limit(&self) -> NaiveTime {
        self.check_out_limit
    }

    // --- authentication ---

    /// Look up an account by credentials across admins, clients and cleaners,
    /// in that order.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Account> {
        let find = |people: &[Person]| {
            people
                .iter()
                .find(|p| p.credentials_match(username, password))
                .cloned()
        };
        find(&self.admins)
            .map(Account::Admin)
            .or_else(|| find(&self.clients).map(Account::Client))
            .or_else(|| find(&self.cleaners).map(Account::Cleaner))
    }

    // --- read-only views ---

    /// All rooms.
    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.clone()
    }

    /// Rooms currently marked free.
    pub fn free_rooms(&self) -> Vec<Room> {
        self.rooms_with_status(&RoomStatus::Free)
    }

    /// A single room, if present.
    pub fn room(&self, number: u32) -> Option<Room> {
        self.rooms.iter().find(|r| r.number == number).cloned()
    }

    /// All clients.
    pub fn clients(&self) -> Vec<Person> {
        self.clients.clone()
    }

    /// All cleaners.
    pub fn cleaners(&self) -> Vec<Person> {
        self.cleaners.clone()
    }

    fn rooms_with_status(&self, status: &RoomStatus) -> Vec<Room> {
        self.rooms
            .iter()
            .filter(|r| &r.status == status)
            .cloned()
            .collect()
    }

    // --- internal lookups ---

    fn room_mut(&mut self, number: u32) -> Result<&mut Room> {
        self.rooms
            .iter_mut()
            .find(|r| r.number == number)
            .ok_or(HotelError::RoomNotFound(number))
    }

    /// Update the status of a room that may no longer exist.
    fn mark_room(&mut self, number: u32, status: RoomStatus) {
        if let Some(room) = self.rooms.iter_mut().find(|r| r.number == number) {
            room.status = status;
        }
    }

    fn active_reservation_index(&self, username: &str, room: u32) -> Result<usize> {
        self.reservations
            .iter()
            .position(|r| r.matches(username, room) && r.is_active())
            .ok_or_else(|| HotelError::ReservationNotFound {
                username: username.to_string(),
                room,
            })
    }

    fn has_active_reservations(&self, username: &str) -> bool {
        self.reservations
            .iter()
            .any(|r| r.client_username == username && r.is_active())
    }

    fn reservations_where(&self, predicate: impl Fn(&Reservation) -> bool) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    fn remove_client_with_history(&mut self, username: &str) {
        self.reservations.retain(|r| r.client_username != username);
        self.clients.retain(|c| c.username != username);
    }
}
