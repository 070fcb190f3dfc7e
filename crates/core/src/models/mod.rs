//! Shared domain models.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::HotelError;

/// Category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    /// One guest.
    Single,
    /// Two guests.
    Double,
    /// Larger multi-room unit.
    Suite,
}

impl RoomType {
    /// Every bookable room type, in menu order.
    pub const ALL: [RoomType; 3] = [RoomType::Single, RoomType::Double, RoomType::Suite];

    /// Literal name as stored on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Suite => "Suite",
        }
    }
}

impl FromStr for RoomType {
    type Err = HotelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| HotelError::UnknownRoomType(value.to_string()))
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Housekeeping state of a room.
///
/// Statuses are string-tagged on disk. Administrators may set any string,
/// which is kept verbatim in [`RoomStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomStatus {
    /// Available for booking today.
    #[default]
    Free,
    /// A guest holds the room today.
    Occupied,
    /// Vacated and waiting for a cleaner.
    Cleaning,
    /// Taken out of service by an administrator.
    Indisponible,
    /// Any other administrator-provided label.
    Other(String),
}

impl RoomStatus {
    /// Known statuses, as offered to administrators.
    pub const KNOWN: [&'static str; 4] = ["Free", "Occupied", "Cleaning", "Indisponible"];

    /// Label as stored on disk.
    pub fn as_str(&self) -> &str {
        match self {
            RoomStatus::Free => "Free",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Cleaning => "Cleaning",
            RoomStatus::Indisponible => "Indisponible",
            RoomStatus::Other(label) => label,
        }
    }
}

impl From<&str> for RoomStatus {
    fn from(value: &str) -> Self {
        match value {
            "Free" => RoomStatus::Free,
            "Occupied" => RoomStatus::Occupied,
            "Cleaning" => RoomStatus::Cleaning,
            "Indisponible" => RoomStatus::Indisponible,
            other => RoomStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for RoomStatus {
    fn from(value: String) -> Self {
        RoomStatus::from(value.as_str())
    }
}

impl From<RoomStatus> for String {
    fn from(value: RoomStatus) -> Self {
        match value {
            RoomStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Room {
    /// Unique room number.
    #[serde(rename = "RoomNumber")]
    pub number: u32,
    /// Category of the room.
    pub room_type: RoomType,
    /// Nightly price, currency-agnostic.
    pub price_per_night: u32,
    /// Current housekeeping state.
    #[serde(default)]
    pub status: RoomStatus,
}

impl Room {
    /// New room in the `Free` state.
    pub fn new(number: u32, room_type: RoomType, price_per_night: u32) -> Self {
        Self {
            number,
            room_type,
            price_per_night,
            status: RoomStatus::Free,
        }
    }
}

/// Header record shared by every account role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Age in years; only enforced for clients.
    #[serde(default)]
    pub age: u32,
    /// Login name.
    #[serde(rename = "UsernameID")]
    pub username: String,
    /// Stored and compared verbatim.
    pub password: String,
    /// Session flag carried in the document.
    #[serde(default)]
    pub logged_in: bool,
}

impl Person {
    /// Build a person record with no session flag set.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u32,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            username: username.into(),
            password: password.into(),
            logged_in: false,
        }
    }

    /// "First Last" label.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Byte-for-byte credential comparison.
    pub fn credentials_match(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Privilege level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Hotel staff with full control.
    Administrator,
    /// Guest who books rooms.
    Client,
    /// Housekeeping staff.
    Cleaner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Administrator => "Administrator",
            Role::Client => "Client",
            Role::Cleaner => "Cleaner",
        };
        f.write_str(label)
    }
}

/// An authenticated person tagged with its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    /// Administrator account.
    Admin(Person),
    /// Client account.
    Client(Person),
    /// Cleaner account.
    Cleaner(Person),
}

impl Account {
    /// Shared person record.
    pub fn person(&self) -> &Person {
        match self {
            Account::Admin(person) | Account::Client(person) | Account::Cleaner(person) => person,
        }
    }

    /// Role of the account.
    pub fn role(&self) -> Role {
        match self {
            Account::Admin(_) => Role::Administrator,
            Account::Client(_) => Role::Client,
            Account::Cleaner(_) => Role::Cleaner,
        }
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.person().username
    }
}

/// A client's booking of a room over `[start_date, end_date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reservation {
    /// Username of the booking client.
    pub client_username: String,
    /// Booked room.
    pub room_number: u32,
    /// Arrival date.
    pub start_date: NaiveDate,
    /// Exclusive departure date.
    pub end_date: NaiveDate,
    /// Guest has arrived.
    #[serde(default)]
    pub is_checked_in: bool,
    /// Stay is over, either by departure or by cancellation.
    #[serde(default)]
    pub is_checked_out: bool,
}

impl Reservation {
    /// New reservation that is neither checked in nor out.
    pub fn new(
        client_username: impl Into<String>,
        room_number: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            client_username: client_username.into(),
            room_number,
            start_date,
            end_date,
            is_checked_in: false,
            is_checked_out: false,
        }
    }

    /// Active reservations still hold their room.
    pub fn is_active(&self) -> bool {
        !self.is_checked_out
    }

    /// Half-open overlap test against `[start, end)`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start < self.end_date && self.start_date < end
    }

    /// Whether `date` falls inside the stay.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date < self.end_date
    }

    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub(crate) fn matches(&self, username: &str, room: u32) -> bool {
        self.client_username == username && self.room_number == room
    }
}
