#![allow(missing_docs)]

//! Domain failures raised by the hotel engine and the input parsers.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Coarse classification of a [`HotelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A room, client or reservation does not exist.
    NotFound,
    /// A uniqueness or overlap rule would be broken.
    Conflict,
    /// A business rule rejects the request.
    PolicyViolation,
    /// The target entity is in the wrong state for the request.
    StateViolation,
    /// User input could not be parsed.
    InputFormat,
}

/// Every way an engine operation can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotelError {
    #[error("room {0} does not exist")]
    RoomNotFound(u32),
    #[error("client '{0}' does not exist")]
    ClientNotFound(String),
    #[error("no active reservation for '{username}' in room {room}")]
    ReservationNotFound { username: String, room: u32 },
    #[error("'{username}' is not checked in to room {room}")]
    NotCheckedIn { username: String, room: u32 },

    #[error("room {0} already exists")]
    RoomExists(u32),
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("room {room} is already booked between {start} and {end}")]
    Overlap {
        room: u32,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("'{0}' still has active reservations; cancel them or check out first")]
    HasActiveReservations(String),

    #[error("registration refused: minimum age is 18 (got {0})")]
    Underage(u32),
    #[error("unknown room type '{0}' (allowed: Single, Double, Suite)")]
    UnknownRoomType(String),
    #[error("cannot book in the past ({start} is before {today})")]
    BookingInPast { start: NaiveDate, today: NaiveDate },
    #[error("a stay must be at least one night")]
    EmptyStay,
    #[error("too early: check-in starts at {opens}, it is {now}")]
    CheckInTooEarly { opens: NaiveTime, now: NaiveTime },
    #[error("reservation only starts on {start}; today is {today}")]
    NotStartedYet { start: NaiveDate, today: NaiveDate },
    #[error("invalid period: {start} must be before {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
    #[error("cannot cancel a reservation that started on {start}")]
    CancelInPast { start: NaiveDate },

    #[error("room {0} is not free today")]
    RoomNotFree(u32),
    #[error("room {0} does not need cleaning")]
    RoomNotDirty(u32),
    #[error("reservation for room {0} is already checked in")]
    AlreadyCheckedIn(u32),
    #[error("cannot cancel room {0} after check-in")]
    CancelAfterCheckIn(u32),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("'{0}' is not a valid date (expected dd-MM-yyyy)")]
    InvalidDate(String),
    #[error("'{0}' is not a valid time (expected HH:mm)")]
    InvalidTime(String),
    #[error("year {0} is out of range (must be between 2020 and 2050)")]
    YearOutOfRange(i32),
}

impl HotelError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RoomNotFound(_)
            | Self::ClientNotFound(_)
            | Self::ReservationNotFound { .. }
            | Self::NotCheckedIn { .. } => ErrorKind::NotFound,
            Self::RoomExists(_)
            | Self::UsernameTaken(_)
            | Self::Overlap { .. }
            | Self::HasActiveReservations(_) => ErrorKind::Conflict,
            Self::Underage(_)
            | Self::UnknownRoomType(_)
            | Self::BookingInPast { .. }
            | Self::EmptyStay
            | Self::CheckInTooEarly { .. }
            | Self::NotStartedYet { .. }
            | Self::InvalidPeriod { .. }
            | Self::CancelInPast { .. } => ErrorKind::PolicyViolation,
            Self::RoomNotFree(_)
            | Self::RoomNotDirty(_)
            | Self::AlreadyCheckedIn(_)
            | Self::CancelAfterCheckIn(_) => ErrorKind::StateViolation,
            Self::InvalidNumber(_)
            | Self::InvalidDate(_)
            | Self::InvalidTime(_)
            | Self::YearOutOfRange(_) => ErrorKind::InputFormat,
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, HotelError>;
