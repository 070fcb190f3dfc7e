#![warn(clippy::all, missing_docs)]

//! Core domain logic for the Hosta hotel front desk.
//!
//! This crate hosts the data models, the reservation engine, configuration
//! handling, and the on-disk persistence layer used by the terminal UI.

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod hotel;
pub mod models;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{ErrorKind, HotelError};
pub use hotel::{Hotel, TimeDefaults};
pub use models::{Account, Person, Reservation, Role, Room, RoomStatus, RoomType};
pub use store::{HotelData, Store};
