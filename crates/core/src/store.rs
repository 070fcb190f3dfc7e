//! Whole-document persistence for the hotel state.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, error, warn};

use crate::models::{Person, Reservation, Room};

/// File name used when no path is configured.
pub const DEFAULT_DATA_FILE: &str = "hotel_data.json";

/// Everything written to disk. The simulated date is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HotelData {
    /// All rooms.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Registered clients.
    #[serde(default)]
    pub clients: Vec<Person>,
    /// Administrators.
    #[serde(default)]
    pub admins: Vec<Person>,
    /// Cleaning staff.
    #[serde(default)]
    pub cleaners: Vec<Person>,
    /// Current and historical reservations.
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    /// Earliest time of day at which guests may self check-in.
    #[serde(default)]
    pub check_in_start: Option<NaiveTime>,
    /// Configured check-out deadline.
    #[serde(default)]
    pub check_out_limit: Option<NaiveTime>,
}

/// Reads and writes the single hotel document.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Canonical document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, falling back to an empty one when it is missing or
    /// unreadable. A corrupt file is copied aside before being ignored.
    pub fn load(&self) -> HotelData {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no data file yet; starting empty");
            return HotelData::default();
        }

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(path = %self.path.display(), ?err, "failed to read data file");
                return HotelData::default();
            }
        };

        match serde_json::from_slice::<HotelData>(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!(path = %self.path.display(), %err, "data file is corrupt; starting empty");
                match self.backup_corrupt(&bytes) {
                    Ok(backup) => warn!(backup = %backup.display(), "corrupt data file preserved"),
                    Err(err) => warn!(?err, "could not preserve corrupt data file"),
                }
                HotelData::default()
            }
        }
    }

    /// Write the full document. Failures are logged and reported through the
    /// return value; the caller's in-memory state stays authoritative.
    pub fn save(&self, data: &HotelData) -> bool {
        match self.write_document(data) {
            Ok(()) => true,
            Err(err) => {
                error!(path = %self.path.display(), ?err, "failed to save hotel data");
                false
            }
        }
    }

    fn write_document(&self, data: &HotelData) -> Result<()> {
        let parent = self.parent_dir();
        fs::create_dir_all(&parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        let serialised = serde_json::to_vec_pretty(data).context("failed to serialize hotel data")?;
        let mut temp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
        temp.write_all(&serialised)
            .context("failed to write temp data file")?;
        temp.persist(&self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }

    fn backup_corrupt(&self, bytes: &[u8]) -> Result<PathBuf> {
        let parent = self.parent_dir();
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

        let mut backup = Builder::new()
            .prefix(&format!("{file_name}.corrupt.backup_"))
            .suffix(".bak")
            .tempfile_in(&parent)
            .with_context(|| format!("failed to create backup in {}", parent.display()))?;
        backup
            .write_all(bytes)
            .context("failed to write backup contents")?;
        let (_, path) = backup.keep().context("failed to keep backup file")?;
        Ok(path)
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RoomStatus, RoomType};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample_data() -> HotelData {
        let mut room = Room::new(101, RoomType::Single, 100);
        room.status = RoomStatus::Other("Renovating".to_string());
        HotelData {
            rooms: vec![room, Room::new(202, RoomType::Suite, 450)],
            clients: vec![Person::new("Alice", "Doe", 25, "alice", "pw")],
            admins: vec![Person::new("Mario", "Marica", 0, "admin", "123")],
            cleaners: vec![Person::new("Alex", "Barmondius", 0, "cleaner", "123")],
            reservations: vec![Reservation::new(
                "alice",
                101,
                NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            )],
            check_in_start: NaiveTime::from_hms_opt(14, 0, 0),
            check_out_limit: NaiveTime::from_hms_opt(11, 0, 0),
        }
    }

    #[test]
    fn missing_file_loads_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = Store::new(dir.path().join("hotel_data.json"));
        assert_eq!(store.load(), HotelData::default());
        Ok(())
    }

    #[test]
    fn save_load_save_is_stable() -> Result<()> {
        let dir = tempdir()?;
        let store = Store::new(dir.path().join("nested/hotel_data.json"));
        let data = sample_data();

        assert!(store.save(&data));
        let first = fs::read_to_string(store.path())?;
        let reloaded = store.load();
        assert_eq!(reloaded, data);

        assert!(store.save(&reloaded));
        let second = fs::read_to_string(store.path())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn document_uses_wrapper_field_names() -> Result<()> {
        let dir = tempdir()?;
        let store = Store::new(dir.path().join("hotel_data.json"));
        store.save(&sample_data());

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path())?)?;
        for key in [
            "Rooms",
            "Clients",
            "Admins",
            "Cleaners",
            "Reservations",
            "CheckInStart",
            "CheckOutLimit",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["Admins"][0]["UsernameID"], "admin");
        assert_eq!(value["Rooms"][0]["Status"], "Renovating");
        assert!(value.get("CurrentDate").is_none());
        Ok(())
    }

    #[test]
    fn corrupt_file_is_backed_up() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("hotel_data.json");
        fs::write(&path, "{ not json")?;

        let store = Store::new(&path);
        assert_eq!(store.load(), HotelData::default());

        let backups: Vec<_> = fs::read_dir(dir.path())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name.starts_with("hotel_data.json.corrupt.backup_"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert!(backups[0].ends_with(".bak"));
        assert_eq!(
            fs::read_to_string(dir.path().join(&backups[0]))?,
            "{ not json"
        );
        Ok(())
    }

    #[test]
    fn save_failure_is_swallowed() -> Result<()> {
        let dir = tempdir()?;
        // the canonical path is a directory, so the final rename must fail
        let path = dir.path().join("occupied");
        fs::create_dir_all(path.join("child"))?;
        let store = Store::new(&path);
        assert!(!store.save(&sample_data()));
        Ok(())
    }
}
