use tracing::info;

use super::Hotel;
use crate::{
    error::{HotelError, Result},
    models::{Room, RoomStatus},
};

/// Cleaner operations.
impl Hotel {
    /// Rooms waiting for housekeeping.
    pub fn dirty_rooms(&self) -> Vec<Room> {
        self.rooms_with_status(&RoomStatus::Cleaning)
    }

    /// Mark a room in `Cleaning` as free again.
    pub fn clean_room(&mut self, number: u32) -> Result<()> {
        let room = self.room_mut(number)?;
        if room.status != RoomStatus::Cleaning {
            return Err(HotelError::RoomNotDirty(number));
        }
        room.status = RoomStatus::Free;
        self.save_changes();
        info!(room = number, "cleaner finished room");
        Ok(())
    }
}
