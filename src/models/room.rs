use std::fmt;

use crate::storage::FlatRecord;

/// Room identifier (unique together with the room type)
pub type RoomId = u32;

/// Occupancy state of a room
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
}

impl RoomStatus {
    /// Integer code written to the room store
    pub fn code(self) -> i32 {
        match self {
            RoomStatus::Available => -1,
            RoomStatus::Occupied => 0,
        }
    }

    /// Decode a stored status; anything other than -1 counts as occupied
    pub fn from_code(code: i32) -> Self {
        if code == -1 {
            RoomStatus::Available
        } else {
            RoomStatus::Occupied
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Occupied => "Occupied",
        }
    }
}

/// A bookable room
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    /// Category such as "Single" or "Deluxe" (single token)
    pub room_type: String,
    pub price: f64,
    pub status: RoomStatus,
}

impl Room {
    /// Create a new available room
    pub fn new(id: RoomId, room_type: impl Into<String>, price: f64) -> Self {
        Room {
            id,
            room_type: room_type.into(),
            price,
            status: RoomStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }

    /// Check if this room is the same (id, type) pair as another
    pub fn is_duplicate(&self, other: &Room) -> bool {
        self.id == other.id && self.room_type == other.room_type
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Room ID: {} | Type: {} | Price: {} | Status: {}",
            self.id,
            self.room_type,
            self.price,
            self.status.label()
        )
    }
}

impl FlatRecord for Room {
    const FIELDS: usize = 4;

    fn to_line(&self) -> String {
        format!(
            "{} {} {} {}",
            self.id,
            self.room_type,
            self.price,
            self.status.code()
        )
    }

    fn from_fields(fields: &[&str]) -> Option<Self> {
        let [id, room_type, price, status] = fields else {
            return None;
        };

        Some(Room {
            id: id.parse().ok()?,
            room_type: (*room_type).to_string(),
            price: price.parse().ok()?,
            status: RoomStatus::from_code(status.parse().ok()?),
        })
    }
}
