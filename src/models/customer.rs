use std::fmt;

use super::room::RoomId;
use crate::storage::FlatRecord;

/// Customer identifier, unique across the registry
pub type CustomerId = u32;

/// On-disk value of `room_id` for a customer with no room
const UNASSIGNED: i64 = -1;

/// A hotel guest and the room currently linked to them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Unique identifier (customers are kept sorted by this)
    pub id: CustomerId,
    /// Single-token name
    pub name: String,
    pub age: u32,
    /// Single-token phone number
    pub phone: String,
    /// Room assigned to this customer, `None` when unassigned
    pub room_id: Option<RoomId>,
}

impl Customer {
    /// Create a new customer with no room assigned
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        age: u32,
        phone: impl Into<String>,
    ) -> Self {
        Customer {
            id,
            name: name.into(),
            age,
            phone: phone.into(),
            room_id: None,
        }
    }

    /// Check if a room is currently linked to this customer
    pub fn is_assigned(&self) -> bool {
        self.room_id.is_some()
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Age: {} | Phone: {} | Room: ",
            self.id, self.name, self.age, self.phone
        )?;
        match self.room_id {
            Some(room_id) => write!(f, "{}", room_id),
            None => write!(f, "None"),
        }
    }
}

impl FlatRecord for Customer {
    const FIELDS: usize = 5;

    fn to_line(&self) -> String {
        let room_id = self.room_id.map_or(UNASSIGNED, i64::from);
        format!(
            "{} {} {} {} {}",
            self.id, self.name, self.age, self.phone, room_id
        )
    }

    fn from_fields(fields: &[&str]) -> Option<Self> {
        let [id, name, age, phone, room_id] = fields else {
            return None;
        };

        let room_id = match room_id.parse::<i64>().ok()? {
            UNASSIGNED => None,
            other => Some(RoomId::try_from(other).ok()?),
        };

        Some(Customer {
            id: id.parse().ok()?,
            name: (*name).to_string(),
            age: age.parse().ok()?,
            phone: (*phone).to_string(),
            room_id,
        })
    }
}
