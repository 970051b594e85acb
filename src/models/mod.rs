pub mod customer;
pub mod hotel;
pub mod room;

pub use customer::{Customer, CustomerId};
pub use hotel::{Hotel, HotelError, LoadReport, Occupancy, TypeOccupancy};
pub use room::{Room, RoomId, RoomStatus};

/// Validate that a text field survives the whitespace-delimited stores
/// Valid values are non-empty and contain no whitespace
pub fn is_valid_token(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}
