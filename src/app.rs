use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::models::{Customer, CustomerId, Hotel, HotelError, LoadReport, Occupancy, Room};

/// A single mutating registry operation, as issued by the menu or the CLI
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddCustomer(Customer),
    AddRoom(Room),
    AssignRoom {
        customer_id: CustomerId,
        room_type: String,
    },
    Checkout {
        customer_id: CustomerId,
    },
}

impl Action {
    /// Run the action against the registry
    /// Returns the confirmation shown to the user
    pub fn execute(self, hotel: &mut Hotel) -> Result<&'static str, HotelError> {
        match self {
            Action::AddCustomer(customer) => hotel
                .add_customer(customer)
                .map(|()| "Customer added successfully."),
            Action::AddRoom(room) => hotel.add_room(room).map(|()| "Room added successfully."),
            Action::AssignRoom {
                customer_id,
                room_type,
            } => hotel
                .assign_room(customer_id, &room_type)
                .map(|_| "Room assigned successfully."),
            Action::Checkout { customer_id } => hotel
                .checkout(customer_id)
                .map(|_| "Checkout successful."),
        }
    }
}

/// Console text for a rejected or failed operation
pub fn rejection_message(err: &HotelError) -> String {
    match err {
        HotelError::DuplicateCustomer(_) => "Duplicate ID not allowed.".to_string(),
        HotelError::DuplicateRoom { .. } => "Duplicate room.".to_string(),
        HotelError::InvalidOperation(_) => "Invalid operation.".to_string(),
        HotelError::NoAvailableRoom(_) => "No available room.".to_string(),
        HotelError::InvalidField { field, reason, .. } => {
            format!("Invalid {}: {}.", field, reason)
        }
        HotelError::Storage(e) => format!("Failed to save records: {:#}", e),
    }
}

/// Write one "not found" notice per store that did not exist at load time
pub fn write_missing_notices<W: Write>(
    out: &mut W,
    report: &LoadReport,
) -> std::io::Result<()> {
    for path in &report.missing {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        writeln!(out, "{} not found. Starting fresh.", name)?;
    }
    Ok(())
}

/// Write the occupancy summary
pub fn write_stats<W: Write>(out: &mut W, occupancy: &Occupancy) -> std::io::Result<()> {
    writeln!(out, "Hotel Statistics")?;
    writeln!(out, "================")?;
    writeln!(
        out,
        "Customers: {} ({} with a room)",
        occupancy.customers, occupancy.assigned_customers
    )?;
    writeln!(out, "Rooms: {}", occupancy.rooms)?;
    writeln!(out, "  Available: {}", occupancy.available_rooms)?;
    writeln!(out, "  Occupied: {}", occupancy.occupied_rooms)?;
    for by_type in &occupancy.by_type {
        writeln!(
            out,
            "  {}: {}/{} available",
            by_type.room_type, by_type.available, by_type.total
        )?;
    }
    Ok(())
}

const MENU: &str = "1. Add Customer\n2. Add Room\n3. Assign Room\n4. Checkout\n5. Display All\n0. Exit";

/// Interactive menu loop over a token-oriented input stream
///
/// Input is consumed one whitespace-separated token at a time, so several
/// answers may be given on one line.
pub struct Menu<R, W> {
    input: R,
    out: W,
    pending: VecDeque<String>,
    /// Set once the input stream is exhausted
    closed: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Menu {
            input,
            out,
            pending: VecDeque::new(),
            closed: false,
        }
    }

    /// Run until the user picks Exit or input ends
    pub fn run(&mut self, hotel: &mut Hotel) -> Result<()> {
        loop {
            writeln!(self.out, "\n--- HOTEL MANAGEMENT SYSTEM ---")?;
            writeln!(self.out, "{}", MENU)?;

            let Some(choice) = self.field::<i64>("Enter choice: ")? else {
                if self.closed {
                    break;
                }
                continue;
            };

            let action = match choice {
                0 => {
                    writeln!(self.out, "Exiting...")?;
                    break;
                }
                1 => self.read_customer()?,
                2 => self.read_room()?,
                3 => self.read_assignment()?,
                4 => self.read_checkout()?,
                5 => {
                    hotel.display_all(&mut self.out)?;
                    continue;
                }
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    continue;
                }
            };

            match action {
                Some(action) => self.perform(action, hotel)?,
                None if self.closed => break,
                None => {}
            }
        }

        log::debug!("Menu loop finished");
        Ok(())
    }

    /// Execute an action and report the outcome; rejections never end the loop
    fn perform(&mut self, action: Action, hotel: &mut Hotel) -> Result<()> {
        match action.execute(hotel) {
            Ok(message) => writeln!(self.out, "{}", message)?,
            Err(err) => {
                if let HotelError::Storage(_) = err {
                    log::error!("{}", err);
                } else {
                    log::debug!("Rejected: {}", err);
                }
                writeln!(self.out, "{}", rejection_message(&err))?;
            }
        }
        Ok(())
    }

    fn read_customer(&mut self) -> Result<Option<Action>> {
        let Some(id) = self.field("Enter ID: ")? else {
            return Ok(None);
        };
        let Some(name) = self.field::<String>("Enter Name: ")? else {
            return Ok(None);
        };
        let Some(age) = self.field("Enter Age: ")? else {
            return Ok(None);
        };
        let Some(phone) = self.field::<String>("Enter Phone: ")? else {
            return Ok(None);
        };
        Ok(Some(Action::AddCustomer(Customer::new(id, name, age, phone))))
    }

    fn read_room(&mut self) -> Result<Option<Action>> {
        let Some(id) = self.field("Enter Room ID: ")? else {
            return Ok(None);
        };
        let Some(room_type) = self.field::<String>("Enter Room Type: ")? else {
            return Ok(None);
        };
        let Some(price) = self.field("Enter Price: ")? else {
            return Ok(None);
        };
        Ok(Some(Action::AddRoom(Room::new(id, room_type, price))))
    }

    fn read_assignment(&mut self) -> Result<Option<Action>> {
        let Some(customer_id) = self.field("Enter Customer ID: ")? else {
            return Ok(None);
        };
        let Some(room_type) = self.field("Enter Room Type: ")? else {
            return Ok(None);
        };
        Ok(Some(Action::AssignRoom {
            customer_id,
            room_type,
        }))
    }

    fn read_checkout(&mut self) -> Result<Option<Action>> {
        Ok(self
            .field("Enter Customer ID: ")?
            .map(|customer_id| Action::Checkout { customer_id }))
    }

    /// Prompt for and parse the next token
    /// Returns None on end of input, or after reporting an unparsable value
    fn field<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let Some(token) = self.next_token()? else {
            return Ok(None);
        };

        match token.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                log::debug!("Unparsable input {:?} for {:?}", token, prompt);
                self.pending.clear();
                writeln!(self.out, "Invalid input.")?;
                Ok(None)
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read input")?;
            if read == 0 {
                self.closed = true;
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}
