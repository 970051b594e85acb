use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use super::customer::{Customer, CustomerId};
use super::is_valid_token;
use super::room::{Room, RoomId, RoomStatus};
use crate::storage::{FlatFileStorage, RecordStorage};

/// Rejections and failures from registry operations
#[derive(Debug, thiserror::Error)]
pub enum HotelError {
    #[error("customer {0} already exists")]
    DuplicateCustomer(CustomerId),

    #[error("{room_type} room {id} already exists")]
    DuplicateRoom { id: RoomId, room_type: String },

    /// Unknown customer, or customer in the wrong assignment state
    #[error("invalid operation for customer {0}")]
    InvalidOperation(CustomerId),

    #[error("no available {0} room")]
    NoAvailableRoom(String),

    #[error("invalid {field} {value:?}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Outcome of loading both record stores
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub customers: usize,
    pub rooms: usize,
    /// Stores that did not exist yet (collection left empty)
    pub missing: Vec<PathBuf>,
}

/// Available/total room counts for one room type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOccupancy {
    pub room_type: String,
    pub available: usize,
    pub total: usize,
}

/// Snapshot of registry counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    pub customers: usize,
    pub assigned_customers: usize,
    pub rooms: usize,
    pub available_rooms: usize,
    pub occupied_rooms: usize,
    /// Per room type, ordered by type name
    pub by_type: Vec<TypeOccupancy>,
}

/// The hotel registry: owns the customer and room collections and
/// persists each one after every mutation
///
/// Customers are kept sorted by id and rooms by (type, id), so
/// `find_customer` can binary search.
pub struct Hotel {
    customers: Vec<Customer>,
    rooms: Vec<Room>,
    customer_store: Box<dyn RecordStorage<Customer>>,
    room_store: Box<dyn RecordStorage<Room>>,
}

impl Hotel {
    /// Create an empty registry over the given stores (nothing is loaded)
    pub fn new(
        customer_store: Box<dyn RecordStorage<Customer>>,
        room_store: Box<dyn RecordStorage<Room>>,
    ) -> Self {
        Hotel {
            customers: Vec::new(),
            rooms: Vec::new(),
            customer_store,
            room_store,
        }
    }

    /// Create an empty registry backed by flat files
    pub fn with_files(customers_path: PathBuf, rooms_path: PathBuf) -> Self {
        Hotel::new(
            Box::new(FlatFileStorage::<Customer>::new(customers_path)),
            Box::new(FlatFileStorage::<Room>::new(rooms_path)),
        )
    }

    /// Read both collections from their stores and sort them
    /// A missing store leaves its collection untouched and is listed in the report
    pub fn load(&mut self) -> Result<LoadReport, HotelError> {
        let mut report = LoadReport::default();

        match self.room_store.load()? {
            Some(rooms) => {
                self.rooms = rooms;
                self.sort_rooms();
            }
            None => report.missing.push(self.room_store.path().clone()),
        }

        match self.customer_store.load()? {
            Some(customers) => {
                self.customers = customers;
                self.sort_customers();
            }
            None => report.missing.push(self.customer_store.path().clone()),
        }

        report.customers = self.customers.len();
        report.rooms = self.rooms.len();
        log::info!(
            "Registry loaded: {} customers, {} rooms",
            report.customers,
            report.rooms
        );

        Ok(report)
    }

    /// Write both collections to their stores
    pub fn save(&self) -> Result<(), HotelError> {
        self.save_customers()?;
        self.save_rooms()
    }

    fn save_customers(&self) -> Result<(), HotelError> {
        self.customer_store.save(&self.customers)?;
        Ok(())
    }

    fn save_rooms(&self) -> Result<(), HotelError> {
        self.room_store.save(&self.rooms)?;
        Ok(())
    }

    /// Sort customers by ascending id
    fn sort_customers(&mut self) {
        self.customers.sort_by_key(|c| c.id);
    }

    /// Sort rooms by type, then ascending id within a type
    fn sort_rooms(&mut self) {
        self.rooms.sort_by(|a, b| {
            a.room_type
                .cmp(&b.room_type)
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    /// Add a new customer (no room assigned)
    /// Rejects an id that is already registered
    pub fn add_customer(&mut self, customer: Customer) -> Result<(), HotelError> {
        check_token("name", &customer.name)?;
        check_token("phone", &customer.phone)?;

        if self.customers.iter().any(|c| c.id == customer.id) {
            log::debug!("Rejected duplicate customer {}", customer.id);
            return Err(HotelError::DuplicateCustomer(customer.id));
        }

        let id = customer.id;
        self.customers.push(customer);
        self.sort_customers();
        self.save_customers()?;

        log::info!("Added customer {}", id);
        Ok(())
    }

    /// Add a new room
    /// Only an exact (id, type) match counts as a duplicate
    pub fn add_room(&mut self, room: Room) -> Result<(), HotelError> {
        check_token("room type", &room.room_type)?;
        if !room.price.is_finite() || room.price < 0.0 {
            return Err(HotelError::InvalidField {
                field: "price",
                value: room.price.to_string(),
                reason: "must be a non-negative number",
            });
        }

        if self.rooms.iter().any(|r| r.is_duplicate(&room)) {
            log::debug!("Rejected duplicate {} room {}", room.room_type, room.id);
            return Err(HotelError::DuplicateRoom {
                id: room.id,
                room_type: room.room_type,
            });
        }

        log::info!("Added {} room {}", room.room_type, room.id);
        self.rooms.push(room);
        self.sort_rooms();
        self.save_rooms()?;

        Ok(())
    }

    /// Binary search for a customer by id, returning its position
    pub fn find_customer(&self, id: CustomerId) -> Option<usize> {
        self.customers.binary_search_by_key(&id, |c| c.id).ok()
    }

    /// Position of the first available room of the given type
    pub fn find_available_room(&self, room_type: &str) -> Option<usize> {
        self.rooms
            .iter()
            .position(|r| r.room_type == room_type && r.is_available())
    }

    /// Link an unassigned customer to the first available room of a type
    /// Returns the id of the assigned room
    pub fn assign_room(
        &mut self,
        customer_id: CustomerId,
        room_type: &str,
    ) -> Result<RoomId, HotelError> {
        let cidx = self
            .find_customer(customer_id)
            .filter(|&i| !self.customers[i].is_assigned())
            .ok_or(HotelError::InvalidOperation(customer_id))?;

        let ridx = self
            .find_available_room(room_type)
            .ok_or_else(|| HotelError::NoAvailableRoom(room_type.to_string()))?;

        let room = &mut self.rooms[ridx];
        room.status = RoomStatus::Occupied;
        let room_id = room.id;
        self.customers[cidx].room_id = Some(room_id);

        self.save_customers()?;
        self.save_rooms()?;

        log::info!(
            "Assigned {} room {} to customer {}",
            room_type,
            room_id,
            customer_id
        );
        Ok(room_id)
    }

    /// Unlink a customer from their room and free it
    /// Every room carrying that id is marked available
    /// Returns the id of the freed room
    pub fn checkout(&mut self, customer_id: CustomerId) -> Result<RoomId, HotelError> {
        let (cidx, room_id) = self
            .find_customer(customer_id)
            .and_then(|i| self.customers[i].room_id.map(|room_id| (i, room_id)))
            .ok_or(HotelError::InvalidOperation(customer_id))?;

        for room in self.rooms.iter_mut().filter(|r| r.id == room_id) {
            room.status = RoomStatus::Available;
        }
        self.customers[cidx].room_id = None;

        self.save_customers()?;
        self.save_rooms()?;

        log::info!("Customer {} checked out of room {}", customer_id, room_id);
        Ok(room_id)
    }

    /// Print all customers then all rooms in current order
    pub fn display_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n--- Customers ---")?;
        for customer in &self.customers {
            writeln!(out, "{}", customer)?;
        }

        writeln!(out, "\n--- Rooms ---")?;
        for room in &self.rooms {
            writeln!(out, "{}", room)?;
        }

        Ok(())
    }

    /// Count customers and rooms, with a per-type breakdown
    pub fn occupancy(&self) -> Occupancy {
        let mut by_type: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for room in &self.rooms {
            let counts = by_type.entry(room.room_type.as_str()).or_default();
            counts.1 += 1;
            if room.is_available() {
                counts.0 += 1;
            }
        }

        let available_rooms = self.rooms.iter().filter(|r| r.is_available()).count();

        Occupancy {
            customers: self.customers.len(),
            assigned_customers: self.customers.iter().filter(|c| c.is_assigned()).count(),
            rooms: self.rooms.len(),
            available_rooms,
            occupied_rooms: self.rooms.len() - available_rooms,
            by_type: by_type
                .into_iter()
                .map(|(room_type, (available, total))| TypeOccupancy {
                    room_type: room_type.to_string(),
                    available,
                    total,
                })
                .collect(),
        }
    }

    /// Customers sorted by id
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Rooms sorted by (type, id)
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.find_customer(id).map(|i| &self.customers[i])
    }
}

fn check_token(field: &'static str, value: &str) -> Result<(), HotelError> {
    if is_valid_token(value) {
        Ok(())
    } else {
        Err(HotelError::InvalidField {
            field,
            value: value.to_string(),
            reason: "must be a single word",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory store that shares its contents with the test
    struct MemoryStorage<T> {
        records: Rc<RefCell<Option<Vec<T>>>>,
        saves: Rc<RefCell<usize>>,
        path: PathBuf,
    }

    impl<T: Clone> RecordStorage<T> for MemoryStorage<T> {
        fn load(&self) -> Result<Option<Vec<T>>> {
            Ok(self.records.borrow().clone())
        }

        fn save(&self, records: &[T]) -> Result<()> {
            *self.records.borrow_mut() = Some(records.to_vec());
            *self.saves.borrow_mut() += 1;
            Ok(())
        }

        fn path(&self) -> &PathBuf {
            &self.path
        }
    }

    /// Store that loads fixed records and fails every save
    struct FailingStorage<T> {
        records: Vec<T>,
        path: PathBuf,
    }

    impl<T: Clone> RecordStorage<T> for FailingStorage<T> {
        fn load(&self) -> Result<Option<Vec<T>>> {
            Ok(Some(self.records.clone()))
        }

        fn save(&self, _records: &[T]) -> Result<()> {
            Err(anyhow::anyhow!("disk full writing {:?}", self.path))
        }

        fn path(&self) -> &PathBuf {
            &self.path
        }
    }

    struct Fixture {
        hotel: Hotel,
        customers: Rc<RefCell<Option<Vec<Customer>>>>,
        rooms: Rc<RefCell<Option<Vec<Room>>>>,
        saves: Rc<RefCell<usize>>,
    }

    fn fixture_with(customers: Option<Vec<Customer>>, rooms: Option<Vec<Room>>) -> Fixture {
        let customers = Rc::new(RefCell::new(customers));
        let rooms = Rc::new(RefCell::new(rooms));
        let saves = Rc::new(RefCell::new(0));

        let hotel = Hotel::new(
            Box::new(MemoryStorage {
                records: Rc::clone(&customers),
                saves: Rc::clone(&saves),
                path: PathBuf::from("customers.txt"),
            }),
            Box::new(MemoryStorage {
                records: Rc::clone(&rooms),
                saves: Rc::clone(&saves),
                path: PathBuf::from("rooms.txt"),
            }),
        );

        Fixture {
            hotel,
            customers,
            rooms,
            saves,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(None, None)
    }

    /// Every occupied room is held by exactly one customer and vice versa
    fn assert_assignments_consistent(hotel: &Hotel) {
        for room in hotel.rooms() {
            let holders = hotel
                .customers()
                .iter()
                .filter(|c| c.room_id == Some(room.id))
                .count();
            assert_eq!(
                room.status == RoomStatus::Occupied,
                holders == 1,
                "room {} status {:?} with {} holders",
                room.id,
                room.status,
                holders
            );
        }
    }

    #[test]
    fn test_load_missing_stores_reports_both() {
        let mut f = fixture();
        let report = f.hotel.load().unwrap();
        assert_eq!(report.customers, 0);
        assert_eq!(report.rooms, 0);
        assert_eq!(
            report.missing,
            vec![PathBuf::from("rooms.txt"), PathBuf::from("customers.txt")]
        );
    }

    #[test]
    fn test_load_sorts_collections() {
        let mut f = fixture_with(
            Some(vec![
                Customer::new(9, "Zed", 50, "9"),
                Customer::new(2, "Amy", 20, "2"),
                Customer::new(5, "Max", 35, "5"),
            ]),
            Some(vec![
                Room::new(301, "Suite", 200.0),
                Room::new(102, "Double", 80.0),
                Room::new(101, "Double", 80.0),
                Room::new(103, "Single", 50.0),
            ]),
        );

        let report = f.hotel.load().unwrap();
        assert!(report.missing.is_empty());

        let ids: Vec<_> = f.hotel.customers().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);

        let rooms: Vec<_> = f
            .hotel
            .rooms()
            .iter()
            .map(|r| (r.room_type.as_str(), r.id))
            .collect();
        assert_eq!(
            rooms,
            vec![("Double", 101), ("Double", 102), ("Single", 103), ("Suite", 301)]
        );
    }

    #[test]
    fn test_add_room_persists() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(101, "Single", 50.0)).unwrap();

        let stored = f.rooms.borrow().clone().unwrap();
        assert_eq!(stored, vec![Room::new(101, "Single", 50.0)]);
    }

    #[test]
    fn test_duplicate_customer_rejected() {
        let mut f = fixture();
        f.hotel
            .add_customer(Customer::new(1, "Alice", 30, "12345"))
            .unwrap();

        let err = f
            .hotel
            .add_customer(Customer::new(1, "Other", 22, "000"))
            .unwrap_err();
        assert!(matches!(err, HotelError::DuplicateCustomer(1)));
        assert_eq!(f.hotel.customers().len(), 1);
        assert_eq!(f.hotel.customers()[0].name, "Alice");
        assert_eq!(*f.saves.borrow(), 1);
    }

    #[test]
    fn test_customers_stay_sorted_and_unique() {
        let mut f = fixture();
        for id in [42, 7, 19, 7, 3, 42, 100] {
            let _ = f.hotel.add_customer(Customer::new(id, "Guest", 30, "1"));
        }

        let ids: Vec<_> = f.hotel.customers().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 7, 19, 42, 100]);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_room_duplicate_requires_same_type() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(101, "Single", 50.0)).unwrap();

        let err = f.hotel.add_room(Room::new(101, "Single", 60.0)).unwrap_err();
        assert!(matches!(err, HotelError::DuplicateRoom { id: 101, .. }));

        // Same id with another type is accepted
        f.hotel.add_room(Room::new(101, "Double", 70.0)).unwrap();
        assert_eq!(f.hotel.rooms().len(), 2);
        assert_eq!(f.hotel.rooms()[0].room_type, "Double");
    }

    #[test]
    fn test_failed_save_reports_storage_error_without_rollback() {
        let mut hotel = Hotel::new(
            Box::new(FailingStorage {
                records: vec![Customer::new(1, "Alice", 30, "12345")],
                path: PathBuf::from("customers.txt"),
            }),
            Box::new(FailingStorage {
                records: vec![Room::new(101, "Single", 50.0)],
                path: PathBuf::from("rooms.txt"),
            }),
        );
        hotel.load().unwrap();

        let err = hotel.assign_room(1, "Single").unwrap_err();
        assert!(matches!(err, HotelError::Storage(_)));
        assert!(err.to_string().contains("disk full"));

        // No transactions: the in-memory link stays in place
        assert_eq!(hotel.customer(1).unwrap().room_id, Some(101));
        assert_eq!(hotel.rooms()[0].status, RoomStatus::Occupied);
        assert!(matches!(hotel.save().unwrap_err(), HotelError::Storage(_)));
    }

    #[test]
    fn test_add_room_rejects_bad_prices() {
        let mut f = fixture();
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -5.0] {
            let err = f.hotel.add_room(Room::new(101, "Single", price)).unwrap_err();
            assert!(matches!(err, HotelError::InvalidField { field: "price", .. }));
        }
        assert!(f.hotel.rooms().is_empty());
        assert_eq!(*f.saves.borrow(), 0);

        f.hotel.add_room(Room::new(101, "Single", 0.0)).unwrap();
        assert_eq!(f.hotel.rooms().len(), 1);
    }

    #[test]
    fn test_add_rejects_multi_word_fields() {
        let mut f = fixture();
        let err = f
            .hotel
            .add_customer(Customer::new(1, "Alice Smith", 30, "12345"))
            .unwrap_err();
        assert!(matches!(err, HotelError::InvalidField { field: "name", .. }));

        let err = f.hotel.add_room(Room::new(1, "", 10.0)).unwrap_err();
        assert!(matches!(err, HotelError::InvalidField { field: "room type", .. }));

        assert!(f.hotel.customers().is_empty());
        assert!(f.hotel.rooms().is_empty());
        assert_eq!(*f.saves.borrow(), 0);
    }

    #[test]
    fn test_find_customer_binary_search() {
        let mut f = fixture();
        for id in [10, 20, 30, 40] {
            f.hotel.add_customer(Customer::new(id, "G", 1, "1")).unwrap();
        }
        assert_eq!(f.hotel.find_customer(10), Some(0));
        assert_eq!(f.hotel.find_customer(30), Some(2));
        assert_eq!(f.hotel.find_customer(40), Some(3));
        assert_eq!(f.hotel.find_customer(25), None);
    }

    #[test]
    fn test_find_customer_empty() {
        let f = fixture();
        assert_eq!(f.hotel.find_customer(1), None);
    }

    #[test]
    fn test_find_available_room_first_match() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(103, "Single", 40.0)).unwrap();
        f.hotel.add_room(Room::new(101, "Single", 90.0)).unwrap();
        f.hotel.add_room(Room::new(200, "Double", 70.0)).unwrap();

        let idx = f.hotel.find_available_room("Single").unwrap();
        assert_eq!(f.hotel.rooms()[idx].id, 101);
        assert_eq!(f.hotel.find_available_room("Suite"), None);
    }

    #[test]
    fn test_assign_and_checkout() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(101, "Single", 50.0)).unwrap();
        f.hotel
            .add_customer(Customer::new(1, "Alice", 30, "12345"))
            .unwrap();

        let room_id = f.hotel.assign_room(1, "Single").unwrap();
        assert_eq!(room_id, 101);
        assert_eq!(f.hotel.customer(1).unwrap().room_id, Some(101));
        assert_eq!(f.hotel.rooms()[0].status, RoomStatus::Occupied);
        assert_eq!(f.hotel.find_available_room("Single"), None);
        assert_eq!(
            f.customers.borrow().as_ref().unwrap()[0].room_id,
            Some(101)
        );
        assert_eq!(
            f.rooms.borrow().as_ref().unwrap()[0].status,
            RoomStatus::Occupied
        );
        assert_assignments_consistent(&f.hotel);

        let freed = f.hotel.checkout(1).unwrap();
        assert_eq!(freed, 101);
        assert_eq!(f.hotel.customer(1).unwrap().room_id, None);
        assert!(f.hotel.rooms()[0].is_available());
        assert_eq!(f.customers.borrow().as_ref().unwrap()[0].room_id, None);
        assert_assignments_consistent(&f.hotel);
    }

    #[test]
    fn test_assign_unknown_customer_changes_nothing() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(101, "Single", 50.0)).unwrap();
        f.hotel
            .add_customer(Customer::new(1, "Alice", 30, "12345"))
            .unwrap();
        let saves_before = *f.saves.borrow();

        let err = f.hotel.assign_room(99, "Single").unwrap_err();
        assert!(matches!(err, HotelError::InvalidOperation(99)));
        assert!(f.hotel.rooms()[0].is_available());
        assert_eq!(f.hotel.customer(1).unwrap().room_id, None);
        assert_eq!(*f.saves.borrow(), saves_before);
    }

    #[test]
    fn test_assign_already_assigned_customer_rejected() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(101, "Single", 50.0)).unwrap();
        f.hotel.add_room(Room::new(102, "Single", 50.0)).unwrap();
        f.hotel.add_customer(Customer::new(1, "Alice", 30, "1")).unwrap();

        f.hotel.assign_room(1, "Single").unwrap();
        let err = f.hotel.assign_room(1, "Single").unwrap_err();
        assert!(matches!(err, HotelError::InvalidOperation(1)));
        assert!(f.hotel.find_available_room("Single").is_some());
    }

    #[test]
    fn test_assign_without_free_room() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(101, "Single", 50.0)).unwrap();
        f.hotel.add_customer(Customer::new(1, "Alice", 30, "1")).unwrap();
        f.hotel.add_customer(Customer::new(2, "Bob", 31, "2")).unwrap();

        f.hotel.assign_room(1, "Single").unwrap();
        let err = f.hotel.assign_room(2, "Single").unwrap_err();
        assert!(matches!(err, HotelError::NoAvailableRoom(ref t) if t == "Single"));
        assert_eq!(f.hotel.customer(2).unwrap().room_id, None);

        let err = f.hotel.assign_room(2, "Suite").unwrap_err();
        assert!(matches!(err, HotelError::NoAvailableRoom(_)));
    }

    #[test]
    fn test_checkout_requires_assignment() {
        let mut f = fixture();
        f.hotel.add_customer(Customer::new(1, "Alice", 30, "1")).unwrap();

        assert!(matches!(
            f.hotel.checkout(1).unwrap_err(),
            HotelError::InvalidOperation(1)
        ));
        assert!(matches!(
            f.hotel.checkout(2).unwrap_err(),
            HotelError::InvalidOperation(2)
        ));
    }

    #[test]
    fn test_checkout_frees_every_room_with_that_id() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(101, "Single", 50.0)).unwrap();
        f.hotel.add_room(Room::new(101, "Double", 70.0)).unwrap();
        f.hotel.add_customer(Customer::new(1, "Alice", 30, "1")).unwrap();
        f.hotel.add_customer(Customer::new(2, "Bob", 31, "2")).unwrap();

        f.hotel.assign_room(1, "Single").unwrap();
        f.hotel.assign_room(2, "Double").unwrap();
        f.hotel.checkout(1).unwrap();

        assert!(f.hotel.rooms().iter().all(|r| r.is_available()));
    }

    #[test]
    fn test_assignment_exclusivity_over_sequence() {
        let mut f = fixture();
        for (id, room_type) in [(1, "Single"), (2, "Single"), (3, "Double")] {
            f.hotel.add_room(Room::new(id, room_type, 10.0)).unwrap();
        }
        for id in 1..=4 {
            f.hotel.add_customer(Customer::new(id, "G", 20, "0")).unwrap();
        }

        let steps: [(bool, CustomerId, &str); 9] = [
            (true, 1, "Single"),
            (true, 2, "Single"),
            (true, 3, "Single"),
            (true, 3, "Double"),
            (false, 1, ""),
            (true, 4, "Single"),
            (false, 2, ""),
            (false, 2, ""),
            (true, 1, "Single"),
        ];
        for (assign, customer, room_type) in steps {
            let _ = if assign {
                f.hotel.assign_room(customer, room_type)
            } else {
                f.hotel.checkout(customer)
            };
            assert_assignments_consistent(&f.hotel);
        }
    }

    #[test]
    fn test_display_all_lists_customers_then_rooms() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(101, "Single", 50.0)).unwrap();
        f.hotel
            .add_customer(Customer::new(1, "Alice", 30, "12345"))
            .unwrap();

        let mut out = Vec::new();
        f.hotel.display_all(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "\n--- Customers ---\n\
             ID: 1 | Name: Alice | Age: 30 | Phone: 12345 | Room: None\n\
             \n--- Rooms ---\n\
             Room ID: 101 | Type: Single | Price: 50 | Status: Available\n"
        );
    }

    #[test]
    fn test_occupancy_counts() {
        let mut f = fixture();
        f.hotel.add_room(Room::new(101, "Single", 50.0)).unwrap();
        f.hotel.add_room(Room::new(102, "Single", 50.0)).unwrap();
        f.hotel.add_room(Room::new(201, "Double", 80.0)).unwrap();
        f.hotel.add_customer(Customer::new(1, "Alice", 30, "1")).unwrap();
        f.hotel.add_customer(Customer::new(2, "Bob", 31, "2")).unwrap();
        f.hotel.assign_room(1, "Single").unwrap();

        let occupancy = f.hotel.occupancy();
        assert_eq!(occupancy.customers, 2);
        assert_eq!(occupancy.assigned_customers, 1);
        assert_eq!(occupancy.rooms, 3);
        assert_eq!(occupancy.available_rooms, 2);
        assert_eq!(occupancy.occupied_rooms, 1);
        assert_eq!(
            occupancy.by_type,
            vec![
                TypeOccupancy {
                    room_type: "Double".to_string(),
                    available: 1,
                    total: 1,
                },
                TypeOccupancy {
                    room_type: "Single".to_string(),
                    available: 1,
                    total: 2,
                },
            ]
        );
    }
}
