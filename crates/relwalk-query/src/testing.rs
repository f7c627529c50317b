//! Hand-written record fixtures shared by the unit tests.

use std::any::Any;

use relwalk_core::{FieldDescriptor, Record, RecordType, Slot, SlotInfo, SlotKind, Typed};

macro_rules! fixture_record {
    ($ty:ident, $meta:ident, [$($idx:literal => $field:ident),* $(,)?]) => {
        impl Record for $ty {
            fn record_type(&self) -> &'static RecordType {
                &$meta
            }

            fn slot(&self, index: usize) -> Option<&dyn Slot> {
                match index {
                    $($idx => Some(&self.$field as &dyn Slot),)*
                    _ => None,
                }
            }

            fn slot_mut(&mut self, index: usize) -> Option<&mut dyn Slot> {
                match index {
                    $($idx => Some(&mut self.$field as &mut dyn Slot),)*
                    _ => None,
                }
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        impl Typed for $ty {
            fn static_type() -> &'static RecordType {
                &$meta
            }
        }

        relwalk_core::record_slot!($ty);
    };
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub text: String,
}

static NOTE: RecordType = RecordType::new("Note", &[SlotInfo::new("text", SlotKind::Scalar)]);

fixture_record!(Note, NOTE, [0 => text]);

impl Note {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub sku: String,
    pub color: Option<String>,
    pub qty: i32,
    pub notes: Vec<Note>,
}

static ITEM: RecordType = RecordType::new(
    "Item",
    &[
        SlotInfo::new("sku", SlotKind::Scalar),
        SlotInfo::new("color", SlotKind::Scalar).nullable(true),
        SlotInfo::new("qty", SlotKind::Scalar),
        SlotInfo::new("notes", SlotKind::Collection).target(Note::static_type),
    ],
);

fixture_record!(Item, ITEM, [0 => sku, 1 => color, 2 => qty, 3 => notes]);

impl Item {
    pub const NOTES: usize = 3;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub city: String,
}

static ADDRESS: RecordType =
    RecordType::new("Address", &[SlotInfo::new("city", SlotKind::Scalar)]);

fixture_record!(Address, ADDRESS, [0 => city]);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub name: String,
    pub address: Option<Box<Address>>,
}

static CUSTOMER: RecordType = RecordType::new(
    "Customer",
    &[
        SlotInfo::new("name", SlotKind::Scalar),
        SlotInfo::new("address", SlotKind::Record)
            .nullable(true)
            .target(Address::static_type),
    ],
);

fixture_record!(Customer, CUSTOMER, [0 => name, 1 => address]);

impl Customer {
    pub const ADDRESS: usize = 1;

    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            address: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shipment {
    pub carrier: String,
}

static SHIPMENT: RecordType =
    RecordType::new("Shipment", &[SlotInfo::new("carrier", SlotKind::Scalar)]);

fixture_record!(Shipment, SHIPMENT, [0 => carrier]);

impl Shipment {
    pub fn new(carrier: &str) -> Self {
        Self {
            carrier: carrier.to_string(),
        }
    }
}

/// A distinct type that reports the same record type name as [`Shipment`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchivedShipment {
    pub code: i32,
}

static ARCHIVED_SHIPMENT: RecordType =
    RecordType::new("Shipment", &[SlotInfo::new("code", SlotKind::Scalar)]);

fixture_record!(ArchivedShipment, ARCHIVED_SHIPMENT, [0 => code]);

#[derive(Debug, Default)]
pub struct Board {
    pub pins: Vec<Option<Box<Note>>>,
    pub grid: Vec<Vec<Note>>,
}

static BOARD: RecordType = RecordType::new(
    "Board",
    &[
        SlotInfo::new("pins", SlotKind::Collection).target(Note::static_type),
        SlotInfo::new("grid", SlotKind::Collection),
    ],
);

fixture_record!(Board, BOARD, [0 => pins, 1 => grid]);

impl Board {
    pub const PINS: usize = 0;
    pub const GRID: usize = 1;
}

#[derive(Default)]
pub struct Order {
    pub id: i64,
    pub items: Option<Vec<Item>>,
    pub customer: Option<Box<Customer>>,
    pub shipments: Vec<Box<dyn Record>>,
}

static ORDER: RecordType = RecordType::new(
    "Order",
    &[
        SlotInfo::new("id", SlotKind::Scalar),
        SlotInfo::new("items", SlotKind::Collection)
            .nullable(true)
            .target(Item::static_type),
        SlotInfo::new("customer", SlotKind::Record)
            .nullable(true)
            .target(Customer::static_type),
        SlotInfo::new("shipments", SlotKind::Interface),
    ],
);

fixture_record!(Order, ORDER, [0 => id, 1 => items, 2 => customer, 3 => shipments]);

impl Order {
    pub const ID: usize = 0;
    pub const ITEMS: usize = 1;
    pub const CUSTOMER: usize = 2;
    pub const SHIPMENTS: usize = 3;
}

/// An item with color `red`.
pub fn item(sku: &str, qty: i32) -> Item {
    Item {
        sku: sku.to_string(),
        color: Some("red".to_string()),
        qty,
        notes: Vec::new(),
    }
}

pub fn order(id: i64, items: &[(&str, i32)]) -> Order {
    Order {
        id,
        items: Some(items.iter().map(|&(sku, qty)| item(sku, qty)).collect()),
        ..Order::default()
    }
}

pub fn orders() -> Vec<Order> {
    vec![
        order(1, &[("a", 1), ("b", 2)]),
        order(2, &[]),
        order(3, &[("c", 3)]),
    ]
}

/// `sku`, `color`, `qty`.
pub fn item_fields() -> Vec<FieldDescriptor> {
    FieldDescriptor::lookup_all(&ITEM, &["sku", "color", "qty"]).unwrap_or_default()
}
