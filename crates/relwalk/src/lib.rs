//! relwalk - object-graph traversal and SQL fragment generation.
//!
//! relwalk is the layer an ORM sits on when it needs to turn an in-memory
//! graph of records into SQL text and back:
//!
//! - Walk every record reachable along a relation path, through pointers
//!   and collections, skipping nil branches
//! - Render column lists, `(...)` value rows and composite keys in a
//!   fixed, shared column order
//! - Build multi-row value lists with duplicate rows removed
//! - Group relation slots by parent key to attach fetched children
//!
//! # Quick Start
//!
//! ```ignore
//! use relwalk::prelude::*;
//!
//! #[derive(Record, Default)]
//! struct Item {
//!     sku: String,
//!     qty: i32,
//! }
//!
//! #[derive(Record, Default)]
//! struct Order {
//!     id: i64,
//!     items: Option<Vec<Item>>,
//! }
//!
//! let fields = FieldDescriptor::lookup_all(Item::static_type(), &["sku", "qty"])?;
//! let path = RelationPath::parse(Order::static_type(), "items")?;
//! let builder = FragmentBuilder::new(&fields);
//!
//! let columns = builder.build_column_list("");
//! let rows = builder.build_values(&orders, &path)?;
//! ```
//!
//! Generated code refers to `relwalk_core` directly, so crates using
//! `#[derive(Record)]` depend on `relwalk-core` as well.

pub use relwalk_core::{
    AppendFn, Collection, Error, FieldDescriptor, Node, NodeMut, PathError, PathErrorKind, Quote,
    Record, RecordType, RelationPath, Result, Slot, SlotInfo, SlotKind, Step, TypeError, Typed,
    Value, append_ident, quote_ident, quote_ident_mysql, record_slot,
};

pub use relwalk_macros::Record;

pub use relwalk_query::{
    Dialect, FragmentBuilder, FragmentConfig, KeyedSlots, ROW_SEPARATOR, RowDeduper,
    append_child_values, append_columns, append_model_id, append_model_id_map,
    append_quoted_columns, append_row, append_table_columns, element_type, field_by_path_mut,
    group_by_parent_key, group_relation, prepare, resolve, walk, walk_mut,
};

/// Everything needed to declare records and build fragments.
pub mod prelude {
    pub use crate::{
        Dialect, Error, FieldDescriptor, FragmentBuilder, FragmentConfig, Node, NodeMut, Record,
        RelationPath, Result, Slot, Step, Typed, Value,
    };
}
