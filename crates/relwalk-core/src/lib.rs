//! Core types and traits for relwalk.
//!
//! This crate provides the foundational abstractions for walking object
//! graphs and rendering them into SQL fragments:
//!
//! - `Record` / `Slot` / `Collection`: the reflection contract each record
//!   type implements (usually via `#[derive(Record)]`)
//! - `RecordType` / `SlotInfo`: immutable per-type metadata
//! - `FieldDescriptor`: one serializable column of a record type
//! - `RelationPath`: the field-access steps from an ancestor to a descendant
//! - `Value`: dynamically typed SQL values

pub mod error;
pub mod field;
pub mod identifiers;
pub mod model;
pub mod path;
pub mod record;
pub mod value;

pub use error::{Error, PathError, PathErrorKind, Result, TypeError};
pub use field::{AppendFn, FieldDescriptor};
pub use identifiers::{append_ident, quote_ident, quote_ident_mysql};
pub use model::{RecordType, SlotInfo, SlotKind, Typed};
pub use path::{RelationPath, Step};
pub use record::{Collection, Node, NodeMut, Record, Slot};
pub use value::{Quote, Value};
