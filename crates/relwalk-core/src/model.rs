//! Static record metadata.
//!
//! Every record type describes its field slots once, in an immutable
//! `RecordType` static. Slots are addressed by their zero-based declaration
//! index; relation paths and field descriptors store those indices. The
//! metadata is typically generated by `#[derive(Record)]` from
//! `relwalk-macros`.

use crate::record::Record;

/// What a field slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotKind {
    /// A column value.
    #[default]
    Scalar,
    /// A single related record (one-to-one / many-to-one).
    Record,
    /// A collection of related records (one-to-many / many-to-many).
    Collection,
    /// `dyn Record` elements, boxed singly or in a collection, whose
    /// concrete type is only known at runtime.
    Interface,
}

impl SlotKind {
    /// Whether a relation path may continue through this slot.
    pub const fn is_relation(self) -> bool {
        !matches!(self, SlotKind::Scalar)
    }
}

/// Metadata about one field slot of a record type.
#[derive(Debug, Clone, Copy)]
pub struct SlotInfo {
    /// Rust field name
    pub name: &'static str,
    /// Database column name (may differ from field name)
    pub column: &'static str,
    /// What the slot holds
    pub kind: SlotKind,
    /// Whether the slot is an `Option` (may be nil)
    pub nullable: bool,
    /// Record type reached through this slot, for record and collection slots.
    ///
    /// A function pointer keeps the metadata `const` while still allowing
    /// self-referential and mutually recursive record types.
    pub target: Option<fn() -> &'static RecordType>,
}

impl SlotInfo {
    /// Create slot metadata with the column name defaulting to the field name.
    pub const fn new(name: &'static str, kind: SlotKind) -> Self {
        Self {
            name,
            column: name,
            kind,
            nullable: false,
            target: None,
        }
    }

    /// Set the database column name.
    pub const fn column(mut self, name: &'static str) -> Self {
        self.column = name;
        self
    }

    /// Set nullable flag.
    pub const fn nullable(mut self, value: bool) -> Self {
        self.nullable = value;
        self
    }

    /// Set the record type reached through this slot.
    pub const fn target(mut self, f: fn() -> &'static RecordType) -> Self {
        self.target = Some(f);
        self
    }

    /// The record type reached through this slot, if statically known.
    pub fn target_type(&self) -> Option<&'static RecordType> {
        self.target.map(|f| f())
    }
}

/// Metadata about a record type: its name and ordered field slots.
#[derive(Debug)]
pub struct RecordType {
    /// Type name (used in diagnostics and interface-collection checks)
    pub name: &'static str,
    /// Field slots in declaration order
    pub fields: &'static [SlotInfo],
}

impl RecordType {
    pub const fn new(name: &'static str, fields: &'static [SlotInfo]) -> Self {
        Self { name, fields }
    }

    /// Slot metadata by index.
    pub fn field(&self, index: usize) -> Option<&'static SlotInfo> {
        self.fields.get(index)
    }

    /// Index of the slot whose field name or column name is `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .or_else(|| self.fields.iter().position(|f| f.column == name))
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        // Statics may be duplicated across codegen units, so compare by name.
        self.name == other.name
    }
}

impl Eq for RecordType {}

/// A concrete record type with statically known metadata.
///
/// `Default` supplies the zero value used when a nil pointer to this type is
/// materialized on demand.
pub trait Typed: Record + Default {
    fn static_type() -> &'static RecordType;
}

#[cfg(test)]
mod tests {
    use super::*;

    static LEAF: RecordType = RecordType::new(
        "Leaf",
        &[
            SlotInfo::new("id", SlotKind::Scalar),
            SlotInfo::new("label", SlotKind::Scalar).column("leaf_label"),
        ],
    );

    fn leaf() -> &'static RecordType {
        &LEAF
    }

    static BRANCH: RecordType = RecordType::new(
        "Branch",
        &[
            SlotInfo::new("id", SlotKind::Scalar),
            SlotInfo::new("leaves", SlotKind::Collection).target(leaf),
            SlotInfo::new("best", SlotKind::Record)
                .nullable(true)
                .target(leaf),
        ],
    );

    #[test]
    fn test_index_of_by_field_or_column() {
        assert_eq!(LEAF.index_of("id"), Some(0));
        assert_eq!(LEAF.index_of("label"), Some(1));
        assert_eq!(LEAF.index_of("leaf_label"), Some(1));
        assert_eq!(LEAF.index_of("missing"), None);
    }

    #[test]
    fn test_target_type() {
        let leaves = BRANCH.field(1).unwrap();
        assert_eq!(leaves.target_type().map(|t| t.name), Some("Leaf"));
        assert!(BRANCH.field(0).unwrap().target_type().is_none());
        assert!(BRANCH.field(2).unwrap().nullable);
    }

    #[test]
    fn test_slot_kind_is_relation() {
        assert!(!SlotKind::Scalar.is_relation());
        assert!(SlotKind::Record.is_relation());
        assert!(SlotKind::Collection.is_relation());
        assert!(SlotKind::Interface.is_relation());
    }

    #[test]
    fn test_record_type_eq_by_name() {
        static OTHER_LEAF: RecordType = RecordType::new("Leaf", &[]);
        assert_eq!(LEAF, OTHER_LEAF);
        assert_ne!(LEAF, BRANCH);
    }
}
