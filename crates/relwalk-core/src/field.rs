//! Field descriptors.
//!
//! A descriptor names one scalar slot of a record type, the SQL column it
//! maps to, and the function that renders its value. Descriptor lists are
//! built once by the metadata layer and shared read-only; their order is the
//! column order of every fragment built from them.

use crate::error::{Error, PathErrorKind, Result, TypeError};
use crate::identifiers::quote_ident;
use crate::model::RecordType;
use crate::record::{Node, Record};
use crate::value::{Quote, Value};

/// Renders a value into a fragment buffer.
pub type AppendFn = fn(&Value, &mut Vec<u8>, Quote);

/// Metadata about one serializable record field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Rust field name
    pub name: &'static str,
    /// Unquoted database column name
    pub sql_name: &'static str,
    /// ANSI-quoted column name, ready to splice into SQL
    pub column: String,
    /// Slot index within the record type
    pub index: usize,
    append: AppendFn,
}

impl FieldDescriptor {
    /// Create a descriptor for the slot at `index`, rendered with
    /// [`Value::append_sql`].
    pub fn new(name: &'static str, sql_name: &'static str, index: usize) -> Self {
        Self {
            name,
            sql_name,
            column: quote_ident(sql_name),
            index,
            append: Value::append_sql,
        }
    }

    /// Build a descriptor from static record metadata.
    ///
    /// `name` may be the field name or the column name. Only scalar slots
    /// can be described.
    pub fn lookup(record_type: &'static RecordType, name: &str) -> Result<Self> {
        let index = record_type.index_of(name).ok_or_else(|| {
            Error::path(
                PathErrorKind::UnknownName,
                record_type.name,
                format!("no field named '{name}'"),
            )
        })?;
        let info = &record_type.fields[index];
        if info.kind.is_relation() {
            return Err(Error::Type(TypeError {
                expected: "scalar slot",
                actual: format!("{:?} slot", info.kind),
                column: Some(info.column.to_string()),
            }));
        }
        Ok(Self::new(info.name, info.column, index))
    }

    /// Describe several fields of one record type, preserving order.
    pub fn lookup_all(record_type: &'static RecordType, names: &[&str]) -> Result<Vec<Self>> {
        names
            .iter()
            .map(|name| Self::lookup(record_type, name))
            .collect()
    }

    /// Replace the value serializer.
    #[must_use]
    pub fn with_append(mut self, append: AppendFn) -> Self {
        self.append = append;
        self
    }

    /// Read this field's value from `record`. Nil pointers read as NULL.
    pub fn value(&self, record: &dyn Record) -> Result<Value> {
        let slot = record.slot(self.index).ok_or_else(|| {
            Error::path(
                PathErrorKind::NoSuchField,
                record.record_type().name,
                format!("no field at index {} for column '{}'", self.index, self.sql_name),
            )
        })?;
        match slot.node() {
            Node::Scalar(value) => Ok(value),
            Node::Nil => Ok(Value::Null),
            other => Err(Error::Type(TypeError {
                expected: "scalar value",
                actual: other.describe().to_string(),
                column: Some(self.sql_name.to_string()),
            })),
        }
    }

    /// Append this field's value from `record` to `buf`.
    pub fn append_value(&self, buf: &mut Vec<u8>, record: &dyn Record, quote: Quote) -> Result<()> {
        let value = self.value(record)?;
        (self.append)(&value, buf, quote);
        Ok(())
    }
}
