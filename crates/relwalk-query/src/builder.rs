//! Fragment builder bound to one descriptor list.

use relwalk_core::{FieldDescriptor, Record, RelationPath, Result, Slot};

use crate::config::{Dialect, FragmentConfig};
use crate::dedup::append_child_values;
use crate::fragment::{append_columns, append_model_id, append_row};

/// Builds column lists, rows and keys for one record type.
///
/// All fragments from the same builder share the descriptor order, so the
/// n-th column of [`build_column_list`](Self::build_column_list) matches
/// the n-th value of every row.
///
/// ```ignore
/// let fields = FieldDescriptor::lookup_all(Item::static_type(), &["sku", "qty"])?;
/// let builder = FragmentBuilder::new(&fields);
/// let cols = builder.build_column_list("");
/// let rows = builder.build_values(&orders, &RelationPath::parse(Order::static_type(), "items")?)?;
/// ```
#[derive(Debug, Clone)]
pub struct FragmentBuilder<'f> {
    fields: &'f [FieldDescriptor],
    config: FragmentConfig,
}

impl<'f> FragmentBuilder<'f> {
    /// Create a builder with the default configuration.
    pub fn new(fields: &'f [FieldDescriptor]) -> Self {
        Self {
            fields,
            config: FragmentConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: FragmentConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    #[must_use]
    pub fn dedup(mut self, dedup: bool) -> Self {
        self.config.dedup = dedup;
        self
    }

    pub fn config(&self) -> &FragmentConfig {
        &self.config
    }

    pub fn fields(&self) -> &'f [FieldDescriptor] {
        self.fields
    }

    /// Column list qualified by `table` (empty for none).
    pub fn build_column_list(&self, table: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        self.append_column_list(&mut buf, table, "");
        buf
    }

    pub fn append_column_list(&self, buf: &mut Vec<u8>, table: &str, prefix: &str) {
        append_columns(buf, self.config.dialect, table, prefix, self.fields);
    }

    /// One `(...)` row for `record`.
    pub fn build_row(&self, record: &dyn Record) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        append_row(&mut buf, record, self.fields)?;
        Ok(buf)
    }

    /// Composite key of `record` over this builder's fields.
    pub fn build_composite_key(&self, record: &dyn Record) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        append_model_id(&mut buf, record, self.fields)?;
        Ok(buf)
    }

    /// Rows for every record reachable from `root` along `path`.
    ///
    /// Empty when nothing is reachable.
    pub fn build_values(&self, root: &dyn Slot, path: &RelationPath) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.append_values(&mut buf, root, path)?;
        Ok(buf)
    }

    pub fn append_values(&self, buf: &mut Vec<u8>, root: &dyn Slot, path: &RelationPath) -> Result<()> {
        append_child_values(buf, root, path, self.fields, &self.config)
    }
}
