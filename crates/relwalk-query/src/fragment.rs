//! Column lists, value rows and composite keys.
//!
//! Every function here appends to a caller-owned byte buffer and iterates
//! `fields` in order, so a column list and a row built from the same
//! descriptor slice always correspond position by position.

use std::collections::HashMap;

use relwalk_core::{FieldDescriptor, Quote, Record, Result, Value, append_ident};

use crate::config::Dialect;

/// Append `t.col1, t.col2, ...` to `buf`.
///
/// `table` is written as given (pass it already quoted, or empty for no
/// qualifier). `prefix` is prepended to each column name before quoting,
/// for aliased joins.
pub fn append_columns(
    buf: &mut Vec<u8>,
    dialect: Dialect,
    table: &str,
    prefix: &str,
    fields: &[FieldDescriptor],
) {
    let mut name = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.extend_from_slice(b", ");
        }
        if !table.is_empty() {
            buf.extend_from_slice(table.as_bytes());
            buf.push(b'.');
        }
        name.clear();
        name.push_str(prefix);
        name.push_str(field.sql_name);
        append_ident(buf, &name, dialect.quote_char());
    }
}

/// Append the descriptors' pre-quoted column names, comma separated.
pub fn append_quoted_columns(buf: &mut Vec<u8>, fields: &[FieldDescriptor]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.extend_from_slice(b", ");
        }
        buf.extend_from_slice(field.column.as_bytes());
    }
}

/// Append `alias.col1, alias.col2, ...` using the pre-quoted column names.
pub fn append_table_columns(buf: &mut Vec<u8>, alias: &str, fields: &[FieldDescriptor]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.extend_from_slice(b", ");
        }
        buf.extend_from_slice(alias.as_bytes());
        buf.push(b'.');
        buf.extend_from_slice(field.column.as_bytes());
    }
}

/// Append `(v1, v2, ...)` for one record, values rendered as SQL literals.
///
/// On error `buf` may hold a partial row; callers that need all-or-nothing
/// output truncate back to their starting length.
pub fn append_row(buf: &mut Vec<u8>, record: &dyn Record, fields: &[FieldDescriptor]) -> Result<()> {
    buf.push(b'(');
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.extend_from_slice(b", ");
        }
        field.append_value(buf, record, Quote::Sql)?;
    }
    buf.push(b')');
    Ok(())
}

/// Append the composite key of `record`: raw values joined by `,`.
///
/// The key identifies a record in memory and is never sent to the database.
/// Two records with equal values in `fields` produce identical keys.
pub fn append_model_id(buf: &mut Vec<u8>, record: &dyn Record, fields: &[FieldDescriptor]) -> Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        field.append_value(buf, record, Quote::Raw)?;
    }
    Ok(())
}

/// Append a composite key read from a column-keyed row map.
///
/// Each field is looked up as `prefix + sql_name`; a missing column
/// contributes an empty part. This matches the key [`append_model_id`]
/// produces for the same values, so scanned rows can be matched to records.
pub fn append_model_id_map(
    buf: &mut Vec<u8>,
    row: &HashMap<String, String>,
    prefix: &str,
    fields: &[FieldDescriptor],
) {
    let mut column = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        column.clear();
        column.push_str(prefix);
        column.push_str(field.sql_name);
        if let Some(text) = row.get(&column) {
            Value::Text(text.clone()).append_sql(buf, Quote::Raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{item, item_fields};
    use relwalk_core::{Error, FieldDescriptor};

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_append_columns_plain() {
        let mut buf = Vec::new();
        append_columns(&mut buf, Dialect::Postgres, "", "", &item_fields());
        assert_eq!(text(buf), r#""sku", "color", "qty""#);
    }

    #[test]
    fn test_append_columns_qualified_and_prefixed() {
        let mut buf = Vec::new();
        append_columns(&mut buf, Dialect::Postgres, "\"i\"", "item__", &item_fields()[..2]);
        assert_eq!(text(buf), r#""i"."item__sku", "i"."item__color""#);
    }

    #[test]
    fn test_append_columns_mysql_quotes() {
        let mut buf = Vec::new();
        append_columns(&mut buf, Dialect::Mysql, "", "", &item_fields()[..1]);
        assert_eq!(text(buf), "`sku`");
    }

    #[test]
    fn test_append_columns_empty() {
        let mut buf = b"SELECT ".to_vec();
        append_columns(&mut buf, Dialect::Postgres, "t", "", &[]);
        assert_eq!(text(buf), "SELECT ");
    }

    #[test]
    fn test_quoted_and_table_columns() {
        let fields = item_fields();
        let mut buf = Vec::new();
        append_quoted_columns(&mut buf, &fields[..2]);
        assert_eq!(text(buf), r#""sku", "color""#);

        let mut buf = Vec::new();
        append_table_columns(&mut buf, "it", &fields[..2]);
        assert_eq!(text(buf), r#"it."sku", it."color""#);
    }

    #[test]
    fn test_append_row() {
        let mut buf = Vec::new();
        append_row(&mut buf, &item("o'k", 3), &item_fields()).unwrap();
        assert_eq!(text(buf), "('o''k', 'red', 3)");
    }

    #[test]
    fn test_row_matches_column_order() {
        let fields = item_fields();
        let reversed: Vec<FieldDescriptor> = fields.iter().rev().cloned().collect();

        let mut cols = Vec::new();
        append_columns(&mut cols, Dialect::Postgres, "", "", &reversed);
        let mut row = Vec::new();
        append_row(&mut row, &item("a", 1), &reversed).unwrap();

        assert_eq!(text(cols), r#""qty", "color", "sku""#);
        assert_eq!(text(row), "(1, 'red', 'a')");
    }

    #[test]
    fn test_append_row_null_pointer_field() {
        let mut record = item("a", 1);
        record.color = None;
        let mut buf = Vec::new();
        append_row(&mut buf, &record, &item_fields()).unwrap();
        assert_eq!(text(buf), "('a', NULL, 1)");
    }

    #[test]
    fn test_append_row_bad_descriptor() {
        let ghost = FieldDescriptor::new("ghost", "ghost", 99);
        let mut buf = Vec::new();
        let err = append_row(&mut buf, &item("a", 1), &[ghost]).unwrap_err();
        assert!(matches!(err, Error::Path(_)));
    }

    #[test]
    fn test_model_id_is_raw_and_comma_joined() {
        let fields = item_fields();
        let mut buf = Vec::new();
        append_model_id(&mut buf, &item("a'b", 7), &fields).unwrap();
        assert_eq!(text(buf), "a'b,red,7");
    }

    #[test]
    fn test_model_id_equal_values_equal_keys() {
        let fields = item_fields();
        let mut a = Vec::new();
        let mut b = Vec::new();
        append_model_id(&mut a, &item("x", 1), &fields).unwrap();
        append_model_id(&mut b, &item("x", 1), &fields).unwrap();
        assert_eq!(a, b);

        let mut c = Vec::new();
        append_model_id(&mut c, &item("x", 2), &fields).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_model_id_map_matches_record_key() {
        let fields = item_fields();
        let mut from_record = Vec::new();
        append_model_id(&mut from_record, &item("x", 4), &fields).unwrap();

        let row: HashMap<String, String> = [
            ("it__sku", "x"),
            ("it__color", "red"),
            ("it__qty", "4"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let mut from_row = Vec::new();
        append_model_id_map(&mut from_row, &row, "it__", &fields);
        assert_eq!(from_row, from_record);
    }

    #[test]
    fn test_model_id_map_missing_column_is_empty_part() {
        let fields = item_fields();
        let row: HashMap<String, String> = [("sku".to_string(), "x".to_string())].into();
        let mut buf = Vec::new();
        append_model_id_map(&mut buf, &row, "", &fields);
        assert_eq!(text(buf), "x,,");
    }
}
