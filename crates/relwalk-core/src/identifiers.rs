//! SQL identifier quoting.
//!
//! Column lists are spliced verbatim into larger statements, so every
//! identifier that passes through the fragment builder is quoted here.

/// Quote a SQL identifier using ANSI double-quoting.
///
/// Embedded double-quotes are escaped by doubling them (`"` → `""`).
///
/// # Examples
///
/// ```
/// use relwalk_core::quote_ident;
///
/// assert_eq!(quote_ident("users"), "\"users\"");
/// assert_eq!(quote_ident("user\"name"), "\"user\"\"name\"");
/// ```
#[inline]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a SQL identifier using MySQL backtick quoting.
///
/// # Examples
///
/// ```
/// use relwalk_core::quote_ident_mysql;
///
/// assert_eq!(quote_ident_mysql("users"), "`users`");
/// assert_eq!(quote_ident_mysql("user`name"), "`user``name`");
/// ```
#[inline]
pub fn quote_ident_mysql(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Append a possibly qualified identifier to `buf`, quoting each part.
///
/// `a.b` becomes `"a"."b"`; a bare `*` part is left unquoted so that
/// `t.*` stays a valid projection. `quote` is the dialect's quote character.
///
/// ```
/// use relwalk_core::append_ident;
///
/// let mut buf = Vec::new();
/// append_ident(&mut buf, "orders.*", b'"');
/// assert_eq!(buf, b"\"orders\".*");
/// ```
pub fn append_ident(buf: &mut Vec<u8>, name: &str, quote: u8) {
    for (i, part) in name.split('.').enumerate() {
        if i > 0 {
            buf.push(b'.');
        }
        if part == "*" {
            buf.push(b'*');
            continue;
        }
        buf.push(quote);
        for &b in part.as_bytes() {
            if b == quote {
                buf.push(quote);
            }
            buf.push(b);
        }
        buf.push(quote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, quote: u8) -> String {
        let mut buf = Vec::new();
        append_ident(&mut buf, name, quote);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_quote_ident_simple() {
        assert_eq!(quote_ident("users"), "\"users\"");
    }

    #[test]
    fn test_quote_ident_empty() {
        assert_eq!(quote_ident(""), "\"\"");
    }

    #[test]
    fn test_quote_ident_sql_injection_attempt() {
        let quoted = quote_ident("users\"; DROP TABLE secrets; --");
        assert_eq!(quoted, "\"users\"\"; DROP TABLE secrets; --\"");
    }

    #[test]
    fn test_quote_ident_mysql_embedded_backtick() {
        assert_eq!(quote_ident_mysql("a`b`c"), "`a``b``c`");
    }

    #[test]
    fn test_append_ident_plain() {
        assert_eq!(ident("sku", b'"'), "\"sku\"");
    }

    #[test]
    fn test_append_ident_qualified() {
        assert_eq!(ident("items.sku", b'"'), "\"items\".\"sku\"");
        assert_eq!(ident("items.sku", b'`'), "`items`.`sku`");
    }

    #[test]
    fn test_append_ident_star() {
        assert_eq!(ident("items.*", b'"'), "\"items\".*");
        assert_eq!(ident("*", b'"'), "*");
    }

    #[test]
    fn test_append_ident_escapes_quote_char() {
        assert_eq!(ident("we\"ird", b'"'), "\"we\"\"ird\"");
        assert_eq!(ident("we\"ird", b'`'), "`we\"ird`");
    }
}
