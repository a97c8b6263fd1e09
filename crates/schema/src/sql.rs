use crate::records::Schema;
use std::borrow::Cow;
use std::io::Write;
use tracing::warn;


pub trait SqlValue {
    fn write_sql(&self, out: &mut String);
}


impl SqlValue for u8 {
    fn write_sql(&self, out: &mut String) {
        out.push_str(&self.to_string())
    }
}


impl SqlValue for u32 {
    fn write_sql(&self, out: &mut String) {
        out.push_str(&self.to_string())
    }
}


impl SqlValue for u64 {
    fn write_sql(&self, out: &mut String) {
        out.push_str(&self.to_string())
    }
}


impl SqlValue for String {
    fn write_sql(&self, out: &mut String) {
        out.push('\'');
        out.push_str(&escape_str(self));
        out.push('\'');
    }
}


/// Doubles single quotes, the only escaping a standard SQL string literal needs.
pub fn escape_str(s: &str) -> Cow<'_, str> {
    if s.contains('\'') {
        Cow::Owned(s.replace('\'', "''"))
    } else {
        Cow::Borrowed(s)
    }
}


pub trait Row {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn write_values(&self, out: &mut String);
}


/// Renders a multi-row `INSERT` for `rows`.
///
/// Returns `None` for an empty table, a zero-row `VALUES` list is not valid SQL.
pub fn insert_statement<R: Row>(rows: &[R]) -> Option<String> {
    if rows.is_empty() {
        warn!(table = R::TABLE, "table has no rows, skipping its insert statement");
        return None
    }

    let mut sql = format!(
        "-- Populate the {} table with explicit IDs\nINSERT INTO {} ({}) VALUES\n",
        R::TABLE,
        R::TABLE,
        R::COLUMNS.join(", ")
    );

    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            sql.push_str(",\n");
        }
        sql.push_str("  (");
        row.write_values(&mut sql);
        sql.push(')');
    }

    sql.push_str(";\n");
    Some(sql)
}


impl Schema {
    /// `module`, `function` and `function_parameters` inserts separated by blank lines.
    pub fn to_sql(&self) -> String {
        [
            insert_statement(&self.modules),
            insert_statement(&self.functions),
            insert_statement(&self.parameters),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n")
    }

    pub fn write_sql<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        out.write_all(self.to_sql().as_bytes())?;
        out.flush()
    }
}
