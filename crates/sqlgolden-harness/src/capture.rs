//! Capture hook over a `rusqlite` connection.

use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, params_from_iter};
use sqlgolden_core::format::TIMESTAMP_FORMAT;
use sqlgolden_core::{CaptureSink, QueryRecorder};
use sqlgolden_types::{RawCapture, SqlValue};

/// Connection wrapper that reports every statement to a [`CaptureSink`]
/// before running it.
#[derive(Debug)]
pub struct RecordingConnection<S: CaptureSink = QueryRecorder> {
    conn: Connection,
    sink: S,
}

impl<S: CaptureSink> RecordingConnection<S> {
    pub const fn new(conn: Connection, sink: S) -> Self {
        Self { conn, sink }
    }

    pub fn open_in_memory(sink: S) -> rusqlite::Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?, sink))
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one statement with `?` parameters bound to `values`.
    pub fn execute(&self, sql: &str, values: &[SqlValue]) -> rusqlite::Result<usize> {
        self.sink.on_capture(&RawCapture::new(sql, values));
        self.conn
            .execute(sql, params_from_iter(values.iter().map(to_sqlite_value)))
    }

    /// Run parameterless SQL, possibly several `;`-separated statements. The
    /// batch is captured as one entry.
    pub fn execute_batch(&self, sql: &str) -> rusqlite::Result<()> {
        self.sink.on_capture(&RawCapture::sql(sql));
        self.conn.execute_batch(sql)
    }

    /// Run a query and render every cell as text.
    pub fn query_strings(
        &self,
        sql: &str,
        values: &[SqlValue],
    ) -> rusqlite::Result<Vec<Vec<String>>> {
        self.sink.on_capture(&RawCapture::new(sql, values));
        let mut stmt = self.conn.prepare(sql)?;
        let columns = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(values.iter().map(to_sqlite_value)))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(columns);
            for i in 0..columns {
                cells.push(render_cell(row.get_ref(i)?));
            }
            out.push(cells);
        }
        Ok(out)
    }
}

/// Bind form of a captured value.
#[must_use]
pub fn to_sqlite_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null | SqlValue::Optional(None) => Value::Null,
        SqlValue::Optional(Some(inner)) => to_sqlite_value(inner),
        SqlValue::Text(s) | SqlValue::Other(s) => Value::Text(s.clone()),
        SqlValue::Bool(b) => Value::Integer(i64::from(*b)),
        SqlValue::Timestamp(ts) => Value::Text(ts.format(TIMESTAMP_FORMAT).to_string()),
        SqlValue::Bytes(bytes) => Value::Blob(bytes.clone()),
        SqlValue::Integer(n) => Value::Integer(*n),
        SqlValue::Unsigned(n) => {
            i64::try_from(*n).map_or_else(|_| Value::Text(n.to_string()), Value::Integer)
        }
        SqlValue::Real(x) => Value::Real(*x),
    }
}

fn render_cell(cell: ValueRef<'_>) -> String {
    match cell {
        ValueRef::Null => "NULL".to_owned(),
        ValueRef::Integer(n) => n.to_string(),
        ValueRef::Real(x) => x.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => bytes.iter().map(|b| format!("{b:02x}")).collect(),
    }
}
