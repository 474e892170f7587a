//! Query executor abstraction
//!
//! Repositories issue positional-parameter statements through a
//! [`QueryExecutor`] and receive the matched rows plus the affected row count.
//! [`PgExecutor`] runs them against a Postgres pool.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{postgres::PgRow, Column, Pool, Postgres, Row as _, TypeInfo};

/// A statement parameter or a decoded column value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i32),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
}

/// One result row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: BTreeMap<String, SqlValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for assembling rows by hand
    pub fn with(mut self, column: &str, value: SqlValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: SqlValue) {
        self.columns.insert(column.to_string(), value);
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns.get(column)
    }

    pub fn int(&self, column: &str) -> Option<i32> {
        match self.get(column)? {
            SqlValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        match self.get(column)? {
            SqlValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        match self.get(column)? {
            SqlValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn time(&self, column: &str) -> Option<NaiveTime> {
        match self.get(column)? {
            SqlValue::Time(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self, column: &str) -> bool {
        matches!(self.get(column), Some(SqlValue::Null))
    }
}

/// Outcome of one statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub row_count: u64,
}

impl QueryResult {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }

    pub fn affected(row_count: u64) -> Self {
        Self {
            rows: Vec::new(),
            row_count,
        }
    }
}

/// Executes one parameterized statement at a time
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<QueryResult, sqlx::Error>;
}

/// [`QueryExecutor`] backed by a Postgres connection pool
#[derive(Clone)]
pub struct PgExecutor {
    pool: Pool<Postgres>,
}

impl PgExecutor {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<QueryResult, sqlx::Error> {
        tracing::debug!(sql = sql.trim(), params = params.len(), "executing statement");

        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlValue::Null => query.bind(None::<String>),
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
                SqlValue::Date(v) => query.bind(*v),
                SqlValue::Time(v) => query.bind(*v),
            };
        }

        if returns_rows(sql) {
            let rows = query.fetch_all(&self.pool).await?;
            let rows = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
            Ok(QueryResult::from_rows(rows))
        } else {
            let done = query.execute(&self.pool).await?;
            Ok(QueryResult::affected(done.rows_affected()))
        }
    }
}

/// Whether a statement hands rows back: queries and anything with `RETURNING`
fn returns_rows(sql: &str) -> bool {
    let sql = sql.trim_start().to_ascii_uppercase();
    sql.starts_with("SELECT") || sql.starts_with("WITH") || sql.contains("RETURNING")
}

fn decode_row(row: &PgRow) -> Result<Row, sqlx::Error> {
    let mut out = Row::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let value = match column.type_info().name() {
            "INT2" => row.try_get::<Option<i16>, _>(idx)?.map(|v| SqlValue::Int(v.into())),
            "INT4" => row.try_get::<Option<i32>, _>(idx)?.map(SqlValue::Int),
            "INT8" => match row.try_get::<Option<i64>, _>(idx)? {
                Some(v) => Some(SqlValue::Int(i32::try_from(v).map_err(|e| {
                    sqlx::Error::ColumnDecode {
                        index: column.name().to_string(),
                        source: Box::new(e),
                    }
                })?)),
                None => None,
            },
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                row.try_get::<Option<String>, _>(idx)?.map(SqlValue::Text)
            }
            "DATE" => row.try_get::<Option<NaiveDate>, _>(idx)?.map(SqlValue::Date),
            "TIME" => row.try_get::<Option<NaiveTime>, _>(idx)?.map(SqlValue::Time),
            other => {
                return Err(sqlx::Error::ColumnDecode {
                    index: column.name().to_string(),
                    source: format!("unsupported column type {}", other).into(),
                })
            }
        };
        out.insert(column.name(), value.unwrap_or(SqlValue::Null));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_rows() {
        assert!(returns_rows("SELECT 1"));
        assert!(returns_rows("\n    select id from visitors"));
        assert!(returns_rows(
            "UPDATE visitors SET visitor_age = $1 WHERE id = $2 RETURNING *"
        ));
        assert!(returns_rows(
            "INSERT INTO visitors (visitor_full_name) VALUES ($1) RETURNING *"
        ));
        assert!(!returns_rows("DELETE FROM visitors WHERE id = $1"));
        assert!(!returns_rows("DELETE FROM visitors"));
        assert!(!returns_rows("CREATE TABLE IF NOT EXISTS visitors (id SERIAL PRIMARY KEY)"));
    }

    #[test]
    fn test_row_accessors() {
        let row = Row::new()
            .with("id", SqlValue::Int(3))
            .with("visitor_full_name", SqlValue::Text("John Doe".into()))
            .with("comments", SqlValue::Null);

        assert_eq!(row.int("id"), Some(3));
        assert_eq!(row.text("visitor_full_name"), Some("John Doe"));
        assert_eq!(row.text("id"), None);
        assert_eq!(row.int("missing"), None);
        assert!(row.is_null("comments"));
        assert!(!row.is_null("id"));
    }

    #[test]
    fn test_query_result_counts() {
        let result = QueryResult::from_rows(vec![Row::new(), Row::new()]);
        assert_eq!(result.row_count, 2);
        assert_eq!(QueryResult::affected(5).rows.len(), 0);
    }
}
