//! Database provider trait
//!
//! This trait defines the interface that all database implementations must provide.

use crate::database::query::build_select;
use crate::schema::QueryRow;
use async_trait::async_trait;
use thiserror::Error;

/// Database provider trait for table introspection and filtered selects
///
/// Implementations of this trait provide database-specific logic for
/// discovering tables and columns and for turning result rows into JSON.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + 'static {
    /// List all user table names visible to the connection, sorted by name
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError>;

    /// List the column names of a table in declaration order
    ///
    /// # Arguments
    ///
    /// * `table` - Name of the table
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::TableNotFound`] if the table does not exist
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, DatabaseError>;

    /// Execute a statement and materialize every returned row
    ///
    /// # Arguments
    ///
    /// * `sql` - SQL statement to execute
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<QueryRow>, DatabaseError>;

    /// Close the underlying pool, waiting for checked-out connections to return
    async fn close(&self);

    /// Select rows from a table, optionally projected and filtered
    ///
    /// Columns are discovered at runtime. With no column list every column is
    /// selected; otherwise each requested column must exist and the result
    /// keeps the requested order. The filter is appended verbatim as a
    /// `WHERE` clause.
    ///
    /// # Security Warning
    ///
    /// The filter is raw SQL text and is not validated in any way.
    ///
    /// # Arguments
    ///
    /// * `table` - Name of the table
    /// * `columns` - Optional column subset
    /// * `filter` - Optional raw filter expression
    async fn run_query(
        &self,
        table: &str,
        columns: Option<&[String]>,
        filter: Option<&str>,
    ) -> Result<Vec<QueryRow>, DatabaseError> {
        let available = self.list_columns(table).await?;

        let projection: Vec<String> = match columns {
            Some(requested) if !requested.is_empty() => {
                let missing: Vec<&str> = requested
                    .iter()
                    .filter(|column| !available.contains(column))
                    .map(String::as_str)
                    .collect();

                if !missing.is_empty() {
                    return Err(DatabaseError::InvalidColumn(missing.join(", ")));
                }

                requested.to_vec()
            }
            _ => available,
        };

        let sql = build_select(table, &projection, filter);
        tracing::debug!(table, sql = %sql, "running select");

        self.fetch_rows(&sql).await
    }
}

/// Database error type
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Generic database error
    #[error("Database error: {0}")]
    Query(String),

    /// Table not found
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// One or more requested columns do not exist
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// Connection string was empty
    #[error("database_url required")]
    EmptyUrl,

    /// Connection string names a backend this build cannot talk to
    #[error("Unsupported database url: {0}")]
    UnsupportedUrl(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::Query(error.to_string())
    }
}
