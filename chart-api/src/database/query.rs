//! Select statement building shared by all providers

/// Quote an identifier (table or column name)
///
/// Both SQLite and PostgreSQL use double quotes for identifiers. Embedded
/// double quotes are escaped by doubling them.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Build a `SELECT` over the given columns of a table
///
/// A non-blank filter is appended verbatim after `WHERE`.
pub fn build_select(table: &str, columns: &[String], filter: Option<&str>) -> String {
    let projection = if columns.is_empty() {
        "*".to_string()
    } else {
        columns
            .iter()
            .map(|column| quote_identifier(column))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut sql = format!("SELECT {} FROM {}", projection, quote_identifier(table));

    if let Some(filter) = filter.map(str::trim).filter(|filter| !filter.is_empty()) {
        sql.push_str(" WHERE ");
        sql.push_str(filter);
    }

    sql
}
