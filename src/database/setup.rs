use anyhow::{Context, Result};
use rusqlite::OptionalExtension;

use super::connection::DbConn;

pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::info!("Database schema reset successfully");
    Ok(())
}

/// Whether the ratings table exists yet
pub fn is_initialized(conn: &mut DbConn) -> Result<bool> {
    let sql = "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'ratings'";

    let found: Option<String> = conn
        .query_row(sql, [], |row| row.get(0))
        .optional()
        .context("Failed to inspect database schema")?;
    Ok(found.is_some())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
