use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::DbRating;
use crate::rating::{Rating, UserId};

const SELECT_COLUMNS: &str = "SELECT id, user_id, item_id, value FROM ratings";

/// Inserts all ratings in a single transaction, returning the number written
pub fn insert_ratings(conn: &mut DbConn, ratings: &[Rating]) -> Result<usize> {
    let tx = conn.transaction().context("Failed to open transaction")?;
    {
        let mut stmt = tx
            .prepare("INSERT INTO ratings (user_id, item_id, value) VALUES (?1, ?2, ?3)")
            .context("Failed to prepare rating insert")?;
        for rating in ratings {
            stmt.execute(params![rating.user, rating.item, rating.value])
                .with_context(|| format!("Failed to insert rating {:?}", rating))?;
        }
    }
    tx.commit().context("Failed to commit ratings")?;
    Ok(ratings.len())
}

fn parse_db_rating_row(row: &rusqlite::Row) -> rusqlite::Result<DbRating> {
    Ok(DbRating {
        id: row.get(0)?,
        user_id: row.get(1)?,
        item_id: row.get(2)?,
        value: row.get(3)?,
    })
}

/// Visits every rating in insertion order without materialising the table
pub fn stream_all(conn: &mut DbConn, sink: &mut dyn FnMut(Rating)) -> Result<()> {
    let sql = format!("{} ORDER BY id", SELECT_COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], parse_db_rating_row)?;
    for row in rows {
        let row = row.context("Failed to read rating row")?;
        sink(row.into());
    }
    Ok(())
}

pub fn list_by_user(conn: &mut DbConn, user_id: UserId) -> Result<Vec<DbRating>> {
    let sql = format!("{} WHERE user_id = ?1 ORDER BY id", SELECT_COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![user_id], parse_db_rating_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM ratings", [], |row| row.get(0))
        .context("Failed to count ratings")
}
