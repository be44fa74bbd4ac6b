use anyhow::Result;

use super::connection::{get_connection, DbPool};
use super::{ratings, setup};
use crate::rating::{Rating, RatingSource, UserId, UserRatingSource};

/// SQLite-backed rating history
#[derive(Clone)]
pub struct SqliteRatingStore {
    pool: DbPool,
}

impl SqliteRatingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn reset(&self) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        setup::reset_database(&mut conn)
    }

    /// Creates the schema unless it already exists
    pub fn ensure_schema(&self) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        if !setup::is_initialized(&mut conn)? {
            setup::reset_database(&mut conn)?;
        }
        Ok(())
    }

    pub fn insert_all(&self, ratings: &[Rating]) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        ratings::insert_ratings(&mut conn, ratings)
    }

    pub fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        ratings::count(&mut conn)
    }
}

impl RatingSource for SqliteRatingStore {
    fn stream_ratings(&self, sink: &mut dyn FnMut(Rating)) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        ratings::stream_all(&mut conn, sink)
    }
}

impl UserRatingSource for SqliteRatingStore {
    fn ratings_for_user(&self, user: UserId) -> Result<Vec<Rating>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = ratings::list_by_user(&mut conn, user)?;
        Ok(rows.into_iter().map(Rating::from).collect())
    }
}
