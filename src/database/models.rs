use crate::rating::{ItemId, Rating, RatingValue, UserId};

/// Row of the `ratings` table
#[derive(Debug, Clone)]
pub struct DbRating {
    pub id: i64,
    pub user_id: UserId,
    pub item_id: ItemId,
    pub value: Option<RatingValue>,
}

impl From<DbRating> for Rating {
    fn from(row: DbRating) -> Self {
        Rating {
            user: row.user_id,
            item: row.item_id,
            value: row.value,
        }
    }
}
