use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FavoriteCreate {
    pub item_id: i32,
}
