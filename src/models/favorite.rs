use super::item::Item;
use super::user::User;
use crate::schema::*;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, Queryable, Identifiable, Associations)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Item))]
#[diesel(table_name = favorites)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub item_id: i32,
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[diesel(table_name = favorites)]
pub struct NewFavorite {
    pub user_id: i32,
    pub item_id: i32,
}

#[derive(Debug, Error)]
pub enum FavoriteTableError {
    #[error("Item already in favorites")]
    AlreadyFavorited,
    #[error("Item not in favorites")]
    NotFavorited,
    #[error("Item not found")]
    ItemNotFound,
    #[error("Database error")]
    DatabaseError,
}

impl Favorite {
    /// Insert-or-conflict; the (user_id, item_id) unique constraint is the
    /// sole duplicate check, so concurrent adds cannot race it.
    pub fn add(
        conn: &mut SqliteConnection,
        caller_id: i32,
        fav_item_id: i32,
    ) -> Result<Favorite, FavoriteTableError> {
        use crate::schema::favorites::dsl::*;

        if Item::get(conn, fav_item_id).is_none() {
            return Err(FavoriteTableError::ItemNotFound);
        }

        let new_favorite = NewFavorite {
            user_id: caller_id,
            item_id: fav_item_id,
        };

        match diesel::insert_into(favorites)
            .values(&new_favorite)
            .get_result(conn)
        {
            Ok(favorite) => Ok(favorite),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(FavoriteTableError::AlreadyFavorited)
            }
            Err(err) => {
                log::error!("Failed to insert favorite: {:?}", err);
                Err(FavoriteTableError::DatabaseError)
            }
        }
    }

    /// Deletes the caller's own (user, item) pair only.
    pub fn remove(
        conn: &mut SqliteConnection,
        caller_id: i32,
        fav_item_id: i32,
    ) -> Result<(), FavoriteTableError> {
        use crate::schema::favorites::dsl::*;

        let deleted = diesel::delete(
            favorites
                .filter(user_id.eq(caller_id))
                .filter(item_id.eq(fav_item_id)),
        )
        .execute(conn)
        .map_err(|err| {
            log::error!("Failed to delete favorite: {:?}", err);
            FavoriteTableError::DatabaseError
        })?;

        if deleted == 0 {
            return Err(FavoriteTableError::NotFavorited);
        }
        Ok(())
    }

    /// Full item rows for everything the user has favorited.
    pub fn items_for_user(
        conn: &mut SqliteConnection,
        caller_id: i32,
    ) -> Result<Vec<Item>, FavoriteTableError> {
        favorites::table
            .inner_join(items::table)
            .filter(favorites::user_id.eq(caller_id))
            .select(items::all_columns)
            .load::<Item>(conn)
            .map_err(|err| {
                log::error!("Failed to get favorites: {:?}", err);
                FavoriteTableError::DatabaseError
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::NewItem;
    use crate::models::user::{NewUser, User};
    use crate::test_helpers::get_test_db_connection;

    fn insert_user(conn: &mut SqliteConnection, email: &str) -> User {
        let new_user = NewUser {
            email: email.into(),
            username: "collector".into(),
            password: "password".into(),
        };
        User::create(conn, &new_user).unwrap()
    }

    fn insert_item(conn: &mut SqliteConnection, owner: i32, name: &str) -> Item {
        let new_item = NewItem {
            user_id: owner,
            name: name.into(),
            description: "desc".into(),
            location: "somewhere".into(),
            condition: "Good".into(),
            time_to_be_set_on_curb: 1_700_000_000,
            image_path: "img.jpg".into(),
        };
        Item::create(conn, &new_item).unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let mut conn = get_test_db_connection();
        let owner = insert_user(&mut conn, "owner@test.com");
        let fan = insert_user(&mut conn, "fan@test.com");
        let chair = insert_item(&mut conn, owner.id, "Chair");
        let lamp = insert_item(&mut conn, owner.id, "Lamp");

        Favorite::add(&mut conn, fan.id, chair.id).unwrap();
        Favorite::add(&mut conn, fan.id, lamp.id).unwrap();

        let favorites = Favorite::items_for_user(&mut conn, fan.id).unwrap();
        assert_eq!(favorites.len(), 2);
        assert!(favorites.iter().any(|i| i.name == "Chair"));
        assert!(favorites.iter().any(|i| i.name == "Lamp"));

        // other users see their own (empty) list
        assert!(Favorite::items_for_user(&mut conn, owner.id)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let mut conn = get_test_db_connection();
        let owner = insert_user(&mut conn, "owner@test.com");
        let fan = insert_user(&mut conn, "fan@test.com");
        let chair = insert_item(&mut conn, owner.id, "Chair");

        Favorite::add(&mut conn, fan.id, chair.id).unwrap();
        let result = Favorite::add(&mut conn, fan.id, chair.id);
        assert!(matches!(
            result.unwrap_err(),
            FavoriteTableError::AlreadyFavorited
        ));

        let favorites = Favorite::items_for_user(&mut conn, fan.id).unwrap();
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_add_missing_item() {
        let mut conn = get_test_db_connection();
        let fan = insert_user(&mut conn, "fan@test.com");

        let result = Favorite::add(&mut conn, fan.id, 99);
        assert!(matches!(
            result.unwrap_err(),
            FavoriteTableError::ItemNotFound
        ));
    }

    #[test]
    fn test_remove_is_caller_scoped() {
        let mut conn = get_test_db_connection();
        let owner = insert_user(&mut conn, "owner@test.com");
        let fan = insert_user(&mut conn, "fan@test.com");
        let other = insert_user(&mut conn, "other@test.com");
        let chair = insert_item(&mut conn, owner.id, "Chair");

        Favorite::add(&mut conn, fan.id, chair.id).unwrap();

        // someone else cannot remove the fan's favorite
        let result = Favorite::remove(&mut conn, other.id, chair.id);
        assert!(matches!(
            result.unwrap_err(),
            FavoriteTableError::NotFavorited
        ));
        assert_eq!(Favorite::items_for_user(&mut conn, fan.id).unwrap().len(), 1);

        Favorite::remove(&mut conn, fan.id, chair.id).unwrap();
        assert!(Favorite::items_for_user(&mut conn, fan.id)
            .unwrap()
            .is_empty());

        // second removal reports not favorited
        let result = Favorite::remove(&mut conn, fan.id, chair.id);
        assert!(matches!(
            result.unwrap_err(),
            FavoriteTableError::NotFavorited
        ));
    }
}
