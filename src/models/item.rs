use super::user::User;
use crate::schema::*;
use chrono::{DateTime, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted form for `time_to_be_set_on_curb` values.
pub const CURB_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Serialize, Deserialize, Queryable, Identifiable, Associations)]
#[diesel(belongs_to(User))]
#[diesel(table_name = items)]
pub struct Item {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: String,
    pub location: String,
    /// informally New / Like New / Good / Fair / Needs Repair; not validated
    pub condition: String,
    pub time_to_be_set_on_curb: i32,
    /// stored filename inside the upload directory
    pub image_path: String,
    pub created_at: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewItem {
    pub user_id: i32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub condition: String,
    pub time_to_be_set_on_curb: i32,
    pub image_path: String,
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[diesel(table_name = items)]
pub struct InsertableItem {
    pub user_id: i32,
    pub name: String,
    pub description: String,
    pub location: String,
    pub condition: String,
    pub time_to_be_set_on_curb: i32,
    pub image_path: String,
    pub created_at: i32,
}

#[derive(Debug, Default, Serialize, Deserialize, AsChangeset)]
#[diesel(table_name = items)]
pub struct PartialItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
    pub time_to_be_set_on_curb: Option<i32>,
    pub image_path: Option<String>,
}

impl PartialItem {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.condition.is_none()
            && self.time_to_be_set_on_curb.is_none()
            && self.image_path.is_none()
    }
}

#[derive(Debug, Error)]
pub enum ItemTableError {
    #[error("Item not found")]
    ItemNotFound,
    #[error("Caller does not own this item")]
    NotOwner,
    #[error("Invalid time_to_be_set_on_curb")]
    InvalidCurbTime,
    #[error("Database error")]
    DatabaseError,
}

impl Item {
    pub fn create(conn: &mut SqliteConnection, new_item: &NewItem) -> Result<Item, ItemTableError> {
        use crate::schema::items::dsl::*;

        let item = InsertableItem {
            user_id: new_item.user_id,
            name: new_item.name.clone(),
            description: new_item.description.clone(),
            location: new_item.location.clone(),
            condition: new_item.condition.clone(),
            time_to_be_set_on_curb: new_item.time_to_be_set_on_curb,
            image_path: new_item.image_path.clone(),
            created_at: chrono::Utc::now().timestamp() as i32,
        };

        match diesel::insert_into(items).values(&item).get_result(conn) {
            Ok(in_db) => Ok(in_db),
            Err(err) => {
                log::error!("Failed to insert item into database: {:?}", err);
                Err(ItemTableError::DatabaseError)
            }
        }
    }

    pub fn get(conn: &mut SqliteConnection, item_id: i32) -> Option<Item> {
        use crate::schema::items::dsl::items;
        items.find(item_id).first::<Item>(conn).ok()
    }

    pub fn get_all(conn: &mut SqliteConnection) -> Result<Vec<Item>, ItemTableError> {
        use crate::schema::items::dsl::*;
        items.load::<Item>(conn).map_err(|err| {
            log::error!("Failed to get items: {:?}", err);
            ItemTableError::DatabaseError
        })
    }

    /// Applies only the supplied fields. The caller must own the item.
    pub fn update(
        conn: &mut SqliteConnection,
        item_id: i32,
        caller_id: i32,
        updates: &PartialItem,
    ) -> Result<Item, ItemTableError> {
        use crate::schema::items::dsl::*;

        let item = Item::get(conn, item_id).ok_or(ItemTableError::ItemNotFound)?;
        if item.user_id != caller_id {
            log::warn!(
                "User {} is not authorized to update item {}",
                caller_id,
                item_id
            );
            return Err(ItemTableError::NotOwner);
        }

        match diesel::update(items.filter(id.eq(item_id)))
            .set(updates)
            .get_result::<Item>(conn)
        {
            Ok(item) => Ok(item),
            Err(err) => {
                log::error!("Failed to update item: {:?}", err);
                Err(ItemTableError::DatabaseError)
            }
        }
    }

    pub fn delete(
        conn: &mut SqliteConnection,
        item_id: i32,
        caller_id: i32,
    ) -> Result<(), ItemTableError> {
        use crate::schema::items::dsl::*;

        let item = Item::get(conn, item_id).ok_or(ItemTableError::ItemNotFound)?;
        if item.user_id != caller_id {
            log::warn!(
                "User {} is not authorized to delete item {}",
                caller_id,
                item_id
            );
            return Err(ItemTableError::NotOwner);
        }

        diesel::delete(items.filter(id.eq(item_id)))
            .execute(conn)
            .map_err(|err| {
                log::error!("Failed to delete item: {:?}", err);
                ItemTableError::DatabaseError
            })?;
        Ok(())
    }

    pub fn parse_curb_time(raw: &str) -> Result<i32, ItemTableError> {
        NaiveDateTime::parse_from_str(raw, CURB_TIME_FORMAT)
            .map(|dt| dt.and_utc().timestamp() as i32)
            .map_err(|_| ItemTableError::InvalidCurbTime)
    }

    pub fn curb_time_string(&self) -> String {
        match DateTime::from_timestamp(self.time_to_be_set_on_curb as i64, 0) {
            Some(dt) => dt.naive_utc().format(CURB_TIME_FORMAT).to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{NewUser, User};
    use crate::test_helpers::get_test_db_connection;

    fn insert_user(conn: &mut SqliteConnection, email: &str) -> User {
        let new_user = NewUser {
            email: email.into(),
            username: "poster".into(),
            password: "password".into(),
        };
        User::create(conn, &new_user).unwrap()
    }

    fn sample_item(owner: i32) -> NewItem {
        NewItem {
            user_id: owner,
            name: "Bookshelf".into(),
            description: "Five shelves, a little wobbly".into(),
            location: "12 Elm St".into(),
            condition: "Good".into(),
            time_to_be_set_on_curb: Item::parse_curb_time("2025-12-01T09:00:00").unwrap(),
            image_path: "bookshelf.jpg".into(),
        }
    }

    #[test]
    fn test_create_and_get_item() {
        let mut conn = get_test_db_connection();
        let owner = insert_user(&mut conn, "owner@test.com");

        let item = Item::create(&mut conn, &sample_item(owner.id)).unwrap();
        let fetched = Item::get(&mut conn, item.id).unwrap();
        assert_eq!(fetched.name, "Bookshelf");
        assert_eq!(fetched.user_id, owner.id);
        assert_eq!(fetched.curb_time_string(), "2025-12-01T09:00:00");

        assert!(Item::get(&mut conn, item.id + 1).is_none());
    }

    #[test]
    fn test_get_all_items() {
        let mut conn = get_test_db_connection();
        let owner = insert_user(&mut conn, "owner@test.com");

        Item::create(&mut conn, &sample_item(owner.id)).unwrap();
        Item::create(&mut conn, &sample_item(owner.id)).unwrap();

        let all = Item::get_all(&mut conn).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut conn = get_test_db_connection();
        let owner = insert_user(&mut conn, "owner@test.com");
        let item = Item::create(&mut conn, &sample_item(owner.id)).unwrap();

        let updates = PartialItem {
            condition: Some("Fair".into()),
            ..Default::default()
        };
        let updated = Item::update(&mut conn, item.id, owner.id, &updates).unwrap();
        assert_eq!(updated.condition, "Fair");
        assert_eq!(updated.name, item.name);
        assert_eq!(updated.image_path, item.image_path);
    }

    #[test]
    fn test_only_owner_can_update() {
        let mut conn = get_test_db_connection();
        let owner = insert_user(&mut conn, "owner@test.com");
        let other = insert_user(&mut conn, "other@test.com");
        let item = Item::create(&mut conn, &sample_item(owner.id)).unwrap();

        let updates = PartialItem {
            name: Some("Stolen".into()),
            ..Default::default()
        };
        let result = Item::update(&mut conn, item.id, other.id, &updates);
        assert!(matches!(result.unwrap_err(), ItemTableError::NotOwner));

        // nothing changed
        let fetched = Item::get(&mut conn, item.id).unwrap();
        assert_eq!(fetched.name, "Bookshelf");
    }

    #[test]
    fn test_only_owner_can_delete() {
        let mut conn = get_test_db_connection();
        let owner = insert_user(&mut conn, "owner@test.com");
        let other = insert_user(&mut conn, "other@test.com");
        let item = Item::create(&mut conn, &sample_item(owner.id)).unwrap();

        let result = Item::delete(&mut conn, item.id, other.id);
        assert!(matches!(result.unwrap_err(), ItemTableError::NotOwner));
        assert!(Item::get(&mut conn, item.id).is_some());

        Item::delete(&mut conn, item.id, owner.id).unwrap();
        assert!(Item::get(&mut conn, item.id).is_none());
    }

    #[test]
    fn test_delete_missing_item() {
        let mut conn = get_test_db_connection();
        let owner = insert_user(&mut conn, "owner@test.com");

        let result = Item::delete(&mut conn, 42, owner.id);
        assert!(matches!(result.unwrap_err(), ItemTableError::ItemNotFound));
    }

    #[test]
    fn test_parse_curb_time() {
        assert!(Item::parse_curb_time("2025-12-01T09:00:00").is_ok());
        assert!(Item::parse_curb_time("2025-12-01 09:00:00").is_err());
        assert!(Item::parse_curb_time("next tuesday").is_err());
        assert!(Item::parse_curb_time("").is_err());
    }
}
