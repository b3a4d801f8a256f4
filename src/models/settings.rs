use crate::schema::*;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, Queryable, Insertable, Identifiable)]
#[diesel(table_name = settings)]
pub struct Setting {
    pub id: Option<i32>,
    pub key: String,
    pub value: String,
    pub created_at: i32,
    pub updated_at: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewSetting {
    pub key: String,
    pub value: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Setting '{key:?}' already exists")]
    SettingExists { key: String },
    #[error("Setting '{key:?}' not found")]
    SettingNotFound { key: String },
    #[error("Database error")]
    DatabaseError,
}

impl Setting {
    pub fn add(conn: &mut SqliteConnection, setting: &NewSetting) -> Result<Setting, Error> {
        use crate::schema::settings::dsl::*;

        let setting_exists = settings
            .filter(key.eq(&setting.key))
            .first::<Setting>(conn)
            .optional()
            .map_err(|_| Error::DatabaseError)?;

        if setting_exists.is_some() {
            return Err(Error::SettingExists {
                key: setting.key.clone(),
            });
        }

        let now = chrono::Utc::now().timestamp() as i32;
        let setting = Setting {
            id: None,
            key: setting.key.clone(),
            value: setting.value.clone(),
            created_at: now,
            updated_at: now,
        };

        match diesel::insert_into(settings)
            .values(setting)
            .get_result(conn)
        {
            Ok(setting) => Ok(setting),
            Err(_) => Err(Error::DatabaseError),
        }
    }

    pub fn get(conn: &mut SqliteConnection, query_key: &str) -> Result<Setting, Error> {
        use crate::schema::settings::dsl::*;

        settings
            .filter(key.eq(query_key))
            .first::<Setting>(conn)
            .map_err(|_| Error::SettingNotFound {
                key: query_key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::get_test_db_connection;

    #[test]
    fn test_add_setting() {
        let mut conn = get_test_db_connection();
        let setting = NewSetting {
            key: "test_key".to_string(),
            value: "test_value".to_string(),
        };

        let result = Setting::add(&mut conn, &setting).unwrap();
        assert_eq!(result.key, setting.key);
        assert_eq!(result.value, setting.value);
    }

    #[test]
    fn test_no_dupe_setting() {
        let mut conn = get_test_db_connection();
        let setting = NewSetting {
            key: "test_key".to_string(),
            value: "test_value".to_string(),
        };

        Setting::add(&mut conn, &setting).unwrap();

        let result = Setting::add(&mut conn, &setting);
        assert!(matches!(result.unwrap_err(), Error::SettingExists { .. }));
    }

    #[test]
    fn test_get_setting() {
        let mut conn = get_test_db_connection();
        let setting = NewSetting {
            key: "test_key".to_string(),
            value: "test_value".to_string(),
        };

        Setting::add(&mut conn, &setting).unwrap();

        let result = Setting::get(&mut conn, "test_key").unwrap();
        assert_eq!(result.value, "test_value");
    }

    #[test]
    fn test_get_setting_not_found() {
        let mut conn = get_test_db_connection();
        let result = Setting::get(&mut conn, "not_found");
        assert!(matches!(
            result.unwrap_err(),
            Error::SettingNotFound { .. }
        ));
    }
}
