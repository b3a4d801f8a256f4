use crate::schema::*;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, Queryable, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: i32,
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[diesel(table_name = users)]
pub struct InsertableUser {
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: i32,
}

/// Registration payload. `password` is the raw value; only its hash is stored.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum UserTableError {
    #[error("User not found")]
    UserNotFound,
    #[error("Email already registered")]
    EmailExists,
    #[error("Failed to hash or verify password")]
    PasswordHashError,
    #[error("Password is too short")]
    PasswordTooShort,
    #[error("Database error")]
    DatabaseError,
}

#[derive(Debug)]
pub enum UserQuery<'a> {
    Id(i32),
    Email(&'a str),
}

impl User {
    pub fn create(conn: &mut SqliteConnection, new_user: &NewUser) -> Result<User, UserTableError> {
        use crate::schema::users::dsl::*;

        // exact-match lookup; email comparison stays case-sensitive
        if User::exists(conn, &new_user.email) {
            log::warn!("User with email {} already exists", new_user.email);
            return Err(UserTableError::EmailExists);
        }

        let password_hash = Self::hash_password(&new_user.password)?;

        let user = InsertableUser {
            email: new_user.email.clone(),
            username: new_user.username.clone(),
            password: password_hash,
            created_at: chrono::Utc::now().timestamp() as i32,
        };

        match diesel::insert_into(users).values(&user).get_result(conn) {
            Ok(in_db) => Ok(in_db),
            Err(err) => {
                log::error!("Failed to insert user into database: {:?}", err);
                Err(UserTableError::DatabaseError)
            }
        }
    }

    pub fn exists(conn: &mut SqliteConnection, query_email: &str) -> bool {
        use crate::schema::users::dsl::*;
        users
            .filter(email.eq(query_email))
            .first::<User>(conn)
            .is_ok()
    }

    pub fn get(conn: &mut SqliteConnection, query: UserQuery) -> Option<User> {
        use crate::schema::users::dsl::*;
        match query {
            UserQuery::Id(user_id) => users.filter(id.eq(user_id)).first::<User>(conn).ok(),
            UserQuery::Email(query_email) => {
                users.filter(email.eq(query_email)).first::<User>(conn).ok()
            }
        }
    }

    fn hash_password(password: &str) -> Result<String, UserTableError> {
        if password.is_empty() {
            return Err(UserTableError::PasswordTooShort);
        }
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| UserTableError::PasswordHashError)
    }

    pub fn check_password(user: &User, password: &str) -> Result<bool, UserTableError> {
        let argon2 = Argon2::default();
        let password_hash = PasswordHash::new(&user.password).map_err(|_| {
            log::error!("Failed to parse password hash for user {}", user.id);
            UserTableError::PasswordHashError
        })?;
        Ok(argon2
            .verify_password(password.as_bytes(), &password_hash)
            .is_ok())
    }
}
