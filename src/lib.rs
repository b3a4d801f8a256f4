pub mod api;
pub mod claims;
pub mod global;
pub mod models;
pub mod schema;
pub mod security;
pub mod seed;
pub mod storage;
#[cfg(test)]
pub mod test_helpers;
pub mod types;

use actix_web::web;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type RqDbPool = web::Data<DbPool>;
