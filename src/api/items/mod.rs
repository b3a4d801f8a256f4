pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::routes;
pub use types::{ItemResponse, RqItemId};
