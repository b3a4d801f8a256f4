use super::handlers;
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    web::scope("/favorites")
        .service(handlers::get_favorites)
        .service(handlers::add_favorite_body)
        .service(handlers::add_favorite)
        .service(handlers::remove_favorite)
}
