use super::handlers;
use crate::api::feedback;
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    web::scope("/items")
        .service(handlers::get_all_items)
        .service(handlers::create_item)
        .service(handlers::get_item)
        .service(handlers::update_item)
        .service(handlers::delete_item)
        // public per-item feedback listing lives under /items/{id}/feedback
        .service(feedback::handlers::list_item_feedback)
}
