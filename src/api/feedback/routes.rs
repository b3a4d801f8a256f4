use super::handlers;
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    web::scope("/feedback")
        .service(handlers::submit_feedback)
        .service(handlers::delete_feedback)
}
