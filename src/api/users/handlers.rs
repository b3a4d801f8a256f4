use super::types::RqUserId;
use crate::claims::Claims;
use crate::models::user::{User, UserQuery};
use crate::RqDbPool;
use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

#[get("/{user_id}")]
pub async fn get_user(pool: RqDbPool, user_path: RqUserId, _claims: Claims) -> impl Responder {
    let id = match user_path.user_id.parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "message": "Invalid user ID" }));
        }
    };

    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(err) => {
            log::error!("Failed to get db connection from pool: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error connecting to database" }));
        }
    };

    match User::get(&mut conn, UserQuery::Id(id)) {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::NotFound().json(json!({ "message": "User not found" })),
    }
}
