use super::types::FavoriteCreate;
use crate::api::items::types::{ItemResponse, RqItemId};
use crate::claims::Claims;
use crate::models::favorite::{Favorite, FavoriteTableError};
use crate::RqDbPool;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;

#[get("")]
pub async fn get_favorites(pool: RqDbPool, claims: Claims) -> impl Responder {
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(err) => {
            log::error!("Failed to get db connection from pool: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error connecting to database" }));
        }
    };

    match Favorite::items_for_user(&mut conn, claims.sub) {
        Ok(items) => HttpResponse::Ok().json(
            items
                .into_iter()
                .map(ItemResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(_) => HttpResponse::InternalServerError()
            .json(json!({ "message": "Error getting favorites" })),
    }
}

#[post("/{item_id}")]
pub async fn add_favorite(pool: RqDbPool, path: RqItemId, claims: Claims) -> impl Responder {
    let item_id = match path.item_id.parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "message": "Invalid item ID" }));
        }
    };

    add(pool, claims, item_id).await
}

#[post("")]
pub async fn add_favorite_body(
    pool: RqDbPool,
    body: web::Json<FavoriteCreate>,
    claims: Claims,
) -> impl Responder {
    add(pool, claims, body.item_id).await
}

// both POST variants share the one duplicate policy
async fn add(pool: RqDbPool, claims: Claims, item_id: i32) -> HttpResponse {
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(err) => {
            log::error!("Failed to get db connection from pool: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error connecting to database" }));
        }
    };

    match Favorite::add(&mut conn, claims.sub, item_id) {
        Ok(_) => HttpResponse::Created().json(json!({ "message": "Item added to favorites" })),
        Err(FavoriteTableError::AlreadyFavorited) => {
            HttpResponse::Conflict().json(json!({ "message": "Item already in favorites" }))
        }
        Err(FavoriteTableError::ItemNotFound) => {
            HttpResponse::NotFound().json(json!({ "message": "Item not found" }))
        }
        Err(err) => {
            log::error!("Error adding favorite: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Error adding favorite" }))
        }
    }
}

#[delete("/{item_id}")]
pub async fn remove_favorite(pool: RqDbPool, path: RqItemId, claims: Claims) -> impl Responder {
    let item_id = match path.item_id.parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "message": "Invalid item ID" }));
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

    match Favorite::remove(&mut conn, claims.sub, item_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(FavoriteTableError::NotFavorited) => {
            HttpResponse::NotFound().json(json!({ "message": "Item not found in favorites" }))
        }
        Err(err) => {
            log::error!("Error removing favorite: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Error removing favorite" }))
        }
    }
}
