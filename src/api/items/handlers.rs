use super::types::{ItemForm, ItemResponse, RqItemId};
use crate::claims::Claims;
use crate::models::item::{Item, ItemTableError, NewItem, PartialItem};
use crate::storage::ImageStore;
use crate::RqDbPool;
use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

#[get("")]
pub async fn get_all_items(pool: RqDbPool) -> impl Responder {
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(err) => {
            log::error!("Failed to get db connection from pool: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error connecting to database" }));
        }
    };

    match Item::get_all(&mut conn) {
        Ok(items) => HttpResponse::Ok().json(
            items
                .into_iter()
                .map(ItemResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(_) => {
            HttpResponse::InternalServerError().json(json!({ "message": "Error getting items" }))
        }
    }
}

#[get("/{item_id}")]
pub async fn get_item(pool: RqDbPool, path: RqItemId) -> impl Responder {
    let id = match path.item_id.parse::<i32>() {
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

    match Item::get(&mut conn, id) {
        Some(item) => HttpResponse::Ok().json(ItemResponse::from(item)),
        None => HttpResponse::NotFound().json(json!({ "message": "Item not found" })),
    }
}

#[post("")]
pub async fn create_item(
    pool: RqDbPool,
    store: web::Data<ImageStore>,
    claims: Claims,
    payload: Multipart,
) -> impl Responder {
    let form = match ItemForm::from_multipart(payload).await {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Failed to read multipart payload: {}", err);
            return HttpResponse::BadRequest()
                .json(json!({ "message": "Invalid multipart payload" }));
        }
    };

    let image = match form.image {
        Some(image) => image,
        None => return HttpResponse::BadRequest().json(json!({ "message": "No file part" })),
    };
    if image.filename.is_empty() || image.bytes.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "No selected file" }));
    }

    let (name, description, location, condition) = match (
        form.name,
        form.description,
        form.location,
        form.condition,
    ) {
        (Some(name), Some(description), Some(location), Some(condition)) => {
            (name, description, location, condition)
        }
        _ => {
            return HttpResponse::BadRequest()
                .json(json!({ "message": "Missing required item fields" }));
        }
    };

    let time_to_be_set_on_curb = match form
        .time_to_be_set_on_curb
        .as_deref()
        .map(Item::parse_curb_time)
    {
        Some(Ok(timestamp)) => timestamp,
        _ => {
            return HttpResponse::BadRequest().json(
                json!({ "message": "time_to_be_set_on_curb must be YYYY-MM-DDTHH:MM:SS" }),
            );
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

    let image_path = match store.save(&image.filename, &image.bytes) {
        Ok(stored) => stored,
        Err(err) => {
            log::error!("Failed to store uploaded image: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error storing image" }));
        }
    };

    let new_item = NewItem {
        user_id: claims.sub,
        name,
        description,
        location,
        condition,
        time_to_be_set_on_curb,
        image_path: image_path.clone(),
    };

    match Item::create(&mut conn, &new_item) {
        Ok(item) => HttpResponse::Created().json(json!({
            "message": "Item posted successfully",
            "item_id": item.id,
        })),
        Err(err) => {
            // the row never landed; take the stored file back out
            if let Err(remove_err) = store.remove(&image_path) {
                log::warn!("Failed to remove orphaned upload {}: {}", image_path, remove_err);
            }
            log::error!("Error creating item: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Error creating item" }))
        }
    }
}

#[put("/{item_id}")]
pub async fn update_item(
    pool: RqDbPool,
    store: web::Data<ImageStore>,
    path: RqItemId,
    claims: Claims,
    payload: Multipart,
) -> impl Responder {
    let id = match path.item_id.parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "message": "Invalid item ID" }));
        }
    };

    let form = match ItemForm::from_multipart(payload).await {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Failed to read multipart payload: {}", err);
            return HttpResponse::BadRequest()
                .json(json!({ "message": "Invalid multipart payload" }));
        }
    };

    let time_to_be_set_on_curb = match form.time_to_be_set_on_curb.as_deref() {
        Some(raw) => match Item::parse_curb_time(raw) {
            Ok(timestamp) => Some(timestamp),
            Err(_) => {
                return HttpResponse::BadRequest().json(
                    json!({ "message": "time_to_be_set_on_curb must be YYYY-MM-DDTHH:MM:SS" }),
                );
            }
        },
        None => None,
    };

    let image_path = match form.image {
        Some(image) if !image.filename.is_empty() && !image.bytes.is_empty() => {
            match store.save(&image.filename, &image.bytes) {
                Ok(stored) => Some(stored),
                Err(err) => {
                    log::error!("Failed to store uploaded image: {}", err);
                    return HttpResponse::InternalServerError()
                        .json(json!({ "message": "Error storing image" }));
                }
            }
        }
        _ => None,
    };

    let updates = PartialItem {
        name: form.name,
        description: form.description,
        location: form.location,
        condition: form.condition,
        time_to_be_set_on_curb,
        image_path,
    };

    if updates.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "No fields to update" }));
    }

    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(err) => {
            log::error!("Failed to get db connection from pool: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error connecting to database" }));
        }
    };

    match Item::update(&mut conn, id, claims.sub, &updates) {
        Ok(item) => HttpResponse::Ok().json(ItemResponse::from(item)),
        Err(err) => {
            if let Some(stored) = &updates.image_path {
                if let Err(remove_err) = store.remove(stored) {
                    log::warn!("Failed to remove orphaned upload {}: {}", stored, remove_err);
                }
            }
            match err {
                ItemTableError::ItemNotFound => {
                    HttpResponse::NotFound().json(json!({ "message": "Item not found" }))
                }
                ItemTableError::NotOwner => {
                    HttpResponse::Forbidden().json(json!({ "message": "Forbidden" }))
                }
                _ => HttpResponse::InternalServerError()
                    .json(json!({ "message": "Error updating item" })),
            }
        }
    }
}

#[delete("/{item_id}")]
pub async fn delete_item(pool: RqDbPool, path: RqItemId, claims: Claims) -> impl Responder {
    let id = match path.item_id.parse::<i32>() {
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

    match Item::delete(&mut conn, id, claims.sub) {
        Ok(()) => {
            log::info!("Deleted item with ID {}", id);
            HttpResponse::Ok().json(json!({ "message": "Item deleted" }))
        }
        Err(ItemTableError::ItemNotFound) => {
            HttpResponse::NotFound().json(json!({ "message": "Item not found" }))
        }
        Err(ItemTableError::NotOwner) => {
            HttpResponse::Forbidden().json(json!({ "message": "Forbidden" }))
        }
        Err(err) => {
            log::error!("Error deleting item: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Error deleting item" }))
        }
    }
}
