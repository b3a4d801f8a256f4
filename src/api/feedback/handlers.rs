use super::types::{FeedbackCreate, FeedbackResponse, RqFeedbackId};
use crate::api::items::types::RqItemId;
use crate::claims::Claims;
use crate::models::feedback::{Feedback, FeedbackTableError, FeedbackType};
use crate::RqDbPool;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;

#[post("")]
pub async fn submit_feedback(
    pool: RqDbPool,
    body: web::Json<FeedbackCreate>,
    claims: Claims,
) -> impl Responder {
    let feedback_type = match body.feedback_type.parse::<FeedbackType>() {
        Ok(feedback_type) => feedback_type,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({ "message": "feedback_type must be LIKE or DISLIKE" }));
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

    match Feedback::submit(&mut conn, claims.sub, body.item_id, feedback_type) {
        Ok(feedback) => HttpResponse::Created().json(json!({
            "message": "Feedback submitted",
            "feedback_id": feedback.id,
        })),
        Err(FeedbackTableError::ItemNotFound) => {
            HttpResponse::NotFound().json(json!({ "message": "Item not found" }))
        }
        Err(err) => {
            log::error!("Error submitting feedback: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Error submitting feedback" }))
        }
    }
}

/// Mounted inside the /items scope; the listing is public.
#[get("/{item_id}/feedback")]
pub async fn list_item_feedback(pool: RqDbPool, path: RqItemId) -> impl Responder {
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

    match Feedback::get_for_item(&mut conn, item_id) {
        Ok(feedback) => HttpResponse::Ok().json(
            feedback
                .into_iter()
                .map(FeedbackResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(_) => {
            HttpResponse::InternalServerError().json(json!({ "message": "Error getting feedback" }))
        }
    }
}

#[delete("/{feedback_id}")]
pub async fn delete_feedback(pool: RqDbPool, path: RqFeedbackId, claims: Claims) -> impl Responder {
    let id = match path.feedback_id.parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "message": "Invalid feedback ID" }));
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

    match Feedback::delete(&mut conn, id, claims.sub) {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Feedback deleted" })),
        Err(FeedbackTableError::FeedbackNotFound) => {
            HttpResponse::NotFound().json(json!({ "message": "Feedback not found" }))
        }
        Err(FeedbackTableError::NotAuthor) => {
            HttpResponse::Forbidden().json(json!({ "message": "Forbidden" }))
        }
        Err(err) => {
            log::error!("Error deleting feedback: {:?}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Error deleting feedback" }))
        }
    }
}
