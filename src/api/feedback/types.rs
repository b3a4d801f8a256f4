use actix_web::web;
use serde::{Deserialize, Serialize};

use crate::models::feedback::{Feedback, FeedbackType};

#[derive(Debug, Deserialize)]
pub struct FeedbackCreate {
    pub item_id: i32,
    /// parsed case-sensitively; anything but LIKE/DISLIKE is rejected
    pub feedback_type: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackPath {
    pub feedback_id: String,
}

pub type RqFeedbackId = web::Path<FeedbackPath>;

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub id: i32,
    pub user_id: i32,
    pub feedback_type: FeedbackType,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        FeedbackResponse {
            id: feedback.id,
            user_id: feedback.user_id,
            feedback_type: feedback.feedback_type,
        }
    }
}
