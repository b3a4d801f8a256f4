use actix_web::web;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UserPath {
    pub user_id: String,
}

pub type RqUserId = web::Path<UserPath>;
