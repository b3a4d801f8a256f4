use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("jwt creation error")]
    JWTCreationError,
    #[error("failed to get JWT secret")]
    JWTSecretMissing,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse<'a> {
    pub message: &'a str,
    pub access_token: &'a str,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterResponse<'a> {
    pub message: &'a str,
    pub user_id: i32,
    pub access_token: &'a str,
}
