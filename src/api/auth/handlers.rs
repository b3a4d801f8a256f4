use super::jwt::create_access_token;
use super::types::{LoginRequest, RegisterResponse, TokenResponse};
use crate::claims::Claims;
use crate::models::user::{NewUser, User, UserQuery, UserTableError};
use crate::security::validation;
use crate::RqDbPool;
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

#[post("/register")]
pub async fn register(pool: RqDbPool, new_user: web::Json<NewUser>) -> impl Responder {
    if let Err(msg) = validation::validate_email(&new_user.email) {
        return HttpResponse::BadRequest().json(json!({ "message": msg }));
    }
    if new_user.username.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "Username is required" }));
    }

    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(err) => {
            log::error!("Failed to get db connection from pool: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error connecting to database" }));
        }
    };

    let user = match User::create(&mut conn, &new_user) {
        Ok(user) => user,
        Err(UserTableError::EmailExists) => {
            return HttpResponse::BadRequest()
                .json(json!({ "message": "Email already registered" }));
        }
        Err(UserTableError::PasswordTooShort) => {
            return HttpResponse::BadRequest().json(json!({ "message": "Password is required" }));
        }
        Err(err) => {
            log::error!("Error creating user: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error creating user" }));
        }
    };

    let access_token = match create_access_token(&user) {
        Ok(token) => token,
        Err(err) => {
            log::error!("Error creating access token: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error creating access token" }));
        }
    };

    log::info!("Registered new user {}", user.id);
    HttpResponse::Created().json(RegisterResponse {
        message: "Registration successful",
        user_id: user.id,
        access_token: &access_token,
    })
}

#[post("/login")]
pub async fn login(pool: RqDbPool, login_req: web::Json<LoginRequest>) -> impl Responder {
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(err) => {
            log::error!("Failed to get db connection from pool: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error connecting to database" }));
        }
    };

    // unknown email and wrong password are indistinguishable to the caller
    let user = match User::get(&mut conn, UserQuery::Email(&login_req.email)) {
        Some(user) => user,
        None => return invalid_credentials(),
    };

    match User::check_password(&user, &login_req.password) {
        Ok(true) => {}
        _ => return invalid_credentials(),
    }

    let access_token = match create_access_token(&user) {
        Ok(token) => token,
        Err(err) => {
            log::error!("Error creating access token: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error creating access token" }));
        }
    };

    HttpResponse::Ok().json(TokenResponse {
        message: "Login successful",
        access_token: &access_token,
    })
}

#[get("/auth/user")]
pub async fn current_user(pool: RqDbPool, claims: Claims) -> impl Responder {
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(err) => {
            log::error!("Failed to get db connection from pool: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Error connecting to database" }));
        }
    };

    match User::get(&mut conn, UserQuery::Id(claims.sub)) {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::NotFound().json(json!({ "message": "User not found" })),
    }
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" }))
}
