use super::types::Error;
use crate::claims::Claims;
use crate::global::JWT_SECRET;
use crate::models::user::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

const JWT_DURATION_SECONDS: i64 = 60 * 60 * 24; // 24 hours

pub fn create_access_token(user: &User) -> Result<String, Error> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::seconds(JWT_DURATION_SECONDS))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        exp: expiration as usize,
    };

    let secret = match JWT_SECRET.get() {
        Some(secret) => secret.as_bytes(),
        None => return Err(Error::JWTSecretMissing),
    };

    let header = Header::new(Algorithm::HS512);
    encode(&header, &claims, &EncodingKey::from_secret(secret)).map_err(|_| Error::JWTCreationError)
}

#[cfg(test)]
#[ctor::ctor]
fn init() {
    use crate::global::init_jwt_secret;
    use crate::test_helpers::get_test_db_connection;
    let mut conn = get_test_db_connection();
    init_jwt_secret(&mut conn)
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    use super::*;

    fn get_test_user() -> User {
        User {
            id: 1,
            email: "testy@mctestface.com".to_string(),
            username: "testy".to_string(),
            password: "password".to_string(),
            created_at: Utc::now().timestamp() as i32,
        }
    }

    fn token_to_claims(token: &str) -> Claims {
        use base64::Engine;
        let token = token.split('.').collect::<Vec<&str>>()[1];
        let buf = general_purpose::STANDARD_NO_PAD.decode(token).unwrap();
        let token = String::from_utf8(buf).unwrap();
        serde_json::from_str(&token).unwrap()
    }

    fn verify(token: &str) -> Option<Claims> {
        let secret = JWT_SECRET.get().unwrap().as_bytes();
        let validation = Validation::new(Algorithm::HS512);
        decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
            .map(|data| data.claims)
            .ok()
    }

    #[test]
    fn test_access_token() {
        let user = get_test_user();
        let jwt = create_access_token(&user).unwrap();
        assert!(!jwt.is_empty());

        let claims = token_to_claims(&jwt);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.sub, user.id);
        // expires in about 24 hours
        assert!(claims.exp > Utc::now().timestamp() as usize + 60 * 60 * 24 - 5);
        assert!(claims.exp < Utc::now().timestamp() as usize + 60 * 60 * 24 + 5);
    }

    #[test]
    fn test_verify_fails_w_bad_signature() {
        let user = get_test_user();
        let jwt = create_access_token(&user).unwrap();
        let parts = jwt.split('.').collect::<Vec<&str>>();
        let mut sig = parts[2].to_string();
        sig.push('a');
        let jwt = format!("{}.{}.{}", parts[0], parts[1], sig);
        assert!(verify(&jwt).is_none());
    }

    #[test]
    fn test_verify_fails_on_manual_claim_change() {
        use base64::Engine;
        let user = get_test_user();
        let jwt = create_access_token(&user).unwrap();
        let parts = jwt.split('.').collect::<Vec<&str>>();
        let buf = general_purpose::STANDARD_NO_PAD.decode(parts[1]).unwrap();
        let mut claims = String::from_utf8(buf).unwrap();

        // change subject to another user
        claims = claims.replace("\"sub\":1", "\"sub\":2");

        claims = general_purpose::STANDARD_NO_PAD.encode(claims.as_bytes());

        let jwt = format!("{}.{}.{}", parts[0], claims, parts[2]);
        assert!(verify(&jwt).is_none());
    }

    #[test]
    fn test_verify_fails_on_algo_none() {
        use base64::Engine;
        let user = get_test_user();
        let jwt = create_access_token(&user).unwrap();
        let parts = jwt.split('.').collect::<Vec<&str>>();

        // change algo from HS512 to none
        let buf = general_purpose::STANDARD_NO_PAD.decode(parts[0]).unwrap();
        let mut header = String::from_utf8(buf).unwrap();
        header = header.replace("HS512", "none");
        let header = general_purpose::STANDARD_NO_PAD.encode(header.as_bytes());

        let jwt = format!("{}.{}.{}", header, parts[1], parts[2]);
        assert!(verify(&jwt).is_none());
    }
}
