use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::{Duration, Local};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use poem::Request;
use poem_openapi::{auth::Bearer, SecurityScheme};
use redis::ConnectionLike;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{model::user::Account, repository::user::get_account_by_id, settings::Config};

use super::{
    error::{AppError, AppResult},
    session::get_session,
};

/// password hashing
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    // Argon2id v19, PHC string output
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

/// password hash verification
pub fn verify_hash_password(
    password: &str,
    password_hash: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(password_hash)?;
    let verify = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(verify)
}

pub struct Keys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub exp: i64,
    /// unique per token
    pub jti: String,
}

impl Claims {
    pub fn new(account_id: &str, email: &str, config: &Config) -> Self {
        let exp = (Local::now() + Duration::minutes(config.jwt_exp as i64)).timestamp();
        Self {
            id: account_id.to_string(),
            email: email.to_string(),
            exp,
            jti: Uuid::new_v4().simple().to_string(),
        }
    }
}

/// Generate token
pub fn encode_token(claims: &Claims, jwt_secret: &str) -> anyhow::Result<String> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &keys.encoding)?;
    Ok(token)
}

/// Extract payload and validate token
pub fn decode_token(token: &str, jwt_secret: &str) -> anyhow::Result<Claims> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &keys.decoding, &Validation::default())?;
    Ok(token_data.claims)
}

pub fn generate_token_from_account(account: &Account, config: &Config) -> anyhow::Result<String> {
    let claims = Claims::new(&account.id.to_string(), &account.email, config);
    encode_token(&claims, &config.jwt_secret)
}

/// Resolves the account behind a live session. Unknown or expired sessions
/// resolve to `None`.
pub async fn get_account_from_token<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    jwt_token: Option<String>,
) -> AppResult<Option<Account>> {
    let Some(jwt_token) = jwt_token else {
        return Ok(None);
    };
    let Some(session) = get_session(redis_conn, &jwt_token)? else {
        return Ok(None);
    };
    let Ok(account_id) = Uuid::parse_str(&session.account_id) else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "malformed session for token"
        )));
    };
    get_account_by_id(tx, &account_id).await
}

/// Like [`get_account_from_token`], but a missing session is `Unauthorized`.
pub async fn require_account<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    jwt_token: Option<String>,
) -> AppResult<Account> {
    get_account_from_token(tx, redis_conn, jwt_token)
        .await?
        .ok_or(AppError::Unauthorized)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClaimsRefresh {
    pub id: String,
    pub email: String,
    pub exp: i64,
    pub jti: String,
    pub type_key: String,
}

impl ClaimsRefresh {
    pub fn new(account_id: &str, email: &str, config: &Config) -> Self {
        let exp = (Local::now() + Duration::minutes(config.jwt_refresh_exp as i64)).timestamp();
        Self {
            id: account_id.to_string(),
            email: email.to_string(),
            exp,
            jti: Uuid::new_v4().simple().to_string(),
            type_key: "refresh".to_string(),
        }
    }
}

/// Generate refresh token
pub fn encode_refresh_token(claims: &ClaimsRefresh, jwt_secret: &str) -> anyhow::Result<String> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token = encode(&Header::default(), &claims, &keys.encoding)?;
    Ok(token)
}

/// Extract payload and validate refresh token
pub fn decode_refresh_token(token: &str, jwt_secret: &str) -> anyhow::Result<ClaimsRefresh> {
    let keys = Keys::new(jwt_secret.as_bytes());
    let token_data = decode::<ClaimsRefresh>(token, &keys.decoding, &Validation::default())?;
    if token_data.claims.type_key != "refresh" {
        anyhow::bail!("not a refresh token");
    }
    Ok(token_data.claims)
}

pub fn generate_refresh_token_from_account(
    account: &Account,
    config: &Config,
) -> anyhow::Result<String> {
    let claims = ClaimsRefresh::new(&account.id.to_string(), &account.email, config);
    encode_refresh_token(&claims, &config.jwt_secret)
}

pub async fn get_account_from_refresh_token(
    tx: &mut Transaction<'_, Postgres>,
    refresh_token: &str,
    config: &Config,
) -> AppResult<Option<Account>> {
    let Ok(claims) = decode_refresh_token(refresh_token, &config.jwt_secret) else {
        return Ok(None);
    };
    let Ok(account_id) = Uuid::parse_str(&claims.id) else {
        return Ok(None);
    };
    get_account_by_id(tx, &account_id).await
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserApiKey {
    pub token: Option<String>,
}

/// ApiKey authorization
#[derive(SecurityScheme)]
#[oai(ty = "bearer", checker = "bearer_checker")]
pub struct BearerAuthorization(pub UserApiKey);

pub async fn bearer_checker(_req: &Request, api_key: Bearer) -> Option<UserApiKey> {
    Some(UserApiKey {
        token: Some(api_key.token),
    })
}
