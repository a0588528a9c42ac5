use redis::ConnectionLike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{model::user::Account, settings::Config};

const CONFIRMATION_PREFIX: &str = "confirm:";
const REFRESH_PREFIX: &str = "refresh:";

fn refresh_key(refresh_token: &str) -> String {
    format!("{}{}", REFRESH_PREFIX, refresh_token)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub account_id: String,
    pub refresh_token: String,
}

pub fn add_session<C: ConnectionLike>(
    redis_conn: &mut C,
    account: &Account,
    config: &Config,
    token: &str,
    refresh_token: &str,
) -> anyhow::Result<()> {
    let session_data = SessionData {
        account_id: account.id.to_string(),
        refresh_token: refresh_token.to_string(),
    };
    let session_json = serde_json::to_string(&session_data)?;
    redis::pipe()
        .set_ex(token, session_json, config.jwt_exp as u64 * 60)
        .set_ex(
            refresh_key(refresh_token),
            token,
            config.jwt_refresh_exp as u64 * 60,
        )
        .exec(redis_conn)?;
    Ok(())
}

pub fn get_session<C: ConnectionLike>(
    redis_conn: &mut C,
    token: &str,
) -> anyhow::Result<Option<SessionData>> {
    let res: Option<String> = redis::cmd("get").arg(token).query(redis_conn)?;
    let Some(res) = res else {
        return Ok(None);
    };
    let session_data: SessionData = serde_json::from_str(res.as_str())?;
    Ok(Some(session_data))
}

/// Removes the session and its refresh token. Returns the removed session,
/// `None` when the token had no session.
pub fn remove_session<C: ConnectionLike>(
    redis_conn: &mut C,
    token: &str,
) -> anyhow::Result<Option<SessionData>> {
    let Some(session_data) = get_session(redis_conn, token)? else {
        return Ok(None);
    };
    redis::cmd("del")
        .arg(token)
        .arg(refresh_key(&session_data.refresh_token))
        .exec(redis_conn)?;
    Ok(Some(session_data))
}

/// Consumes a refresh token and returns the access token it was issued
/// with. `None` when the token was already used or signed out.
pub fn take_refresh<C: ConnectionLike>(
    redis_conn: &mut C,
    refresh_token: &str,
) -> anyhow::Result<Option<String>> {
    let res: Option<String> = redis::cmd("getdel")
        .arg(refresh_key(refresh_token))
        .query(redis_conn)?;
    Ok(res)
}

/// Stores a fresh email confirmation token for the account.
pub fn add_confirmation<C: ConnectionLike>(
    redis_conn: &mut C,
    account_id: &Uuid,
    config: &Config,
) -> anyhow::Result<String> {
    let token = Uuid::new_v4().simple().to_string();
    redis::Cmd::set_ex(
        format!("{}{}", CONFIRMATION_PREFIX, token),
        account_id.to_string(),
        config.confirmation_exp as u64 * 60,
    )
    .exec(redis_conn)?;
    Ok(token)
}

/// Consumes a confirmation token. A token can be used once.
pub fn take_confirmation<C: ConnectionLike>(
    redis_conn: &mut C,
    token: &str,
) -> anyhow::Result<Option<Uuid>> {
    let key = format!("{}{}", CONFIRMATION_PREFIX, token);
    let res: Option<String> = redis::cmd("getdel").arg(&key).query(redis_conn)?;
    let Some(res) = res else {
        return Ok(None);
    };
    Ok(Some(Uuid::parse_str(&res)?))
}
