use std::sync::Arc;

use chrono::Local;
use redis::ConnectionLike;
use sqlx::{pool::PoolConnection, PgPool, Postgres};
use uuid::Uuid;

use super::{
    security::{generate_refresh_token_from_account, generate_token_from_account, hash_password},
    session::add_session,
};
use crate::{
    model::{profile::Profile, user::Account},
    settings::{get_config, Config},
    AppState, Backend,
};

/// Config from the environment, served under `/api`.
pub fn test_config() -> Config {
    let mut config = get_config().unwrap();
    config.prefix = Some("/api".to_string());
    config
}

pub fn test_app_state(pool: PgPool, config: &Config) -> Arc<AppState> {
    let client = redis::Client::open(config.redis_url.clone().unwrap()).unwrap();
    let redis_pool = r2d2::Pool::builder().build(client).unwrap();
    Arc::new(AppState::new(
        Some(Backend {
            db: pool,
            redis_conn: redis_pool,
        }),
        config.clone(),
    ))
}

pub struct TestUser {
    pub account: Account,
    pub profile: Profile,
    pub token: String,
    pub refresh_token: String,
}

/// Confirmed account with its profile and a live session.
pub async fn generate_test_user<C: ConnectionLike>(
    db: &mut PoolConnection<Postgres>,
    redis_conn: &mut C,
    config: &Config,
    email: &str,
    name: &str,
) -> anyhow::Result<TestUser> {
    let now = Local::now().fixed_offset();
    let account = Account {
        id: Uuid::now_v7(),
        email: email.to_string(),
        password: hash_password("password").unwrap(),
        display_name: Some(name.to_string()),
        email_confirmed_date: Some(now),
        created_date: now,
        updated_date: now,
    };

    sqlx::query(
        r#"
        INSERT INTO public.account (id, email, password, display_name, email_confirmed_date, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(account.id)
    .bind(&account.email)
    .bind(&account.password)
    .bind(&account.display_name)
    .bind(account.email_confirmed_date)
    .bind(account.created_date)
    .bind(account.updated_date)
    .execute(&mut **db)
    .await?;
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO public.profiles (id, name, has_sponsorship, created_at, updated_at)
        VALUES ($1, $2, false, $3, $3)
        RETURNING *
        "#,
    )
    .bind(account.id)
    .bind(name)
    .bind(now)
    .fetch_one(&mut **db)
    .await?;

    let token = generate_token_from_account(&account, config)?;
    let refresh_token = generate_refresh_token_from_account(&account, config)?;
    add_session(redis_conn, &account, config, &token, &refresh_token)?;

    Ok(TestUser {
        account,
        profile,
        token,
        refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use sqlx::{Acquire, PgPool};
    use uuid::Uuid;

    use super::{generate_test_user, test_config};
    use crate::core::{security::get_account_from_token, session::get_session};

    #[sqlx::test]
    async fn test_generate_test_user(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let config = test_config();
        let client = redis::Client::open(config.redis_url.clone().unwrap()).unwrap();
        let mut redis_conn = client.get_connection().unwrap();

        // When
        let mut db = pool.acquire().await?;
        let res = generate_test_user(
            &mut db,
            &mut redis_conn,
            &config,
            "asha@local.com",
            "Asha",
        )
        .await?;

        // Expect
        let profile: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM public.profiles WHERE id = $1")
                .bind(res.account.id)
                .fetch_optional(&mut *db)
                .await?;
        assert_eq!(profile, Some((res.account.id, "Asha".to_string())));

        let mut tx = db.begin().await?;
        let account =
            get_account_from_token(&mut tx, &mut redis_conn, Some(res.token.clone())).await?;
        assert_eq!(account.unwrap().email, "asha@local.com");

        let session = get_session(&mut redis_conn, &res.token)?;
        assert!(session.is_some());
        Ok(())
    }
}
