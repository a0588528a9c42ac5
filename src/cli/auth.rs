use chrono::Local;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::{
        identity::{validate_email, validate_password},
        security::hash_password,
    },
    model::user::Account,
    repository,
};

/// Creates a confirmed account and its profile. Returns the account id.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    name: &str,
) -> anyhow::Result<Uuid> {
    let email = email.trim().to_lowercase();
    validate_email(&email)?;
    validate_password(password)?;

    let mut tx = pool.begin().await?;
    if repository::user::get_account_by_email(&mut tx, &email)
        .await?
        .is_some()
    {
        anyhow::bail!("account {} already exists", email);
    }

    let hashed_password = hash_password(password).map_err(|err| anyhow::anyhow!(err))?;
    let now = Local::now().fixed_offset();
    let account = Account {
        id: Uuid::now_v7(),
        email,
        password: hashed_password,
        display_name: Some(name.to_string()),
        email_confirmed_date: Some(now),
        created_date: now,
        updated_date: now,
    };
    repository::user::create_account(&mut tx, &account).await?;
    repository::profile::create_profile(&mut tx, &account.id, name, &now).await?;
    tx.commit().await?;
    Ok(account.id)
}
