use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        error::{AppError, AppResult},
        sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    },
    model::user::{Account, TABLE_NAME},
};

const EMAIL_CONSTRAINT: &str = "account_email_key";

pub async fn get_account_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> AppResult<Option<Account>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*id)];
    let filters: Vec<String> = vec!["id = $1".to_string()];
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let account = binds_query_as::<Account>(&stmt, binds)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(account)
}

/// Emails are matched case-insensitively.
pub async fn get_account_by_email(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
) -> AppResult<Option<Account>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::String(email.to_lowercase())];
    let filters: Vec<String> = vec!["lower(email) = $1".to_string()];
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let account = binds_query_as::<Account>(&stmt, binds)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(account)
}

pub async fn create_account(tx: &mut Transaction<'_, Postgres>, account: &Account) -> AppResult<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, email, password, display_name, email_confirmed_date, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(account.id)
    .bind(&account.email)
    .bind(&account.password)
    .bind(&account.display_name)
    .bind(account.email_confirmed_date)
    .bind(account.created_date)
    .bind(account.updated_date)
    .execute(&mut **tx)
    .await
    .map_err(|err| match err {
        sqlx::Error::Database(db_err) if db_err.constraint() == Some(EMAIL_CONSTRAINT) => {
            AppError::Auth("User already registered".to_string())
        }
        err => AppError::from(err),
    })?;
    Ok(())
}

/// Returns false when no account has the id.
pub async fn confirm_account_email(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    now: &DateTime<FixedOffset>,
) -> AppResult<bool> {
    let res = sqlx::query(
        format!(
            r#"UPDATE {}
            SET email_confirmed_date = COALESCE(email_confirmed_date, $1), updated_date = $1
            WHERE id = $2"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(now)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected() > 0)
}
