use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        error::{AppError, AppResult},
        sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    },
    model::tournament_history::{TournamentFields, TournamentHistory, TABLE_NAME},
};

/// Latest tournament first; undated entries come after dated ones.
pub async fn list_by_profile(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: &Uuid,
    limit: Option<u32>,
) -> AppResult<Vec<TournamentHistory>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*profile_id)];
    let filters: Vec<String> = vec!["profile_id = $1".to_string()];
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec![
            "tournament_date DESC NULLS LAST".to_string(),
            "created_at DESC".to_string(),
        ],
        limit,
        None,
    );
    let data = binds_query_as::<TournamentHistory>(&stmt, binds)
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn count_by_profile(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: &Uuid,
) -> AppResult<i64> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*profile_id)];
    let filters: Vec<String> = vec!["profile_id = $1".to_string()];
    let stmt = query_builder(
        Some("count(id)".to_string()),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );
    let count = binds_query_as::<(i64,)>(&stmt, binds)
        .fetch_one(&mut **tx)
        .await?;
    Ok(count.0)
}

pub async fn get_entry(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> AppResult<TournamentHistory> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*id)];
    let filters: Vec<String> = vec!["id = $1".to_string()];
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let entry = binds_query_as::<TournamentHistory>(&stmt, binds)
        .fetch_optional(&mut **tx)
        .await?;
    entry.ok_or_else(|| AppError::NotFound(format!("tournament with id = {} not found", id)))
}

pub async fn create_entry(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: &Uuid,
    fields: &TournamentFields,
    now: &DateTime<FixedOffset>,
) -> AppResult<TournamentHistory> {
    let entry = sqlx::query_as::<_, TournamentHistory>(
        format!(
            r#"
        INSERT INTO {} (id, profile_id, tournament_name, tournament_date, location,
        singles_result, doubles_result, mixed_doubles_result, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(Uuid::now_v7())
    .bind(profile_id)
    .bind(&fields.tournament_name)
    .bind(fields.tournament_date)
    .bind(&fields.location)
    .bind(&fields.singles_result)
    .bind(&fields.doubles_result)
    .bind(&fields.mixed_doubles_result)
    .bind(&fields.notes)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;
    Ok(entry)
}

/// Full overwrite of the entry's editable columns.
pub async fn update_entry(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    fields: &TournamentFields,
) -> AppResult<TournamentHistory> {
    let entry = sqlx::query_as::<_, TournamentHistory>(
        format!(
            r#"UPDATE {}
            SET tournament_name = $1, tournament_date = $2, location = $3, singles_result = $4,
            doubles_result = $5, mixed_doubles_result = $6, notes = $7
            WHERE id = $8
            RETURNING *"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&fields.tournament_name)
    .bind(fields.tournament_date)
    .bind(&fields.location)
    .bind(&fields.singles_result)
    .bind(&fields.doubles_result)
    .bind(&fields.mixed_doubles_result)
    .bind(&fields.notes)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;
    entry.ok_or_else(|| AppError::NotFound(format!("tournament with id = {} not found", id)))
}

pub async fn delete_entry(tx: &mut Transaction<'_, Postgres>, id: &Uuid) -> AppResult<()> {
    let res = sqlx::query(format!("DELETE FROM {} WHERE id = $1", TABLE_NAME).as_str())
        .bind(id)
        .execute(&mut **tx)
        .await?;
    if res.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "tournament with id = {} not found",
            id
        )));
    }
    Ok(())
}
