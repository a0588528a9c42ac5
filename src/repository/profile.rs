use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        error::{AppError, AppResult},
        sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    },
    model::profile::{Profile, ProfileFields, TABLE_NAME},
};

pub async fn get_profile(tx: &mut Transaction<'_, Postgres>, id: &Uuid) -> AppResult<Profile> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Uuid(*id)];
    let filters: Vec<String> = vec!["id = $1".to_string()];
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let profile = binds_query_as::<Profile>(&stmt, binds)
        .fetch_optional(&mut **tx)
        .await?;
    profile.ok_or_else(|| AppError::NotFound(format!("profile with id = {} not found", id)))
}

/// Most recently updated first. No pagination.
pub async fn list_profiles(
    tx: &mut Transaction<'_, Postgres>,
    exclude_empty_name: bool,
) -> AppResult<Vec<Profile>> {
    let mut filters: Vec<String> = vec![];
    if exclude_empty_name {
        filters.push("name <> ''".to_string());
    }
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["updated_at DESC".to_string()],
        None,
        None,
    );
    let data = binds_query_as::<Profile>(&stmt, vec![])
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

/// Inserts the empty profile row that belongs to a new account.
pub async fn create_profile(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    name: &str,
    now: &DateTime<FixedOffset>,
) -> AppResult<Profile> {
    let profile = sqlx::query_as::<_, Profile>(
        format!(
            r#"
        INSERT INTO {} (id, name, has_sponsorship, created_at, updated_at)
        VALUES ($1, $2, false, $3, $3)
        RETURNING *
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(id)
    .bind(name)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;
    Ok(profile)
}

/// Overwrites every editable field. `updated_at` always moves forward,
/// even when two updates land within the clock resolution.
pub async fn update_profile(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    fields: ProfileFields,
) -> AppResult<Profile> {
    let fields = fields.normalized();
    let profile = sqlx::query_as::<_, Profile>(
        format!(
            r#"UPDATE {}
            SET name = $1, age = $2, gender = $3, dominant_hand = $4, dupr_id = $5, bio = $6,
            city = $7, state = $8, country = $9, has_sponsorship = $10, sponsorship_details = $11,
            next_tournament = $12,
            updated_at = GREATEST(clock_timestamp(), updated_at + interval '1 microsecond')
            WHERE id = $13
            RETURNING *"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&fields.name)
    .bind(fields.age)
    .bind(fields.gender)
    .bind(fields.dominant_hand)
    .bind(&fields.dupr_id)
    .bind(&fields.bio)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.country)
    .bind(fields.has_sponsorship)
    .bind(&fields.sponsorship_details)
    .bind(&fields.next_tournament)
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;
    profile.ok_or_else(|| AppError::NotFound(format!("profile with id = {} not found", id)))
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;
    use uuid::Uuid;

    use super::*;
    use crate::{
        factory::{profile::ProfileFactory, user::AccountFactory},
        model::profile::{DominantHand, Gender},
    };

    #[sqlx::test]
    async fn test_update_profile_reflects_fields(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = AccountFactory::<()>::new().generate_one(&pool, ()).await?;
        ProfileFactory::new().generate_one(&pool, account.id).await?;
        let fields = ProfileFields {
            name: "Asha".to_string(),
            age: Some(31),
            gender: Some(Gender::Female),
            dominant_hand: Some(DominantHand::Ambidextrous),
            dupr_id: Some("DUPR-1001".to_string()),
            bio: None,
            city: Some("Pune".to_string()),
            state: Some("Maharashtra".to_string()),
            country: Some("India".to_string()),
            has_sponsorship: true,
            sponsorship_details: Some("Joola".to_string()),
            next_tournament: Some("Goa Open".to_string()),
        };

        // When
        let mut tx = pool.begin().await?;
        let before = get_profile(&mut tx, &account.id).await?;
        update_profile(&mut tx, &account.id, fields.clone()).await?;
        let first = get_profile(&mut tx, &account.id).await?;
        update_profile(&mut tx, &account.id, fields.clone()).await?;
        let second = get_profile(&mut tx, &account.id).await?;
        tx.commit().await?;

        // Expect
        let read_back = ProfileFields {
            name: second.name.clone(),
            age: second.age,
            gender: second.gender,
            dominant_hand: second.dominant_hand,
            dupr_id: second.dupr_id.clone(),
            bio: second.bio.clone(),
            city: second.city.clone(),
            state: second.state.clone(),
            country: second.country.clone(),
            has_sponsorship: second.has_sponsorship,
            sponsorship_details: second.sponsorship_details.clone(),
            next_tournament: second.next_tournament.clone(),
        };
        assert_eq!(read_back, fields);
        assert!(first.updated_at > before.updated_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.created_at, before.created_at);
        Ok(())
    }

    #[sqlx::test]
    async fn test_update_profile_clears_sponsorship_details(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let account = AccountFactory::<()>::new().generate_one(&pool, ()).await?;
        ProfileFactory::new().generate_one(&pool, account.id).await?;

        // When
        let mut tx = pool.begin().await?;
        let profile = update_profile(
            &mut tx,
            &account.id,
            ProfileFields {
                name: "Asha".to_string(),
                has_sponsorship: false,
                sponsorship_details: Some("Joola".to_string()),
                ..Default::default()
            },
        )
        .await?;

        // Expect
        assert!(!profile.has_sponsorship);
        assert_eq!(profile.sponsorship_details, None);
        assert_eq!(get_profile(&mut tx, &account.id).await?.sponsorship_details, None);
        Ok(())
    }

    #[sqlx::test]
    async fn test_unknown_profile(pool: PgPool) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;
        let id = Uuid::now_v7();
        assert!(matches!(
            get_profile(&mut tx, &id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            update_profile(
                &mut tx,
                &id,
                ProfileFields {
                    name: "Asha".to_string(),
                    ..Default::default()
                }
            )
            .await,
            Err(AppError::NotFound(_))
        ));
        Ok(())
    }

    #[sqlx::test]
    async fn test_list_profiles(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let accounts = AccountFactory::<()>::new().generate_many(&pool, 3, ()).await?;
        let ids: Vec<Uuid> = accounts.iter().map(|x| x.id).collect();
        let mut factory = ProfileFactory::new();
        factory.modified_many(|data, idx| Profile {
            name: if idx == 2 { String::new() } else { data.name.clone() },
            updated_at: DateTime::parse_from_rfc3339("2024-01-01T10:00:00+05:30").unwrap(),
            ..data.clone()
        });
        factory.generate_many(&pool, &ids).await?;

        // When the first profile is edited last
        let mut tx = pool.begin().await?;
        update_profile(
            &mut tx,
            &ids[0],
            ProfileFields {
                name: "Asha".to_string(),
                ..Default::default()
            },
        )
        .await?;
        let named = list_profiles(&mut tx, true).await?;
        let all = list_profiles(&mut tx, false).await?;

        // Expect
        assert_eq!(named.len(), 2);
        assert_eq!(named[0].id, ids[0]);
        assert!(named.iter().all(|x| !x.name.is_empty()));
        assert!(named.windows(2).all(|x| x[0].updated_at >= x[1].updated_at));
        assert_eq!(all.len(), 3);
        Ok(())
    }
}
