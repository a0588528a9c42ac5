use chrono::{DateTime, FixedOffset, NaiveDate};
use fake::{faker::address::en::CityName, Dummy, Fake, Faker};
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::tournament_history::{TournamentHistory, TABLE_NAME};

pub struct TournamentHistoryFactory {
    modifier_one: fn(x: &TournamentHistory) -> TournamentHistory,
    modifier_many: fn(x: &TournamentHistory, idx: usize) -> TournamentHistory,
}

impl Default for TournamentHistoryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TournamentHistoryFactory {
    pub fn new() -> Self {
        Self {
            modifier_one: |x| x.clone(),
            modifier_many: |x, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &TournamentHistory) -> TournamentHistory) {
        self.modifier_one = modifier
    }

    pub fn modified_many(
        &mut self,
        modifier: fn(x: &TournamentHistory, idx: usize) -> TournamentHistory,
    ) {
        self.modifier_many = modifier
    }

    /// `profile_id` owns the generated entry.
    pub async fn generate_one(
        &mut self,
        db: &PgPool,
        profile_id: Uuid,
    ) -> anyhow::Result<TournamentHistory> {
        let data = Faker.fake::<TournamentHistoryDummy>().into_entry(profile_id);
        let data = (self.modifier_one)(&data);
        insert_entry(db, &data).await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        profile_id: Uuid,
    ) -> anyhow::Result<Vec<TournamentHistory>> {
        let mut result: Vec<TournamentHistory> = vec![];
        let mut tx = db.begin().await?;
        for idx in 0..num as usize {
            let data = Faker.fake::<TournamentHistoryDummy>().into_entry(profile_id);
            let data = (self.modifier_many)(&data, idx);
            sqlx::query(insert_stmt().as_str())
                .bind(data.id)
                .bind(data.profile_id)
                .bind(&data.tournament_name)
                .bind(data.tournament_date)
                .bind(&data.location)
                .bind(&data.singles_result)
                .bind(&data.doubles_result)
                .bind(&data.mixed_doubles_result)
                .bind(&data.notes)
                .bind(data.created_at)
                .execute(&mut *tx)
                .await?;
            result.push(data);
        }
        tx.commit().await?;
        Ok(result)
    }
}

fn insert_stmt() -> String {
    format!(
        r#"
    INSERT INTO {} (id, profile_id, tournament_name, tournament_date, location, singles_result,
    doubles_result, mixed_doubles_result, notes, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"#,
        TABLE_NAME
    )
}

async fn insert_entry(db: &PgPool, data: &TournamentHistory) -> anyhow::Result<()> {
    sqlx::query(insert_stmt().as_str())
        .bind(data.id)
        .bind(data.profile_id)
        .bind(&data.tournament_name)
        .bind(data.tournament_date)
        .bind(&data.location)
        .bind(&data.singles_result)
        .bind(&data.doubles_result)
        .bind(&data.mixed_doubles_result)
        .bind(&data.notes)
        .bind(data.created_at)
        .execute(db)
        .await?;
    Ok(())
}

#[derive(Debug, Dummy, Clone)]
struct TournamentHistoryDummy {
    pub id: Uuid,
    #[dummy(faker = "CityName()")]
    pub city: String,
    pub tournament_date: NaiveDate,
    #[dummy(faker = "1..4")]
    pub place: u8,
    pub created_at: DateTime<FixedOffset>,
}

impl TournamentHistoryDummy {
    fn into_entry(self, profile_id: Uuid) -> TournamentHistory {
        let medal = match self.place {
            1 => "Gold",
            2 => "Silver",
            _ => "Bronze",
        };
        TournamentHistory {
            id: self.id,
            profile_id,
            tournament_name: format!("{} Open", self.city),
            tournament_date: Some(self.tournament_date),
            location: Some(self.city),
            singles_result: None,
            doubles_result: Some(medal.to_string()),
            mixed_doubles_result: None,
            notes: None,
            created_at: self.created_at,
        }
    }
}
