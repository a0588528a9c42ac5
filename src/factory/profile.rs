use chrono::{DateTime, FixedOffset};
use fake::{
    faker::{address::en::CityName, address::en::StateName, lorem::en::Sentence, name::en::Name},
    Dummy, Fake, Faker,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::profile::{DominantHand, Gender, Profile, TABLE_NAME};

/// `ext` is the owning account id; profiles share their account's id.
pub struct ProfileFactory {
    modifier_one: fn(x: &Profile) -> Profile,
    modifier_many: fn(x: &Profile, idx: usize) -> Profile,
}

impl Default for ProfileFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFactory {
    pub fn new() -> Self {
        Self {
            modifier_one: |x| x.clone(),
            modifier_many: |x, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Profile) -> Profile) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Profile, idx: usize) -> Profile) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: Uuid) -> anyhow::Result<Profile> {
        let data = Faker.fake::<ProfileDummy>().into_profile(ext);
        let data = (self.modifier_one)(&data);
        insert_profile(db, &data).await?;
        Ok(data)
    }

    /// One profile per account id in `ext`.
    pub async fn generate_many(&mut self, db: &PgPool, ext: &[Uuid]) -> anyhow::Result<Vec<Profile>> {
        let mut result: Vec<Profile> = vec![];
        for (idx, id) in ext.iter().enumerate() {
            let data = Faker.fake::<ProfileDummy>().into_profile(*id);
            let data = (self.modifier_many)(&data, idx);
            insert_profile(db, &data).await?;
            result.push(data);
        }
        Ok(result)
    }
}

async fn insert_profile(db: &PgPool, data: &Profile) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, name, age, gender, dominant_hand, dupr_id, bio, city, state, country,
        has_sponsorship, sponsorship_details, next_tournament, avatar_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(data.id)
    .bind(&data.name)
    .bind(data.age)
    .bind(data.gender)
    .bind(data.dominant_hand)
    .bind(&data.dupr_id)
    .bind(&data.bio)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.country)
    .bind(data.has_sponsorship)
    .bind(&data.sponsorship_details)
    .bind(&data.next_tournament)
    .bind(&data.avatar_url)
    .bind(data.created_at)
    .bind(data.updated_at)
    .execute(db)
    .await?;
    Ok(())
}

#[derive(Debug, Dummy, Clone)]
struct ProfileDummy {
    #[dummy(faker = "Name()")]
    pub name: String,
    #[dummy(faker = "10..100")]
    pub age: i32,
    pub gender: Option<Gender>,
    pub dominant_hand: Option<DominantHand>,
    #[dummy(faker = "100000..999999")]
    pub dupr_id: u32,
    #[dummy(faker = "Sentence(3..8)")]
    pub bio: String,
    #[dummy(faker = "CityName()")]
    pub city: String,
    #[dummy(faker = "StateName()")]
    pub state: String,
    pub has_sponsorship: bool,
    pub created_at: DateTime<FixedOffset>,
}

impl ProfileDummy {
    fn into_profile(self, id: Uuid) -> Profile {
        Profile {
            id,
            name: self.name,
            age: Some(self.age),
            gender: self.gender,
            dominant_hand: self.dominant_hand,
            dupr_id: Some(self.dupr_id.to_string()),
            bio: Some(self.bio),
            city: Some(self.city),
            state: Some(self.state),
            country: Some("India".to_string()),
            has_sponsorship: self.has_sponsorship,
            sponsorship_details: self.has_sponsorship.then(|| "Selkirk".to_string()),
            next_tournament: None,
            avatar_url: None,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{
        factory::{profile::ProfileFactory, user::AccountFactory},
        model::profile::Profile,
    };

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let account = AccountFactory::<()>::new().generate_one(&pool, ()).await?;
        let mut factory = ProfileFactory::new();
        factory.modified_one(|data| Profile {
            name: "Asha".to_string(),
            city: Some("Pune".to_string()),
            ..data.clone()
        });
        factory.generate_one(&pool, account.id).await?;

        // Expect
        let res: (String, Option<String>) =
            sqlx::query_as(r#"SELECT name, city FROM public.profiles WHERE id = $1"#)
                .bind(account.id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(res.0, "Asha".to_string());
        assert_eq!(res.1, Some("Pune".to_string()));
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let accounts = AccountFactory::<()>::new()
            .generate_many(&pool, 4, ())
            .await?;
        let ids = accounts.iter().map(|x| x.id).collect::<Vec<_>>();
        ProfileFactory::new().generate_many(&pool, &ids).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.profiles"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 4);
        Ok(())
    }
}
