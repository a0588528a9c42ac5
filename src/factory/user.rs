use chrono::{DateTime, FixedOffset};
use fake::{faker::internet::en::SafeEmail, faker::name::en::Name, Dummy, Fake, Faker};
use sqlx::PgPool;
use uuid::Uuid;

use crate::model::user::{Account, TABLE_NAME};

pub struct AccountFactory<T: Clone> {
    modifier_one: fn(x: &Account, ext: T) -> Account,
    modifier_many: fn(x: &Account, idx: usize, ext: T) -> Account,
}

impl<T: Clone> Default for AccountFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> AccountFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Account, ext: T) -> Account) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Account, idx: usize, ext: T) -> Account) {
        self.modifier_many = modifier
    }

    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Account> {
        let data = Faker.fake::<AccountDummy>().into_account();
        let data = (self.modifier_one)(&data, ext);
        insert_account(db, &data).await?;
        Ok(data)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Account>> {
        let mut result: Vec<Account> = vec![];
        for idx in 0..num as usize {
            let data = Faker.fake::<AccountDummy>().into_account();
            let data = (self.modifier_many)(&data, idx, ext.clone());
            insert_account(db, &data).await?;
            result.push(data);
        }
        Ok(result)
    }
}

async fn insert_account(db: &PgPool, data: &Account) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, email, password, display_name, email_confirmed_date, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(data.id)
    .bind(&data.email)
    .bind(&data.password)
    .bind(&data.display_name)
    .bind(data.email_confirmed_date)
    .bind(data.created_date)
    .bind(data.updated_date)
    .execute(db)
    .await?;
    Ok(())
}

#[derive(Debug, Dummy, Clone)]
struct AccountDummy {
    pub id: Uuid,
    #[dummy(faker = "SafeEmail()")]
    pub email: String,
    pub password: String,
    #[dummy(faker = "Name()")]
    pub display_name: String,
    pub created_date: DateTime<FixedOffset>,
}

impl AccountDummy {
    fn into_account(self) -> Account {
        Account {
            id: self.id,
            email: self.email,
            password: self.password,
            display_name: Some(self.display_name),
            email_confirmed_date: Some(self.created_date),
            created_date: self.created_date,
            updated_date: self.created_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use crate::{factory::user::AccountFactory, model::user::Account};

    #[sqlx::test]
    async fn test_generate_one_modified(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = AccountFactory::<()>::new();
        factory.modified_one(|data, _| Account {
            email: "asha@local.com".to_string(),
            email_confirmed_date: None,
            ..data.clone()
        });
        let account = factory.generate_one(&pool, ()).await?;

        // Expect
        let res: (String, bool) = sqlx::query_as(
            r#"SELECT email, email_confirmed_date IS NULL FROM public.account WHERE id = $1"#,
        )
        .bind(account.id)
        .fetch_one(&pool)
        .await?;
        assert_eq!(res.0, "asha@local.com".to_string());
        assert!(res.1);
        Ok(())
    }

    #[sqlx::test]
    async fn test_generate_many(pool: PgPool) -> anyhow::Result<()> {
        // When
        let mut factory = AccountFactory::<()>::new();
        factory.modified_many(|data, idx, _| Account {
            email: format!("player{}@local.com", idx),
            ..data.clone()
        });
        factory.generate_many(&pool, 5, ()).await?;

        // Expect
        let num_data: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM public.account"#)
            .fetch_one(&pool)
            .await?;
        assert_eq!(num_data.0, 5);
        Ok(())
    }
}
