use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.account";

/// Identity provider account. Its id is the session identity and the profile id.
#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub email_confirmed_date: Option<DateTime<FixedOffset>>,
    pub created_date: DateTime<FixedOffset>,
    pub updated_date: DateTime<FixedOffset>,
}

impl Account {
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_date.is_some()
    }
}
