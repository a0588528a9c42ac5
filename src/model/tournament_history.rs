use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.tournament_history";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct TournamentHistory {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub tournament_name: String,
    pub tournament_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub singles_result: Option<String>,
    pub doubles_result: Option<String>,
    pub mixed_doubles_result: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

/// Writable columns of a tournament entry; updates overwrite all of them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TournamentFields {
    pub tournament_name: String,
    pub tournament_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub singles_result: Option<String>,
    pub doubles_result: Option<String>,
    pub mixed_doubles_result: Option<String>,
    pub notes: Option<String>,
}
