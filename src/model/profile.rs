use chrono::{DateTime, FixedOffset};
use fake::Dummy;
use poem_openapi::Enum;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.profiles";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Dummy, Enum, sqlx::Type)]
#[sqlx(type_name = "gender")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Prefer not to say")]
    #[oai(rename = "Prefer not to say")]
    #[sqlx(rename = "Prefer not to say")]
    PreferNotToSay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Dummy, Enum, sqlx::Type)]
#[sqlx(type_name = "dominant_hand")]
pub enum DominantHand {
    Right,
    Left,
    Ambidextrous,
}

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub dominant_hand: Option<DominantHand>,
    pub dupr_id: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub has_sponsorship: bool,
    pub sponsorship_details: Option<String>,
    pub next_tournament: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// Fields the owner may overwrite from the profile editor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileFields {
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub dominant_hand: Option<DominantHand>,
    pub dupr_id: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub has_sponsorship: bool,
    pub sponsorship_details: Option<String>,
    pub next_tournament: Option<String>,
}

impl ProfileFields {
    /// Sponsorship details only exist alongside the sponsorship flag.
    pub fn normalized(mut self) -> Self {
        if !self.has_sponsorship {
            self.sponsorship_details = None;
        }
        self
    }
}
