use poem_openapi::{payload::Json, ApiResponse, Enum, Object};
use serde::Deserialize;

use super::common::{BadRequestResponse, MessageResponse};

#[derive(Object, Deserialize)]
pub struct TitledText {
    pub title: String,
    pub description: String,
}

#[derive(Object, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub specialty: String,
}

#[derive(Object, Deserialize)]
pub struct ContactDetails {
    pub location: String,
    pub email: String,
    pub social: String,
    pub looking_for: Vec<String>,
}

#[derive(Object, Deserialize)]
pub struct HeroStat {
    pub value: String,
    pub label: String,
}

#[derive(Object, Deserialize)]
pub struct ClubResponse {
    pub name: String,
    pub tagline: String,
    pub founded: String,
    pub hero_stats: Vec<HeroStat>,
    pub story: Vec<String>,
    pub mission: String,
    pub pillars: Vec<TitledText>,
    pub team: Vec<TeamMember>,
    pub achievements: Vec<TitledText>,
    pub international_goals: Vec<String>,
    pub contact: ContactDetails,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Enum, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContactSubject {
    Sponsorship,
    Partnership,
    Join,
    Tournament,
    Other,
}

#[derive(Object, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<ContactSubject>,
    pub message: String,
}

#[derive(ApiResponse)]
pub enum ContactResponses {
    #[oai(status = 200)]
    Ok(Json<MessageResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),
}
