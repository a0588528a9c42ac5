use poem_openapi::{payload::Json, ApiResponse, Enum, Object};
use serde::Deserialize;

use super::{
    common::{
        app_error_responses, BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse, UnauthorizedResponse,
    },
    profile::{ProfileDetail, TournamentDetail},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Enum, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DirectoryFilter {
    #[default]
    All,
    Sponsored,
    Upcoming,
}

#[derive(Object, Deserialize)]
pub struct PlayerSummary {
    pub profile: ProfileDetail,
    pub tournament_count: i64,
    pub latest_tournaments: Vec<TournamentDetail>,
}

#[derive(Object, Deserialize)]
pub struct DirectoryStats {
    pub total_players: u32,
    pub sponsored_count: u32,
    pub upcoming_count: u32,
}

#[derive(Object, Deserialize)]
pub struct UpcomingTournament {
    pub player_id: String,
    pub player_name: String,
    pub tournament: String,
    pub city: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct DirectoryResponse {
    /// computed over every listed player, before search and filter
    pub stats: DirectoryStats,
    pub upcoming_tournaments: Vec<UpcomingTournament>,
    pub players: Vec<PlayerSummary>,
}

#[derive(ApiResponse)]
pub enum DirectoryResponses {
    #[oai(status = 200)]
    Ok(Json<DirectoryResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 503)]
    ServiceUnavailable(Json<ServiceUnavailableResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize)]
pub struct PlayerDetailResponse {
    pub profile: ProfileDetail,
    pub tournaments: Vec<TournamentDetail>,
    pub singles_results: u32,
    pub doubles_results: u32,
    pub mixed_results: u32,
}

#[allow(clippy::large_enum_variant)]
#[derive(ApiResponse)]
pub enum PlayerDetailResponses {
    #[oai(status = 200)]
    Ok(Json<PlayerDetailResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 403)]
    Forbidden(Json<ForbiddenResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 503)]
    ServiceUnavailable(Json<ServiceUnavailableResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

app_error_responses!(DirectoryResponses, PlayerDetailResponses);
