use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use super::common::{
    app_error_responses, BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse,
    NotFoundResponse, ServiceUnavailableResponse, UnauthorizedResponse,
};
use crate::{
    model::profile::{DominantHand, Gender},
    view::medal::Medal,
};

#[derive(Object, Deserialize)]
pub struct ProfileDetail {
    pub id: String,
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
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Object, Deserialize)]
pub struct ResultDetail {
    pub result: String,
    pub medal: Medal,
}

#[derive(Object, Deserialize)]
pub struct TournamentDetail {
    pub id: String,
    pub profile_id: String,
    pub tournament_name: String,
    /// YYYY-MM-DD
    pub tournament_date: Option<String>,
    pub location: Option<String>,
    pub singles_result: Option<ResultDetail>,
    pub doubles_result: Option<ResultDetail>,
    pub mixed_doubles_result: Option<ResultDetail>,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Object, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub dominant_hand: Option<DominantHand>,
    pub dupr_id: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    #[oai(default)]
    pub has_sponsorship: bool,
    pub sponsorship_details: Option<String>,
    pub next_tournament: Option<String>,
}

#[derive(Object, Deserialize)]
pub struct TournamentRequest {
    pub tournament_name: String,
    /// YYYY-MM-DD
    pub tournament_date: Option<String>,
    pub location: Option<String>,
    pub singles_result: Option<String>,
    pub doubles_result: Option<String>,
    pub mixed_doubles_result: Option<String>,
    pub notes: Option<String>,
}

/// State of the profile editor, re-fetched after every write.
#[derive(Object, Deserialize)]
pub struct EditorResponse {
    pub profile: ProfileDetail,
    pub tournaments: Vec<TournamentDetail>,
}

#[derive(Object, Deserialize)]
pub struct EditorMutationResponse {
    pub message: String,
    pub editor: EditorResponse,
}

#[derive(ApiResponse)]
pub enum EditorResponses {
    #[oai(status = 200)]
    Ok(Json<EditorResponse>),

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

#[derive(ApiResponse)]
pub enum EditorMutationResponses {
    #[oai(status = 200)]
    Ok(Json<EditorMutationResponse>),

    #[oai(status = 201)]
    Created(Json<EditorMutationResponse>),

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

app_error_responses!(EditorResponses, EditorMutationResponses);
