use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::{
    schema::{
        club::{ClubResponse, ContactRequest, ContactResponses},
        common::{BadRequestResponse, MessageResponse},
    },
    view::club::{club_content, submit_contact},
};

#[derive(Tags)]
enum ApiClubTags {
    Club,
}

pub struct ApiClub;

#[OpenApi]
impl ApiClub {
    /// Marketing home content. Needs no backend.
    #[oai(path = "/club", method = "get", tag = "ApiClubTags::Club")]
    async fn club_home(&self) -> Json<ClubResponse> {
        Json(club_content())
    }

    #[oai(path = "/club/contact", method = "post", tag = "ApiClubTags::Club")]
    async fn club_contact(&self, json: Json<ContactRequest>) -> ContactResponses {
        match submit_contact(&json) {
            Ok(message) => ContactResponses::Ok(Json(MessageResponse {
                message: message.to_string(),
            })),
            Err(err) => ContactResponses::BadRequest(Json(BadRequestResponse {
                message: err.to_string(),
            })),
        }
    }
}
