use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use uuid::Uuid;

use crate::{
    core::error::AppError,
    schema::player::{DirectoryFilter, DirectoryResponses, PlayerDetailResponses},
    view::{directory::build_directory, player::build_player_detail},
    AppState,
};

const MODULE: &str = "route.player";

#[derive(Tags)]
enum ApiPlayerTags {
    Player,
}

pub struct ApiPlayer;

#[OpenApi]
impl ApiPlayer {
    /// Public players directory.
    #[oai(path = "/players", method = "get", tag = "ApiPlayerTags::Player")]
    async fn player_directory(
        &self,
        state: Data<&Arc<AppState>>,
        Query(search): Query<Option<String>>,
        Query(filter): Query<Option<DirectoryFilter>>,
    ) -> DirectoryResponses {
        let function = "player_directory";
        let backend = match state.backend() {
            Ok(val) => val,
            Err(err) => {
                return DirectoryResponses::from_app_error(err, MODULE, function, "get backend")
            }
        };
        let mut tx = match backend.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return DirectoryResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "begin transaction",
                )
            }
        };
        match build_directory(&mut tx, search.as_deref(), filter.unwrap_or_default()).await {
            Ok(val) => DirectoryResponses::Ok(Json(val)),
            Err(err) => {
                DirectoryResponses::from_app_error(err, MODULE, function, "build directory")
            }
        }
    }

    #[oai(path = "/players/:id", method = "get", tag = "ApiPlayerTags::Player")]
    async fn player_detail(
        &self,
        state: Data<&Arc<AppState>>,
        Path(id): Path<String>,
    ) -> PlayerDetailResponses {
        let function = "player_detail";
        let backend = match state.backend() {
            Ok(val) => val,
            Err(err) => {
                return PlayerDetailResponses::from_app_error(err, MODULE, function, "get backend")
            }
        };
        let Ok(id) = Uuid::parse_str(&id) else {
            return PlayerDetailResponses::from_app_error(
                AppError::NotFound(format!("profile with id = {} not found", id)),
                MODULE,
                function,
                "parse id",
            );
        };
        let mut tx = match backend.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return PlayerDetailResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "begin transaction",
                )
            }
        };
        match build_player_detail(&mut tx, &id).await {
            Ok(val) => PlayerDetailResponses::Ok(Json(val)),
            Err(err) => {
                PlayerDetailResponses::from_app_error(err, MODULE, function, "build player detail")
            }
        }
    }
}
