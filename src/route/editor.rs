use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi, Tags,
};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        error::AppError,
        security::{require_account, BearerAuthorization},
    },
    model::user::Account,
    schema::profile::{
        EditorMutationResponses, EditorResponses, ProfileUpdateRequest, TournamentRequest,
    },
    view::editor::{add_tournament, build_editor, edit_tournament, remove_tournament, save_profile},
    AppState,
};

const MODULE: &str = "route.editor";

/// Opens a transaction and resolves the signed-in account. Errors carry the
/// failing step.
async fn begin_as_owner(
    state: &AppState,
    auth: BearerAuthorization,
) -> Result<(Transaction<'static, Postgres>, Account), (AppError, &'static str)> {
    let backend = state.backend().map_err(|err| (err, "get backend"))?;
    let mut tx = backend
        .db
        .begin()
        .await
        .map_err(|err| (AppError::from(err), "begin transaction"))?;
    let mut redis_conn = backend
        .redis_conn
        .get()
        .map_err(|err| (AppError::from(err), "get redis pool connection"))?;
    let account = require_account(&mut tx, &mut redis_conn, auth.0.token)
        .await
        .map_err(|err| (err, "get account from token"))?;
    Ok((tx, account))
}

fn parse_entry_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("tournament with id = {} not found", id)))
}

#[derive(Tags)]
enum ApiEditorTags {
    Editor,
}

pub struct ApiEditor;

#[OpenApi]
impl ApiEditor {
    /// Own profile and tournament history.
    #[oai(path = "/me/profile", method = "get", tag = "ApiEditorTags::Editor")]
    async fn editor_detail(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> EditorResponses {
        let function = "editor_detail";
        let (mut tx, account) = match begin_as_owner(&state, auth).await {
            Ok(val) => val,
            Err((err, step)) => return EditorResponses::from_app_error(err, MODULE, function, step),
        };
        match build_editor(&mut tx, &account.id).await {
            Ok(val) => EditorResponses::Ok(Json(val)),
            Err(err) => EditorResponses::from_app_error(err, MODULE, function, "build editor"),
        }
    }

    #[oai(path = "/me/profile", method = "put", tag = "ApiEditorTags::Editor")]
    async fn editor_save_profile(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
        json: Json<ProfileUpdateRequest>,
    ) -> EditorMutationResponses {
        let function = "editor_save_profile";
        let (mut tx, account) = match begin_as_owner(&state, auth).await {
            Ok(val) => val,
            Err((err, step)) => {
                return EditorMutationResponses::from_app_error(err, MODULE, function, step)
            }
        };
        let res = match save_profile(&mut tx, &account.id, json.0).await {
            Ok(val) => val,
            Err(err) => {
                return EditorMutationResponses::from_app_error(
                    err,
                    MODULE,
                    function,
                    "save profile",
                )
            }
        };
        if let Err(err) = tx.commit().await {
            return EditorMutationResponses::from_app_error(
                err.into(),
                MODULE,
                function,
                "commit to database",
            );
        }
        EditorMutationResponses::Ok(Json(res))
    }

    #[oai(path = "/me/tournaments", method = "post", tag = "ApiEditorTags::Editor")]
    async fn editor_add_tournament(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
        json: Json<TournamentRequest>,
    ) -> EditorMutationResponses {
        let function = "editor_add_tournament";
        let (mut tx, account) = match begin_as_owner(&state, auth).await {
            Ok(val) => val,
            Err((err, step)) => {
                return EditorMutationResponses::from_app_error(err, MODULE, function, step)
            }
        };
        let res = match add_tournament(&mut tx, &account.id, json.0).await {
            Ok(val) => val,
            Err(err) => {
                return EditorMutationResponses::from_app_error(
                    err,
                    MODULE,
                    function,
                    "add tournament",
                )
            }
        };
        if let Err(err) = tx.commit().await {
            return EditorMutationResponses::from_app_error(
                err.into(),
                MODULE,
                function,
                "commit to database",
            );
        }
        EditorMutationResponses::Created(Json(res))
    }

    #[oai(
        path = "/me/tournaments/:id",
        method = "put",
        tag = "ApiEditorTags::Editor"
    )]
    async fn editor_update_tournament(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
        Path(id): Path<String>,
        json: Json<TournamentRequest>,
    ) -> EditorMutationResponses {
        let function = "editor_update_tournament";
        let (mut tx, account) = match begin_as_owner(&state, auth).await {
            Ok(val) => val,
            Err((err, step)) => {
                return EditorMutationResponses::from_app_error(err, MODULE, function, step)
            }
        };
        let entry_id = match parse_entry_id(&id) {
            Ok(val) => val,
            Err(err) => {
                return EditorMutationResponses::from_app_error(err, MODULE, function, "parse id")
            }
        };
        let res = match edit_tournament(&mut tx, &account.id, &entry_id, json.0).await {
            Ok(val) => val,
            Err(err) => {
                return EditorMutationResponses::from_app_error(
                    err,
                    MODULE,
                    function,
                    "update tournament",
                )
            }
        };
        if let Err(err) = tx.commit().await {
            return EditorMutationResponses::from_app_error(
                err.into(),
                MODULE,
                function,
                "commit to database",
            );
        }
        EditorMutationResponses::Ok(Json(res))
    }

    /// Hard delete; requires `confirm=true`.
    #[oai(
        path = "/me/tournaments/:id",
        method = "delete",
        tag = "ApiEditorTags::Editor"
    )]
    async fn editor_delete_tournament(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
        Path(id): Path<String>,
        Query(confirm): Query<Option<bool>>,
    ) -> EditorMutationResponses {
        let function = "editor_delete_tournament";
        let (mut tx, account) = match begin_as_owner(&state, auth).await {
            Ok(val) => val,
            Err((err, step)) => {
                return EditorMutationResponses::from_app_error(err, MODULE, function, step)
            }
        };
        let entry_id = match parse_entry_id(&id) {
            Ok(val) => val,
            Err(err) => {
                return EditorMutationResponses::from_app_error(err, MODULE, function, "parse id")
            }
        };
        let res = match remove_tournament(
            &mut tx,
            &account.id,
            &entry_id,
            confirm.unwrap_or(false),
        )
        .await
        {
            Ok(val) => val,
            Err(err) => {
                return EditorMutationResponses::from_app_error(
                    err,
                    MODULE,
                    function,
                    "delete tournament",
                )
            }
        };
        if let Err(err) = tx.commit().await {
            return EditorMutationResponses::from_app_error(
                err.into(),
                MODULE,
                function,
                "commit to database",
            );
        }
        EditorMutationResponses::Ok(Json(res))
    }
}
