use std::sync::Arc;

use chrono::{Duration, Local};
use poem::web::Data;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::{
    core::{
        identity::{
            confirm_email, issue_confirmation, refresh, sign_in, sign_out, sign_up, SignInOutcome,
        },
        security::{get_account_from_token, BearerAuthorization},
        utils::datetime_to_string,
    },
    schema::{
        auth::{
            ConfirmEmailRequest, ConfirmEmailResponses, CurrentUser, CurrentUserResponse,
            CurrentUserResponses, LoginRequest, LoginResponses, LogoutResponses,
            RefreshTokenRequest, RefreshTokenResponses, SignUpRequest, SignUpResponse,
            SignUpResponses, TokenResponse,
        },
        common::{MessageResponse, UnauthorizedResponse},
    },
    settings::Config,
    AppState,
};

const MODULE: &str = "route.auth";

/// Where the client goes after signing in.
pub const SIGNED_IN_REDIRECT: &str = "/me/profile";

fn token_response(outcome: SignInOutcome, config: &Config) -> TokenResponse {
    let now = Local::now().fixed_offset();
    let exp = now + Duration::minutes(config.jwt_exp as i64);
    let exp_refresh_token = now + Duration::minutes(config.jwt_refresh_exp as i64);
    TokenResponse {
        exp: datetime_to_string(exp),
        exp_in: config.jwt_exp as i64 * 60,
        exp_refresh_token: datetime_to_string(exp_refresh_token),
        refresh_token: outcome.refresh_token,
        token: outcome.token,
        token_type: "Bearer".to_string(),
        redirect_to: SIGNED_IN_REDIRECT.to_string(),
    }
}

#[derive(Tags)]
enum ApiAuthTags {
    Auth,
}

pub struct ApiAuth;

#[OpenApi]
impl ApiAuth {
    #[oai(path = "/auth/sign-up", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_sign_up(
        &self,
        json: Json<SignUpRequest>,
        state: Data<&Arc<AppState>>,
    ) -> SignUpResponses {
        let function = "auth_sign_up";
        let backend = match state.backend() {
            Ok(val) => val,
            Err(err) => return SignUpResponses::from_app_error(err, MODULE, function, "get backend"),
        };

        // Begin db transaction
        let mut tx = match backend.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return SignUpResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "begin transaction",
                )
            }
        };

        // get redis conn from pool
        let mut redis_conn = match backend.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return SignUpResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "get redis pool connection",
                )
            }
        };

        let account = match sign_up(
            &mut tx,
            &state.config,
            &json.email,
            &json.password,
            &json.name,
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return SignUpResponses::from_app_error(err, MODULE, function, "sign up"),
        };

        if let Err(err) = tx.commit().await {
            return SignUpResponses::from_app_error(
                err.into(),
                MODULE,
                function,
                "commit to database",
            );
        }

        let confirmation_token =
            match issue_confirmation(&mut redis_conn, &state.config, &account) {
                Ok(val) => val,
                Err(err) => {
                    return SignUpResponses::from_app_error(
                        err,
                        MODULE,
                        function,
                        "issue confirmation",
                    )
                }
            };
        let message = match &confirmation_token {
            Some(token) => {
                tracing::info!("confirmation token for {}: {}", account.email, token);
                "Check your email for the confirmation link."
            }
            None => "Account created. You can sign in now.",
        };
        SignUpResponses::Created(Json(SignUpResponse {
            id: account.id.to_string(),
            email: account.email,
            confirmation_required: confirmation_token.is_some(),
            message: message.to_string(),
        }))
    }

    #[oai(
        path = "/auth/confirm-email",
        method = "post",
        tag = "ApiAuthTags::Auth"
    )]
    async fn auth_confirm_email(
        &self,
        json: Json<ConfirmEmailRequest>,
        state: Data<&Arc<AppState>>,
    ) -> ConfirmEmailResponses {
        let function = "auth_confirm_email";
        let backend = match state.backend() {
            Ok(val) => val,
            Err(err) => {
                return ConfirmEmailResponses::from_app_error(err, MODULE, function, "get backend")
            }
        };
        let mut tx = match backend.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return ConfirmEmailResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "begin transaction",
                )
            }
        };
        let mut redis_conn = match backend.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return ConfirmEmailResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "get redis pool connection",
                )
            }
        };

        if let Err(err) = confirm_email(&mut tx, &mut redis_conn, json.token.trim()).await {
            return ConfirmEmailResponses::from_app_error(err, MODULE, function, "confirm email");
        }
        if let Err(err) = tx.commit().await {
            return ConfirmEmailResponses::from_app_error(
                err.into(),
                MODULE,
                function,
                "commit to database",
            );
        }
        ConfirmEmailResponses::Ok(Json(MessageResponse {
            message: "Email confirmed. You can sign in now.".to_string(),
        }))
    }

    #[oai(path = "/auth/login", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_login(
        &self,
        json: Json<LoginRequest>,
        state: Data<&Arc<AppState>>,
    ) -> LoginResponses {
        let function = "auth_login";
        let backend = match state.backend() {
            Ok(val) => val,
            Err(err) => return LoginResponses::from_app_error(err, MODULE, function, "get backend"),
        };
        let mut tx = match backend.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "begin transaction",
                )
            }
        };
        let mut redis_conn = match backend.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return LoginResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "get redis pool connection",
                )
            }
        };

        let outcome = match sign_in(
            &mut tx,
            &mut redis_conn,
            &state.config,
            &state.auth_events,
            &json.email,
            &json.password,
        )
        .await
        {
            Ok(val) => val,
            Err(err) => return LoginResponses::from_app_error(err, MODULE, function, "sign in"),
        };
        LoginResponses::Ok(Json(token_response(outcome, &state.config)))
    }

    #[oai(
        path = "/auth/refresh-token",
        method = "post",
        tag = "ApiAuthTags::Auth"
    )]
    async fn auth_refresh_token(
        &self,
        json: Json<RefreshTokenRequest>,
        state: Data<&Arc<AppState>>,
    ) -> RefreshTokenResponses {
        let function = "auth_refresh_token";
        let backend = match state.backend() {
            Ok(val) => val,
            Err(err) => {
                return RefreshTokenResponses::from_app_error(err, MODULE, function, "get backend")
            }
        };
        let mut tx = match backend.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return RefreshTokenResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "begin transaction",
                )
            }
        };
        let mut redis_conn = match backend.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return RefreshTokenResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "get redis pool connection",
                )
            }
        };

        let outcome = match refresh(
            &mut tx,
            &mut redis_conn,
            &state.config,
            &state.auth_events,
            &json.refresh_token,
        )
        .await
        {
            Ok(Some(val)) => val,
            Ok(None) => {
                return RefreshTokenResponses::Unauthorized(Json(UnauthorizedResponse::default()))
            }
            Err(err) => {
                return RefreshTokenResponses::from_app_error(err, MODULE, function, "refresh")
            }
        };
        RefreshTokenResponses::Ok(Json(token_response(outcome, &state.config)))
    }

    #[oai(path = "/auth/logout", method = "post", tag = "ApiAuthTags::Auth")]
    async fn auth_logout(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> LogoutResponses {
        let function = "auth_logout";
        let backend = match state.backend() {
            Ok(val) => val,
            Err(err) => return LogoutResponses::from_app_error(err, MODULE, function, "get backend"),
        };
        let mut redis_conn = match backend.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return LogoutResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "get redis pool connection",
                )
            }
        };

        let Some(jwt_token) = auth.0.token else {
            return LogoutResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        };
        match sign_out(&mut redis_conn, &state.auth_events, &jwt_token) {
            Ok(true) => LogoutResponses::NoContent,
            Ok(false) => LogoutResponses::Unauthorized(Json(UnauthorizedResponse::default())),
            Err(err) => LogoutResponses::from_app_error(err, MODULE, function, "sign out"),
        }
    }

    /// Resolves the bearer token to its account. A token without a live
    /// session yields `user: null`.
    #[oai(path = "/auth/me", method = "get", tag = "ApiAuthTags::Auth")]
    async fn auth_current_user(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> CurrentUserResponses {
        let function = "auth_current_user";
        let backend = match state.backend() {
            Ok(val) => val,
            Err(err) => {
                return CurrentUserResponses::from_app_error(err, MODULE, function, "get backend")
            }
        };
        let mut tx = match backend.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return CurrentUserResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "begin transaction",
                )
            }
        };
        let mut redis_conn = match backend.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return CurrentUserResponses::from_app_error(
                    err.into(),
                    MODULE,
                    function,
                    "get redis pool connection",
                )
            }
        };

        let account = match get_account_from_token(&mut tx, &mut redis_conn, auth.0.token).await {
            Ok(val) => val,
            Err(err) => {
                return CurrentUserResponses::from_app_error(
                    err,
                    MODULE,
                    function,
                    "get account from token",
                )
            }
        };
        CurrentUserResponses::Ok(Json(CurrentUserResponse {
            user: account.map(|x| CurrentUser {
                id: x.id.to_string(),
                email_confirmed: x.is_confirmed(),
                email: x.email,
                display_name: x.display_name,
            }),
        }))
    }
}
