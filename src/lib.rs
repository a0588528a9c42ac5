use std::sync::Arc;

use poem::{
    middleware::{AddData, AddDataEndpoint, Cors, CorsEndpoint},
    EndpointExt, Route,
};
use poem_openapi::OpenApiService;
use r2d2::Pool as r2d2Pool;
use redis::Client;
use route::{auth::ApiAuth, club::ApiClub, editor::ApiEditor, player::ApiPlayer};
use settings::Config;
use sqlx::{Pool, Postgres};

use crate::core::{
    error::{AppError, AppResult},
    identity::AuthEvents,
};

pub mod cli;
pub mod core;
pub mod factory;
pub mod model;
pub mod repository;
pub mod route;
pub mod schema;
pub mod settings;
pub mod view;

/// Table storage and session store.
pub struct Backend {
    pub db: Pool<Postgres>,
    pub redis_conn: r2d2Pool<Client>,
}

pub struct AppState {
    /// `None` when no backend is configured or reachable
    pub backend: Option<Backend>,
    pub config: Config,
    pub auth_events: AuthEvents,
}

impl AppState {
    pub fn new(backend: Option<Backend>, config: Config) -> Self {
        Self {
            backend,
            config,
            auth_events: AuthEvents::new(),
        }
    }

    pub fn backend(&self) -> AppResult<&Backend> {
        self.backend.as_ref().ok_or(AppError::ServiceUnavailable)
    }
}

pub fn init_openapi_route(
    app_state: Arc<AppState>,
    config: &Config,
) -> CorsEndpoint<AddDataEndpoint<Route, Arc<AppState>>> {
    let prefix = config.prefix.clone().unwrap_or("/".to_string());
    let openapi_route = OpenApiService::new(
        (ApiClub, ApiAuth, ApiPlayer, ApiEditor),
        "The Dink Syndicate",
        "1.0",
    )
    .server(prefix.clone());
    let openapi_json_endpoint = openapi_route.spec_endpoint();
    let ui = openapi_route.swagger_ui();
    Route::new()
        .nest(prefix, openapi_route)
        .nest("/docs", ui)
        .at("openapi.json", openapi_json_endpoint)
        .with(AddData::new(app_state))
        .with(Cors::new())
}
