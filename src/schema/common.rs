use poem_openapi::Object;
use serde::Deserialize;

use crate::core::error::SERVICE_UNAVAILABLE_MESSAGE;

#[derive(Object, Deserialize)]
pub struct BadRequestResponse {
    pub message: String,
}

#[derive(Object, Deserialize)]
pub struct UnauthorizedResponse {
    pub message: String,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self {
            message: "Unauthorized".to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct ForbiddenResponse {
    pub message: String,
}

#[derive(Object, Deserialize)]
pub struct NotFoundResponse {
    pub message: String,
}

#[derive(Object, Deserialize)]
pub struct ServiceUnavailableResponse {
    pub message: String,
}

impl Default for ServiceUnavailableResponse {
    fn default() -> Self {
        Self {
            message: SERVICE_UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct InternalServerErrorResponse {
    pub module: String,
    pub function: String,
    pub step: String,
    pub message: String,
}

impl InternalServerErrorResponse {
    pub fn new(module: &str, function: &str, step: &str, message: &str) -> Self {
        tracing::error!("{}::{} failed on {}: {}", module, function, step, message);
        Self {
            module: module.to_string(),
            function: function.to_string(),
            step: step.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Adds `from_app_error` to an `ApiResponse` enum carrying the
/// BadRequest, Unauthorized, Forbidden, NotFound, ServiceUnavailable and
/// InternalServerError variants.
macro_rules! app_error_responses {
    ($($responses:ident),+ $(,)?) => {
        $(
            impl $responses {
                pub fn from_app_error(
                    err: $crate::core::error::AppError,
                    module: &str,
                    function: &str,
                    step: &str,
                ) -> Self {
                    use poem_openapi::payload::Json;
                    use $crate::core::error::AppError;
                    use $crate::schema::common::{
                        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse,
                        NotFoundResponse, ServiceUnavailableResponse, UnauthorizedResponse,
                    };
                    match err {
                        AppError::Auth(message) | AppError::Validation(message) => {
                            Self::BadRequest(Json(BadRequestResponse { message }))
                        }
                        AppError::Persistence {
                            message,
                            constraint: true,
                        } => Self::BadRequest(Json(BadRequestResponse { message })),
                        AppError::Unauthorized => {
                            Self::Unauthorized(Json(UnauthorizedResponse::default()))
                        }
                        AppError::Forbidden(message) => {
                            Self::Forbidden(Json(ForbiddenResponse { message }))
                        }
                        AppError::NotFound(message) => {
                            Self::NotFound(Json(NotFoundResponse { message }))
                        }
                        AppError::ServiceUnavailable => {
                            Self::ServiceUnavailable(Json(ServiceUnavailableResponse::default()))
                        }
                        err @ (AppError::Persistence { .. } | AppError::Internal(_)) => {
                            Self::InternalServerError(Json(InternalServerErrorResponse::new(
                                module,
                                function,
                                step,
                                &err.to_string(),
                            )))
                        }
                    }
                }
            }
        )+
    };
}

pub(crate) use app_error_responses;
