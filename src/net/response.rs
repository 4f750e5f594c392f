use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::RouteError;

pub struct ResponseError(Response);

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        self.0
    }
}

impl From<RouteError> for ResponseError {
    fn from(value: RouteError) -> Self {
        let status = match value {
            RouteError::DegenerateRoute => StatusCode::BAD_REQUEST,
            RouteError::UnknownLocality(_) => StatusCode::NOT_FOUND,
            RouteError::RemoteQuery(_) | RouteError::ResponseParse(_) => StatusCode::BAD_GATEWAY,
            RouteError::PersistenceWrite { .. } | RouteError::PersistenceRead { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::with_status(status, value.to_string())
    }
}

impl From<color_eyre::eyre::Error> for ResponseError {
    fn from(value: color_eyre::eyre::Error) -> Self {
        Self::internal_server_error(value.to_string())
    }
}

impl ResponseError {
    pub fn with_status<T>(status_code: StatusCode, data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((status_code, data).into_response())
    }

    pub fn internal_server_error<T>(data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((StatusCode::INTERNAL_SERVER_ERROR, data).into_response())
    }

    pub fn not_found<T>(data: T) -> Self
    where
        (StatusCode, T): IntoResponse,
    {
        ResponseError((StatusCode::NOT_FOUND, data).into_response())
    }
}

pub type Result<T, E = ResponseError> = axum::response::Result<T, E>;
