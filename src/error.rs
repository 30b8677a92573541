/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / AuthError / CacheError / domain error を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;
use crate::services::cache::CacheError;
use crate::services::favorite::FavoriteError;
use crate::services::subway::{PathError, SectionError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("{code}: {message}")]
    Conflict { code: &'static str, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::BadRequest { code, message } => (code, message),
            AppError::NotFound { resource } => ("NOT_FOUND", format!("{resource} not found.")),
            AppError::Conflict { code, message } => (code, message),
            AppError::Unauthorized => ("UNAUTHORIZED", "unauthorized".into()),
            AppError::Forbidden => ("FORBIDDEN", "forbidden".into()),
            AppError::Internal => ("INTERNAL_SERVER_ERROR", "internal server error".into()),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::conflict("CONFLICT", "resource already exists"),
            RepoError::Db(err) => {
                tracing::error!(error = ?err, "database error");
                AppError::Internal
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            // どちらも同じ 401 にする (email の存在を漏らさない)
            AuthError::InvalidCredentials | AuthError::UserNotFound => AppError::Unauthorized,
            AuthError::Repo(err) => err.into(),
            AuthError::Session(err) => err.into(),
            AuthError::Password(err) => {
                tracing::error!(error = ?err, "password hashing failed");
                AppError::Internal
            }
            AuthError::Token(err) => {
                tracing::error!(error = ?err, "token signing failed");
                AppError::Internal
            }
        }
    }
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        tracing::error!(error = ?e, "session store error");
        AppError::Internal
    }
}

impl From<SectionError> for AppError {
    fn from(e: SectionError) -> Self {
        let code = match e {
            SectionError::StationNotFound => "STATION_NOT_FOUND",
            SectionError::SameStation => "SAME_STATION",
            SectionError::InvalidDistance => "INVALID_DISTANCE",
            SectionError::AlreadyRegistered => "SECTION_ALREADY_REGISTERED",
            SectionError::NotConnected => "SECTION_NOT_CONNECTED",
            SectionError::StationNotOnLine => "STATION_NOT_ON_LINE",
            SectionError::LastSection => "LAST_SECTION",
        };
        AppError::bad_request(code, e.to_string())
    }
}

impl From<PathError> for AppError {
    fn from(e: PathError) -> Self {
        let code = match e {
            PathError::StationNotFound => "STATION_NOT_FOUND",
            PathError::SameStation => "SAME_STATION",
            PathError::Unconnected => "UNCONNECTED_STATIONS",
        };
        AppError::bad_request(code, e.to_string())
    }
}

impl From<FavoriteError> for AppError {
    fn from(e: FavoriteError) -> Self {
        match e {
            FavoriteError::InvalidRoute(err) => err.into(),
            FavoriteError::NotFound => AppError::not_found("favorite"),
            FavoriteError::NotOwner => AppError::Forbidden,
            FavoriteError::Repo(err) => err.into(),
        }
    }
}
