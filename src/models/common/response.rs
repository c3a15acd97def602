use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::DashboardError;
use crate::models::ErrorCode;

// Response envelope shared by every API route
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Maps a crate error to an HTTP response with the matching status
    pub fn from_error(err: &DashboardError) -> HttpResponse {
        match err {
            DashboardError::NotFound(msg) => {
                HttpResponse::NotFound().json(Self::error_empty(ErrorCode::NotFound, msg.clone()))
            }
            DashboardError::Validation(msg) => HttpResponse::BadRequest()
                .json(Self::error_empty(ErrorCode::ValidationFailed, msg.clone())),
            DashboardError::DataLoad(msg)
            | DashboardError::DatabaseOperation(msg)
            | DashboardError::DatabaseConnection(msg) => HttpResponse::InternalServerError().json(
                Self::error_empty(ErrorCode::DataLoadFailed, format!("Error loading data: {msg}")),
            ),
            DashboardError::Export(msg) => HttpResponse::InternalServerError()
                .json(Self::error_empty(ErrorCode::ExportFailed, msg.clone())),
            other => HttpResponse::InternalServerError().json(Self::error_empty(
                ErrorCode::InternalServerError,
                other.format_simple(),
            )),
        }
    }
}
