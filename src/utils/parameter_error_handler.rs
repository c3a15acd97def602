use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// Malformed JSON bodies answer 400 inside the usual envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("Rejected JSON payload on {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        other => format!("Invalid JSON payload: {other}"),
    };
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

/// Malformed query strings answer 400 inside the usual envelope
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Rejected query string on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
