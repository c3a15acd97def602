use serde::Serialize;

/// Business error codes carried in the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,

    InternalServerError = 5000,
    DataLoadFailed = 5001,
    ExportFailed = 5002,
    DatabaseUnavailable = 5003,
}
