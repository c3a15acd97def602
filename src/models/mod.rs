pub mod charts;
pub mod common;
pub mod filters;
pub mod frames;
pub mod navigation;
pub mod reports;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// Process start time, shared with the health endpoint
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
