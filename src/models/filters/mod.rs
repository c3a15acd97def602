pub mod requests;
pub mod responses;

pub use requests::{DateRange, FilterSelection};
pub use responses::{DateBounds, FilterOption, FilterPanel, FilterState};
