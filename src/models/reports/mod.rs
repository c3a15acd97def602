pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{KpiCard, PageKey};
pub use requests::ReportTableQuery;
pub use responses::{PageReport, ReportSummary, TablePage};
