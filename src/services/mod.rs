pub mod navigation;
pub mod reports;
pub mod system;

pub use navigation::NavigationService;
pub use reports::ReportService;
pub use system::SystemService;
