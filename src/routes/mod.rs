pub mod frontend;

pub mod navigation;

pub mod reports;

pub mod system;

pub use frontend::configure_frontend_routes;
pub use navigation::configure_navigation_routes;
pub use reports::configure_reports_routes;
pub use system::configure_system_routes;
