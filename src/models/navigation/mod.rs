pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{NavPage, NavigationState, SubPage};
pub use requests::NavigationQuery;
pub use responses::{Sidebar, SidebarEntry};
