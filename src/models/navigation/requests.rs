use serde::Deserialize;
use ts_rs::TS;

use super::entities::{NavPage, SubPage};

// Sidebar query string
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct NavigationQuery {
    pub page: Option<NavPage>,
    pub subpage: Option<SubPage>,
}
