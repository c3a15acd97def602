use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::NavigationState;
use crate::models::reports::PageKey;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct SidebarEntry {
    pub key: String,
    pub title: String,
    pub selected: bool,
    pub subpages: Vec<SidebarEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct Sidebar {
    pub state: NavigationState,
    pub pages: Vec<SidebarEntry>,
    pub active_report: Option<PageKey>,
    pub back_label: Option<String>,
}
