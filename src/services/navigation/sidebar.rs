use actix_web::{HttpResponse, Result as ActixResult};

use crate::errors::{DashboardError, Result};
use crate::models::ApiResponse;
use crate::models::navigation::{
    NavPage, NavigationQuery, NavigationState, Sidebar, SidebarEntry,
};

/// Resolves the query into a navigation state.
/// A sub-page alone selects its parent page as well.
pub fn resolve_state(query: &NavigationQuery) -> Result<NavigationState> {
    let mut state = NavigationState::default();
    let page = match (query.page, query.subpage) {
        (Some(page), _) => page,
        (None, Some(subpage)) => subpage.parent(),
        (None, None) => NavPage::default(),
    };
    state.select_page(page);
    if let Some(subpage) = query.subpage {
        state
            .select_subpage(subpage)
            .map_err(DashboardError::validation)?;
    }
    Ok(state)
}

pub fn build_sidebar(state: NavigationState) -> Sidebar {
    let pages = NavPage::all()
        .iter()
        .map(|page| {
            let selected = *page == state.page;
            // only the selected page expands its sub-pages
            let subpages = if selected {
                page.subpages()
                    .iter()
                    .map(|sub| SidebarEntry {
                        key: sub.as_str().to_string(),
                        title: sub.title().to_string(),
                        selected: state.subpage == Some(*sub),
                        subpages: Vec::new(),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            SidebarEntry {
                key: page.as_str().to_string(),
                title: page.title().to_string(),
                selected,
                subpages,
            }
        })
        .collect();

    Sidebar {
        state,
        pages,
        active_report: state.active_report(),
        back_label: state.back_label(),
    }
}

pub async fn get_sidebar(query: NavigationQuery) -> ActixResult<HttpResponse> {
    match resolve_state(&query) {
        Ok(state) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            build_sidebar(state),
            "Navigation retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::navigation::SubPage;
    use crate::models::reports::PageKey;

    #[test]
    fn test_default_sidebar() {
        let sidebar = build_sidebar(resolve_state(&NavigationQuery::default()).unwrap());
        assert_eq!(sidebar.pages.len(), 5);
        assert!(sidebar.pages[0].selected);
        assert!(sidebar.pages.iter().all(|p| p.subpages.is_empty()));
        assert_eq!(sidebar.active_report, Some(PageKey::Home));
        assert_eq!(sidebar.back_label, None);
    }

    #[test]
    fn test_subpage_selects_its_parent() {
        let query = NavigationQuery {
            page: None,
            subpage: Some(SubPage::Partner),
        };
        let sidebar = build_sidebar(resolve_state(&query).unwrap());
        let tvetsms = &sidebar.pages[1];
        assert!(tvetsms.selected);
        assert_eq!(tvetsms.subpages.len(), 3);
        assert!(tvetsms.subpages[2].selected);
        assert_eq!(sidebar.active_report, Some(PageKey::Partner));
        assert!(sidebar.back_label.is_some());
    }

    #[test]
    fn test_mismatched_subpage_is_rejected() {
        let query = NavigationQuery {
            page: Some(NavPage::Erpl),
            subpage: Some(SubPage::Staff),
        };
        let err = resolve_state(&query).unwrap_err();
        assert_eq!(err.code(), "E007");
    }
}
