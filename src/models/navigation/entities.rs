use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::reports::PageKey;

// Top-level sidebar pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub enum NavPage {
    #[default]
    Home,
    Tvetsms,
    Tvet15m,
    Erpl,
    Elearning,
}

// Sub-pages nested under a top-level page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub enum SubPage {
    Staff,
    Teacher,
    Partner,
    Internship,
    Graduated,
}

impl NavPage {
    pub fn all() -> &'static [NavPage] {
        &[
            NavPage::Home,
            NavPage::Tvetsms,
            NavPage::Tvet15m,
            NavPage::Erpl,
            NavPage::Elearning,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavPage::Home => "home",
            NavPage::Tvetsms => "tvetsms",
            NavPage::Tvet15m => "tvet15m",
            NavPage::Erpl => "erpl",
            NavPage::Elearning => "elearning",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            NavPage::Home => "ទំព័រដើម",
            NavPage::Tvetsms => "កម្មវិធី TVETMIS",
            NavPage::Tvet15m => "កម្មវិធី TVET 1.5M",
            NavPage::Erpl => "ERPL",
            NavPage::Elearning => "TVET E-LEARNING",
        }
    }

    pub fn subpages(&self) -> &'static [SubPage] {
        match self {
            NavPage::Tvetsms => &[SubPage::Staff, SubPage::Teacher, SubPage::Partner],
            NavPage::Tvet15m => &[SubPage::Internship, SubPage::Graduated],
            _ => &[],
        }
    }

    /// Report rendered when no sub-page is selected
    pub fn report(&self) -> Option<PageKey> {
        match self {
            NavPage::Home => Some(PageKey::Home),
            NavPage::Tvetsms => Some(PageKey::Tvetsms),
            NavPage::Tvet15m => Some(PageKey::Tvet15m),
            NavPage::Erpl => Some(PageKey::Erpl),
            NavPage::Elearning => None,
        }
    }
}

impl SubPage {
    pub fn all() -> &'static [SubPage] {
        &[
            SubPage::Staff,
            SubPage::Teacher,
            SubPage::Partner,
            SubPage::Internship,
            SubPage::Graduated,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        self.report().as_str()
    }

    pub fn title(&self) -> &'static str {
        match self {
            SubPage::Staff => "មន្រ្តីបម្រើការ",
            SubPage::Teacher => "សាស្រ្តាចារ្យ",
            SubPage::Partner => "ដៃគូសហការ",
            SubPage::Internship => "សិស្សចុះកម្មសិក្សា",
            SubPage::Graduated => "បានបញ្ចប់ការសិក្សា",
        }
    }

    pub fn parent(&self) -> NavPage {
        match self {
            SubPage::Staff | SubPage::Teacher | SubPage::Partner => NavPage::Tvetsms,
            SubPage::Internship | SubPage::Graduated => NavPage::Tvet15m,
        }
    }

    pub fn report(&self) -> PageKey {
        match self {
            SubPage::Staff => PageKey::Staff,
            SubPage::Teacher => PageKey::Teacher,
            SubPage::Partner => PageKey::Partner,
            SubPage::Internship => PageKey::Internship,
            SubPage::Graduated => PageKey::Graduated,
        }
    }
}

impl std::str::FromStr for NavPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NavPage::all()
            .iter()
            .find(|page| page.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown page: {s}"))
    }
}

impl std::str::FromStr for SubPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubPage::all()
            .iter()
            .find(|sub| sub.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown sub-page: {s}"))
    }
}

impl<'de> Deserialize<'de> for NavPage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for SubPage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sidebar selection: a page and optionally one of its sub-pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct NavigationState {
    pub page: NavPage,
    pub subpage: Option<SubPage>,
}

impl NavigationState {
    /// Switching to another page drops the sub-page
    pub fn select_page(&mut self, page: NavPage) {
        if self.page != page {
            self.page = page;
            self.subpage = None;
        }
    }

    pub fn select_subpage(&mut self, subpage: SubPage) -> Result<(), String> {
        if subpage.parent() != self.page {
            return Err(format!(
                "Sub-page '{}' does not belong to page '{}'",
                subpage.as_str(),
                self.page.as_str()
            ));
        }
        self.subpage = Some(subpage);
        Ok(())
    }

    pub fn back(&mut self) {
        self.subpage = None;
    }

    pub fn active_report(&self) -> Option<PageKey> {
        match self.subpage {
            Some(subpage) => Some(subpage.report()),
            None => self.page.report(),
        }
    }

    /// Label of the button returning to the parent page
    pub fn back_label(&self) -> Option<String> {
        self.subpage
            .map(|sub| format!("⬅️ត្រឡប់ទៅកាន់ {}", sub.parent().title()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_home() {
        let state = NavigationState::default();
        assert_eq!(state.page, NavPage::Home);
        assert_eq!(state.subpage, None);
        assert_eq!(state.active_report(), Some(PageKey::Home));
    }

    #[test]
    fn test_page_change_resets_subpage() {
        let mut state = NavigationState::default();
        state.select_page(NavPage::Tvetsms);
        state.select_subpage(SubPage::Teacher).unwrap();
        assert_eq!(state.active_report(), Some(PageKey::Teacher));

        state.select_page(NavPage::Tvetsms);
        assert_eq!(state.subpage, Some(SubPage::Teacher));

        state.select_page(NavPage::Tvet15m);
        assert_eq!(state.subpage, None);
        assert_eq!(state.active_report(), Some(PageKey::Tvet15m));
    }

    #[test]
    fn test_subpage_must_match_parent() {
        let mut state = NavigationState::default();
        assert!(state.select_subpage(SubPage::Staff).is_err());

        state.select_page(NavPage::Tvet15m);
        assert!(state.select_subpage(SubPage::Partner).is_err());
        assert!(state.select_subpage(SubPage::Graduated).is_ok());
    }

    #[test]
    fn test_back_clears_subpage() {
        let mut state = NavigationState::default();
        state.select_page(NavPage::Tvet15m);
        state.select_subpage(SubPage::Internship).unwrap();
        assert!(state.back_label().unwrap().contains("កម្មវិធី TVET 1.5M"));

        state.back();
        assert_eq!(state.page, NavPage::Tvet15m);
        assert_eq!(state.subpage, None);
        assert_eq!(state.back_label(), None);
    }

    #[test]
    fn test_elearning_has_no_report() {
        let mut state = NavigationState::default();
        state.select_page(NavPage::Elearning);
        assert_eq!(state.active_report(), None);
        assert!(NavPage::Elearning.subpages().is_empty());
    }
}
