use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Pages that render a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub enum PageKey {
    Home,
    Tvetsms,
    Staff,
    Teacher,
    Partner,
    Tvet15m,
    Internship,
    Graduated,
    Erpl,
}

impl PageKey {
    pub const HOME: &'static str = "home";
    pub const TVETSMS: &'static str = "tvetsms";
    pub const STAFF: &'static str = "staff";
    pub const TEACHER: &'static str = "teacher";
    pub const PARTNER: &'static str = "partner";
    pub const TVET15M: &'static str = "tvet15m";
    pub const INTERNSHIP: &'static str = "internship";
    pub const GRADUATED: &'static str = "graduated";
    pub const ERPL: &'static str = "erpl";

    pub fn all() -> &'static [PageKey] {
        &[
            PageKey::Home,
            PageKey::Tvetsms,
            PageKey::Staff,
            PageKey::Teacher,
            PageKey::Partner,
            PageKey::Tvet15m,
            PageKey::Internship,
            PageKey::Graduated,
            PageKey::Erpl,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKey::Home => Self::HOME,
            PageKey::Tvetsms => Self::TVETSMS,
            PageKey::Staff => Self::STAFF,
            PageKey::Teacher => Self::TEACHER,
            PageKey::Partner => Self::PARTNER,
            PageKey::Tvet15m => Self::TVET15M,
            PageKey::Internship => Self::INTERNSHIP,
            PageKey::Graduated => Self::GRADUATED,
            PageKey::Erpl => Self::ERPL,
        }
    }

    /// Heading shown above the report
    pub fn title(&self) -> &'static str {
        match self {
            PageKey::Home => "ទំព័រដើម",
            PageKey::Tvetsms => "កម្មវិធី TVETMIS",
            PageKey::Staff => "មន្រ្តីបម្រើការ",
            PageKey::Teacher => "សាស្រ្តាចារ្យ",
            PageKey::Partner => "ដៃគូសហការ",
            PageKey::Tvet15m => "កម្មវិធី TVET 1.5M",
            PageKey::Internship => "សិស្សចុះកម្មសិក្សា",
            PageKey::Graduated => "បានបញ្ចប់ការសិក្សា",
            PageKey::Erpl => "ERPL",
        }
    }

    /// Parent page for sub-pages
    pub fn parent(&self) -> Option<PageKey> {
        match self {
            PageKey::Staff | PageKey::Teacher | PageKey::Partner => Some(PageKey::Tvetsms),
            PageKey::Internship | PageKey::Graduated => Some(PageKey::Tvet15m),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for PageKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for PageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PageKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageKey::all()
            .iter()
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown report page: {s}"))
    }
}

// A rendered summary statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct KpiCard {
    pub key: String,
    pub label: String,
    /// Numeric value, absent for blank cards
    pub value: Option<f64>,
    pub display: String,
}

impl KpiCard {
    pub fn new(key: &str, label: &str, value: Option<f64>, display: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value,
            display: display.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_round_trip_names() {
        for key in PageKey::all() {
            assert_eq!(key.as_str().parse::<PageKey>().unwrap(), *key);
        }
        assert!("elearning".parse::<PageKey>().is_err());
    }

    #[test]
    fn test_parents() {
        assert_eq!(PageKey::Teacher.parent(), Some(PageKey::Tvetsms));
        assert_eq!(PageKey::Graduated.parent(), Some(PageKey::Tvet15m));
        assert_eq!(PageKey::Erpl.parent(), None);
    }
}
