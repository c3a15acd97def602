//! Shared state of a report build: cached table loads and the page output.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache, ObjectCacheExt};
use crate::config::{AppConfig, SourceTables};
use crate::errors::Result;
use crate::models::charts::ChartPanel;
use crate::models::filters::{DateBounds, FilterPanel};
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::CascadeOutcome;
use crate::pipeline::aggregate::{format_thousands, percentage};
use crate::storage::{Storage, TableQuery};

pub const NO_MATCH_WARNING: &str = "No data matches your filter criteria.";
pub const NO_DATA_WARNING: &str = "No data available to display.";

pub struct ReportContext {
    storage: Arc<dyn Storage>,
    cache: Option<Arc<dyn ObjectCache>>,
    ttl: u64,
    tables: SourceTables,
    today: NaiveDate,
}

impl ReportContext {
    pub fn new(storage: Arc<dyn Storage>, cache: Option<Arc<dyn ObjectCache>>) -> Self {
        let config = AppConfig::get();
        Self {
            storage,
            cache,
            ttl: config.cache.default_ttl,
            tables: config.dashboard.tables.clone(),
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Context with explicit settings, independent of the global config
    pub fn with_settings(
        storage: Arc<dyn Storage>,
        cache: Option<Arc<dyn ObjectCache>>,
        ttl: u64,
        tables: SourceTables,
        today: NaiveDate,
    ) -> Self {
        Self {
            storage,
            cache,
            ttl,
            tables,
            today,
        }
    }

    pub fn tables(&self) -> &SourceTables {
        &self.tables
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Loads a table, served from the cache while the entry is fresh
    pub async fn load(&self, query: TableQuery) -> Result<Frame> {
        let key = query.cache_key();
        if let Some(cache) = &self.cache {
            if let CacheResult::Found(frame) = cache.get::<Frame>(&key).await {
                debug!("Cache hit for {}", key);
                return Ok(frame);
            }
            debug!("Cache miss for {}", key);
        }

        let frame = self.storage.load_table(&query).await?;
        if let Some(cache) = &self.cache {
            cache.insert(key, &frame, self.ttl).await;
        }
        Ok(frame)
    }
}

/// What a page definition produces before the table is paged
#[derive(Debug, Clone, Default)]
pub struct PageOutput {
    /// Rows behind the table preview and the export
    pub frame: Frame,
    pub filters: FilterPanel,
    pub date_bounds: Option<DateBounds>,
    pub warnings: Vec<String>,
    pub empty: bool,
    pub kpis: Vec<KpiCard>,
    pub charts: Vec<ChartPanel>,
}

impl PageOutput {
    /// The source table has no rows at all
    pub fn no_source_rows(frame: Frame, warning: &str) -> Self {
        Self {
            frame,
            warnings: vec![warning.to_string()],
            empty: true,
            ..Self::default()
        }
    }

    /// Wraps a cascade result; no rows left marks the page empty
    pub fn from_cascade(outcome: CascadeOutcome) -> Self {
        let mut warnings = outcome.warnings;
        let empty = outcome.frame.is_empty();
        if empty {
            warnings.push(NO_MATCH_WARNING.to_string());
        }
        Self {
            frame: outcome.frame,
            filters: outcome.panel,
            date_bounds: outcome.date_bounds,
            warnings,
            empty,
            ..Self::default()
        }
    }
}

/// "1,234 នាក់"
pub fn people_card(key: &str, label: &str, count: u64) -> KpiCard {
    KpiCard::new(
        key,
        label,
        Some(count as f64),
        format!("{} នាក់", format_thousands(count as i64)),
    )
}

/// "20 ឆ្នាំ"
pub fn years_card(key: &str, label: &str, years: i64) -> KpiCard {
    KpiCard::new(key, label, Some(years as f64), format!("{years} ឆ្នាំ"))
}

/// Share of `part` in `total`, rendered by `format`
pub fn percent_card(
    key: &str,
    label: &str,
    part: u64,
    total: u64,
    format: fn(f64) -> String,
) -> KpiCard {
    let percent = percentage(part, total);
    KpiCard::new(key, label, Some(percent), format(percent))
}
