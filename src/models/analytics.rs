//! Analytics 响应结构
//!
//! 聚合由后端完成，这里只负责反序列化和展示辅助。

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ReelpageError, Result};

/// 四类事件计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounts {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub plays: u64,
    #[serde(default)]
    pub completes: u64,
    #[serde(default)]
    pub clicks: u64,
}

/// 单个 campaign 的汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub campaign_slug: String,
    #[serde(flatten)]
    pub counts: EventCounts,
    #[serde(default)]
    pub conversion_rate: f64,
}

/// 按日期分组的计数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateStats {
    pub date: String,
    #[serde(flatten)]
    pub counts: EventCounts,
}

/// 单个 campaign 的详细分析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDetail {
    pub campaign_slug: String,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_plays: u64,
    #[serde(default)]
    pub total_completes: u64,
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub by_source: BTreeMap<String, EventCounts>,
    #[serde(default)]
    pub by_date: Vec<DateStats>,
}

impl AnalyticsDetail {
    pub fn totals(&self) -> EventCounts {
        EventCounts {
            views: self.total_views,
            plays: self.total_plays,
            completes: self.total_completes,
            clicks: self.total_clicks,
        }
    }

    /// Source labels, sorted.
    pub fn source_keys(&self) -> Vec<&str> {
        self.by_source.keys().map(String::as_str).collect()
    }
}

/// Inclusive date filter. Each bound is optional and independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Parse optional `YYYY-MM-DD` strings; empty strings count as unbounded.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        Ok(Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end)
            && start > end
        {
            return Err(ReelpageError::validation(
                "Start date must not be after end date",
            ));
        }
        Ok(())
    }

    /// Query parameters for the detail endpoint; absent bounds are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(start) = self.start {
            pairs.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

fn parse_bound(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| ReelpageError::validation(format!("Invalid date '{}': {}", s, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_flattened_counts() {
        let summary: AnalyticsSummary = serde_json::from_value(json!({
            "campaignSlug": "demo",
            "views": 100,
            "plays": 60,
            "completes": 30,
            "clicks": 12,
            "conversionRate": 12.0
        }))
        .unwrap();
        assert_eq!(summary.counts.views, 100);
        assert_eq!(summary.counts.clicks, 12);
        assert_eq!(summary.conversion_rate, 12.0);
    }

    #[test]
    fn test_detail_breakdowns() {
        let detail: AnalyticsDetail = serde_json::from_value(json!({
            "campaignSlug": "demo",
            "totalViews": 10,
            "totalPlays": 8,
            "totalCompletes": 4,
            "totalClicks": 2,
            "conversionRate": 20.0,
            "bySource": {
                "newsletter": { "views": 6, "plays": 5, "completes": 3, "clicks": 2 },
                "direct": { "views": 4, "plays": 3, "completes": 1, "clicks": 0 }
            },
            "byDate": [
                { "date": "2025-06-01", "views": 4, "plays": 3, "completes": 1, "clicks": 0 },
                { "date": "2025-06-02", "views": 6, "plays": 5, "completes": 3, "clicks": 2 }
            ]
        }))
        .unwrap();

        assert_eq!(detail.totals().plays, 8);
        assert_eq!(detail.source_keys(), vec!["direct", "newsletter"]);
        assert_eq!(detail.by_date[1].date, "2025-06-02");
        assert_eq!(detail.by_date[1].counts.clicks, 2);
    }

    #[test]
    fn test_detail_missing_breakdowns_default_empty() {
        let detail: AnalyticsDetail =
            serde_json::from_value(json!({ "campaignSlug": "demo" })).unwrap();
        assert!(detail.by_source.is_empty());
        assert!(detail.by_date.is_empty());
        assert_eq!(detail.totals(), EventCounts::default());
    }

    #[test]
    fn test_date_range_query_pairs_independent_bounds() {
        let range = DateRange::parse(Some("2025-06-01"), None).unwrap();
        assert_eq!(range.query_pairs(), vec![("startDate", "2025-06-01".to_string())]);

        let range = DateRange::parse(None, Some("2025-06-30")).unwrap();
        assert_eq!(range.query_pairs(), vec![("endDate", "2025-06-30".to_string())]);

        assert!(DateRange::unbounded().query_pairs().is_empty());
    }

    #[test]
    fn test_date_range_empty_strings_are_unbounded() {
        let range = DateRange::parse(Some(""), Some("  ")).unwrap();
        assert!(range.is_unbounded());
    }

    #[test]
    fn test_date_range_rejects_bad_input() {
        assert!(DateRange::parse(Some("06/01/2025"), None).is_err());
        let inverted = DateRange::parse(Some("2025-07-01"), Some("2025-06-01")).unwrap();
        assert!(inverted.validate().is_err());
        let same_day = DateRange::parse(Some("2025-06-01"), Some("2025-06-01")).unwrap();
        assert!(same_day.validate().is_ok());
    }
}
