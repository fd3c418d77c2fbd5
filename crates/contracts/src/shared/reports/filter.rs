use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive date range in format "YYYY-MM-DD"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whole calendar month, first day to last day
    pub fn for_month(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let last = next_first - Duration::days(1);
        Some(Self::new(
            first.format("%Y-%m-%d").to_string(),
            last.format("%Y-%m-%d").to_string(),
        ))
    }

    /// Month containing `date`
    pub fn month_of(date: NaiveDate) -> Option<Self> {
        Self::for_month(date.year(), date.month())
    }

    /// Month preceding the one `from` falls into
    pub fn previous_month(&self) -> Option<Self> {
        let current = NaiveDate::parse_from_str(&self.from, "%Y-%m-%d").ok()?;
        let (year, month) = if current.month() == 1 {
            (current.year() - 1, 12)
        } else {
            (current.year(), current.month() - 1)
        };
        Self::for_month(year, month)
    }
}

/// Scoping applied to one report fetch.
///
/// `dealership_ids == None` (or an empty list) means "all dealerships".
/// Immutable per fetch: a changed value is a new fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub dealership_ids: Option<Vec<String>>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    pub fn all() -> Self {
        Self::default()
    }

    /// Ids are trimmed, empty entries dropped and duplicates removed
    /// keeping the first occurrence.
    pub fn with_dealerships<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for id in ids {
            let id = id.as_ref().trim();
            if !id.is_empty() && !unique.iter().any(|u| u == id) {
                unique.push(id.to_string());
            }
        }
        self.dealership_ids = if unique.is_empty() { None } else { Some(unique) };
        self
    }

    pub fn with_date_range(mut self, range: Option<DateRange>) -> Self {
        self.date_range = range;
        self
    }

    /// Parses a comma-separated list as typed into the filter bar
    pub fn parse_dealership_list(input: &str) -> Vec<String> {
        Self::all()
            .with_dealerships(input.split(','))
            .dealership_ids
            .unwrap_or_default()
    }

    /// Number of active filters (for the filter bar badge)
    pub fn active_count(&self) -> usize {
        let dealers = self
            .dealership_ids
            .as_ref()
            .map(|ids| usize::from(!ids.is_empty()))
            .unwrap_or(0);
        dealers + usize::from(self.date_range.is_some())
    }

    pub fn to_query(&self) -> ReportQuery {
        ReportQuery {
            dealership_ids: self
                .dealership_ids
                .as_ref()
                .filter(|ids| !ids.is_empty())
                .map(|ids| ids.join(",")),
            from: self.date_range.as_ref().map(|r| r.from.clone()),
            to: self.date_range.as_ref().map(|r| r.to.clone()),
        }
    }
}

/// Query parameters of every report endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Comma-joined dealership ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealership_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}
