use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// How a payload value is turned into display text (cards and table cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// As-is; whole numbers without a fraction
    #[default]
    Plain,
    /// Rounded, thousands grouped
    Integer,
    /// Fixed decimals (2 unless declared)
    Number,
    /// `"{n}%"`
    Percent,
    /// `"$"` + grouped number
    Currency,
    Date,
    DateTime,
    /// `Active` / `Inactive`
    Boolean,
    /// `in_stock` -> `In Stock`
    Humanize,
}

fn default_zero() -> Value {
    Value::from(0)
}

fn default_not_available() -> Value {
    Value::from("N/A")
}

fn default_count_key() -> String {
    "count".to_string()
}

fn default_period_key() -> String {
    "month".to_string()
}

fn default_year_key() -> String {
    "year".to_string()
}

fn default_month_key() -> String {
    "month".to_string()
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// One headline number read from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Dotted path, e.g. `summary.totalAds`
    pub path: String,
    pub label: String,
    #[serde(default)]
    pub format: ValueFormat,
    #[serde(default)]
    pub decimals: Option<u8>,
    /// Used when the path is absent or null
    #[serde(default = "default_zero")]
    pub default: Value,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Path of a percent change shown next to the value
    #[serde(default)]
    pub trend_path: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl FieldSpec {
    pub fn new(path: &str, label: &str, format: ValueFormat) -> Self {
        Self {
            path: path.to_string(),
            label: label.to_string(),
            format,
            decimals: None,
            default: default_zero(),
            subtitle: None,
            trend_path: None,
            icon: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    /// Path inside the record; defaults to `key`
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub format: ValueFormat,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default = "default_not_available")]
    pub default: Value,
}

impl ColumnSpec {
    pub fn new(key: &str, label: &str, format: ValueFormat) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            path: None,
            format,
            decimals: None,
            default: default_not_available(),
        }
    }

    pub fn source_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Path of the record list; empty means the payload itself
    #[serde(default)]
    pub path: String,
    pub columns: Vec<ColumnSpec>,
    /// Display limit; the dashboard config supplies the default
    #[serde(default)]
    pub max_rows: Option<usize>,
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieGrouping {
    #[serde(default)]
    pub title: String,
    /// Path of the group list, e.g. `statusDistribution`
    pub path: String,
    pub name_key: String,
    #[serde(default = "default_count_key")]
    pub value_key: String,
    #[serde(default)]
    pub humanize: bool,
    /// Zero-valued slices shown when the grouping is empty or all zero
    #[serde(default)]
    pub placeholder: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeriesSpec {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    #[serde(default)]
    pub title: String,
    pub path: String,
    pub category_key: String,
    #[serde(default)]
    pub humanize_category: bool,
    #[serde(default)]
    pub stacked: bool,
    pub series: Vec<BarSeriesSpec>,
}

/// One list of `(year, month, ...)` records merged into the time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStream {
    pub path: String,
    pub value_keys: Vec<String>,
    /// Record field whose value splits the stream, e.g. `type`:
    /// `{type: "image", count: 5}` lands in column `image_count`
    #[serde(default)]
    pub pivot_key: Option<String>,
    /// Column prefix for non-pivoted streams, e.g. `leads_` + `count`
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucketing {
    #[serde(default)]
    pub title: String,
    /// Output field holding the "YYYY-MM" key
    #[serde(default = "default_period_key")]
    pub period_key: String,
    #[serde(default = "default_year_key")]
    pub year_key: String,
    #[serde(default = "default_month_key")]
    pub month_key: String,
    pub streams: Vec<TimeStream>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieGrouping),
    Bar(BarSpec),
    Line(TimeBucketing),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(spec) => &spec.title,
            ChartSpec::Bar(spec) => &spec.title,
            ChartSpec::Line(spec) => &spec.title,
        }
    }
}

// ---------------------------------------------------------------------------
// Report descriptor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Chart,
    Table,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Chart => "Chart",
            ViewMode::Table => "Table",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Pdf,
    Excel,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Pdf];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Excel => "Excel",
        }
    }
}

/// Declarative definition of one report: where the payload comes from
/// and how it is projected into cards, charts and a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDescriptor {
    pub id: String,
    pub title: String,
    /// Path below the API base, e.g. `/api/reports/inventory-status`
    pub endpoint: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_view: ViewMode,
    #[serde(default)]
    pub metrics: Vec<FieldSpec>,
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
    #[serde(default)]
    pub table: Option<TableSpec>,
}

impl ReportDescriptor {
    /// Message shown when a fetch fails without a specific reason
    pub fn fallback_error(&self) -> String {
        format!("Failed to load {} data", self.title.to_lowercase())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportCatalog {
    #[serde(default)]
    pub reports: Vec<ReportDescriptor>,
}

impl ReportCatalog {
    pub fn find(&self, id: &str) -> Option<&ReportDescriptor> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Ids must be unique and every report needs an endpoint
    pub fn validate(&self) -> Result<(), String> {
        let mut seen: Vec<&str> = Vec::new();
        for report in &self.reports {
            if report.endpoint.trim().is_empty() {
                return Err(format!("Report '{}' has no endpoint", report.id));
            }
            if seen.contains(&report.id.as_str()) {
                return Err(format!("Duplicate report id '{}'", report.id));
            }
            seen.push(&report.id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[reports]]
id = "inventory_status"
title = "Inventory Status"
endpoint = "/api/reports/inventory-status"

[[reports.metrics]]
path = "summary.totalVehicles"
label = "Total Vehicles"
format = "integer"

[[reports.metrics]]
path = "summary.topMake"
label = "Top Make"
default = "N/A"

[[reports.charts]]
kind = "pie"
title = "Status"
path = "statusDistribution"
name_key = "status"
placeholder = ["Available", "Pending", "Sold"]

[[reports.charts]]
kind = "line"
streams = [{ path = "uploadsByMonth", value_keys = ["count"], pivot_key = "type" }]

[reports.table]
path = "vehicles"
max_rows = 10
columns = [
    { key = "price", label = "Price", format = "currency" },
    { key = "status", label = "Status", format = "humanize" },
]
"#;

    #[test]
    fn test_descriptor_deserializes_from_toml() {
        let catalog: ReportCatalog = toml::from_str(SAMPLE).unwrap();
        assert!(catalog.validate().is_ok());

        let report = catalog.find("inventory_status").unwrap();
        assert_eq!(report.default_view, ViewMode::Chart);
        assert_eq!(report.metrics[0].format, ValueFormat::Integer);
        assert_eq!(report.metrics[0].default, Value::from(0));
        assert_eq!(report.metrics[1].default, Value::from("N/A"));

        match &report.charts[0] {
            ChartSpec::Pie(pie) => {
                assert_eq!(pie.value_key, "count");
                assert_eq!(pie.placeholder.len(), 3);
            }
            other => panic!("unexpected chart {:?}", other),
        }
        match &report.charts[1] {
            ChartSpec::Line(line) => {
                assert_eq!(line.period_key, "month");
                assert_eq!(line.streams[0].pivot_key.as_deref(), Some("type"));
            }
            other => panic!("unexpected chart {:?}", other),
        }

        let table = report.table.as_ref().unwrap();
        assert_eq!(table.max_rows, Some(10));
        assert_eq!(table.columns[1].source_path(), "status");
        assert_eq!(table.columns[1].default, Value::from("N/A"));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut catalog: ReportCatalog = toml::from_str(SAMPLE).unwrap();
        let copy = catalog.reports[0].clone();
        catalog.reports.push(copy);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_fallback_error_uses_title() {
        let catalog: ReportCatalog = toml::from_str(SAMPLE).unwrap();
        assert_eq!(
            catalog.reports[0].fallback_error(),
            "Failed to load inventory status data"
        );
    }
}
