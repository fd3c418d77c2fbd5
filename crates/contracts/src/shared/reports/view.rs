use super::filter::FilterCriteria;
use super::spec::{ExportFormat, ViewMode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One headline value rendered as a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetric {
    pub label: String,
    /// Display text after formatting
    pub value: String,
    /// Value as read from the payload (or the declared default)
    pub raw: Value,
    pub subtitle: Option<String>,
    /// Change relative to the previous period, in percent
    pub trend: Option<f64>,
    pub icon: Option<String>,
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeriesEntry {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// One numeric column of a bar or line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub key: String,
    pub label: String,
    pub color: String,
}

/// Row of a bar or line chart: the axis key plus one number per series.
pub type ChartRow = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartData {
    pub x_axis_key: String,
    pub series: Vec<SeriesMeta>,
    pub data: Vec<ChartRow>,
    pub stacked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartData {
    pub x_axis_key: String,
    pub series: Vec<SeriesMeta>,
    pub data: Vec<ChartRow>,
}

/// Display-ready chart handed to a chart primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ChartData {
    Pie(Vec<ChartSeriesEntry>),
    Bar(BarChartData),
    Line(LineChartData),
}

impl ChartData {
    pub fn kind(&self) -> &'static str {
        match self {
            ChartData::Pie(_) => "pie",
            ChartData::Bar(_) => "bar",
            ChartData::Line(_) => "line",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBlock {
    pub title: String,
    pub chart: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub key: String,
    pub label: String,
}

/// Formatted record, keyed by column key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: BTreeMap<String, String>,
}

impl TableRow {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    /// Record count before the display limit was applied
    pub total_rows: usize,
}

impl TableData {
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_rows
    }

    /// Cells of one row in column order
    pub fn row_values(&self, row: &TableRow) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| row.get(&c.key).unwrap_or_default().to_string())
            .collect()
    }
}

/// Everything an export routine needs about the report on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub report_id: String,
    pub title: String,
    pub format: ExportFormat,
    pub view_mode: ViewMode,
    pub criteria: FilterCriteria,
    /// Full projection, without the display limit
    pub table: TableData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_data_serializes_camel_case_for_the_chart_host() {
        let chart = ChartData::Bar(BarChartData {
            x_axis_key: "make".to_string(),
            series: vec![],
            data: vec![],
            stacked: true,
        });
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["data"]["xAxisKey"], "make");
        assert_eq!(json["data"]["stacked"], true);
    }

    #[test]
    fn test_row_values_follow_column_order() {
        let table = TableData {
            columns: vec![
                TableColumn { key: "b".into(), label: "B".into() },
                TableColumn { key: "a".into(), label: "A".into() },
            ],
            rows: vec![],
            total_rows: 3,
        };
        let mut row = TableRow::default();
        row.cells.insert("a".into(), "1".into());
        row.cells.insert("b".into(), "2".into());
        assert_eq!(table.row_values(&row), vec!["2", "1"]);
        assert!(table.is_truncated());
    }
}
