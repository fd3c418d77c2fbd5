//! Payload → chart-ready series.
//!
//! - pie: one slice per group record, palette colour by position,
//!   placeholder slices when nothing is left to draw
//! - bar: one row per category, one numeric field per declared series
//! - line: `(year, month)` records merged into "YYYY-MM" rows, sorted

use super::format::{as_number, display_plain, humanize_label};
use super::payload::{lookup, ReportPayload};
use contracts::shared::reports::{
    BarChartData, BarSpec, ChartBlock, ChartData, ChartRow, ChartSeriesEntry, ChartSpec,
    LineChartData, PieGrouping, SeriesMeta, TimeBucketing,
};
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_PALETTE: &[&str] = &[
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#ec4899", "#84cc16",
];

const EMPTY_PLACEHOLDER: &str = "No Data";
const UNKNOWN_CATEGORY: &str = "Unknown";

/// `palette[index % palette.len()]`, falling back to the built-in palette
pub fn color_at(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string()
    } else {
        palette[index % palette.len()].clone()
    }
}

/// JSON number, integral values kept as integers
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

fn text_of(record: &Value, key: &str) -> Option<String> {
    lookup(record, key)
        .map(display_plain)
        .filter(|s| !s.trim().is_empty())
}

fn number_of(record: &Value, key: &str) -> f64 {
    lookup(record, key).and_then(as_number).unwrap_or(0.0)
}

pub fn build_pie_series(
    payload: &ReportPayload,
    grouping: &PieGrouping,
    palette: &[String],
) -> Vec<ChartSeriesEntry> {
    let entries: Vec<ChartSeriesEntry> = payload
        .records(&grouping.path)
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let name = text_of(record, &grouping.name_key)
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
            ChartSeriesEntry {
                name: if grouping.humanize {
                    humanize_label(&name)
                } else {
                    name
                },
                value: number_of(record, &grouping.value_key),
                color: color_at(palette, index),
            }
        })
        .collect();

    if entries.iter().any(|e| e.value != 0.0) {
        entries
    } else {
        placeholder_series(grouping, palette)
    }
}

/// Zero-valued slices that keep an empty chart labelled
pub fn placeholder_series(grouping: &PieGrouping, palette: &[String]) -> Vec<ChartSeriesEntry> {
    let names: Vec<String> = if grouping.placeholder.is_empty() {
        vec![EMPTY_PLACEHOLDER.to_string()]
    } else {
        grouping.placeholder.clone()
    };
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| ChartSeriesEntry {
            name,
            value: 0.0,
            color: color_at(palette, index),
        })
        .collect()
}

pub fn build_bar_series(payload: &ReportPayload, spec: &BarSpec, palette: &[String]) -> BarChartData {
    let series: Vec<SeriesMeta> = spec
        .series
        .iter()
        .enumerate()
        .map(|(index, s)| SeriesMeta {
            key: s.key.clone(),
            label: s.label.clone().unwrap_or_else(|| humanize_label(&s.key)),
            color: s.color.clone().unwrap_or_else(|| color_at(palette, index)),
        })
        .collect();

    let data: Vec<ChartRow> = payload
        .records(&spec.path)
        .iter()
        .map(|record| {
            let category = text_of(record, &spec.category_key)
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
            let category = if spec.humanize_category {
                humanize_label(&category)
            } else {
                category
            };

            let mut row = ChartRow::new();
            row.insert(spec.category_key.clone(), Value::String(category));
            for s in &spec.series {
                row.insert(s.key.clone(), number_value(number_of(record, &s.key)));
            }
            row
        })
        .collect();

    BarChartData {
        x_axis_key: spec.category_key.clone(),
        series,
        data,
        stacked: spec.stacked,
    }
}

fn period_of(record: &Value, bucketing: &TimeBucketing) -> Option<(i32, u32)> {
    let year = lookup(record, &bucketing.year_key).and_then(as_number)?;
    let month = lookup(record, &bucketing.month_key).and_then(as_number)?;
    if year.fract() != 0.0 || month.fract() != 0.0 || !(1.0..=12.0).contains(&month) {
        return None;
    }
    Some((year as i32, month as u32))
}

/// Merges every stream into one row per "YYYY-MM", ascending by (year, month).
///
/// Values landing in the same row and column are summed. Columns seen in
/// any row are zero-filled in the others so lines stay continuous.
pub fn build_time_series(
    payload: &ReportPayload,
    bucketing: &TimeBucketing,
    palette: &[String],
) -> LineChartData {
    let mut buckets: BTreeMap<(i32, u32), BTreeMap<String, f64>> = BTreeMap::new();
    let mut columns: Vec<String> = Vec::new();

    for stream in &bucketing.streams {
        for record in payload.records(&stream.path) {
            let Some(period) = period_of(record, bucketing) else {
                continue;
            };
            let pivot = match stream.pivot_key.as_deref() {
                Some(key) => match text_of(record, key) {
                    Some(value) => Some(value.trim().replace(' ', "_")),
                    None => continue,
                },
                None => None,
            };

            let row = buckets.entry(period).or_default();
            for value_key in &stream.value_keys {
                let column = match &pivot {
                    Some(p) => format!("{}_{}", p, value_key),
                    None => format!("{}{}", stream.prefix.as_deref().unwrap_or(""), value_key),
                };
                if !columns.contains(&column) {
                    columns.push(column.clone());
                }
                *row.entry(column).or_insert(0.0) += number_of(record, value_key);
            }
        }
    }

    let data: Vec<ChartRow> = buckets
        .into_iter()
        .map(|((year, month), values)| {
            let mut row = ChartRow::new();
            row.insert(
                bucketing.period_key.clone(),
                Value::String(format!("{:04}-{:02}", year, month)),
            );
            for column in &columns {
                let value = values.get(column).copied().unwrap_or(0.0);
                row.insert(column.clone(), number_value(value));
            }
            row
        })
        .collect();

    let series = columns
        .iter()
        .enumerate()
        .map(|(index, column)| SeriesMeta {
            key: column.clone(),
            label: humanize_label(column),
            color: color_at(palette, index),
        })
        .collect();

    LineChartData {
        x_axis_key: bucketing.period_key.clone(),
        series,
        data,
    }
}

/// Every declared chart of a report, in declaration order
pub fn build_chart_blocks(
    payload: &ReportPayload,
    specs: &[ChartSpec],
    palette: &[String],
) -> Vec<ChartBlock> {
    specs
        .iter()
        .map(|spec| {
            let chart = match spec {
                ChartSpec::Pie(grouping) => {
                    ChartData::Pie(build_pie_series(payload, grouping, palette))
                }
                ChartSpec::Bar(bar) => ChartData::Bar(build_bar_series(payload, bar, palette)),
                ChartSpec::Line(bucketing) => {
                    ChartData::Line(build_time_series(payload, bucketing, palette))
                }
            };
            ChartBlock {
                title: spec.title().to_string(),
                chart,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::reports::{BarSeriesSpec, TimeStream};
    use serde_json::json;

    fn palette() -> Vec<String> {
        vec!["#111".to_string(), "#222".to_string(), "#333".to_string()]
    }

    fn status_grouping() -> PieGrouping {
        PieGrouping {
            title: "Status".to_string(),
            path: "statusDistribution".to_string(),
            name_key: "status".to_string(),
            value_key: "count".to_string(),
            humanize: false,
            placeholder: vec!["Available".into(), "Pending".into(), "Sold".into()],
        }
    }

    fn uploads_bucketing() -> TimeBucketing {
        TimeBucketing {
            title: "Uploads".to_string(),
            period_key: "month".to_string(),
            year_key: "year".to_string(),
            month_key: "month".to_string(),
            streams: vec![TimeStream {
                path: "uploadsByMonth".to_string(),
                value_keys: vec!["count".to_string()],
                pivot_key: Some("type".to_string()),
                prefix: None,
            }],
        }
    }

    #[test]
    fn test_pie_series_assigns_palette_by_position() {
        let payload = ReportPayload::new(json!({
            "statusDistribution": [
                { "status": "Sold", "count": 40 },
                { "status": "Pending", "count": 10 }
            ]
        }));
        let series = build_pie_series(&payload, &status_grouping(), &palette());
        assert_eq!(
            series,
            vec![
                ChartSeriesEntry { name: "Sold".into(), value: 40.0, color: "#111".into() },
                ChartSeriesEntry { name: "Pending".into(), value: 10.0, color: "#222".into() },
            ]
        );
        assert_eq!(series, build_pie_series(&payload, &status_grouping(), &palette()));
    }

    #[test]
    fn test_pie_colors_cycle_past_palette_length() {
        let records: Vec<Value> = (0..5).map(|i| json!({ "status": format!("s{}", i), "count": 1 })).collect();
        let payload = ReportPayload::new(json!({ "statusDistribution": records }));
        let series = build_pie_series(&payload, &status_grouping(), &palette());
        assert_eq!(series[3].color, "#111");
        assert_eq!(series[4].color, "#222");
    }

    #[test]
    fn test_empty_or_zero_pie_uses_placeholder() {
        let empty = ReportPayload::new(json!({ "statusDistribution": [] }));
        let series = build_pie_series(&empty, &status_grouping(), &palette());
        let names: Vec<&str> = series.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Available", "Pending", "Sold"]);
        assert!(series.iter().all(|e| e.value == 0.0));

        let zeros = ReportPayload::new(json!({ "statusDistribution": [{ "status": "Sold", "count": 0 }] }));
        assert_eq!(build_pie_series(&zeros, &status_grouping(), &palette()), series);

        let mut no_placeholder = status_grouping();
        no_placeholder.placeholder.clear();
        let fallback = build_pie_series(&ReportPayload::default(), &no_placeholder, &palette());
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback[0].name, "No Data");
    }

    #[test]
    fn test_pie_humanizes_codes() {
        let payload = ReportPayload::new(json!({ "statusDistribution": [{ "status": "in_stock", "count": 3 }] }));
        let mut grouping = status_grouping();
        grouping.humanize = true;
        let series = build_pie_series(&payload, &grouping, &[]);
        assert_eq!(series[0].name, "In Stock");
        assert_eq!(series[0].color, DEFAULT_PALETTE[0]);
    }

    #[test]
    fn test_bar_series_defaults_missing_numbers_to_zero() {
        let payload = ReportPayload::new(json!({
            "byMake": [
                { "make": "Toyota", "newCount": 5, "usedCount": 7 },
                { "make": "Ford", "newCount": 2 },
                { "newCount": 1 }
            ]
        }));
        let spec = BarSpec {
            title: "By make".to_string(),
            path: "byMake".to_string(),
            category_key: "make".to_string(),
            humanize_category: false,
            stacked: true,
            series: vec![
                BarSeriesSpec { key: "newCount".into(), label: Some("New".into()), color: None },
                BarSeriesSpec { key: "usedCount".into(), label: None, color: Some("#000".into()) },
            ],
        };

        let chart = build_bar_series(&payload, &spec, &palette());
        assert_eq!(chart.x_axis_key, "make");
        assert!(chart.stacked);
        assert_eq!(chart.series[0].label, "New");
        assert_eq!(chart.series[0].color, "#111");
        assert_eq!(chart.series[1].label, "UsedCount");
        assert_eq!(chart.series[1].color, "#000");
        assert_eq!(chart.data[1]["usedCount"], json!(0));
        assert_eq!(chart.data[2]["make"], json!("Unknown"));
    }

    #[test]
    fn test_time_series_merges_same_period() {
        let payload = ReportPayload::new(json!({
            "uploadsByMonth": [
                { "year": 2024, "month": 1, "type": "image", "count": 5 },
                { "year": 2024, "month": 1, "type": "file", "count": 3 }
            ]
        }));
        let chart = build_time_series(&payload, &uploads_bucketing(), &palette());
        assert_eq!(chart.data.len(), 1);
        assert_eq!(
            Value::Object(chart.data[0].clone()),
            json!({ "month": "2024-01", "image_count": 5, "file_count": 3 })
        );
        let keys: Vec<&str> = chart.series.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["image_count", "file_count"]);
        assert_eq!(chart.series[0].label, "Image Count");
    }

    #[test]
    fn test_time_series_sums_repeated_period_and_type() {
        let payload = ReportPayload::new(json!({
            "uploadsByMonth": [
                { "year": 2024, "month": 3, "type": "image", "count": 4 },
                { "year": 2024, "month": 3, "type": "image", "count": 6 }
            ]
        }));
        let chart = build_time_series(&payload, &uploads_bucketing(), &palette());
        assert_eq!(chart.data.len(), 1);
        assert_eq!(
            Value::Object(chart.data[0].clone()),
            json!({ "month": "2024-03", "image_count": 10 })
        );
        assert_eq!(chart.series.len(), 1);
    }

    #[test]
    fn test_time_series_sorted_and_zero_filled() {
        let payload = ReportPayload::new(json!({
            "uploadsByMonth": [
                { "year": 2024, "month": 3, "type": "image", "count": 1 },
                { "year": 2023, "month": 12, "type": "file", "count": 2 },
                { "year": "2024", "month": "1", "type": "image", "count": 4 },
                { "year": 2024, "month": 13, "type": "image", "count": 9 },
                { "month": 2, "type": "image", "count": 9 }
            ]
        }));
        let chart = build_time_series(&payload, &uploads_bucketing(), &palette());
        let periods: Vec<&str> = chart
            .data
            .iter()
            .map(|row| row["month"].as_str().unwrap())
            .collect();
        assert_eq!(periods, vec!["2023-12", "2024-01", "2024-03"]);
        assert_eq!(chart.data[0]["image_count"], json!(0));
        assert_eq!(chart.data[1]["file_count"], json!(0));
        assert_eq!(chart.data[1]["image_count"], json!(4));
    }

    #[test]
    fn test_time_series_merges_multiple_streams() {
        let payload = ReportPayload::new(json!({
            "leadsByMonth": [{ "year": 2024, "month": 2, "count": 10 }],
            "salesByMonth": [{ "year": 2024, "month": 2, "count": 4 }]
        }));
        let bucketing = TimeBucketing {
            title: String::new(),
            period_key: "period".to_string(),
            year_key: "year".to_string(),
            month_key: "month".to_string(),
            streams: vec![
                TimeStream {
                    path: "leadsByMonth".into(),
                    value_keys: vec!["count".into()],
                    pivot_key: None,
                    prefix: Some("leads_".into()),
                },
                TimeStream {
                    path: "salesByMonth".into(),
                    value_keys: vec!["count".into()],
                    pivot_key: None,
                    prefix: Some("sales_".into()),
                },
            ],
        };
        let chart = build_time_series(&payload, &bucketing, &palette());
        assert_eq!(
            Value::Object(chart.data[0].clone()),
            json!({ "period": "2024-02", "leads_count": 10, "sales_count": 4 })
        );
    }
}
