use crate::shared::report::format::format_plain_number;
use contracts::shared::reports::{ChartBlock, ChartData, ChartRow};
use js_sys::{Function, Reflect};
use leptos::prelude::*;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};

/// Global object exposing `render(kind, element, data)`
const CHART_HOST: &str = "reportCharts";

/// All chart blocks of a report, in declaration order
#[component]
pub fn ChartsBlock(#[prop(into)] blocks: Signal<Vec<ChartBlock>>) -> impl IntoView {
    view! {
        <div class="report-charts">
            {move || {
                blocks
                    .get()
                    .into_iter()
                    .map(|block| view! { <ChartMount block=block /> })
                    .collect_view()
            }}
        </div>
    }
}

/// Mounts one chart into the host charting library, or renders the
/// built-in legend when no host is loaded on the page.
#[component]
pub fn ChartMount(block: ChartBlock) -> impl IntoView {
    let title = block.title.clone();
    let kind = block.chart.kind();

    let body = if chart_host().is_some() {
        let node_ref = NodeRef::<leptos::html::Div>::new();
        let chart = block.chart.clone();
        Effect::new(move |_| {
            let Some(element) = node_ref.get() else {
                return;
            };
            if let Err(err) = render_with_host(&chart, &JsValue::from(element)) {
                log::error!("Failed to render {} chart: {:?}", chart.kind(), err);
            }
        });
        view! { <div class="report-chart__canvas" node_ref=node_ref></div> }.into_any()
    } else {
        let rows = legend_rows(&block.chart);
        view! {
            <ul class="report-chart__legend">
                {rows
                    .into_iter()
                    .map(|row| {
                        let swatch = format!("background: {};", row.color);
                        view! {
                            <li class="report-chart__legend-item">
                                <span class="report-chart__swatch" style=swatch></span>
                                <span class="report-chart__legend-name">{row.name}</span>
                                <span class="report-chart__legend-value">{row.value}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class=format!("report-chart report-chart--{}", kind)>
            <div class="report-chart__title">{title}</div>
            {body}
        </div>
    }
}

fn chart_host() -> Option<(JsValue, Function)> {
    let window = web_sys::window()?;
    let host = Reflect::get(&window, &JsValue::from_str(CHART_HOST)).ok()?;
    if host.is_undefined() || host.is_null() {
        return None;
    }
    let render = Reflect::get(&host, &JsValue::from_str("render")).ok()?;
    let render_fn = render.dyn_into::<Function>().ok()?;
    Some((host, render_fn))
}

fn render_with_host(chart: &ChartData, element: &JsValue) -> Result<(), JsValue> {
    let (host, render_fn) =
        chart_host().ok_or_else(|| JsValue::from_str("Chart host not available"))?;

    let serializer = Serializer::json_compatible();
    let data = match chart {
        ChartData::Pie(entries) => entries.serialize(&serializer),
        ChartData::Bar(bar) => bar.serialize(&serializer),
        ChartData::Line(line) => line.serialize(&serializer),
    }
    .map_err(|err| JsValue::from_str(&err.to_string()))?;

    render_fn.call3(&host, &JsValue::from_str(chart.kind()), element, &data)?;
    Ok(())
}

/// One line of the built-in chart legend
#[derive(Debug, Clone, PartialEq)]
struct LegendRow {
    name: String,
    value: String,
    color: String,
}

/// Pie: one row per slice. Bar / line: one row per series with its total
/// over all categories or periods.
fn legend_rows(chart: &ChartData) -> Vec<LegendRow> {
    match chart {
        ChartData::Pie(entries) => entries
            .iter()
            .map(|entry| LegendRow {
                name: entry.name.clone(),
                value: format_plain_number(entry.value),
                color: entry.color.clone(),
            })
            .collect(),
        ChartData::Bar(bar) => series_totals(&bar.series, &bar.data),
        ChartData::Line(line) => series_totals(&line.series, &line.data),
    }
}

fn series_totals(
    series: &[contracts::shared::reports::SeriesMeta],
    data: &[ChartRow],
) -> Vec<LegendRow> {
    series
        .iter()
        .map(|meta| {
            let total: f64 = data
                .iter()
                .filter_map(|row| row.get(&meta.key).and_then(Value::as_f64))
                .sum();
            LegendRow {
                name: meta.label.clone(),
                value: format_plain_number(total),
                color: meta.color.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::reports::{BarChartData, ChartSeriesEntry, SeriesMeta};
    use serde_json::json;

    #[test]
    fn test_pie_legend_lists_slices() {
        let chart = ChartData::Pie(vec![
            ChartSeriesEntry { name: "Available".into(), value: 12.0, color: "#111".into() },
            ChartSeriesEntry { name: "Sold".into(), value: 3.0, color: "#222".into() },
        ]);
        let rows = legend_rows(&chart);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Available");
        assert_eq!(rows[0].value, "12");
        assert_eq!(rows[1].color, "#222");
    }

    #[test]
    fn test_bar_legend_sums_each_series() {
        let data = vec![
            json!({"source": "Web", "leads": 4, "converted": 1}),
            json!({"source": "Phone", "leads": 6, "converted": 2}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
        let chart = ChartData::Bar(BarChartData {
            x_axis_key: "source".into(),
            series: vec![
                SeriesMeta { key: "leads".into(), label: "Leads".into(), color: "#111".into() },
                SeriesMeta { key: "converted".into(), label: "Converted".into(), color: "#222".into() },
            ],
            data,
            stacked: false,
        });
        let rows = legend_rows(&chart);
        assert_eq!(rows[0].value, "10");
        assert_eq!(rows[1].value, "3");
        assert_eq!(rows[1].name, "Converted");
    }
}
