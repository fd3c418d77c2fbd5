use super::{ChartsBlock, ReportToolbar, TableBlock};
use crate::shared::components::metric_card::MetricRow;
use crate::shared::config::DashboardConfig;
use crate::shared::export::export_report;
use crate::shared::report::fetcher::use_report_data;
use crate::shared::report::lifecycle::ReportStatus;
use crate::shared::report::metrics::extract_metrics;
use crate::shared::report::series::build_chart_blocks;
use crate::shared::report::table::{project_full_table, project_table};
use contracts::shared::reports::{
    ExportFormat, ExportRequest, FilterCriteria, ReportDescriptor, TableData, ViewMode,
};
use leptos::prelude::*;
use thaw::*;

/// Generic renderer of one report: fetches the payload and shows metric
/// cards plus either the charts or the table.
#[component]
pub fn ReportView(
    descriptor: ReportDescriptor,
    #[prop(into)] criteria: Signal<FilterCriteria>,
    /// Bumped by the page to refetch every report
    #[prop(into, default = Signal::stored(0))]
    refresh_trigger: Signal<u32>,
    #[prop(optional)] export_enabled: bool,
    /// `false` defers the first fetch until the report is opened
    #[prop(into, default = Signal::stored(true))]
    should_load: Signal<bool>,
    /// Replaces the built-in CSV download
    #[prop(optional)]
    on_export: Option<Callback<ExportRequest>>,
) -> impl IntoView {
    let config = use_context::<DashboardConfig>().unwrap_or_default();
    let handle = use_report_data(&descriptor, criteria, refresh_trigger, should_load);
    let state = handle.state;

    let has_table = descriptor.table.is_some();
    let initial_mode = if has_table {
        descriptor.default_view
    } else {
        ViewMode::Chart
    };
    let view_mode = RwSignal::new(initial_mode);
    let descriptor = StoredValue::new(descriptor);
    let palette = StoredValue::new(config.charts.palette.clone());
    let default_max_rows = config.tables.default_max_rows;

    let metrics = Memo::new(move |_| {
        state.with(|s| match s.payload() {
            Some(payload) => descriptor.with_value(|d| extract_metrics(payload, &d.metrics)),
            None => Vec::new(),
        })
    });

    let chart_blocks = Memo::new(move |_| {
        state.with(|s| match s.payload() {
            Some(payload) => descriptor.with_value(|d| {
                palette.with_value(|p| build_chart_blocks(payload, &d.charts, p))
            }),
            None => Vec::new(),
        })
    });

    let table = Memo::new(move |_| {
        state.with(|s| match (s.payload(), descriptor.with_value(|d| d.table.clone())) {
            (Some(payload), Some(spec)) => project_table(payload, &spec, Some(default_max_rows)),
            _ => TableData::default(),
        })
    });

    let busy = Signal::derive(move || state.with(|s| s.is_loading()));

    let run_export = Callback::new(move |format: ExportFormat| {
        let Some(request) = state.with_untracked(|s| {
            let payload = s.payload()?;
            descriptor.with_value(|d| {
                let spec = d.table.as_ref()?;
                Some(ExportRequest {
                    report_id: d.id.clone(),
                    title: d.title.clone(),
                    format,
                    view_mode: view_mode.get_untracked(),
                    criteria: s
                        .last_criteria()
                        .cloned()
                        .unwrap_or_else(|| criteria.get_untracked()),
                    table: project_full_table(payload, spec),
                })
            })
        }) else {
            log::warn!("Nothing to export yet");
            return;
        };

        match on_export {
            Some(handler) => handler.run(request),
            None => {
                if let Err(e) = export_report(&request) {
                    log::error!("Export failed: {}", e);
                }
            }
        }
    });

    let title = descriptor.with_value(|d| d.title.clone());
    let description = descriptor.with_value(|d| d.description.clone());
    let report_id = descriptor.with_value(|d| d.id.clone());

    view! {
        <section class="report-view" id=format!("report--{}", report_id)>
            <div class="report-view__header">
                <div>
                    <h3 class="report-view__title">{title}</h3>
                    {description.map(|text| view! { <p class="report-view__description">{text}</p> })}
                </div>
                <ReportToolbar
                    view_mode=view_mode
                    has_table=has_table
                    on_refresh=handle.refresh
                    export_enabled=export_enabled && has_table
                    on_export=run_export
                    busy=busy
                />
            </div>

            {move || {
                let status = state.with(|s| s.status().clone());
                match status {
                    ReportStatus::Loading => view! {
                        <div class="report-view__loading">
                            <Spinner />
                        </div>
                    }
                    .into_any(),
                    ReportStatus::Error(message) => view! {
                        <div class="report-view__error">
                            <strong>"⚠ "</strong>
                            {message}
                        </div>
                    }
                    .into_any(),
                    ReportStatus::Ready => view! {
                        <div class="report-view__content">
                            <MetricRow metrics=metrics />
                            {move || match view_mode.get() {
                                ViewMode::Chart => view! { <ChartsBlock blocks=chart_blocks /> }.into_any(),
                                ViewMode::Table => view! { <TableBlock table=table /> }.into_any(),
                            }}
                        </div>
                    }
                    .into_any(),
                }
            }}
        </section>
    }
}
