use crate::dashboards::d500_dealer_reports::catalog::load_catalog;
use crate::shared::components::filter_bar::FilterBar;
use crate::shared::icons::icon;
use crate::shared::report::ReportView;
use chrono::Utc;
use contracts::shared::reports::{DateRange, FilterCriteria, ReportCatalog};
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Criteria from the raw filter inputs; the date range applies only
/// when both ends are set.
fn build_criteria(dealership_input: &str, from: &str, to: &str) -> FilterCriteria {
    let range = (!from.trim().is_empty() && !to.trim().is_empty())
        .then(|| DateRange::new(from.trim(), to.trim()));
    FilterCriteria::all()
        .with_dealerships(FilterCriteria::parse_dealership_list(dealership_input))
        .with_date_range(range)
}

/// Expanding a section also marks it opened; opened sections keep loading
/// after being collapsed again.
fn toggle_section(expanded: &mut BTreeSet<String>, opened: &mut BTreeSet<String>, id: &str) {
    if !expanded.remove(id) {
        expanded.insert(id.to_string());
        opened.insert(id.to_string());
    }
}

/// Dealership reports page: shared filters and one collapsible section
/// per catalog report.
#[component]
pub fn DealerReportsDashboard() -> impl IntoView {
    let catalog = load_catalog().unwrap_or_else(|e| {
        log::error!("Failed to load report catalog: {:#}", e);
        ReportCatalog::default()
    });

    let initial_range = DateRange::month_of(Utc::now().date_naive());
    let dealership_input = RwSignal::new(String::new());
    let date_from = RwSignal::new(
        initial_range
            .as_ref()
            .map(|r| r.from.clone())
            .unwrap_or_default(),
    );
    let date_to = RwSignal::new(initial_range.map(|r| r.to).unwrap_or_default());

    let applied = RwSignal::new(build_criteria(
        "",
        &date_from.get_untracked(),
        &date_to.get_untracked(),
    ));
    let criteria = Signal::derive(move || applied.get());
    let active_filters = Signal::derive(move || applied.with(|c| c.active_count()));
    let refresh_trigger = RwSignal::new(0u32);
    let filters_expanded = RwSignal::new(true);

    let first_id: BTreeSet<String> = catalog.reports.first().map(|r| r.id.clone()).into_iter().collect();
    let expanded = RwSignal::new(first_id.clone());
    let opened = RwSignal::new(first_id);

    let on_apply = Callback::new(move |_: ()| {
        let next = build_criteria(
            &dealership_input.get_untracked(),
            &date_from.get_untracked(),
            &date_to.get_untracked(),
        );
        if applied.get_untracked() != next {
            log::info!("Applying report filters: {:?}", next);
            applied.set(next);
        }
    });

    let on_refresh_all = Callback::new(move |_: ()| {
        refresh_trigger.update(|n| *n = n.wrapping_add(1));
    });

    let sections = catalog
        .reports
        .into_iter()
        .map(|descriptor| {
            let id = descriptor.id.clone();
            let title = descriptor.title.clone();

            let is_expanded = {
                let id = id.clone();
                Signal::derive(move || expanded.with(|s| s.contains(&id)))
            };
            let should_load = {
                let id = id.clone();
                Signal::derive(move || opened.with(|s| s.contains(&id)))
            };
            let on_toggle = move |_| {
                let mut exp = expanded.get_untracked();
                let mut open = opened.get_untracked();
                toggle_section(&mut exp, &mut open, &id);
                expanded.set(exp);
                if opened.with_untracked(|current| *current != open) {
                    opened.set(open);
                }
            };

            view! {
                <div class="report-section">
                    <div class="report-section__header" on:click=on_toggle>
                        <span class=move || {
                            if is_expanded.get() {
                                "report-section__chevron report-section__chevron--expanded"
                            } else {
                                "report-section__chevron"
                            }
                        }>
                            {icon("chevron")}
                        </span>
                        <span class="report-section__title">{title}</span>
                    </div>
                    <div
                        class="report-section__body"
                        style:display=move || if is_expanded.get() { "block" } else { "none" }
                    >
                        <ReportView
                            descriptor=descriptor
                            criteria=criteria
                            refresh_trigger=refresh_trigger
                            export_enabled=true
                            should_load=should_load
                        />
                    </div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div id="d500_dealer_reports--dashboard" class="d500-dashboard">
            <h2 class="d500-dashboard__title">"Dealership Reports"</h2>
            <FilterBar
                is_expanded=filters_expanded
                dealership_input=dealership_input
                date_from=date_from
                date_to=date_to
                active_filters_count=active_filters
                on_apply=on_apply
                on_refresh_all=on_refresh_all
            />
            <div class="d500-dashboard__reports">{sections}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_criteria_needs_both_dates() {
        let criteria = build_criteria(" d1, d2 ,d1", "2024-03-01", "2024-03-31");
        assert_eq!(
            criteria.dealership_ids,
            Some(vec!["d1".to_string(), "d2".to_string()])
        );
        assert_eq!(
            criteria.date_range,
            Some(DateRange::new("2024-03-01", "2024-03-31"))
        );

        let open_ended = build_criteria("", "2024-03-01", "");
        assert_eq!(open_ended, FilterCriteria::all());
    }

    #[test]
    fn test_toggle_section_keeps_opened_reports_loaded() {
        let mut expanded = BTreeSet::new();
        let mut opened = BTreeSet::new();

        toggle_section(&mut expanded, &mut opened, "lead_sources");
        assert!(expanded.contains("lead_sources"));
        assert!(opened.contains("lead_sources"));

        toggle_section(&mut expanded, &mut opened, "lead_sources");
        assert!(!expanded.contains("lead_sources"));
        assert!(opened.contains("lead_sources"));
    }
}
