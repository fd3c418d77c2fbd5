use super::api;
use super::lifecycle::FetchLifecycle;
use crate::shared::api_utils::api_base;
use crate::shared::config::DashboardConfig;
use contracts::shared::reports::{FilterCriteria, ReportDescriptor};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Reactive handle of one report's data
#[derive(Clone, Copy)]
pub struct ReportHandle {
    pub state: RwSignal<FetchLifecycle>,
    /// Refetch with the last-used criteria
    pub refresh: Callback<()>,
}

/// Keeps a report's payload in sync with its criteria.
///
/// Fetches on mount and whenever `criteria` or `refresh_trigger` change,
/// but only while `should_load` is true; a lazy report stays Loading
/// until it is opened.
pub fn use_report_data(
    descriptor: &ReportDescriptor,
    criteria: Signal<FilterCriteria>,
    refresh_trigger: Signal<u32>,
    should_load: Signal<bool>,
) -> ReportHandle {
    let state = RwSignal::new(FetchLifecycle::default());
    let config = use_context::<DashboardConfig>().unwrap_or_default();
    let base = api_base(&config.api);
    let endpoint = descriptor.endpoint.clone();
    let report_id = descriptor.id.clone();
    let fallback = descriptor.fallback_error();

    let start = move |criteria: FilterCriteria, gated_open: bool| {
        let token = state
            .try_update(|s| s.begin_gated(gated_open, criteria.clone()))
            .flatten();
        let Some(token) = token else {
            return;
        };

        log::debug!("{}: fetch #{} started", report_id, token.value());
        let base = base.clone();
        let endpoint = endpoint.clone();
        let report_id = report_id.clone();
        let fallback = fallback.clone();
        spawn_local(async move {
            let result = api::fetch_report(&base, &endpoint, &criteria.to_query()).await;
            if let Err(e) = &result {
                log::error!("{}: {}", report_id, e);
            }
            let applied = state
                .try_update(|s| s.complete(token, result, &fallback))
                .unwrap_or(false);
            if applied {
                log::debug!("{}: fetch #{} applied", report_id, token.value());
            } else {
                log::debug!("{}: stale fetch #{} discarded", report_id, token.value());
            }
        });
    };

    let start_on_change = start.clone();
    Effect::new(move |_| {
        let current = criteria.get();
        refresh_trigger.track();
        let open = should_load.get();
        start_on_change(current, open);
    });

    let refresh = Callback::new(move |_: ()| {
        let current = criteria.get_untracked();
        let reuse = state.with_untracked(|s| s.refresh_criteria(&current));
        start(reuse, true);
    });

    ReportHandle { state, refresh }
}
