use crate::dashboards::DealerReportsDashboard;
use crate::shared::config::load_config_from_window;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Dashboard config (API location, palette, row limits) for every report view.
    provide_context(load_config_from_window());

    view! {
        <DealerReportsDashboard />
    }
}
