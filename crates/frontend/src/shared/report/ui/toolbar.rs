use crate::shared::icons::icon;
use contracts::shared::reports::{ExportFormat, ViewMode};
use leptos::prelude::*;
use thaw::*;

/// View toggle, refresh and export actions of one report
#[component]
pub fn ReportToolbar(
    view_mode: RwSignal<ViewMode>,
    /// Table mode is offered only when the report declares a table
    has_table: bool,
    on_refresh: Callback<()>,
    #[prop(optional)] export_enabled: bool,
    on_export: Callback<ExportFormat>,
    /// Disables export while a fetch is pending; refresh stays available
    #[prop(into)]
    busy: Signal<bool>,
) -> impl IntoView {
    let toggle_view = move |_| {
        view_mode.update(|mode| {
            *mode = match mode {
                ViewMode::Chart => ViewMode::Table,
                ViewMode::Table => ViewMode::Chart,
            }
        });
    };

    let toggle_label = move || match view_mode.get() {
        ViewMode::Chart => ViewMode::Table.label(),
        ViewMode::Table => ViewMode::Chart.label(),
    };

    view! {
        <Flex class="report-toolbar" gap=FlexGap::Small align=FlexAlign::Center>
            {has_table.then(|| view! {
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=toggle_view
                >
                    {toggle_label}
                </Button>
            })}
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                on_click=move |_| on_refresh.run(())
            >
                {icon("refresh")}
                " Refresh"
            </Button>
            {export_enabled.then(|| {
                ExportFormat::ALL
                    .into_iter()
                    .map(|format| view! {
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            disabled=busy
                            on_click=move |_| on_export.run(format)
                        >
                            {icon("download")}
                            {format!(" {}", format.label())}
                        </Button>
                    })
                    .collect_view()
            })}
        </Flex>
    }
}
