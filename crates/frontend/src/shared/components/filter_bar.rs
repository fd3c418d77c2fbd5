use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Collapsible filter panel of the reports page.
///
/// Edits stay local until Apply; "Refresh all" refetches every report
/// with the filters already applied.
#[component]
pub fn FilterBar(
    #[prop(into)] is_expanded: RwSignal<bool>,
    /// Comma-separated dealership ids as typed
    dealership_input: RwSignal<String>,
    date_from: RwSignal<String>,
    date_to: RwSignal<String>,
    /// Number of applied filters (badge)
    #[prop(into)]
    active_filters_count: Signal<usize>,
    on_apply: Callback<()>,
    on_refresh_all: Callback<()>,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    let on_dates_change = Callback::new(move |(from, to): (String, String)| {
        date_from.set(from);
        date_to.set(to);
    });

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! {
                            <span class="badge badge--primary">{count}</span>
                        })
                    }}
                </div>
                <div class="filter-panel-header__right">
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_refresh_all.run(())
                    >
                        {icon("refresh")}
                        " Refresh all"
                    </Button>
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    <Flex gap=FlexGap::Large align=FlexAlign::End>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Dealerships"</Label>
                            <Input value=dealership_input placeholder="All dealerships (ids, comma-separated)" />
                        </Flex>
                        <DateRangePicker
                            date_from=date_from
                            date_to=date_to
                            on_change=on_dates_change
                            label="Period".to_string()
                        />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| on_apply.run(())
                        >
                            "Apply"
                        </Button>
                    </Flex>
                </div>
            </div>
        </div>
    }
}
