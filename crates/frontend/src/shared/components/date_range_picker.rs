use chrono::Utc;
use contracts::shared::reports::DateRange;
use leptos::prelude::*;
use thaw::*;

/// Two date inputs plus current / previous month shortcuts.
///
/// Dates are `yyyy-mm-dd`; an empty pair means "no date filter".
#[component]
pub fn DateRangePicker(
    #[prop(into)] date_from: Signal<String>,
    #[prop(into)] date_to: Signal<String>,
    /// Called with the new (from, to)
    on_change: Callback<(String, String)>,
    #[prop(optional)] label: Option<String>,
) -> impl IntoView {
    let emit = move |range: Option<DateRange>| {
        if let Some(range) = range {
            on_change.run((range.from, range.to));
        }
    };

    let on_current_month = move |_| emit(DateRange::month_of(Utc::now().date_naive()));

    // Steps back from the selected month, or from today when nothing is selected
    let on_previous_month = move |_| {
        let from = date_from.get_untracked();
        let base = if from.is_empty() {
            DateRange::month_of(Utc::now().date_naive())
        } else {
            Some(DateRange::new(from, date_to.get_untracked()))
        };
        emit(base.and_then(|range| range.previous_month()));
    };

    let on_clear = move |_| on_change.run((String::new(), String::new()));

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! { <Label>{l}</Label> })}

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=date_from
                    on:input=move |ev| {
                        on_change.run((event_target_value(&ev), date_to.get_untracked()));
                    }
                />
                <div>"—"</div>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=date_to
                    on:input=move |ev| {
                        on_change.run((date_from.get_untracked(), event_target_value(&ev)));
                    }
                />
                <ButtonGroup>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_previous_month
                    >
                        "-1M"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_current_month
                    >
                        "0M"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_clear
                    >
                        "All"
                    </Button>
                </ButtonGroup>
            </Flex>
        </Flex>
    }
}
