use crate::shared::icons::icon;
use contracts::shared::reports::SummaryMetric;
use leptos::prelude::*;

/// Changes within ±0.5% show no arrow
const FLAT_TREND: f64 = 0.5;

/// Arrow, CSS modifier and text of a trend percentage
fn trend_badge(pct: f64) -> (&'static str, &'static str, String) {
    let (arrow, cls) = if pct > FLAT_TREND {
        ("\u{2191}", "metric-card__change metric-card__change--up")
    } else if pct < -FLAT_TREND {
        ("\u{2193}", "metric-card__change metric-card__change--down")
    } else {
        ("", "metric-card__change metric-card__change--flat")
    };
    (arrow, cls, format!("{}{:.1}%", arrow, pct.abs()))
}

#[component]
pub fn MetricCard(metric: SummaryMetric) -> impl IntoView {
    let SummaryMetric {
        label,
        value,
        subtitle,
        trend,
        icon: icon_name,
        ..
    } = metric;

    let change_view = trend.map(|pct| {
        let (_, cls, text) = trend_badge(pct);
        view! { <span class=cls>{text}</span> }
    });

    view! {
        <div class="metric-card">
            {icon_name.map(|name| view! {
                <div class="metric-card__icon">{icon(&name)}</div>
            })}
            <div class="metric-card__content">
                <div class="metric-card__label">{label}</div>
                <div class="metric-card__value">
                    {value}
                    {change_view}
                </div>
                {subtitle.map(|s| view! { <div class="metric-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

/// Row of metric cards
#[component]
pub fn MetricRow(#[prop(into)] metrics: Signal<Vec<SummaryMetric>>) -> impl IntoView {
    view! {
        <div class="metric-row">
            {move || {
                metrics
                    .get()
                    .into_iter()
                    .map(|metric| view! { <MetricCard metric=metric /> })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_badge() {
        assert_eq!(trend_badge(12.34).2, "\u{2191}12.3%");
        assert_eq!(trend_badge(-4.0).0, "\u{2193}");
        assert_eq!(trend_badge(0.2).2, "0.2%");
        assert!(trend_badge(0.2).1.ends_with("--flat"));
    }
}
