use super::format::{as_number, format_value};
use super::payload::ReportPayload;
use contracts::shared::reports::{FieldSpec, SummaryMetric};

/// Reads every field spec from the payload, in declaration order.
///
/// Absent fields take the spec's default; a brand-new dealership with no
/// data yields a row of zeroes, not an error.
pub fn extract_metrics(payload: &ReportPayload, specs: &[FieldSpec]) -> Vec<SummaryMetric> {
    specs
        .iter()
        .map(|spec| {
            let raw = payload
                .get(&spec.path)
                .cloned()
                .unwrap_or_else(|| spec.default.clone());
            let trend = spec
                .trend_path
                .as_deref()
                .and_then(|path| payload.get(path))
                .and_then(as_number);

            SummaryMetric {
                label: spec.label.clone(),
                value: format_value(&raw, spec.format, spec.decimals),
                raw,
                subtitle: spec.subtitle.clone(),
                trend,
                icon: spec.icon.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::reports::ValueFormat;
    use serde_json::json;

    #[test]
    fn test_extracts_summary_fields_in_order() {
        let payload = ReportPayload::new(json!({ "summary": { "totalAds": 120, "activeAds": 80 } }));
        let specs = vec![
            FieldSpec::new("summary.totalAds", "Total Ads", ValueFormat::Plain),
            FieldSpec::new("summary.activeAds", "Active Ads", ValueFormat::Plain),
        ];

        let metrics = extract_metrics(&payload, &specs);
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].label, "Total Ads");
        assert_eq!(metrics[0].raw, json!(120));
        assert_eq!(metrics[0].value, "120");
        assert_eq!(metrics[1].label, "Active Ads");
        assert_eq!(metrics[1].raw, json!(80));
    }

    #[test]
    fn test_missing_fields_take_declared_defaults() {
        let payload = ReportPayload::new(json!({ "summary": { "spend": null } }));
        let specs = vec![
            FieldSpec::new("summary.spend", "Spend", ValueFormat::Currency),
            FieldSpec::new("summary.topMake", "Top Make", ValueFormat::Plain)
                .with_default(json!("N/A")),
            FieldSpec::new("nowhere.at.all", "Rate", ValueFormat::Percent),
        ];

        let metrics = extract_metrics(&payload, &specs);
        assert_eq!(metrics[0].value, "$0");
        assert_eq!(metrics[1].value, "N/A");
        assert_eq!(metrics[2].value, "0%");
        assert_eq!(metrics[2].raw, json!(0));
    }

    #[test]
    fn test_trend_is_read_from_its_own_path() {
        let payload = ReportPayload::new(json!({ "summary": { "leads": 40, "leadsChange": -12.5 } }));
        let mut spec = FieldSpec::new("summary.leads", "Leads", ValueFormat::Integer);
        spec.trend_path = Some("summary.leadsChange".to_string());

        let metrics = extract_metrics(&payload, &[spec]);
        assert_eq!(metrics[0].trend, Some(-12.5));
    }
}
