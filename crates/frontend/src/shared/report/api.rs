use super::error::FetchError;
use super::payload::ReportPayload;
use crate::shared::api_utils::report_url;
use contracts::shared::reports::ReportQuery;
use gloo_net::http::Request;
use serde_json::Value;

/// Fetch one report payload
///
/// `GET {base}{endpoint}?dealership_ids=..&from=..&to=..`
pub async fn fetch_report(
    base: &str,
    endpoint: &str,
    query: &ReportQuery,
) -> Result<ReportPayload, FetchError> {
    let url = report_url(base, endpoint, query).map_err(FetchError::Network)?;

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Status {
            status,
            message: error_message_from_body(&body),
        });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(ReportPayload::from_response(body))
}

/// `message` (or `error`) field of a JSON error body
fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message_from_body(r#"{"message":"Dealership not found"}"#),
            Some("Dealership not found".to_string())
        );
        assert_eq!(
            error_message_from_body(r#"{"error":"Unauthorized"}"#),
            Some("Unauthorized".to_string())
        );
        assert_eq!(error_message_from_body(r#"{"message":""}"#), None);
        assert_eq!(error_message_from_body("<html>Bad Gateway</html>"), None);
    }
}
