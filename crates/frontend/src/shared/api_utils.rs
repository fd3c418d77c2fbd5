//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing report API URLs.

use crate::shared::config::ApiConfig;
use contracts::shared::reports::ReportQuery;

/// Get the base URL for API requests
///
/// Uses `base_url` from config when set, otherwise the current window
/// location with the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base(config: &ApiConfig) -> String {
    if let Some(base) = config.base_url.as_deref().filter(|b| !b.is_empty()) {
        return base.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, config.port)
}

/// Build a report URL: base + endpoint + encoded query (absent fields omitted)
///
/// # Example
/// ```rust,ignore
/// let url = report_url("http://localhost:3000", "/api/reports/inventory-status", &query)?;
/// ```
pub fn report_url(base: &str, endpoint: &str, query: &ReportQuery) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    if qs.is_empty() {
        Ok(format!("{}{}", base, endpoint))
    } else {
        Ok(format!("{}{}?{}", base, endpoint, qs))
    }
}
