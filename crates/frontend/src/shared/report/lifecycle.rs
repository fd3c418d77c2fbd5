//! Fetch lifecycle of one report instance.
//!
//! Loading → Ready | Error, and back to Loading on every new fetch.
//! Each fetch gets a `RequestToken`; only the latest token may settle the
//! state, so a slow older response never overwrites a newer one.

use super::error::FetchError;
use super::payload::ReportPayload;
use contracts::shared::reports::FilterCriteria;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportStatus {
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchLifecycle {
    status: ReportStatus,
    payload: Option<ReportPayload>,
    latest: Option<RequestToken>,
    last_criteria: Option<FilterCriteria>,
}

impl Default for FetchLifecycle {
    fn default() -> Self {
        Self {
            status: ReportStatus::Loading,
            payload: None,
            latest: None,
            last_criteria: None,
        }
    }
}

impl FetchLifecycle {
    pub fn status(&self) -> &ReportStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ReportStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ReportStatus::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Payload of the last successful fetch, only while Ready
    pub fn payload(&self) -> Option<&ReportPayload> {
        match self.status {
            ReportStatus::Ready => self.payload.as_ref(),
            _ => None,
        }
    }

    pub fn latest_token(&self) -> Option<RequestToken> {
        self.latest
    }

    pub fn last_criteria(&self) -> Option<&FilterCriteria> {
        self.last_criteria.as_ref()
    }

    /// Criteria a manual refresh should use
    pub fn refresh_criteria(&self, current: &FilterCriteria) -> FilterCriteria {
        self.last_criteria.clone().unwrap_or_else(|| current.clone())
    }

    /// Enters Loading and issues the token the completion must present
    pub fn begin(&mut self, criteria: FilterCriteria) -> RequestToken {
        let next = self.latest.map(|t| t.0 + 1).unwrap_or(1);
        let token = RequestToken(next);
        self.latest = Some(token);
        self.last_criteria = Some(criteria);
        self.status = ReportStatus::Loading;
        token
    }

    /// Lazy reports: nothing happens until `should_load` is true
    pub fn begin_gated(&mut self, should_load: bool, criteria: FilterCriteria) -> Option<RequestToken> {
        should_load.then(|| self.begin(criteria))
    }

    /// Settles the fetch identified by `token`.
    ///
    /// Returns `false` (state untouched) when a newer fetch was started.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<ReportPayload, FetchError>,
        fallback_error: &str,
    ) -> bool {
        if self.latest != Some(token) {
            return false;
        }
        match result {
            Ok(payload) => {
                self.payload = Some(payload);
                self.status = ReportStatus::Ready;
            }
            Err(err) => {
                self.payload = None;
                self.status = ReportStatus::Error(err.user_message(fallback_error));
            }
        }
        true
    }
}
