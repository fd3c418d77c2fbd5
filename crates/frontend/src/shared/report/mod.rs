//! Report rendering pipeline
//!
//! fetch (api, fetcher, lifecycle) → payload → metrics / series / table → ui

pub mod api;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod lifecycle;
pub mod metrics;
pub mod payload;
pub mod series;
pub mod table;
pub mod ui;

pub use error::FetchError;
pub use fetcher::{use_report_data, ReportHandle};
pub use lifecycle::{FetchLifecycle, ReportStatus, RequestToken};
pub use payload::ReportPayload;
pub use ui::ReportView;
