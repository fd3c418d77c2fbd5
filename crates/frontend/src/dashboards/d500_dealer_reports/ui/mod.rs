mod dashboard;

pub use dashboard::DealerReportsDashboard;
