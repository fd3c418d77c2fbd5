pub mod d500_dealer_reports;

pub use d500_dealer_reports::ui::DealerReportsDashboard;
