mod chart_block;
mod report_view;
mod table_block;
mod toolbar;

pub use chart_block::{ChartMount, ChartsBlock};
pub use report_view::ReportView;
pub use table_block::TableBlock;
pub use toolbar::ReportToolbar;
