pub mod date_range_picker;
pub mod filter_bar;
pub mod metric_card;
