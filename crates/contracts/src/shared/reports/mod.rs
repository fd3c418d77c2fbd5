//! Shared DTOs for the dealership report dashboard.
//!
//! - `filter` — what a fetch is scoped to and how it goes on the wire
//! - `spec`   — declarative report descriptors (metrics, charts, table)
//! - `view`   — display-ready shapes handed to cards, charts and tables

pub mod filter;
pub mod spec;
pub mod view;

pub use filter::*;
pub use spec::*;
pub use view::*;
