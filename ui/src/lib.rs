//! Presentation components shared by the dashboard pages.

mod cards;
pub mod charts;
mod filter;

pub use cards::{Avatar, Badge, BadgeVariant, ChartCard, StatCard};
pub use charts::{CHARTS, Chart, Load, use_chart_library};
pub use filter::{DateInput, FilterDropdown, SearchInput};
