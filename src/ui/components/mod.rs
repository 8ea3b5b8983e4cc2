pub mod point_badges;
pub mod result_panel;

pub use point_badges::PointBadgeGrid;
pub use result_panel::ResultPanel;
