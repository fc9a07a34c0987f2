pub mod bounds;
pub mod config;
pub mod locale;
pub mod planner;

pub use bounds::Bounds;
pub use config::{SpanZoom, ViewportConfig};
pub use locale::{default_region, default_regions, LocaleMatcher, LocaleTag, RegionDefault};
pub use planner::{plan_initial_viewport, plan_viewport, CoordinateSpan, Viewport, ViewportSource};
