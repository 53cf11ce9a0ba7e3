pub mod classifier;
pub mod collector;
pub mod config;
pub mod logging;
pub mod placer;
pub mod plan;

pub use classifier::{Decision, classify, decide};
pub use collector::{CollectReport, Collector, Placement};
pub use config::LayoutConfig;
pub use jlayout_api::Result;
pub use logging::{LogOptions, init_logging};
pub use placer::{PlacementOutcome, place};
pub use plan::{Plan, PlanEntry};
