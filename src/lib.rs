//! RunPlan - Running Training Plan Builder
//!
//! Compose running sessions from single efforts, work/rest series and
//! groups of both. Durations, distances and paces are derived from a
//! threshold pace, and the plan keeps a stable two-level order that can be
//! rendered as a bar chart and summarized.

pub mod metrics;
pub mod plan;
pub mod storage;

// Re-export commonly used types
pub use metrics::pace::ThresholdPace;
pub use plan::store::PlanStore;
pub use plan::summary::PlanSummary;
pub use storage::config::AppConfig;
