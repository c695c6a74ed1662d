//! Gradesight - Temporal bucketing and attention classification engine for
//! LMS gradebook dashboards
//!
//! Gradesight turns a normalized Student → Course → Assignment → Submission
//! tree into the three deterministic views a parent/student dashboard
//! renders: a Monday-anchored weekly grid, a flat detail row list, and a
//! status/percentage progress rollup.
//!
//! Every component is a pure function over an immutable borrow of the tree;
//! all relative-date logic is computed against an explicit `as_of` instant,
//! never a wall clock. Fetching, caching, and rendering live upstream and
//! downstream of this crate.

pub mod adapter;
pub mod dates;
pub mod detail;
pub mod error;
pub mod formatter;
pub mod grid;
pub mod pipeline;
pub mod progress;
pub mod types;

pub use detail::DETAIL_HEADER;
pub use error::EngineError;
pub use formatter::to_grid_items;
pub use grid::today_column;
pub use pipeline::{detail_rows, progress_table, weekly_grids, DashboardEngine};
pub use types::{
    Assignment, AttentionCounts, AttentionType, CheckpointStatus, Course, CourseProgress,
    CourseRow, DetailRow, DisplayStatus, FormatType, GridHeader, GridItem, NoDateBucket,
    ProgressAssignment, ProgressTable, StatusGroupProgress, Student, StudentSummary, StudentTree,
    StudentWeekly, Submission, WeeklyGrid, WeeklyGridsResult,
};

/// Engine version reported by the CLI
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
