//! Pipeline orchestration
//!
//! This module provides the public API for Gradesight: free functions that
//! resolve a timezone name once and delegate to the components, plus a
//! [`DashboardEngine`] facade for callers that build many views against
//! one configured timezone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::dates::resolve_tz;
use crate::error::EngineError;
use crate::types::{DetailRow, ProgressTable, Student, StudentTree, WeeklyGridsResult};
use crate::{detail, grid, progress};

/// Build weekly grids for every student in the tree.
///
/// # Arguments
/// * `tree` - The normalized student tree
/// * `as_of` - Reference instant for all relative-date logic
/// * `timezone` - IANA timezone name (e.g. "America/Los_Angeles"); UTC when omitted
pub fn weekly_grids(
    tree: &StudentTree,
    as_of: DateTime<Utc>,
    timezone: Option<&str>,
) -> Result<WeeklyGridsResult, EngineError> {
    grid::weekly_grids(tree, as_of, tz_or_utc(timezone)?)
}

/// Build the flat detail rows for one student subtree.
pub fn detail_rows(
    student: &Student,
    as_of: DateTime<Utc>,
    timezone: Option<&str>,
) -> Result<Vec<DetailRow>, EngineError> {
    Ok(detail::detail_rows(student, as_of, tz_or_utc(timezone)?))
}

/// Build the progress rollup for one student id; `Ok(None)` when the
/// student does not exist.
pub fn progress_table(
    tree: &StudentTree,
    student_id: &str,
    as_of: DateTime<Utc>,
    timezone: Option<&str>,
) -> Result<Option<ProgressTable>, EngineError> {
    Ok(progress::progress_table(
        tree,
        student_id,
        as_of,
        tz_or_utc(timezone)?,
    ))
}

fn tz_or_utc(timezone: Option<&str>) -> Result<Tz, EngineError> {
    match timezone {
        Some(name) => resolve_tz(name),
        None => Ok(chrono_tz::UTC),
    }
}

/// Configured facade for building many views against one timezone.
///
/// Holds no mutable state; every method is a pure function of its inputs
/// and the parsed timezone.
#[derive(Debug, Clone, Copy)]
pub struct DashboardEngine {
    timezone: Tz,
}

impl Default for DashboardEngine {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
        }
    }
}

impl DashboardEngine {
    /// Create an engine for the given IANA timezone; UTC when omitted.
    pub fn new(timezone: Option<&str>) -> Result<Self, EngineError> {
        Ok(Self {
            timezone: tz_or_utc(timezone)?,
        })
    }

    pub fn timezone(&self) -> &str {
        self.timezone.name()
    }

    pub fn weekly_grids(
        &self,
        tree: &StudentTree,
        as_of: DateTime<Utc>,
    ) -> Result<WeeklyGridsResult, EngineError> {
        grid::weekly_grids(tree, as_of, self.timezone)
    }

    pub fn detail_rows(&self, student: &Student, as_of: DateTime<Utc>) -> Vec<DetailRow> {
        detail::detail_rows(student, as_of, self.timezone)
    }

    pub fn progress_table(
        &self,
        tree: &StudentTree,
        student_id: &str,
        as_of: DateTime<Utc>,
    ) -> Option<ProgressTable> {
        progress::progress_table(tree, student_id, as_of, self.timezone)
    }
}
