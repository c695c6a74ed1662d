//! Core types for the Gradesight engine
//!
//! This module defines the normalized input tree the engine consumes
//! (students → courses → assignments → submissions, each carrying the raw
//! Canvas pass-through fields plus curated meta) and every derived,
//! output-only shape (weekly grids, detail rows, progress rollups).
//!
//! All inputs are immutable borrows; the engine never mutates the tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The full normalized tree produced by the upstream fetch/build layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentTree {
    #[serde(default)]
    pub students: BTreeMap<String, Student>,
}

impl StudentTree {
    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.get(student_id)
    }
}

/// One student, owning a map of courses keyed by course id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub courses: BTreeMap<String, Course>,
}

/// One course, owning a map of assignments keyed by assignment id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    #[serde(default)]
    pub canvas: CanvasCourse,
    #[serde(default)]
    pub assignments: BTreeMap<String, Assignment>,
}

/// Raw Canvas course fields passed through untouched by the builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasCourse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One assignment for one student, with zero or more submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    /// Secondary deep link, used only when the Canvas URL is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub canvas: CanvasAssignment,
    pub meta: AssignmentMeta,
    #[serde(default)]
    pub submissions: BTreeMap<String, Submission>,
}

/// Raw Canvas assignment fields passed through untouched by the builder.
///
/// Field names match the Canvas API (snake_case), unlike the curated
/// camelCase meta object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasAssignment {
    #[serde(default)]
    pub name: String,
    /// Due instant (not wall time); absence is meaningful
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_possible: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// Curated per-assignment rollup maintained by the builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentMeta {
    pub checkpoint_status: DisplayStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_type: Option<String>,
}

/// One submission record. Every field optional; absence is data, not error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_graded: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graded_at: Option<DateTime<Utc>>,
}

/// Open-ended checkpoint status string, passed through verbatim on the
/// detail and progress paths.
///
/// The weekly grid needs the closed four-value set instead; see
/// [`DisplayStatus::grid_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayStatus(String);

impl DisplayStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to the closed grid status set. `Submitted (Late)` folds into
    /// `Submitted`; statuses outside the set have no grid representation.
    pub fn grid_status(&self) -> Option<CheckpointStatus> {
        match self.0.as_str() {
            "Due" => Some(CheckpointStatus::Due),
            "Missing" => Some(CheckpointStatus::Missing),
            "Submitted" | "Submitted (Late)" => Some(CheckpointStatus::Submitted),
            "Graded" => Some(CheckpointStatus::Graded),
            _ => None,
        }
    }

    /// Fixed ordering for progress status groups. Unknown statuses sort last.
    pub fn priority(&self) -> u8 {
        match self.0.as_str() {
            "Due" => 0,
            "Missing" => 1,
            "Submitted (Late)" => 2,
            "Submitted" => 3,
            "Graded" => 4,
            "Optional" => 5,
            "Closed" => 6,
            "Vector" => 7,
            "Locked" => 8,
            _ => 9,
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DisplayStatus {
    fn from(status: &str) -> Self {
        Self(status.to_string())
    }
}

/// Closed checkpoint status set assumed by the weekly grid path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointStatus {
    Due,
    Missing,
    Submitted,
    Graded,
}

impl CheckpointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckpointStatus::Due => "Due",
            CheckpointStatus::Missing => "Missing",
            CheckpointStatus::Submitted => "Submitted",
            CheckpointStatus::Graded => "Graded",
        }
    }
}

/// Derived UI-facing classification of whether an assignment needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttentionType {
    Check,
    Thumb,
    Question,
    Warning,
}

impl AttentionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttentionType::Check => "check",
            AttentionType::Thumb => "thumb",
            AttentionType::Question => "question",
            AttentionType::Warning => "warning",
        }
    }
}

/// Title format applied by the item formatter, one per bucket kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    Prior,
    Weekday,
    Next,
}

/// One formatted, validated calendar cell entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    pub url: String,
    pub attention_type: AttentionType,
}

/// Tally of grid item attention types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttentionCounts {
    pub check: u32,
    pub thumb: u32,
    pub question: u32,
    pub warning: u32,
}

impl AttentionCounts {
    pub fn record(&mut self, attention: AttentionType) {
        match attention {
            AttentionType::Check => self.check += 1,
            AttentionType::Thumb => self.thumb += 1,
            AttentionType::Question => self.question += 1,
            AttentionType::Warning => self.warning += 1,
        }
    }

    pub fn add(&mut self, other: &AttentionCounts) {
        self.check += other.check;
        self.thumb += other.thumb;
        self.question += other.question;
        self.warning += other.warning;
    }

    pub fn total(&self) -> u32 {
        self.check + self.thumb + self.question + self.warning
    }
}

/// Rollup of a course's assignments with no due date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoDateBucket {
    pub count: u32,
    pub points: f64,
    pub label: String,
    pub url: String,
}

/// One course's row in the weekly grid: nine buckets plus attention tallies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRow {
    pub course_id: String,
    pub course_name: String,
    pub prior: Vec<GridItem>,
    /// Mon..Fri of the current week, indexed by weekday offset from Monday
    pub weekdays: [Vec<GridItem>; 5],
    pub next: Vec<GridItem>,
    pub no_date: NoDateBucket,
    /// Tally across prior/weekday/next items; NoDate is excluded
    pub attention_counts: AttentionCounts,
    pub total_items: u32,
}

/// Header block for one student's weekly grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridHeader {
    pub student_header: String,
    pub columns: [String; 9],
    /// Monday anchoring the displayed week, as a local calendar date
    pub monday: chrono::NaiveDate,
    pub timezone: String,
    /// Column index (2..=6) matching `as_of`'s weekday, when inside Mon-Fri
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_column: Option<usize>,
}

/// One student's weekly grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGrid {
    pub header: GridHeader,
    pub rows: Vec<CourseRow>,
}

/// Student-level attention rollup across all owned courses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub attention_counts: AttentionCounts,
    pub total_items: u32,
}

/// Grid plus summary for one student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWeekly {
    pub summary: StudentSummary,
    pub grid: WeeklyGrid,
}

/// Result of [`crate::grid::weekly_grids`], keyed by student id.
pub type WeeklyGridsResult = BTreeMap<String, StudentWeekly>;

/// One flat row per (course, assignment) for the detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    pub student: String,
    pub course: String,
    pub teacher: String,
    pub assignment: String,
    pub status: DisplayStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_possible: Option<f64>,
    pub points_graded: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_pct: Option<u32>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graded: Option<String>,
}

/// One eligible assignment inside a progress status group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAssignment {
    pub id: String,
    pub name: String,
    pub status: DisplayStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_possible: Option<f64>,
    pub points_earned: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

/// Assignments sharing one status within a course, with earned/possible sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusGroupProgress {
    pub status: DisplayStatus,
    pub assignments: Vec<ProgressAssignment>,
    pub earned: f64,
    pub possible: f64,
    pub percent: String,
}

/// One course's progress rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: String,
    pub course_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    pub groups: Vec<StatusGroupProgress>,
    pub earned: f64,
    pub possible: f64,
    pub percent: String,
}

/// Full student → courses → status-groups → assignments rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressTable {
    pub student_id: String,
    pub student_name: String,
    pub courses: Vec<CourseProgress>,
    pub earned: f64,
    pub possible: f64,
    pub percent: String,
}
