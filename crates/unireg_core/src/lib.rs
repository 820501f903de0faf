//! # UniReg Core
//!
//! In-memory academic records for a single university.
//!
//! This crate provides:
//! - Validated identifiers and the four record types (students, faculty,
//!   courses, departments)
//! - The [`University`] registry, which owns every record and keeps
//!   cross-record links consistent on enroll, assign, and remove
//! - Aggregate statistics and a read-only integrity report
//! - JSON persistence through [`DataStore`]
//!
//! ## Design Principles
//!
//! - Records refer to each other by ID, never by reference
//! - Only the registry changes links that span two records
//! - Missing and duplicate IDs are [`Outcome`]s, not errors
//! - Field validation happens before any mutation
//!
//! ## Example
//!
//! ```rust
//! use unireg_core::{Course, Outcome, Student, University};
//!
//! let mut uni = University::default();
//! let _ = uni.add_student(Student::new("S0001", "Alice Johnson", 20, "F", "CSE")?);
//! let _ = uni.add_course(Course::new("CSE101", "Introduction to Programming", 3)?);
//! let _ = uni.enroll_student_in_course("S0001", "CSE101");
//!
//! assert_eq!(uni.assign_grade("S0001", "CSE101", 3.8), Outcome::Applied);
//! assert_eq!(uni.remove_course("CSE101"), Outcome::Applied);
//! assert_eq!(uni.find_student("S0001").map(|s| s.course_count()), Some(0));
//! # Ok::<(), unireg_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod entity;
mod error;
mod outcome;
mod registry;
pub mod sample;
mod stats;
mod store;

pub use config::{
    Config, LegacyFiles, DEFAULT_UNIVERSITY_ADDRESS, DEFAULT_UNIVERSITY_NAME, LEGACY_FILES,
    UNIFIED_FILE,
};
pub use entity::{
    Course, CourseId, CoursePatch, Department, DepartmentId, DepartmentPatch, EntityKind, Faculty,
    FacultyId, FacultyPatch, Record, Student, StudentId, StudentPatch, MAX_GRADE, MIN_GRADE,
};
pub use error::{CoreError, CoreResult};
pub use outcome::Outcome;
pub use registry::{Collection, IntegrityIssue, University};
pub use sample::SampleSummary;
pub use stats::{DepartmentStats, UniversityStats};
pub use store::{DataStore, LoadReport, RecordCounts};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
