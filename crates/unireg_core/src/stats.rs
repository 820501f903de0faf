//! Aggregate statistics over the registry.
//!
//! Both report types are plain snapshots: they copy what they need and hold
//! no borrow of the registry, so they can be serialized or printed freely.
//!
//! ```rust
//! use unireg_core::University;
//!
//! let uni = University::default();
//! let stats = uni.university_stats();
//! assert_eq!(stats.total_students, 0);
//! assert_eq!(stats.average_gpa, 0.0);
//! ```

use crate::registry::University;
use serde::Serialize;

/// University-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniversityStats {
    /// University name.
    pub name: String,
    /// University address.
    pub address: String,
    /// Number of students.
    pub total_students: usize,
    /// Number of faculty members.
    pub total_faculty: usize,
    /// Number of courses.
    pub total_courses: usize,
    /// Number of departments.
    pub total_departments: usize,
    /// Mean GPA across all students.
    pub average_gpa: f64,
}

/// Headcounts for one department.
///
/// Students and faculty are counted by exact equality between their
/// `department` code and the department ID. A code that differs in case or
/// spelling is simply not counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentStats {
    /// Department ID.
    pub department_id: String,
    /// Department name.
    pub name: String,
    /// Students whose department code matches.
    pub students: usize,
    /// Faculty whose department code matches.
    pub faculty: usize,
    /// Courses in the department's offered set.
    pub courses_offered: usize,
}

impl University {
    /// Returns university-wide totals.
    pub fn university_stats(&self) -> UniversityStats {
        UniversityStats {
            name: self.name().to_string(),
            address: self.address().to_string(),
            total_students: self.students().len(),
            total_faculty: self.faculty().len(),
            total_courses: self.courses().len(),
            total_departments: self.departments().len(),
            average_gpa: self.average_gpa(),
        }
    }

    /// Returns one row per department, in registry order.
    pub fn department_stats(&self) -> Vec<DepartmentStats> {
        self.departments()
            .iter()
            .map(|department| {
                let id = department.id().as_str();
                DepartmentStats {
                    department_id: id.to_string(),
                    name: department.name().to_string(),
                    students: self
                        .students()
                        .iter()
                        .filter(|s| s.department() == id)
                        .count(),
                    faculty: self
                        .faculty()
                        .iter()
                        .filter(|f| f.department() == id)
                        .count(),
                    courses_offered: department.courses_offered().len(),
                }
            })
            .collect()
    }
}
