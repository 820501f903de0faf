//! Fixed sample data set.
//!
//! [`populate`] replaces the registry's records with a small, fully linked
//! university: four departments, five faculty members, eight courses, and
//! eight students with three graded enrollments each. Everything goes
//! through the public registry API, so the result is consistent.

use crate::entity::{Course, Department, Faculty, Student};
use crate::error::CoreResult;
use crate::outcome::Outcome;
use crate::registry::University;
use serde::Serialize;
use tracing::info;

const DEPARTMENTS: &[(&str, &str)] = &[
    ("CSE", "Computer Science & Engineering"),
    ("EEE", "Electrical & Electronics Engineering"),
    ("MAT", "Mathematics"),
    ("PHY", "Physics"),
];

const FACULTY: &[(&str, &str, &str)] = &[
    ("F0001", "Dr. Sarah Johnson", "CSE"),
    ("F0002", "Prof. Michael Chen", "CSE"),
    ("F0003", "Dr. Emily Davis", "EEE"),
    ("F0004", "Prof. Robert Wilson", "MAT"),
    ("F0005", "Dr. Lisa Thompson", "PHY"),
];

const HEADS: &[(&str, &str)] = &[
    ("CSE", "F0001"),
    ("EEE", "F0003"),
    ("MAT", "F0004"),
    ("PHY", "F0005"),
];

/// (course, name, credit hours, offering department, instructor)
const COURSES: &[(&str, &str, u32, &str, &str)] = &[
    ("CSE101", "Introduction to Programming", 3, "CSE", "F0001"),
    ("CSE201", "Data Structures", 4, "CSE", "F0002"),
    ("CSE301", "Algorithms", 4, "CSE", "F0001"),
    ("EEE101", "Circuit Theory", 3, "EEE", "F0003"),
    ("MAT101", "Calculus I", 4, "MAT", "F0004"),
    ("PHY101", "Physics I", 3, "PHY", "F0005"),
    ("CSE401", "Database Systems", 3, "CSE", "F0002"),
    ("CSE501", "Machine Learning", 4, "CSE", "F0001"),
];

const STUDENTS: &[(&str, &str, u32, &str, &str)] = &[
    ("S0001", "Alice Johnson", 20, "F", "CSE"),
    ("S0002", "Bob Smith", 21, "M", "CSE"),
    ("S0003", "Charlie Brown", 22, "M", "EEE"),
    ("S0004", "Diana Prince", 19, "F", "CSE"),
    ("S0005", "Edward Lee", 20, "M", "MAT"),
    ("S0006", "Fiona Green", 21, "F", "PHY"),
    ("S0007", "George King", 23, "M", "CSE"),
    ("S0008", "Hannah White", 20, "F", "EEE"),
];

const GRADES: &[(&str, [(&str, f64); 3])] = &[
    ("S0001", [("CSE101", 3.8), ("MAT101", 3.5), ("PHY101", 3.2)]),
    ("S0002", [("CSE101", 3.0), ("CSE201", 3.3), ("EEE101", 2.8)]),
    ("S0003", [("EEE101", 3.7), ("MAT101", 3.9), ("PHY101", 3.5)]),
    ("S0004", [("CSE101", 4.0), ("CSE201", 3.8), ("CSE301", 3.6)]),
    ("S0005", [("MAT101", 3.2), ("PHY101", 2.9), ("CSE101", 3.1)]),
    ("S0006", [("PHY101", 3.8), ("MAT101", 3.4), ("EEE101", 3.0)]),
    ("S0007", [("CSE201", 3.5), ("CSE301", 3.7), ("CSE401", 3.9)]),
    ("S0008", [("EEE101", 3.1), ("MAT101", 3.3), ("PHY101", 3.0)]),
];

/// What [`populate`] created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SampleSummary {
    /// Departments added.
    pub departments: usize,
    /// Faculty members added.
    pub faculty: usize,
    /// Courses added.
    pub courses: usize,
    /// Students added.
    pub students: usize,
    /// Enrollments made.
    pub enrollments: usize,
    /// Grades recorded.
    pub grades: usize,
}

/// Clears the registry and loads the sample data set.
///
/// # Errors
///
/// Only fails if a built-in record is rejected by its constructor.
pub fn populate(university: &mut University) -> CoreResult<SampleSummary> {
    university.clear();
    let mut summary = SampleSummary::default();

    for &(id, name) in DEPARTMENTS {
        summary.departments += applied(university.add_department(Department::new(id, name)?));
    }
    for &(id, name, department) in FACULTY {
        summary.faculty += applied(university.add_faculty(Faculty::new(id, name, department)?));
    }
    for &(department, head) in HEADS {
        let _ = university.set_head_of_department(department, head);
    }
    for &(id, name, credits, department, instructor) in COURSES {
        summary.courses += applied(university.add_course(Course::new(id, name, credits)?));
        let _ = university.offer_course(department, id);
        let _ = university.assign_faculty_to_course(instructor, id);
    }
    for &(id, name, age, gender, department) in STUDENTS {
        summary.students +=
            applied(university.add_student(Student::new(id, name, age, gender, department)?));
    }
    for (student, grades) in GRADES {
        for &(course, grade) in grades {
            summary.enrollments += applied(university.enroll_student_in_course(student, course));
            summary.grades += applied(university.assign_grade(student, course, grade));
        }
    }

    info!(
        "Generated sample data: {} students, {} faculty, {} courses, {} departments",
        summary.students, summary.faculty, summary.courses, summary.departments
    );
    Ok(summary)
}

fn applied(outcome: Outcome) -> usize {
    usize::from(outcome.is_applied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populates_a_consistent_registry() {
        let mut uni = University::default();
        let summary = populate(&mut uni).unwrap();
        assert_eq!(
            summary,
            SampleSummary {
                departments: 4,
                faculty: 5,
                courses: 8,
                students: 8,
                enrollments: 24,
                grades: 24,
            }
        );
        assert!(uni.check_integrity().is_empty());
        assert_eq!(
            uni.find_department("CSE").unwrap().head().map(|f| f.as_str()),
            Some("F0001")
        );
        assert_eq!(uni.find_faculty("F0001").unwrap().courses_taught().len(), 3);
    }

    #[test]
    fn gpas_match_recorded_grades() {
        let mut uni = University::default();
        populate(&mut uni).unwrap();
        let alice = uni.find_student("S0001").unwrap();
        assert!((alice.gpa() - 3.5).abs() < 1e-9);
        let top = uni.sort_students_by_gpa(true)[0];
        assert_eq!(top.id().as_str(), "S0004");
    }

    #[test]
    fn replaces_existing_records() {
        let mut uni = University::default();
        let _ = uni.add_student(Student::new("S0100", "Extra", 30, "M", "BIO").unwrap());
        populate(&mut uni).unwrap();
        assert!(uni.find_student("S0100").is_none());
        assert_eq!(uni.students().len(), 8);
    }
}
