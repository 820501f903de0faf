//! Property-based test generators using proptest.
//!
//! Provides strategies for generating record IDs, grades, names, and
//! sequences of registry operations.

use proptest::prelude::*;
use unireg_core::{Course, Department, Faculty, Outcome, Student, University};

/// Strategy for generating valid student IDs.
pub fn student_id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("S[0-9]{4}").expect("Invalid regex")
}

/// Strategy for generating valid faculty IDs.
pub fn faculty_id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("F[0-9]{4}").expect("Invalid regex")
}

/// Strategy for generating valid course IDs.
pub fn course_id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z]{1,4}[0-9]{3}").expect("Invalid regex")
}

/// Strategy for generating valid department IDs.
pub fn department_id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z]{2,4}").expect("Invalid regex")
}

/// Strategy for generating malformed student IDs.
pub fn invalid_student_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("S[0-9]{0,3}").expect("Invalid regex"),
        prop::string::string_regex("S[0-9]{5,6}").expect("Invalid regex"),
        prop::string::string_regex("[a-zA-RT-Z][0-9]{4}").expect("Invalid regex"),
        prop::string::string_regex("S[0-9]{0,3}[a-z][0-9]{0,2}").expect("Invalid regex"),
    ]
}

/// Strategy for generating malformed course IDs.
pub fn invalid_course_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[0-9]{3}").expect("Invalid regex"),
        prop::string::string_regex("[A-Z]{1,4}[0-9]{0,2}").expect("Invalid regex"),
        prop::string::string_regex("[A-Z]{1,4}[0-9]{4,5}").expect("Invalid regex"),
        prop::string::string_regex("[A-Z]{1,4}[0-9]{3}[A-Z]").expect("Invalid regex"),
    ]
}

/// Strategy for generating grades within the accepted range.
pub fn grade_strategy() -> impl Strategy<Value = f64> {
    0.0..=4.0f64
}

/// Strategy for generating grades outside the accepted range.
pub fn out_of_range_grade_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![-100.0..-0.001f64, 4.001..100.0f64]
}

/// Strategy for generating non-empty display names.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{1,9}( [A-Z][a-z]{1,9})?")
        .expect("Invalid regex")
}

/// Department codes used by generated operations.
pub const OP_DEPARTMENTS: [&str; 3] = ["CSE", "EEE", "MAT"];

/// A registry operation over a small, fixed ID space so that operations
/// collide often.
#[derive(Debug, Clone)]
pub enum RegistryOp {
    /// Add a student
    AddStudent {
        /// Index into the student ID space
        student: u8,
        /// Index into [`OP_DEPARTMENTS`]
        department: u8,
    },
    /// Add a faculty member
    AddFaculty {
        /// Index into the faculty ID space
        faculty: u8,
        /// Index into [`OP_DEPARTMENTS`]
        department: u8,
    },
    /// Add a course
    AddCourse {
        /// Index into the course ID space
        course: u8,
        /// Credit hours
        credits: u32,
    },
    /// Add a department
    AddDepartment {
        /// Index into [`OP_DEPARTMENTS`]
        department: u8,
    },
    /// Enroll a student in a course
    Enroll {
        /// Student index
        student: u8,
        /// Course index
        course: u8,
    },
    /// Unenroll a student from a course
    Unenroll {
        /// Student index
        student: u8,
        /// Course index
        course: u8,
    },
    /// Assign a faculty member to a course
    Assign {
        /// Faculty index
        faculty: u8,
        /// Course index
        course: u8,
    },
    /// Record a grade
    Grade {
        /// Student index
        student: u8,
        /// Course index
        course: u8,
        /// Grade value
        grade: f64,
    },
    /// Make a faculty member head of a department
    SetHead {
        /// Department index
        department: u8,
        /// Faculty index
        faculty: u8,
    },
    /// Add a course to a department's offered set
    Offer {
        /// Department index
        department: u8,
        /// Course index
        course: u8,
    },
    /// Remove a course from a department's offered set
    Withdraw {
        /// Department index
        department: u8,
        /// Course index
        course: u8,
    },
    /// Remove a student
    RemoveStudent {
        /// Student index
        student: u8,
    },
    /// Remove a faculty member
    RemoveFaculty {
        /// Faculty index
        faculty: u8,
    },
    /// Remove a course
    RemoveCourse {
        /// Course index
        course: u8,
    },
    /// Remove a department
    RemoveDepartment {
        /// Department index
        department: u8,
    },
}

const STUDENTS: u8 = 6;
const FACULTY: u8 = 3;
const COURSES: u8 = 5;

fn student_id(index: u8) -> String {
    format!("S{:04}", index + 1)
}

fn faculty_id(index: u8) -> String {
    format!("F{:04}", index + 1)
}

fn course_id(index: u8) -> String {
    format!("GEN{:03}", index + 1)
}

fn department_id(index: u8) -> &'static str {
    OP_DEPARTMENTS[usize::from(index) % OP_DEPARTMENTS.len()]
}

impl RegistryOp {
    /// Applies the operation to a registry.
    pub fn apply(&self, uni: &mut University) -> Outcome {
        match *self {
            Self::AddStudent {
                student,
                department,
            } => uni.add_student(
                Student::new(
                    &student_id(student),
                    format!("Student {student}"),
                    20,
                    "Other",
                    department_id(department),
                )
                .expect("generated student is valid"),
            ),
            Self::AddFaculty {
                faculty,
                department,
            } => uni.add_faculty(
                Faculty::new(
                    &faculty_id(faculty),
                    format!("Faculty {faculty}"),
                    department_id(department),
                )
                .expect("generated faculty is valid"),
            ),
            Self::AddCourse { course, credits } => uni.add_course(
                Course::new(&course_id(course), format!("Course {course}"), credits)
                    .expect("generated course is valid"),
            ),
            Self::AddDepartment { department } => {
                let code = department_id(department);
                uni.add_department(
                    Department::new(code, code).expect("generated department is valid"),
                )
            }
            Self::Enroll { student, course } => {
                uni.enroll_student_in_course(&student_id(student), &course_id(course))
            }
            Self::Unenroll { student, course } => {
                uni.unenroll_student_from_course(&student_id(student), &course_id(course))
            }
            Self::Assign { faculty, course } => {
                uni.assign_faculty_to_course(&faculty_id(faculty), &course_id(course))
            }
            Self::Grade {
                student,
                course,
                grade,
            } => uni.assign_grade(&student_id(student), &course_id(course), grade),
            Self::SetHead {
                department,
                faculty,
            } => uni.set_head_of_department(department_id(department), &faculty_id(faculty)),
            Self::Offer { department, course } => {
                uni.offer_course(department_id(department), &course_id(course))
            }
            Self::Withdraw { department, course } => {
                uni.withdraw_course(department_id(department), &course_id(course))
            }
            Self::RemoveStudent { student } => uni.remove_student(&student_id(student)),
            Self::RemoveFaculty { faculty } => uni.remove_faculty(&faculty_id(faculty)),
            Self::RemoveCourse { course } => uni.remove_course(&course_id(course)),
            Self::RemoveDepartment { department } => {
                uni.remove_department(department_id(department))
            }
        }
    }
}

/// Strategy for generating registry operations.
///
/// Additions and links are weighted above removals so that registries
/// grow before they shrink.
pub fn registry_op_strategy() -> impl Strategy<Value = RegistryOp> {
    let student = 0..STUDENTS;
    let faculty = 0..FACULTY;
    let course = 0..COURSES;
    let department = 0..OP_DEPARTMENTS.len() as u8;

    prop_oneof![
        3 => (student.clone(), department.clone())
            .prop_map(|(student, department)| RegistryOp::AddStudent { student, department }),
        2 => (faculty.clone(), department.clone())
            .prop_map(|(faculty, department)| RegistryOp::AddFaculty { faculty, department }),
        2 => (course.clone(), 1..6u32)
            .prop_map(|(course, credits)| RegistryOp::AddCourse { course, credits }),
        2 => department.clone().prop_map(|department| RegistryOp::AddDepartment { department }),
        5 => (student.clone(), course.clone())
            .prop_map(|(student, course)| RegistryOp::Enroll { student, course }),
        1 => (student.clone(), course.clone())
            .prop_map(|(student, course)| RegistryOp::Unenroll { student, course }),
        3 => (faculty.clone(), course.clone())
            .prop_map(|(faculty, course)| RegistryOp::Assign { faculty, course }),
        4 => (student.clone(), course.clone(), grade_strategy())
            .prop_map(|(student, course, grade)| RegistryOp::Grade { student, course, grade }),
        1 => (department.clone(), faculty.clone())
            .prop_map(|(department, faculty)| RegistryOp::SetHead { department, faculty }),
        2 => (department.clone(), course.clone())
            .prop_map(|(department, course)| RegistryOp::Offer { department, course }),
        1 => (department.clone(), course.clone())
            .prop_map(|(department, course)| RegistryOp::Withdraw { department, course }),
        1 => student.prop_map(|student| RegistryOp::RemoveStudent { student }),
        1 => faculty.prop_map(|faculty| RegistryOp::RemoveFaculty { faculty }),
        1 => course.prop_map(|course| RegistryOp::RemoveCourse { course }),
        1 => department.prop_map(|department| RegistryOp::RemoveDepartment { department }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<RegistryOp>> {
    prop::collection::vec(registry_op_strategy(), min_ops..max_ops)
}

/// Builds a registry by applying every operation in order.
pub fn apply_all(ops: &[RegistryOp]) -> University {
    let mut uni = University::default();
    for op in ops {
        let _ = op.apply(&mut uni);
    }
    uni
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unireg_core::{CourseId, DepartmentId, FacultyId, StudentId};

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_ids_are_valid(
            s in student_id_strategy(),
            f in faculty_id_strategy(),
            c in course_id_strategy(),
            d in department_id_strategy(),
        ) {
            prop_assert!(StudentId::is_valid(&s));
            prop_assert!(FacultyId::is_valid(&f));
            prop_assert!(CourseId::is_valid(&c));
            prop_assert!(DepartmentId::is_valid(&d));
        }

        #[test]
        fn names_are_not_blank(name in name_strategy()) {
            prop_assert!(!name.trim().is_empty());
        }

        #[test]
        fn grades_stay_in_range(grade in grade_strategy(), bad in out_of_range_grade_strategy()) {
            prop_assert!((0.0..=4.0).contains(&grade));
            prop_assert!(!(0.0..=4.0).contains(&bad));
        }
    }

    #[test]
    fn op_ids_are_valid() {
        for i in 0..COURSES {
            assert!(CourseId::is_valid(&course_id(i)));
        }
        for i in 0..STUDENTS {
            assert!(StudentId::is_valid(&student_id(i)));
        }
        for i in 0..FACULTY {
            assert!(FacultyId::is_valid(&faculty_id(i)));
        }
    }
}
