//! Read-only consistency report over the registry's cross-links.

use super::University;
use crate::entity::EntityKind;
use std::fmt;

/// A cross-link that does not hold.
///
/// The registry reproduces a few known gaps: one-sided enrollments, stale
/// taught sets after reassignment, and department codes left behind after a
/// department is removed. Documents edited by hand can add dangling IDs on
/// top of that. None of these are repaired; they are only reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// A course roster lists a student whose grade map lacks the course.
    RosterOnly {
        /// The course whose roster holds the entry.
        course_id: String,
        /// The student listed on the roster.
        student_id: String,
    },
    /// A student's grade map holds a course whose roster lacks the student.
    GradeOnly {
        /// The student holding the grade entry.
        student_id: String,
        /// The course named by the grade entry.
        course_id: String,
    },
    /// A course names a faculty member who does not list it as taught.
    UnmirroredAssignment {
        /// The course.
        course_id: String,
        /// The faculty member in the course slot.
        faculty_id: String,
    },
    /// A faculty member lists a course whose slot names someone else or no one.
    StaleTeaching {
        /// The faculty member.
        faculty_id: String,
        /// The course in their taught set.
        course_id: String,
    },
    /// A link names a record that does not exist.
    Dangling {
        /// The kind of record holding the link.
        owner_kind: EntityKind,
        /// The ID of the record holding the link.
        owner_id: String,
        /// The kind of record the link points to.
        target_kind: EntityKind,
        /// The missing ID.
        target_id: String,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RosterOnly {
                course_id,
                student_id,
            } => write!(
                f,
                "course {course_id} lists {student_id}, but the student is not enrolled"
            ),
            Self::GradeOnly {
                student_id,
                course_id,
            } => write!(
                f,
                "student {student_id} holds {course_id}, but is not on its roster"
            ),
            Self::UnmirroredAssignment {
                course_id,
                faculty_id,
            } => write!(
                f,
                "course {course_id} is assigned to {faculty_id}, who does not list it"
            ),
            Self::StaleTeaching {
                faculty_id,
                course_id,
            } => write!(
                f,
                "faculty {faculty_id} lists {course_id}, which is not assigned to them"
            ),
            Self::Dangling {
                owner_kind,
                owner_id,
                target_kind,
                target_id,
            } => write!(
                f,
                "{owner_kind} {owner_id} refers to unknown {target_kind} {target_id}"
            ),
        }
    }
}

impl University {
    /// Checks every cross-link and returns the ones that do not hold.
    ///
    /// Issues are grouped by the kind of record that owns the link:
    /// students, then faculty, then courses, then departments.
    pub fn check_integrity(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        let departments = self.departments();
        let students = self.students();
        let faculty = self.faculty();
        let courses = self.courses();

        for student in students {
            let sid = student.id().as_str();
            if !departments.contains(student.department()) {
                issues.push(dangling(
                    EntityKind::Student,
                    sid,
                    EntityKind::Department,
                    student.department(),
                ));
            }
            for course_id in student.course_grades().keys() {
                match courses.get(course_id.as_str()) {
                    None => issues.push(dangling(
                        EntityKind::Student,
                        sid,
                        EntityKind::Course,
                        course_id.as_str(),
                    )),
                    Some(course) if !course.has_student(sid) => {
                        issues.push(IntegrityIssue::GradeOnly {
                            student_id: sid.to_string(),
                            course_id: course_id.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        for member in faculty {
            let fid = member.id().as_str();
            if !departments.contains(member.department()) {
                issues.push(dangling(
                    EntityKind::Faculty,
                    fid,
                    EntityKind::Department,
                    member.department(),
                ));
            }
            for course_id in member.courses_taught() {
                match courses.get(course_id.as_str()) {
                    None => issues.push(dangling(
                        EntityKind::Faculty,
                        fid,
                        EntityKind::Course,
                        course_id.as_str(),
                    )),
                    Some(course) if course.assigned_faculty().map_or(true, |f| f != fid) => {
                        issues.push(IntegrityIssue::StaleTeaching {
                            faculty_id: fid.to_string(),
                            course_id: course_id.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        for course in courses {
            let cid = course.id().as_str();
            if let Some(assigned) = course.assigned_faculty() {
                match faculty.get(assigned.as_str()) {
                    None => issues.push(dangling(
                        EntityKind::Course,
                        cid,
                        EntityKind::Faculty,
                        assigned.as_str(),
                    )),
                    Some(member) if !member.teaches(cid) => {
                        issues.push(IntegrityIssue::UnmirroredAssignment {
                            course_id: cid.to_string(),
                            faculty_id: assigned.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
            for student_id in course.enrolled_students() {
                match students.get(student_id.as_str()) {
                    None => issues.push(dangling(
                        EntityKind::Course,
                        cid,
                        EntityKind::Student,
                        student_id.as_str(),
                    )),
                    Some(student) if !student.is_enrolled_in(cid) => {
                        issues.push(IntegrityIssue::RosterOnly {
                            course_id: cid.to_string(),
                            student_id: student_id.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        for department in departments {
            let did = department.id().as_str();
            if let Some(head) = department.head() {
                if !faculty.contains(head.as_str()) {
                    issues.push(dangling(
                        EntityKind::Department,
                        did,
                        EntityKind::Faculty,
                        head.as_str(),
                    ));
                }
            }
            for course_id in department.courses_offered() {
                if !courses.contains(course_id.as_str()) {
                    issues.push(dangling(
                        EntityKind::Department,
                        did,
                        EntityKind::Course,
                        course_id.as_str(),
                    ));
                }
            }
        }

        issues
    }
}

fn dangling(
    owner_kind: EntityKind,
    owner_id: &str,
    target_kind: EntityKind,
    target_id: &str,
) -> IntegrityIssue {
    IntegrityIssue::Dangling {
        owner_kind,
        owner_id: owner_id.to_string(),
        target_kind,
        target_id: target_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Course, Department, Faculty, Student};

    fn campus() -> University {
        let mut uni = University::default();
        let _ = uni.add_department(Department::new("CSE", "Computer Science").unwrap());
        let _ = uni.add_faculty(Faculty::new("F0001", "Dr. Sarah Johnson", "CSE").unwrap());
        let _ = uni.add_faculty(Faculty::new("F0002", "Prof. Michael Chen", "CSE").unwrap());
        let _ = uni.add_course(Course::new("CSE101", "Introduction to Programming", 3).unwrap());
        let _ = uni.add_student(Student::new("S0001", "Alice Johnson", 20, "F", "CSE").unwrap());
        let _ = uni.enroll_student_in_course("S0001", "CSE101");
        let _ = uni.assign_faculty_to_course("F0001", "CSE101");
        let _ = uni.set_head_of_department("CSE", "F0001");
        let _ = uni.offer_course("CSE", "CSE101");
        uni
    }

    #[test]
    fn consistent_registry_has_no_issues() {
        assert!(campus().check_integrity().is_empty());
    }

    #[test]
    fn reports_stale_teaching_after_reassignment() {
        let mut uni = campus();
        let _ = uni.assign_faculty_to_course("F0002", "CSE101");
        assert_eq!(
            uni.check_integrity(),
            vec![IntegrityIssue::StaleTeaching {
                faculty_id: "F0001".into(),
                course_id: "CSE101".into(),
            }]
        );
    }

    #[test]
    fn reports_codes_left_by_department_removal() {
        let mut uni = campus();
        let _ = uni.remove_department("CSE");
        let issues = uni.check_integrity();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|issue| matches!(
            issue,
            IntegrityIssue::Dangling {
                target_kind: EntityKind::Department,
                ..
            }
        )));
        assert_eq!(
            issues[0].to_string(),
            "student S0001 refers to unknown department CSE"
        );
    }

    #[test]
    fn reports_one_sided_enrollment() {
        let mut uni = University::default();
        let mut student = Student::new("S0001", "Alice Johnson", 20, "F", "CSE").unwrap();
        let course = Course::new("CSE101", "Introduction to Programming", 3).unwrap();
        student.enroll_in_course(course.id());
        uni.replace_records(
            vec![Department::new("CSE", "Computer Science").unwrap()],
            vec![student],
            Vec::new(),
            vec![course],
        );
        assert_eq!(
            uni.check_integrity(),
            vec![IntegrityIssue::GradeOnly {
                student_id: "S0001".into(),
                course_id: "CSE101".into(),
            }]
        );
    }
}
