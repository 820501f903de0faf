//! Student record.

use super::{positive, required, CourseId, EntityKind, Record, StudentId};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest grade a course can carry.
pub const MIN_GRADE: f64 = 0.0;

/// Highest grade a course can carry.
pub const MAX_GRADE: f64 = 4.0;

/// A student and the grades recorded for each enrolled course.
///
/// The grade map doubles as the enrollment set: a course is enrolled when it
/// has an entry, starting at `0.0`. The GPA is the unweighted mean of all
/// entries and is recomputed on every change to the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StudentDocument")]
pub struct Student {
    student_id: StudentId,
    name: String,
    age: u32,
    gender: String,
    department: String,
    gpa: f64,
    course_grades: BTreeMap<CourseId, f64>,
}

impl Student {
    /// Creates a student with no enrollments.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is malformed, the name is empty, or the
    /// age is zero.
    pub fn new(
        student_id: &str,
        name: impl Into<String>,
        age: u32,
        gender: impl Into<String>,
        department: impl Into<String>,
    ) -> CoreResult<Self> {
        Ok(Self {
            student_id: StudentId::new(student_id)?,
            name: required("name", name)?,
            age: positive("age", age)?,
            gender: gender.into(),
            department: department.into(),
            gpa: 0.0,
            course_grades: BTreeMap::new(),
        })
    }

    /// Returns the student ID.
    pub fn id(&self) -> &StudentId {
        &self.student_id
    }

    /// Returns the full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the age.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Returns the gender.
    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Returns the department code.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Returns the current GPA.
    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    /// Returns the grade map, keyed by course ID.
    pub fn course_grades(&self) -> &BTreeMap<CourseId, f64> {
        &self.course_grades
    }

    /// Returns the number of enrolled courses.
    pub fn course_count(&self) -> usize {
        self.course_grades.len()
    }

    /// Returns the grade recorded for a course, if enrolled.
    pub fn grade_for(&self, course_id: &str) -> Option<f64> {
        self.course_grades.get(course_id).copied()
    }

    /// Returns true if the student is enrolled in the course.
    pub fn is_enrolled_in(&self, course_id: &str) -> bool {
        self.course_grades.contains_key(course_id)
    }

    /// Sets the name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty.
    pub fn set_name(&mut self, name: impl Into<String>) -> CoreResult<()> {
        self.name = required("name", name)?;
        Ok(())
    }

    /// Sets the age.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the age is zero.
    pub fn set_age(&mut self, age: u32) -> CoreResult<()> {
        self.age = positive("age", age)?;
        Ok(())
    }

    /// Sets the gender.
    pub fn set_gender(&mut self, gender: impl Into<String>) {
        self.gender = gender.into();
    }

    /// Sets the department code.
    pub fn set_department(&mut self, department: impl Into<String>) {
        self.department = department.into();
    }

    /// Enrolls the student in a course with an initial grade of `0.0`.
    ///
    /// Returns false if already enrolled.
    pub fn enroll_in_course(&mut self, course_id: &CourseId) -> bool {
        if self.course_grades.contains_key(course_id.as_str()) {
            return false;
        }
        self.course_grades.insert(course_id.clone(), MIN_GRADE);
        self.recalculate_gpa();
        true
    }

    /// Records a grade for an enrolled course.
    ///
    /// Returns false if the student is not enrolled in the course or the
    /// grade lies outside `[0.0, 4.0]`.
    pub fn assign_grade(&mut self, course_id: &str, grade: f64) -> bool {
        if !is_valid_grade(grade) {
            return false;
        }
        match self.course_grades.get_mut(course_id) {
            Some(slot) => {
                *slot = grade;
                self.recalculate_gpa();
                true
            }
            None => false,
        }
    }

    /// Drops a course and its grade. Returns false if not enrolled.
    pub fn drop_course(&mut self, course_id: &str) -> bool {
        if self.course_grades.remove(course_id).is_none() {
            return false;
        }
        self.recalculate_gpa();
        true
    }

    /// Applies a patch, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving every field unchanged, if any
    /// supplied field is invalid.
    pub fn apply(&mut self, patch: StudentPatch) -> CoreResult<()> {
        let name = patch.name.map(|n| required("name", n)).transpose()?;
        let age = patch.age.map(|a| positive("age", a)).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(age) = age {
            self.age = age;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        Ok(())
    }

    fn recalculate_gpa(&mut self) {
        self.gpa = if self.course_grades.is_empty() {
            0.0
        } else {
            self.course_grades.values().sum::<f64>() / self.course_grades.len() as f64
        };
    }
}

impl Record for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn key(&self) -> &str {
        self.student_id.as_str()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Returns true if `grade` lies within `[MIN_GRADE, MAX_GRADE]`.
pub(crate) fn is_valid_grade(grade: f64) -> bool {
    (MIN_GRADE..=MAX_GRADE).contains(&grade)
}

/// Field changes for a student; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    /// New full name.
    pub name: Option<String>,
    /// New age.
    pub age: Option<u32>,
    /// New gender.
    pub gender: Option<String>,
    /// New department code.
    pub department: Option<String>,
}

/// Persisted form of a student. The stored GPA is ignored on load.
#[derive(Deserialize)]
struct StudentDocument {
    student_id: String,
    name: String,
    age: u32,
    gender: String,
    department: String,
    #[serde(default)]
    course_grades: BTreeMap<CourseId, f64>,
}

impl TryFrom<StudentDocument> for Student {
    type Error = CoreError;

    fn try_from(doc: StudentDocument) -> Result<Self, Self::Error> {
        let mut student = Student::new(
            &doc.student_id,
            doc.name,
            doc.age,
            doc.gender,
            doc.department,
        )?;
        if let Some((course, grade)) = doc
            .course_grades
            .iter()
            .find(|(_, g)| !is_valid_grade(**g))
        {
            return Err(CoreError::validation(format!(
                "grade {grade} for {course} is outside {MIN_GRADE}-{MAX_GRADE}"
            )));
        }
        student.course_grades = doc.course_grades;
        student.recalculate_gpa();
        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str) -> CourseId {
        CourseId::new(id).unwrap()
    }

    fn alice() -> Student {
        Student::new("S0001", "Alice Johnson", 20, "F", "CSE").unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn construction_validates() {
        assert!(Student::new("S001", "Alice", 20, "F", "CSE").is_err());
        assert!(Student::new("S0001", "  ", 20, "F", "CSE").is_err());
        assert!(Student::new("S0001", "Alice", 0, "F", "CSE").is_err());
        let student = alice();
        assert_eq!(student.gpa(), 0.0);
        assert_eq!(student.course_count(), 0);
    }

    #[test]
    fn enroll_is_idempotent() {
        let mut student = alice();
        assert!(student.enroll_in_course(&course("CSE101")));
        assert!(!student.enroll_in_course(&course("CSE101")));
        assert_eq!(student.grade_for("CSE101"), Some(0.0));
    }

    #[test]
    fn gpa_tracks_grade_changes() {
        let mut student = alice();
        student.enroll_in_course(&course("CSE101"));
        student.enroll_in_course(&course("MAT101"));
        assert!(student.assign_grade("CSE101", 3.8));
        assert!(student.assign_grade("MAT101", 3.2));
        assert!(approx(student.gpa(), 3.5));

        assert!(student.drop_course("CSE101"));
        assert!(approx(student.gpa(), 3.2));

        assert!(student.drop_course("MAT101"));
        assert_eq!(student.gpa(), 0.0);
        assert!(!student.drop_course("MAT101"));
    }

    #[test]
    fn grade_requires_enrollment_and_range() {
        let mut student = alice();
        assert!(!student.assign_grade("CSE101", 3.0));
        assert!(student.course_grades().is_empty());

        student.enroll_in_course(&course("CSE101"));
        assert!(!student.assign_grade("CSE101", 4.1));
        assert!(!student.assign_grade("CSE101", -0.1));
        assert!(!student.assign_grade("CSE101", f64::NAN));
        assert!(student.assign_grade("CSE101", 4.0));
        assert!(student.assign_grade("CSE101", 0.0));
    }

    #[test]
    fn invalid_patch_changes_nothing() {
        let mut student = alice();
        let patch = StudentPatch {
            name: Some("Alicia".into()),
            age: Some(0),
            gender: Some("Other".into()),
            department: None,
        };
        assert!(student.apply(patch).is_err());
        assert_eq!(student.name(), "Alice Johnson");
        assert_eq!(student.age(), 20);
        assert_eq!(student.gender(), "F");
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let mut student = alice();
        student
            .apply(StudentPatch {
                age: Some(21),
                department: Some("MAT".into()),
                ..StudentPatch::default()
            })
            .unwrap();
        assert_eq!(student.name(), "Alice Johnson");
        assert_eq!(student.age(), 21);
        assert_eq!(student.department(), "MAT");
    }

    #[test]
    fn document_recomputes_gpa() {
        let json = r#"{
            "student_id": "S0002",
            "name": "Bob Smith",
            "age": 21,
            "gender": "M",
            "department": "CSE",
            "gpa": 1.0,
            "course_grades": {"CSE101": 3.0, "CSE201": 4.0}
        }"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert!(approx(student.gpa(), 3.5));
        assert_eq!(student.course_count(), 2);
    }

    #[test]
    fn document_rejects_bad_ids_and_grades() {
        let bad_id = r#"{"student_id":"X1","name":"A","age":1,"gender":"","department":"","course_grades":{}}"#;
        assert!(serde_json::from_str::<Student>(bad_id).is_err());
        let bad_grade = r#"{"student_id":"S0001","name":"A","age":1,"gender":"","department":"","course_grades":{"CSE101":9.0}}"#;
        assert!(serde_json::from_str::<Student>(bad_grade).is_err());
    }

    #[test]
    fn serializes_expected_fields() {
        let mut student = alice();
        student.enroll_in_course(&course("CSE101"));
        student.assign_grade("CSE101", 3.0);
        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["student_id"], "S0001");
        assert_eq!(value["gpa"], 3.0);
        assert_eq!(value["course_grades"]["CSE101"], 3.0);
    }
}
