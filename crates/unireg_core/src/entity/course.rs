//! Course record.

use super::{
    link, optional_link, positive, required, unlink, CourseId, EntityKind, FacultyId, Record,
    StudentId,
};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A course, its assigned faculty member, and its roster.
///
/// A course holds a single faculty slot. Assigning a new faculty member
/// replaces the previous one without touching the previous member's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CourseDocument")]
pub struct Course {
    course_id: CourseId,
    name: String,
    credit_hours: u32,
    #[serde(with = "optional_link")]
    assigned_faculty: Option<FacultyId>,
    enrolled_students: Vec<StudentId>,
}

impl Course {
    /// Creates an unassigned course with an empty roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is malformed, the name is empty, or the
    /// credit hours are zero.
    pub fn new(course_id: &str, name: impl Into<String>, credit_hours: u32) -> CoreResult<Self> {
        Ok(Self {
            course_id: CourseId::new(course_id)?,
            name: required("course name", name)?,
            credit_hours: positive("credit hours", credit_hours)?,
            assigned_faculty: None,
            enrolled_students: Vec::new(),
        })
    }

    /// Returns the course ID.
    pub fn id(&self) -> &CourseId {
        &self.course_id
    }

    /// Returns the course name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the credit hours.
    pub fn credit_hours(&self) -> u32 {
        self.credit_hours
    }

    /// Returns the assigned faculty member, if any.
    pub fn assigned_faculty(&self) -> Option<&FacultyId> {
        self.assigned_faculty.as_ref()
    }

    /// Returns the roster, in enrollment order.
    pub fn enrolled_students(&self) -> &[StudentId] {
        &self.enrolled_students
    }

    /// Returns true if the student is on the roster.
    pub fn has_student(&self, student_id: &str) -> bool {
        self.enrolled_students.iter().any(|s| s == student_id)
    }

    /// Sets the course name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty.
    pub fn set_name(&mut self, name: impl Into<String>) -> CoreResult<()> {
        self.name = required("course name", name)?;
        Ok(())
    }

    /// Sets the credit hours.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value is zero.
    pub fn set_credit_hours(&mut self, credit_hours: u32) -> CoreResult<()> {
        self.credit_hours = positive("credit hours", credit_hours)?;
        Ok(())
    }

    /// Fills the faculty slot, returning whoever held it before.
    pub fn assign_faculty(&mut self, faculty_id: FacultyId) -> Option<FacultyId> {
        self.assigned_faculty.replace(faculty_id)
    }

    /// Empties the faculty slot if it names `faculty_id`.
    pub fn clear_faculty_if(&mut self, faculty_id: &str) -> bool {
        if self.assigned_faculty.as_ref().is_some_and(|f| f == faculty_id) {
            self.assigned_faculty = None;
            return true;
        }
        false
    }

    /// Adds a student to the roster. Returns false if already enrolled.
    pub fn enroll_student(&mut self, student_id: &StudentId) -> bool {
        link(&mut self.enrolled_students, student_id)
    }

    /// Removes a student from the roster. Returns false if not enrolled.
    pub fn remove_student(&mut self, student_id: &str) -> bool {
        unlink(&mut self.enrolled_students, student_id)
    }

    /// Applies a patch, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving every field unchanged, if any
    /// supplied field is invalid.
    pub fn apply(&mut self, patch: CoursePatch) -> CoreResult<()> {
        let name = patch.name.map(|n| required("course name", n)).transpose()?;
        let credit_hours = patch
            .credit_hours
            .map(|c| positive("credit hours", c))
            .transpose()?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(credit_hours) = credit_hours {
            self.credit_hours = credit_hours;
        }
        Ok(())
    }
}

impl Record for Course {
    const KIND: EntityKind = EntityKind::Course;

    fn key(&self) -> &str {
        self.course_id.as_str()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Field changes for a course; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    /// New course name.
    pub name: Option<String>,
    /// New credit hours.
    pub credit_hours: Option<u32>,
}

#[derive(Deserialize)]
struct CourseDocument {
    course_id: String,
    name: String,
    credit_hours: u32,
    #[serde(default, with = "optional_link")]
    assigned_faculty: Option<FacultyId>,
    #[serde(default)]
    enrolled_students: Vec<StudentId>,
}

impl TryFrom<CourseDocument> for Course {
    type Error = CoreError;

    fn try_from(doc: CourseDocument) -> Result<Self, Self::Error> {
        let mut course = Course::new(&doc.course_id, doc.name, doc.credit_hours)?;
        course.assigned_faculty = doc.assigned_faculty;
        for student in &doc.enrolled_students {
            course.enroll_student(student);
        }
        Ok(course)
    }
}
