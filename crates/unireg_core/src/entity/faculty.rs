//! Faculty record.

use super::{link, required, unlink, CourseId, EntityKind, FacultyId, Record};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A faculty member and the courses they teach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FacultyDocument")]
pub struct Faculty {
    faculty_id: FacultyId,
    name: String,
    department: String,
    courses_taught: Vec<CourseId>,
}

impl Faculty {
    /// Creates a faculty member who teaches nothing yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is malformed or the name is empty.
    pub fn new(
        faculty_id: &str,
        name: impl Into<String>,
        department: impl Into<String>,
    ) -> CoreResult<Self> {
        Ok(Self {
            faculty_id: FacultyId::new(faculty_id)?,
            name: required("name", name)?,
            department: department.into(),
            courses_taught: Vec::new(),
        })
    }

    /// Returns the faculty ID.
    pub fn id(&self) -> &FacultyId {
        &self.faculty_id
    }

    /// Returns the full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the department code.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Returns the courses taught, in assignment order.
    pub fn courses_taught(&self) -> &[CourseId] {
        &self.courses_taught
    }

    /// Returns true if the course is in the taught set.
    pub fn teaches(&self, course_id: &str) -> bool {
        self.courses_taught.iter().any(|c| c == course_id)
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

    /// Sets the department code.
    pub fn set_department(&mut self, department: impl Into<String>) {
        self.department = department.into();
    }

    /// Adds a course to the taught set. Returns false if already teaching it.
    pub fn assign_course(&mut self, course_id: &CourseId) -> bool {
        link(&mut self.courses_taught, course_id)
    }

    /// Removes a course from the taught set. Returns false if not teaching it.
    pub fn remove_course(&mut self, course_id: &str) -> bool {
        unlink(&mut self.courses_taught, course_id)
    }

    /// Applies a patch, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving every field unchanged, if the new
    /// name is empty.
    pub fn apply(&mut self, patch: FacultyPatch) -> CoreResult<()> {
        let name = patch.name.map(|n| required("name", n)).transpose()?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        Ok(())
    }
}

impl Record for Faculty {
    const KIND: EntityKind = EntityKind::Faculty;

    fn key(&self) -> &str {
        self.faculty_id.as_str()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Field changes for a faculty member; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyPatch {
    /// New full name.
    pub name: Option<String>,
    /// New department code.
    pub department: Option<String>,
}

#[derive(Deserialize)]
struct FacultyDocument {
    faculty_id: String,
    name: String,
    department: String,
    #[serde(default)]
    courses_taught: Vec<CourseId>,
}

impl TryFrom<FacultyDocument> for Faculty {
    type Error = CoreError;

    fn try_from(doc: FacultyDocument) -> Result<Self, Self::Error> {
        let mut faculty = Faculty::new(&doc.faculty_id, doc.name, doc.department)?;
        for course in &doc.courses_taught {
            faculty.assign_course(course);
        }
        Ok(faculty)
    }
}
