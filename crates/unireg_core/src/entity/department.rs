//! Department record.

use super::{
    link, optional_link, required, unlink, CourseId, DepartmentId, EntityKind, FacultyId, Record,
};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A department, its head, and the courses it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DepartmentDocument")]
pub struct Department {
    department_id: DepartmentId,
    name: String,
    #[serde(with = "optional_link")]
    head_of_department: Option<FacultyId>,
    courses_offered: Vec<CourseId>,
}

impl Department {
    /// Creates a department with no head and no courses.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is malformed or the name is empty.
    pub fn new(department_id: &str, name: impl Into<String>) -> CoreResult<Self> {
        Ok(Self {
            department_id: DepartmentId::new(department_id)?,
            name: required("department name", name)?,
            head_of_department: None,
            courses_offered: Vec::new(),
        })
    }

    /// Returns the department ID.
    pub fn id(&self) -> &DepartmentId {
        &self.department_id
    }

    /// Returns the department name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the head of department, if any.
    pub fn head(&self) -> Option<&FacultyId> {
        self.head_of_department.as_ref()
    }

    /// Returns the courses offered, in the order they were added.
    pub fn courses_offered(&self) -> &[CourseId] {
        &self.courses_offered
    }

    /// Returns true if the department offers the course.
    pub fn offers(&self, course_id: &str) -> bool {
        self.courses_offered.iter().any(|c| c == course_id)
    }

    /// Sets the department name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty.
    pub fn set_name(&mut self, name: impl Into<String>) -> CoreResult<()> {
        self.name = required("department name", name)?;
        Ok(())
    }

    /// Fills the head slot, returning the previous head.
    pub fn set_head(&mut self, faculty_id: FacultyId) -> Option<FacultyId> {
        self.head_of_department.replace(faculty_id)
    }

    /// Empties the head slot if it names `faculty_id`.
    pub fn clear_head_if(&mut self, faculty_id: &str) -> bool {
        if self.head_of_department.as_ref().is_some_and(|f| f == faculty_id) {
            self.head_of_department = None;
            return true;
        }
        false
    }

    /// Adds a course to the offered set. Returns false if already offered.
    pub fn add_course(&mut self, course_id: &CourseId) -> bool {
        link(&mut self.courses_offered, course_id)
    }

    /// Removes a course from the offered set. Returns false if not offered.
    pub fn remove_course(&mut self, course_id: &str) -> bool {
        unlink(&mut self.courses_offered, course_id)
    }

    /// Applies a patch.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the new name is empty.
    pub fn apply(&mut self, patch: DepartmentPatch) -> CoreResult<()> {
        if let Some(name) = patch.name {
            self.set_name(name)?;
        }
        Ok(())
    }
}

impl Record for Department {
    const KIND: EntityKind = EntityKind::Department;

    fn key(&self) -> &str {
        self.department_id.as_str()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Field changes for a department; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentPatch {
    /// New department name.
    pub name: Option<String>,
}

#[derive(Deserialize)]
struct DepartmentDocument {
    department_id: String,
    name: String,
    #[serde(default, with = "optional_link")]
    head_of_department: Option<FacultyId>,
    #[serde(default)]
    courses_offered: Vec<CourseId>,
}

impl TryFrom<DepartmentDocument> for Department {
    type Error = CoreError;

    fn try_from(doc: DepartmentDocument) -> Result<Self, Self::Error> {
        let mut department = Department::new(&doc.department_id, doc.name)?;
        department.head_of_department = doc.head_of_department;
        for course in &doc.courses_offered {
            department.add_course(course);
        }
        Ok(department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_slot() {
        let mut dept = Department::new("CSE", "Computer Science & Engineering").unwrap();
        assert!(dept.head().is_none());
        assert_eq!(dept.set_head(FacultyId::new("F0001").unwrap()), None);
        assert!(!dept.clear_head_if("F0002"));
        assert!(dept.clear_head_if("F0001"));
        assert!(dept.head().is_none());
    }

    #[test]
    fn offered_set_is_idempotent() {
        let mut dept = Department::new("MAT", "Mathematics").unwrap();
        let mat101 = CourseId::new("MAT101").unwrap();
        assert!(dept.add_course(&mat101));
        assert!(!dept.add_course(&mat101));
        assert!(dept.offers("MAT101"));
        assert!(dept.remove_course("MAT101"));
        assert!(!dept.remove_course("MAT101"));
    }

    #[test]
    fn rejects_bad_ids() {
        assert!(Department::new("cse", "Lowercase").is_err());
        assert!(Department::new("PHYSX", "Too Long").is_err());
        assert!(Department::new("PHY", "").is_err());
    }

    #[test]
    fn null_head_is_accepted() {
        let json = r#"{"department_id":"PHY","name":"Physics","head_of_department":null,"courses_offered":[]}"#;
        let dept: Department = serde_json::from_str(json).unwrap();
        assert!(dept.head().is_none());
    }
}
