//! Registry operations and cascades.

use super::Collection;
use crate::config::{Config, DEFAULT_UNIVERSITY_ADDRESS, DEFAULT_UNIVERSITY_NAME};
use crate::entity::{
    Course, CoursePatch, Department, DepartmentPatch, EntityKind, Faculty, FacultyPatch, Record,
    Student, StudentPatch,
};
use crate::entity::{MAX_GRADE, MIN_GRADE};
use crate::error::CoreResult;
use crate::outcome::Outcome;
use tracing::{debug, warn};

/// The registry: every student, faculty member, course, and department.
///
/// `University` exclusively owns each record from the moment it is added
/// until it is removed. Records refer to each other by ID, and every change
/// that touches more than one record goes through a method here so both
/// sides of a link are updated together.
///
/// Missing or duplicate IDs are reported through [`Outcome`], never as
/// errors. Only field validation in the `update_*` methods can fail.
///
/// # Example
///
/// ```rust
/// use unireg_core::{Course, Outcome, Student, University};
///
/// let mut uni = University::default();
/// let _ = uni.add_student(Student::new("S0001", "Alice Johnson", 20, "F", "CSE")?);
/// let _ = uni.add_course(Course::new("CSE101", "Introduction to Programming", 3)?);
///
/// assert_eq!(uni.enroll_student_in_course("S0001", "CSE101"), Outcome::Applied);
/// assert_eq!(uni.enroll_student_in_course("S0001", "CSE101"), Outcome::Unchanged);
/// # Ok::<(), unireg_core::CoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct University {
    name: String,
    address: String,
    students: Collection<Student>,
    faculty: Collection<Faculty>,
    courses: Collection<Course>,
    departments: Collection<Department>,
}

impl Default for University {
    fn default() -> Self {
        Self::new(DEFAULT_UNIVERSITY_NAME, DEFAULT_UNIVERSITY_ADDRESS)
    }
}

impl University {
    /// Creates an empty registry.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            students: Collection::new(),
            faculty: Collection::new(),
            courses: Collection::new(),
            departments: Collection::new(),
        }
    }

    /// Creates an empty registry named after the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.university_name, &config.university_address)
    }

    /// Returns the university name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the university address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sets the university name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Sets the university address.
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    /// Returns all students, in insertion order.
    pub fn students(&self) -> &Collection<Student> {
        &self.students
    }

    /// Returns all faculty members, in insertion order.
    pub fn faculty(&self) -> &Collection<Faculty> {
        &self.faculty
    }

    /// Returns all courses, in insertion order.
    pub fn courses(&self) -> &Collection<Course> {
        &self.courses
    }

    /// Returns all departments, in insertion order.
    pub fn departments(&self) -> &Collection<Department> {
        &self.departments
    }

    /// Returns true if the registry holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
            && self.faculty.is_empty()
            && self.courses.is_empty()
            && self.departments.is_empty()
    }

    // =========================================================================
    // Add / find
    // =========================================================================

    /// Adds a student. Fails with `AlreadyExists` if the ID is taken.
    pub fn add_student(&mut self, student: Student) -> Outcome {
        insert(&mut self.students, student)
    }

    /// Adds a faculty member. Fails with `AlreadyExists` if the ID is taken.
    pub fn add_faculty(&mut self, faculty: Faculty) -> Outcome {
        insert(&mut self.faculty, faculty)
    }

    /// Adds a course. Fails with `AlreadyExists` if the ID is taken.
    pub fn add_course(&mut self, course: Course) -> Outcome {
        insert(&mut self.courses, course)
    }

    /// Adds a department. Fails with `AlreadyExists` if the ID is taken.
    pub fn add_department(&mut self, department: Department) -> Outcome {
        insert(&mut self.departments, department)
    }

    /// Looks up a student by ID.
    pub fn find_student(&self, student_id: &str) -> Option<&Student> {
        self.students.get(student_id)
    }

    /// Looks up a faculty member by ID.
    pub fn find_faculty(&self, faculty_id: &str) -> Option<&Faculty> {
        self.faculty.get(faculty_id)
    }

    /// Looks up a course by ID.
    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.courses.get(course_id)
    }

    /// Looks up a department by ID.
    pub fn find_department(&self, department_id: &str) -> Option<&Department> {
        self.departments.get(department_id)
    }

    // =========================================================================
    // Removal and cascades
    // =========================================================================

    /// Removes a student and drops it from every course roster.
    pub fn remove_student(&mut self, student_id: &str) -> Outcome {
        if self.students.remove(student_id).is_none() {
            return Outcome::NotFound(EntityKind::Student);
        }
        let rosters = count_changed(self.courses.iter_mut(), |c| c.remove_student(student_id));
        debug!("Removed student {student_id}; purged from {rosters} course rosters");
        Outcome::Applied
    }

    /// Removes a faculty member, emptying every course slot and department
    /// head slot that names it.
    pub fn remove_faculty(&mut self, faculty_id: &str) -> Outcome {
        if self.faculty.remove(faculty_id).is_none() {
            return Outcome::NotFound(EntityKind::Faculty);
        }
        let courses = count_changed(self.courses.iter_mut(), |c| c.clear_faculty_if(faculty_id));
        let heads = count_changed(self.departments.iter_mut(), |d| d.clear_head_if(faculty_id));
        debug!(
            "Removed faculty {faculty_id}; cleared {courses} course assignments and {heads} department heads"
        );
        Outcome::Applied
    }

    /// Removes a course and drops it from every grade map, taught set, and
    /// offered set.
    pub fn remove_course(&mut self, course_id: &str) -> Outcome {
        if self.courses.remove(course_id).is_none() {
            return Outcome::NotFound(EntityKind::Course);
        }
        let grades = count_changed(self.students.iter_mut(), |s| s.drop_course(course_id));
        let taught = count_changed(self.faculty.iter_mut(), |f| f.remove_course(course_id));
        let offered = count_changed(self.departments.iter_mut(), |d| d.remove_course(course_id));
        debug!(
            "Removed course {course_id}; purged {grades} grade entries, {taught} taught sets, {offered} offered sets"
        );
        Outcome::Applied
    }

    /// Removes a department.
    ///
    /// Students and faculty keep their `department` code even if it named
    /// this department; [`University::check_integrity`] reports them.
    pub fn remove_department(&mut self, department_id: &str) -> Outcome {
        if self.departments.remove(department_id).is_none() {
            return Outcome::NotFound(EntityKind::Department);
        }
        debug!("Removed department {department_id}");
        Outcome::Applied
    }

    /// Removes every record. Name and address are kept.
    pub fn clear(&mut self) {
        self.students.clear();
        self.faculty.clear();
        self.courses.clear();
        self.departments.clear();
        debug!("Cleared all records");
    }

    // =========================================================================
    // Links
    // =========================================================================

    /// Enrolls a student in a course, adding the student to the roster and
    /// the course to the student's grade map at `0.0`.
    ///
    /// The roster is updated first. If the student already held the course
    /// in their grade map, the roster keeps the new entry and the result is
    /// `Unchanged`.
    pub fn enroll_student_in_course(&mut self, student_id: &str, course_id: &str) -> Outcome {
        let Some(student) = self.students.get(student_id) else {
            return Outcome::NotFound(EntityKind::Student);
        };
        let sid = student.id().clone();
        let Some(course) = self.courses.get_mut(course_id) else {
            return Outcome::NotFound(EntityKind::Course);
        };
        let cid = course.id().clone();

        if !course.enroll_student(&sid) {
            return Outcome::Unchanged;
        }
        let enrolled = self
            .students
            .get_mut(student_id)
            .is_some_and(|s| s.enroll_in_course(&cid));
        if !enrolled {
            debug!("Roster of {cid} gained {sid}, but the grade map already held the course");
            return Outcome::Unchanged;
        }
        debug!("Enrolled {sid} in {cid}");
        Outcome::Applied
    }

    /// Removes both sides of an enrollment.
    ///
    /// Returns `Applied` if either the roster or the grade map changed.
    pub fn unenroll_student_from_course(&mut self, student_id: &str, course_id: &str) -> Outcome {
        if !self.students.contains(student_id) {
            return Outcome::NotFound(EntityKind::Student);
        }
        let Some(course) = self.courses.get_mut(course_id) else {
            return Outcome::NotFound(EntityKind::Course);
        };
        let roster = course.remove_student(student_id);
        let grades = self
            .students
            .get_mut(student_id)
            .is_some_and(|s| s.drop_course(course_id));

        if roster || grades {
            debug!("Unenrolled {student_id} from {course_id}");
            Outcome::Applied
        } else {
            Outcome::Unchanged
        }
    }

    /// Assigns a faculty member to a course.
    ///
    /// The course slot is overwritten. A previous holder keeps the course in
    /// their taught set.
    pub fn assign_faculty_to_course(&mut self, faculty_id: &str, course_id: &str) -> Outcome {
        let Some(faculty) = self.faculty.get(faculty_id) else {
            return Outcome::NotFound(EntityKind::Faculty);
        };
        let fid = faculty.id().clone();
        let Some(course) = self.courses.get_mut(course_id) else {
            return Outcome::NotFound(EntityKind::Course);
        };
        let cid = course.id().clone();

        let previous = course.assign_faculty(fid.clone());
        let slot_changed = previous.as_ref() != Some(&fid);
        let taught = self
            .faculty
            .get_mut(faculty_id)
            .is_some_and(|f| f.assign_course(&cid));

        if let Some(previous) = previous.filter(|p| *p != fid) {
            debug!("Course {cid} reassigned from {previous} to {fid}");
        }
        if slot_changed || taught {
            debug!("Assigned {fid} to {cid}");
            Outcome::Applied
        } else {
            Outcome::Unchanged
        }
    }

    /// Records a grade for a course the student is enrolled in.
    ///
    /// The course itself is not looked up; only the student's grade map is
    /// consulted.
    pub fn assign_grade(&mut self, student_id: &str, course_id: &str, grade: f64) -> Outcome {
        let Some(student) = self.students.get_mut(student_id) else {
            return Outcome::NotFound(EntityKind::Student);
        };
        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Outcome::OutOfRange;
        }
        if !student.assign_grade(course_id, grade) {
            return Outcome::NotEnrolled;
        }
        debug!(
            "Graded {student_id} in {course_id}: {grade:.2} (GPA now {:.2})",
            student.gpa()
        );
        Outcome::Applied
    }

    /// Makes a faculty member head of a department, replacing any previous
    /// head.
    pub fn set_head_of_department(&mut self, department_id: &str, faculty_id: &str) -> Outcome {
        if !self.departments.contains(department_id) {
            return Outcome::NotFound(EntityKind::Department);
        }
        let Some(faculty) = self.faculty.get(faculty_id) else {
            return Outcome::NotFound(EntityKind::Faculty);
        };
        let fid = faculty.id().clone();
        let Some(department) = self.departments.get_mut(department_id) else {
            return Outcome::NotFound(EntityKind::Department);
        };
        if department.set_head(fid.clone()).as_ref() == Some(&fid) {
            return Outcome::Unchanged;
        }
        debug!("{fid} is now head of {department_id}");
        Outcome::Applied
    }

    /// Adds a course to a department's offered set.
    pub fn offer_course(&mut self, department_id: &str, course_id: &str) -> Outcome {
        if !self.departments.contains(department_id) {
            return Outcome::NotFound(EntityKind::Department);
        }
        let Some(course) = self.courses.get(course_id) else {
            return Outcome::NotFound(EntityKind::Course);
        };
        let cid = course.id().clone();
        let added = self
            .departments
            .get_mut(department_id)
            .is_some_and(|d| d.add_course(&cid));
        if !added {
            return Outcome::Unchanged;
        }
        debug!("{department_id} now offers {cid}");
        Outcome::Applied
    }

    /// Removes a course from a department's offered set. The course itself
    /// need not exist.
    pub fn withdraw_course(&mut self, department_id: &str, course_id: &str) -> Outcome {
        let Some(department) = self.departments.get_mut(department_id) else {
            return Outcome::NotFound(EntityKind::Department);
        };
        if !department.remove_course(course_id) {
            return Outcome::Unchanged;
        }
        debug!("{department_id} no longer offers {course_id}");
        Outcome::Applied
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Applies a patch to a student.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the student unchanged, if any
    /// field in the patch is invalid.
    pub fn update_student(&mut self, student_id: &str, patch: StudentPatch) -> CoreResult<Outcome> {
        let Some(student) = self.students.get_mut(student_id) else {
            return Ok(Outcome::NotFound(EntityKind::Student));
        };
        student.apply(patch)?;
        debug!("Updated student {student_id}");
        Ok(Outcome::Applied)
    }

    /// Applies a patch to a faculty member.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the new name is empty.
    pub fn update_faculty(&mut self, faculty_id: &str, patch: FacultyPatch) -> CoreResult<Outcome> {
        let Some(faculty) = self.faculty.get_mut(faculty_id) else {
            return Ok(Outcome::NotFound(EntityKind::Faculty));
        };
        faculty.apply(patch)?;
        debug!("Updated faculty {faculty_id}");
        Ok(Outcome::Applied)
    }

    /// Applies a patch to a course.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the course unchanged, if any
    /// field in the patch is invalid.
    pub fn update_course(&mut self, course_id: &str, patch: CoursePatch) -> CoreResult<Outcome> {
        let Some(course) = self.courses.get_mut(course_id) else {
            return Ok(Outcome::NotFound(EntityKind::Course));
        };
        course.apply(patch)?;
        debug!("Updated course {course_id}");
        Ok(Outcome::Applied)
    }

    /// Applies a patch to a department.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the new name is empty.
    pub fn update_department(
        &mut self,
        department_id: &str,
        patch: DepartmentPatch,
    ) -> CoreResult<Outcome> {
        let Some(department) = self.departments.get_mut(department_id) else {
            return Ok(Outcome::NotFound(EntityKind::Department));
        };
        department.apply(patch)?;
        debug!("Updated department {department_id}");
        Ok(Outcome::Applied)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns students whose name contains `query`, ignoring case.
    pub fn search_students_by_name(&self, query: &str) -> Vec<&Student> {
        self.students.search_by_name(query)
    }

    /// Returns faculty members whose name contains `query`, ignoring case.
    pub fn search_faculty_by_name(&self, query: &str) -> Vec<&Faculty> {
        self.faculty.search_by_name(query)
    }

    /// Returns courses whose name contains `query`, ignoring case.
    pub fn search_courses_by_name(&self, query: &str) -> Vec<&Course> {
        self.courses.search_by_name(query)
    }

    /// Returns departments whose name contains `query`, ignoring case.
    pub fn search_departments_by_name(&self, query: &str) -> Vec<&Department> {
        self.departments.search_by_name(query)
    }

    /// Returns every student ordered by GPA. Equal GPAs keep registry order.
    pub fn sort_students_by_gpa(&self, descending: bool) -> Vec<&Student> {
        let mut sorted: Vec<&Student> = self.students.iter().collect();
        if descending {
            sorted.sort_by(|a, b| b.gpa().total_cmp(&a.gpa()));
        } else {
            sorted.sort_by(|a, b| a.gpa().total_cmp(&b.gpa()));
        }
        sorted
    }

    /// Returns the mean GPA across all students, or `0.0` with no students.
    pub fn average_gpa(&self) -> f64 {
        if self.students.is_empty() {
            return 0.0;
        }
        self.students.iter().map(Student::gpa).sum::<f64>() / self.students.len() as f64
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replaces every record with decoded ones. Later duplicates of an ID
    /// are dropped.
    pub(crate) fn replace_records(
        &mut self,
        departments: Vec<Department>,
        students: Vec<Student>,
        faculty: Vec<Faculty>,
        courses: Vec<Course>,
    ) {
        self.departments = collect_unique(departments);
        self.students = collect_unique(students);
        self.faculty = collect_unique(faculty);
        self.courses = collect_unique(courses);
    }
}

fn insert<T: Record>(collection: &mut Collection<T>, record: T) -> Outcome {
    let id = record.key().to_string();
    if !collection.insert(record) {
        return Outcome::AlreadyExists(T::KIND);
    }
    debug!("Added {} {id}", T::KIND);
    Outcome::Applied
}

fn count_changed<'a, T: 'a>(
    records: impl Iterator<Item = &'a mut T>,
    mut change: impl FnMut(&mut T) -> bool,
) -> usize {
    records.map(|record| change(record)).filter(|&changed| changed).count()
}

fn collect_unique<T: Record>(records: Vec<T>) -> Collection<T> {
    let total = records.len();
    let collection: Collection<T> = records.into_iter().collect();
    if collection.len() < total {
        warn!(
            "Dropped {} {} records with duplicate IDs",
            total - collection.len(),
            T::KIND
        );
    }
    collection
}
