//! Test fixtures and registry helpers.
//!
//! Provides temporary data directories and registries pre-loaded with
//! known data.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use unireg_core::{sample, Config, DataStore, University};

/// A data directory that is deleted when dropped.
pub struct TestDataDir {
    dir: TempDir,
}

impl TestDataDir {
    /// Creates an empty temporary data directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns a configuration pointing at this directory.
    pub fn config(&self) -> Config {
        Config::new().data_dir(self.dir.path())
    }

    /// Returns a data store over this directory.
    pub fn store(&self) -> DataStore {
        DataStore::new(self.config())
    }

    /// Writes a raw document into the directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write document");
        path
    }

    /// Reads a document from the directory as JSON.
    pub fn read_json(&self, name: &str) -> serde_json::Value {
        let text =
            fs::read_to_string(self.dir.path().join(name)).expect("Failed to read document");
        serde_json::from_str(&text).expect("Document is not valid JSON")
    }
}

impl Default for TestDataDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a registry loaded with the sample data set.
pub fn populated_university() -> University {
    let mut university = University::default();
    sample::populate(&mut university).expect("Sample data must be valid");
    university
}

/// Runs a test with a data store over a temporary directory.
///
/// # Example
///
/// ```rust
/// use unireg_testkit::with_temp_store;
/// use unireg_core::{LoadReport, University};
///
/// with_temp_store(|store| {
///     let mut uni = University::default();
///     assert_eq!(store.load(&mut uni).unwrap(), LoadReport::Fresh);
/// });
/// ```
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&DataStore) -> R,
{
    let dir = TestDataDir::new();
    f(&dir.store())
}

/// Test scenario helpers.
pub mod scenarios {
    use unireg_core::{Course, Department, Faculty, Student, University};

    /// Department codes used by generated registries.
    pub const DEPARTMENTS: [&str; 4] = ["CSE", "EEE", "MAT", "PHY"];

    /// Creates a registry with the given number of students, faculty, and
    /// courses. Every student is enrolled in up to three courses and every
    /// course has an instructor.
    pub fn sized_university(students: usize, faculty: usize, courses: usize) -> University {
        assert!(students <= 9999 && faculty <= 9999 && courses <= 999);
        let mut uni = University::default();

        for code in DEPARTMENTS {
            let _ = uni.add_department(Department::new(code, code).expect("valid department"));
        }
        for i in 0..faculty {
            let id = format!("F{:04}", i + 1);
            let dept = DEPARTMENTS[i % DEPARTMENTS.len()];
            let _ = uni.add_faculty(
                Faculty::new(&id, format!("Faculty {i}"), dept).expect("valid faculty"),
            );
        }
        for i in 0..courses {
            let id = format!("C{:03}", i + 1);
            let _ = uni.add_course(
                Course::new(&id, format!("Course {i}"), 3).expect("valid course"),
            );
            let _ = uni.offer_course(DEPARTMENTS[i % DEPARTMENTS.len()], &id);
            if faculty > 0 {
                let _ = uni.assign_faculty_to_course(&format!("F{:04}", i % faculty + 1), &id);
            }
        }
        for i in 0..students {
            let id = format!("S{:04}", i + 1);
            let dept = DEPARTMENTS[i % DEPARTMENTS.len()];
            let _ = uni.add_student(
                Student::new(&id, format!("Student {i}"), 20, "Other", dept)
                    .expect("valid student"),
            );
            for k in 0..courses.min(3) {
                let course = format!("C{:03}", (i + k) % courses + 1);
                let _ = uni.enroll_student_in_course(&id, &course);
                let _ = uni.assign_grade(&id, &course, ((i + k) % 5) as f64 * 0.8);
            }
        }
        uni
    }
}
