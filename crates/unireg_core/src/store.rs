//! JSON persistence for the registry.
//!
//! State lives in one unified document, `university.json`, holding the
//! university name and address plus one array per record kind. An older
//! layout with four separate array documents is still read when the unified
//! document is absent; it is never written.
//!
//! ## Load order
//!
//! 1. Unified document, if present.
//! 2. Legacy documents, if the unified one is absent and all four exist.
//! 3. Otherwise, an empty registry.
//!
//! A document that fails to decode leaves the registry empty and is
//! reported as [`LoadReport::Corrupt`]. Other I/O failures are returned as
//! errors.

use crate::config::Config;
use crate::entity::{Course, Department, Faculty, Student};
use crate::error::{CoreError, CoreResult};
use crate::registry::University;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Number of records of each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    /// Students.
    pub students: usize,
    /// Faculty members.
    pub faculty: usize,
    /// Courses.
    pub courses: usize,
    /// Departments.
    pub departments: usize,
}

impl RecordCounts {
    /// Counts the records currently held by a registry.
    pub fn of(university: &University) -> Self {
        Self {
            students: university.students().len(),
            faculty: university.faculty().len(),
            courses: university.courses().len(),
            departments: university.departments().len(),
        }
    }
}

impl fmt::Display for RecordCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} students, {} faculty, {} courses, {} departments",
            self.students, self.faculty, self.courses, self.departments
        )
    }
}

/// What [`DataStore::load`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// State was read from the unified document.
    Unified {
        /// Records loaded.
        counts: RecordCounts,
    },
    /// State was read from the four legacy documents.
    Legacy {
        /// Records loaded.
        counts: RecordCounts,
    },
    /// No saved state was found.
    Fresh,
    /// A document could not be decoded; the registry was left empty.
    Corrupt {
        /// The document that failed.
        path: PathBuf,
        /// The decoder's message.
        message: String,
    },
}

impl LoadReport {
    /// Returns true if records were loaded from disk.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Unified { .. } | Self::Legacy { .. })
    }
}

/// Unified document as read from disk. Missing arrays decode as empty.
#[derive(Deserialize)]
struct UniversityDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    departments: Vec<Department>,
    #[serde(default)]
    students: Vec<Student>,
    #[serde(default)]
    faculty: Vec<Faculty>,
    #[serde(default)]
    courses: Vec<Course>,
}

/// Unified document as written to disk, borrowing from the registry.
#[derive(Serialize)]
struct UniversityDocumentRef<'a> {
    name: &'a str,
    address: &'a str,
    departments: &'a [Department],
    students: &'a [Student],
    faculty: &'a [Faculty],
    courses: &'a [Course],
}

impl<'a> From<&'a University> for UniversityDocumentRef<'a> {
    fn from(university: &'a University) -> Self {
        Self {
            name: university.name(),
            address: university.address(),
            departments: university.departments().as_slice(),
            students: university.students().as_slice(),
            faculty: university.faculty().as_slice(),
            courses: university.courses().as_slice(),
        }
    }
}

/// Reads and writes registry state under a data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    config: Config,
}

impl DataStore {
    /// Creates a store for the configured data directory.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the registry's records with the saved state.
    ///
    /// Name and address are reset from the configuration first; only a
    /// unified document that carries them overrides those values.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than a missing file. Decode
    /// failures are not errors; they produce [`LoadReport::Corrupt`].
    pub fn load(&self, university: &mut University) -> CoreResult<LoadReport> {
        university.set_name(self.config.university_name.clone());
        university.set_address(self.config.university_address.clone());

        match self.load_unified(university).or_else(|err| corrupt(university, err))? {
            Some(report) => return Ok(report),
            None => debug!("No unified document at {:?}", self.config.unified_path()),
        }

        match self.load_legacy(university).or_else(|err| corrupt(university, err))? {
            Some(report) => Ok(report),
            None => {
                university.clear();
                info!("No saved data in {:?}; starting fresh", self.config.data_dir);
                Ok(LoadReport::Fresh)
            }
        }
    }

    /// Writes the unified document, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the document
    /// cannot be written.
    pub fn save(&self, university: &University) -> CoreResult<PathBuf> {
        fs::create_dir_all(&self.config.data_dir)?;
        let path = self.config.unified_path();
        let document = UniversityDocumentRef::from(university);
        let json = if self.config.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(CoreError::Encode)?;
        fs::write(&path, json)?;
        info!("Saved {} to {:?}", RecordCounts::of(university), path);
        Ok(path)
    }

    fn load_unified(&self, university: &mut University) -> CoreResult<Option<LoadReport>> {
        let path = self.config.unified_path();
        let Some(document) = read_document::<UniversityDocument>(&path)? else {
            return Ok(None);
        };

        if let Some(name) = document.name {
            university.set_name(name);
        }
        if let Some(address) = document.address {
            university.set_address(address);
        }
        university.replace_records(
            document.departments,
            document.students,
            document.faculty,
            document.courses,
        );
        let counts = RecordCounts::of(university);
        info!("Loaded {counts} from {:?}", path);
        Ok(Some(LoadReport::Unified { counts }))
    }

    fn load_legacy(&self, university: &mut University) -> CoreResult<Option<LoadReport>> {
        let paths = self.config.legacy_paths();
        if !paths.as_array().iter().all(|path| path.exists()) {
            return Ok(None);
        }

        // Decode everything before touching the registry.
        let (Some(departments), Some(students), Some(faculty), Some(courses)) = (
            read_document::<Vec<Department>>(&paths.departments)?,
            read_document::<Vec<Student>>(&paths.students)?,
            read_document::<Vec<Faculty>>(&paths.faculty)?,
            read_document::<Vec<Course>>(&paths.courses)?,
        ) else {
            return Ok(None);
        };

        university.replace_records(departments, students, faculty, courses);
        let counts = RecordCounts::of(university);
        info!("Loaded {counts} from legacy documents in {:?}", self.config.data_dir);
        Ok(Some(LoadReport::Legacy { counts }))
    }
}

/// Reads and decodes a JSON document. A missing file yields `None`.
fn read_document<T: DeserializeOwned>(path: &Path) -> CoreResult<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| CoreError::decode(path, source))
}

/// Downgrades a decode failure to an empty registry; other errors pass through.
fn corrupt(university: &mut University, err: CoreError) -> CoreResult<Option<LoadReport>> {
    match err {
        CoreError::Decode { path, source } => {
            warn!("Could not decode {:?}: {source}; starting with no data", path);
            university.clear();
            Ok(Some(LoadReport::Corrupt {
                path,
                message: source.to_string(),
            }))
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> DataStore {
        DataStore::new(Config::new().data_dir(dir.path()))
    }

    fn populated() -> University {
        let mut uni = University::new("Night School", "1 Moon Rd");
        let _ = uni.add_department(Department::new("CSE", "Computer Science").unwrap());
        let _ = uni.add_faculty(Faculty::new("F0001", "Dr. Sarah Johnson", "CSE").unwrap());
        let _ = uni.add_course(Course::new("CSE101", "Introduction to Programming", 3).unwrap());
        let _ = uni.add_course(Course::new("CSE201", "Data Structures", 4).unwrap());
        let _ = uni.add_student(Student::new("S0001", "Alice Johnson", 20, "F", "CSE").unwrap());
        let _ = uni.enroll_student_in_course("S0001", "CSE101");
        let _ = uni.assign_grade("S0001", "CSE101", 3.8);
        let _ = uni.assign_faculty_to_course("F0001", "CSE101");
        let _ = uni.set_head_of_department("CSE", "F0001");
        let _ = uni.offer_course("CSE", "CSE101");
        uni
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let original = populated();
        let path = store.save(&original).unwrap();
        assert_eq!(path, dir.path().join("university.json"));

        let mut loaded = University::default();
        let report = store.load(&mut loaded).unwrap();
        assert_eq!(
            report,
            LoadReport::Unified {
                counts: RecordCounts {
                    students: 1,
                    faculty: 1,
                    courses: 2,
                    departments: 1,
                }
            }
        );
        assert_eq!(loaded.name(), "Night School");
        assert_eq!(loaded.address(), "1 Moon Rd");
        assert_eq!(loaded.students().as_slice(), original.students().as_slice());
        assert_eq!(loaded.faculty().as_slice(), original.faculty().as_slice());
        assert_eq!(loaded.courses().as_slice(), original.courses().as_slice());
        assert_eq!(loaded.departments().as_slice(), original.departments().as_slice());
    }

    #[test]
    fn saved_document_uses_empty_string_for_open_slots() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = store.save(&populated()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(json["courses"][1]["assigned_faculty"], "");
        assert_eq!(json["departments"][0]["head_of_department"], "F0001");
        assert_eq!(json["students"][0]["gpa"], 3.8);
    }

    #[test]
    fn missing_data_is_fresh() {
        let dir = TempDir::new().unwrap();
        let store = DataStore::new(Config::new().data_dir(dir.path().join("nowhere")));
        let mut uni = populated();
        assert_eq!(store.load(&mut uni).unwrap(), LoadReport::Fresh);
        assert!(uni.is_empty());
    }

    #[test]
    fn legacy_documents_are_read() {
        let dir = TempDir::new().unwrap();
        let write = |name: &str, body: &str| fs::write(dir.path().join(name), body).unwrap();
        write(
            "departments.json",
            r#"[{"department_id":"MAT","name":"Mathematics","head_of_department":"","courses_offered":["MAT101"]}]"#,
        );
        write(
            "students.json",
            r#"[{"student_id":"S0005","name":"Edward Lee","age":20,"gender":"M","department":"MAT","gpa":0.0,"course_grades":{"MAT101":3.2}}]"#,
        );
        write("faculty.json", "[]");
        write(
            "courses.json",
            r#"[{"course_id":"MAT101","name":"Calculus I","credit_hours":4,"assigned_faculty":"","enrolled_students":["S0005"]}]"#,
        );

        let mut uni = University::default();
        let report = store_in(&dir).load(&mut uni).unwrap();
        assert!(matches!(report, LoadReport::Legacy { counts } if counts.students == 1));
        assert_eq!(uni.name(), "Tech University");
        assert_eq!(uni.find_student("S0005").unwrap().gpa(), 3.2);
        assert!(uni.check_integrity().is_empty());
    }

    #[test]
    fn name_and_address_come_from_config_without_a_unified_document() {
        let dir = TempDir::new().unwrap();
        let store = DataStore::new(
            Config::new()
                .data_dir(dir.path())
                .university_name("Harbour College")
                .university_address("9 Quay St"),
        );

        let mut uni = populated();
        assert_eq!(store.load(&mut uni).unwrap(), LoadReport::Fresh);
        assert_eq!(uni.name(), "Harbour College");
        assert_eq!(uni.address(), "9 Quay St");

        fs::write(dir.path().join("university.json"), "[").unwrap();
        let mut uni = populated();
        let report = store.load(&mut uni).unwrap();
        assert!(matches!(report, LoadReport::Corrupt { .. }));
        assert_eq!(uni.name(), "Harbour College");

        for name in ["students.json", "faculty.json", "courses.json", "departments.json"] {
            fs::write(dir.path().join(name), "[]").unwrap();
        }
        fs::remove_file(dir.path().join("university.json")).unwrap();
        let mut uni = populated();
        let report = store.load(&mut uni).unwrap();
        assert!(matches!(report, LoadReport::Legacy { .. }));
        assert_eq!(uni.name(), "Harbour College");
        assert_eq!(uni.address(), "9 Quay St");
    }

    #[test]
    fn incomplete_legacy_set_is_fresh() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("students.json"), "[]").unwrap();
        let mut uni = University::default();
        assert_eq!(store_in(&dir).load(&mut uni).unwrap(), LoadReport::Fresh);
    }

    #[test]
    fn malformed_document_is_corrupt_and_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("university.json"), "{ not json").unwrap();
        let mut uni = populated();
        let report = store_in(&dir).load(&mut uni).unwrap();
        match report {
            LoadReport::Corrupt { path, .. } => assert!(path.ends_with("university.json")),
            other => panic!("expected a corrupt report, got {other:?}"),
        }
        assert!(uni.is_empty());
    }

    #[test]
    fn invalid_id_in_document_is_corrupt() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("university.json"),
            r#"{"name":"X","address":"Y","students":[{"student_id":"S01","name":"A","age":1,"gender":"","department":"","course_grades":{}}]}"#,
        )
        .unwrap();
        let mut uni = University::default();
        let report = store_in(&dir).load(&mut uni).unwrap();
        assert!(matches!(report, LoadReport::Corrupt { .. }));
        assert!(uni.is_empty());
    }

    #[test]
    fn unreadable_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("university.json")).unwrap();
        let mut uni = University::default();
        let err = store_in(&dir).load(&mut uni).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[test]
    fn compact_output_when_not_pretty() {
        let dir = TempDir::new().unwrap();
        let store = DataStore::new(Config::new().data_dir(dir.path()).pretty(false));
        let path = store.save(&University::default()).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.starts_with(r#"{"name":"Tech University""#));
    }
}
