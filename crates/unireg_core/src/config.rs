//! Registry and storage configuration.

use std::path::{Path, PathBuf};

/// Default university name for a fresh registry.
pub const DEFAULT_UNIVERSITY_NAME: &str = "Tech University";

/// Default university address for a fresh registry.
pub const DEFAULT_UNIVERSITY_ADDRESS: &str = "123 College Ave, Tech City";

/// File name of the unified document.
pub const UNIFIED_FILE: &str = "university.json";

/// File names of the legacy documents, in load order.
pub const LEGACY_FILES: LegacyFiles<&str> = LegacyFiles {
    departments: "departments.json",
    faculty: "faculty.json",
    students: "students.json",
    courses: "courses.json",
};

/// One value per legacy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFiles<T> {
    /// The departments document.
    pub departments: T,
    /// The faculty document.
    pub faculty: T,
    /// The students document.
    pub students: T,
    /// The courses document.
    pub courses: T,
}

impl<T> LegacyFiles<T> {
    /// Returns the four values in load order.
    pub fn as_array(&self) -> [&T; 4] {
        [&self.departments, &self.faculty, &self.students, &self.courses]
    }
}

/// Configuration for a registry and its data store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted documents.
    pub data_dir: PathBuf,

    /// Name given to a fresh registry.
    pub university_name: String,

    /// Address given to a fresh registry.
    pub university_address: String,

    /// Whether saved documents are pretty-printed.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            university_name: DEFAULT_UNIVERSITY_NAME.to_string(),
            university_address: DEFAULT_UNIVERSITY_ADDRESS.to_string(),
            pretty: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data directory.
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the university name.
    #[must_use]
    pub fn university_name(mut self, name: impl Into<String>) -> Self {
        self.university_name = name.into();
        self
    }

    /// Sets the university address.
    #[must_use]
    pub fn university_address(mut self, address: impl Into<String>) -> Self {
        self.university_address = address.into();
        self
    }

    /// Sets whether saved documents are pretty-printed.
    #[must_use]
    pub const fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }

    /// Returns the path of the unified document.
    #[must_use]
    pub fn unified_path(&self) -> PathBuf {
        self.data_dir.join(UNIFIED_FILE)
    }

    /// Returns the paths of the four legacy documents.
    #[must_use]
    pub fn legacy_paths(&self) -> LegacyFiles<PathBuf> {
        let dir: &Path = &self.data_dir;
        LegacyFiles {
            departments: dir.join(LEGACY_FILES.departments),
            faculty: dir.join(LEGACY_FILES.faculty),
            students: dir.join(LEGACY_FILES.students),
            courses: dir.join(LEGACY_FILES.courses),
        }
    }
}
