//! Entity records and identifiers.
//!
//! Each record owns its identity validation and a set of links to other
//! records, expressed as identifiers. Records never reach into each other;
//! keeping the two sides of a link consistent is the registry's job.

mod course;
mod department;
mod faculty;
mod id;
mod student;

pub use course::{Course, CoursePatch};
pub use department::{Department, DepartmentPatch};
pub use faculty::{Faculty, FacultyPatch};
pub use id::{CourseId, DepartmentId, EntityKind, FacultyId, StudentId};
pub use student::{Student, StudentPatch, MAX_GRADE, MIN_GRADE};

use crate::error::{CoreError, CoreResult};

/// A record that can be stored in a registry collection.
pub trait Record {
    /// The kind of entity this record represents.
    const KIND: EntityKind;

    /// Returns the record's identifier as a string.
    fn key(&self) -> &str;

    /// Returns the record's display name, used by name searches.
    fn name(&self) -> &str;
}

/// Trims `value` and rejects it if nothing is left.
pub(crate) fn required(field: &str, value: impl Into<String>) -> CoreResult<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Rejects zero for fields that must be positive.
pub(crate) fn positive(field: &str, value: u32) -> CoreResult<u32> {
    if value == 0 {
        return Err(CoreError::validation(format!(
            "{field} must be a positive number"
        )));
    }
    Ok(value)
}

/// Serde adapter for single-slot links, persisted as `""` when empty.
pub(crate) mod optional_link {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt::Display;

    pub(crate) fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<str>,
    {
        serializer.serialize_str(value.as_ref().map_or("", |v| v.as_ref()))
    }

    pub(crate) fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<String>,
        T::Error: Display,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => T::try_from(raw).map(Some).map_err(D::Error::custom),
        }
    }
}

/// Adds `id` to an ordered link set. Returns false if it was already present.
pub(crate) fn link<T: PartialEq + Clone>(set: &mut Vec<T>, id: &T) -> bool {
    if set.contains(id) {
        return false;
    }
    set.push(id.clone());
    true
}

/// Removes `id` from an ordered link set. Returns false if it was absent.
pub(crate) fn unlink<T: AsRef<str>>(set: &mut Vec<T>, id: &str) -> bool {
    match set.iter().position(|existing| existing.as_ref() == id) {
        Some(pos) => {
            set.remove(pos);
            true
        }
        None => false,
    }
}
