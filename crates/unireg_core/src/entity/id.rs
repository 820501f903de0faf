//! Validated entity identifiers.
//!
//! Identifiers are immutable strings whose format is checked when they are
//! created. Validation is format-only; whether an entity with the ID exists
//! is the registry's concern.
//!
//! | Kind | Format | Example |
//! |---|---|---|
//! | Student | `S` + 4 digits | `S0001` |
//! | Faculty | `F` + 4 digits | `F0001` |
//! | Course | non-digit prefix + exactly 3 trailing digits | `CSE101` |
//! | Department | 2-4 uppercase ASCII letters | `MATH` |

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// The four kinds of records held by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A student record.
    Student,
    /// A faculty member record.
    Faculty,
    /// A course record.
    Course,
    /// A department record.
    Department,
}

impl EntityKind {
    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Course => "course",
            Self::Department => "department",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! validated_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $check:path) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier, rejecting values that do not match the format.
            ///
            /// # Errors
            ///
            /// Returns [`CoreError::InvalidId`] if the format check fails.
            pub fn new(value: impl Into<String>) -> CoreResult<Self> {
                let value = value.into();
                if $check(&value) {
                    Ok(Self(value))
                } else {
                    Err(CoreError::invalid_id($kind, value))
                }
            }

            /// Returns true if `value` is a well-formed identifier of this kind.
            #[must_use]
            pub fn is_valid(value: &str) -> bool {
                $check(value)
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

validated_id!(
    /// Student identifier: `S` followed by exactly 4 decimal digits.
    StudentId,
    EntityKind::Student,
    is_student_id
);

validated_id!(
    /// Faculty identifier: `F` followed by exactly 4 decimal digits.
    FacultyId,
    EntityKind::Faculty,
    is_faculty_id
);

validated_id!(
    /// Course identifier: a non-digit prefix followed by exactly 3 decimal digits.
    CourseId,
    EntityKind::Course,
    is_course_id
);

validated_id!(
    /// Department identifier: 2 to 4 uppercase ASCII letters.
    DepartmentId,
    EntityKind::Department,
    is_department_id
);

fn prefixed_four_digits(value: &str, prefix: u8) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5 && bytes[0] == prefix && bytes[1..].iter().all(u8::is_ascii_digit)
}

fn is_student_id(value: &str) -> bool {
    prefixed_four_digits(value, b'S')
}

fn is_faculty_id(value: &str) -> bool {
    prefixed_four_digits(value, b'F')
}

fn is_course_id(value: &str) -> bool {
    // The first digit must start a suffix of exactly three digits that runs
    // to the end of the string, and at least one character must precede it.
    match value.char_indices().find(|(_, c)| c.is_ascii_digit()) {
        Some((start, _)) if start > 0 => {
            let suffix = &value[start..];
            suffix.len() == 3 && suffix.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

fn is_department_id(value: &str) -> bool {
    (2..=4).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_uppercase())
}
