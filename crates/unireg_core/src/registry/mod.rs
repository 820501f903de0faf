//! The university registry.
//!
//! [`University`] owns one ordered [`Collection`] per entity kind and is the
//! only place where one record's links to another are changed.

mod collection;
mod integrity;
mod university;

pub use collection::Collection;
pub use integrity::IntegrityIssue;
pub use university::University;
