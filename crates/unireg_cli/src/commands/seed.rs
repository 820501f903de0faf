//! Seed command implementation.

use crate::error::CliResult;
use tracing::info;
use unireg_core::{sample, DataStore, University};

/// Runs the seed command: replaces saved data with the sample data set.
pub fn run(store: &DataStore, save: bool) -> CliResult<()> {
    let mut university = University::from_config(store.config());
    let summary = sample::populate(&mut university)?;

    println!("Generated sample data:");
    println!("  Departments: {}", summary.departments);
    println!("  Faculty:     {}", summary.faculty);
    println!("  Courses:     {}", summary.courses);
    println!("  Students:    {}", summary.students);
    println!("  Enrollments: {}", summary.enrollments);
    println!("  Grades:      {}", summary.grades);

    if !save {
        info!("--no-save given; sample data was not written");
        return Ok(());
    }
    let path = store.save(&university)?;
    println!("✓ Saved to {}", path.display());
    Ok(())
}
