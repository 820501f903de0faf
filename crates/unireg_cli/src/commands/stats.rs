//! Stats command implementation.

use crate::error::{CliError, CliResult};
use serde::Serialize;
use tracing::info;
use unireg_core::{DataStore, DepartmentStats, LoadReport, University, UniversityStats};

/// Statistics report.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// University-wide totals.
    pub university: UniversityStats,
    /// Per-department headcounts.
    pub departments: Vec<DepartmentStats>,
}

/// Runs the stats command.
pub fn run(store: &DataStore, format: &str) -> CliResult<()> {
    info!("Reading statistics from {:?}", store.config().data_dir);
    let mut university = University::from_config(store.config());
    if let LoadReport::Corrupt { path, message } = store.load(&mut university)? {
        return Err(CliError::CorruptData(format!("{}: {message}", path.display())));
    }

    let report = StatsReport {
        university: university.university_stats(),
        departments: university.department_stats(),
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print_text_output(&report);
        }
    }

    Ok(())
}

fn print_text_output(report: &StatsReport) {
    for line in summary_lines(&report.university) {
        println!("{line}");
    }
    if report.departments.is_empty() {
        return;
    }
    println!();
    let (headers, rows) = department_table(&report.departments);
    println!(
        "{:<12} {:>10} {:>10} {:>10}",
        headers[0], headers[1], headers[2], headers[3]
    );
    for row in rows {
        println!("{:<12} {:>10} {:>10} {:>10}", row[0], row[1], row[2], row[3]);
    }
}

/// Formats the university totals.
pub(crate) fn summary_lines(stats: &UniversityStats) -> Vec<String> {
    vec![
        format!("{} Statistics", stats.name),
        "=".repeat(stats.name.chars().count() + 11),
        format!("Address:           {}", stats.address),
        format!("Total students:    {}", stats.total_students),
        format!("Total faculty:     {}", stats.total_faculty),
        format!("Total courses:     {}", stats.total_courses),
        format!("Total departments: {}", stats.total_departments),
        format!("Average GPA:       {:.2}", stats.average_gpa),
    ]
}

/// Builds the per-department table.
pub(crate) fn department_table(rows: &[DepartmentStats]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let headers = vec!["Department", "Students", "Faculty", "Courses"];
    let rows = rows
        .iter()
        .map(|row| {
            vec![
                format!("{} - {}", row.department_id, row.name),
                row.students.to_string(),
                row.faculty.to_string(),
                row.courses_offered.to_string(),
            ]
        })
        .collect();
    (headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use unireg_core::{sample, Config};

    #[test]
    fn summary_uses_two_decimals() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        let lines = summary_lines(&uni.university_stats());
        assert_eq!(lines[0], "Tech University Statistics");
        assert_eq!(lines[1].len(), "Tech University Statistics".len());
        assert!(lines[7].starts_with("Average GPA:       3.4"));
    }

    #[test]
    fn department_rows_follow_registry_order() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        let (headers, rows) = department_table(&uni.department_stats());
        assert_eq!(headers, ["Department", "Students", "Faculty", "Courses"]);
        assert_eq!(rows[0], ["CSE - Computer Science & Engineering", "4", "2", "5"]);
        assert_eq!(rows[3][0], "PHY - Physics");
    }

    #[test]
    fn corrupt_data_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("university.json"), "[").unwrap();
        let store = DataStore::new(Config::new().data_dir(dir.path()));
        assert!(matches!(run(&store, "text"), Err(CliError::CorruptData(_))));
    }
}
