//! Verify command implementation.

use crate::error::{CliError, CliResult};
use unireg_core::{DataStore, IntegrityIssue, LoadReport, University};

/// Runs the verify command.
///
/// Fails when saved data cannot be decoded or any cross-link does not hold.
pub fn run(store: &DataStore) -> CliResult<()> {
    println!("Verifying records in {:?}", store.config().data_dir);
    println!();

    let mut university = University::from_config(store.config());
    match store.load(&mut university)? {
        LoadReport::Corrupt { path, message } => {
            println!("✗ Could not decode {}", path.display());
            return Err(CliError::CorruptData(message));
        }
        LoadReport::Fresh => println!("No saved data found (nothing to check)"),
        LoadReport::Unified { counts } | LoadReport::Legacy { counts } => {
            println!("Checking {counts}...");
        }
    }

    let issues = university.check_integrity();
    print_result(&issues);

    println!();
    if issues.is_empty() {
        println!("✓ Records verification passed");
        Ok(())
    } else {
        println!("✗ Records verification failed");
        Err(CliError::IntegrityIssues(issues.len()))
    }
}

fn print_result(issues: &[IntegrityIssue]) {
    if issues.is_empty() {
        println!("  ✓ All links consistent");
        return;
    }
    println!("  ✗ {} issue(s) found:", issues.len());
    for issue in issues.iter().take(20) {
        println!("    - {issue}");
    }
    if issues.len() > 20 {
        println!("    ... and {} more", issues.len() - 20);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use unireg_core::{sample, Config};

    fn seeded_store(dir: &TempDir) -> (DataStore, University) {
        let store = DataStore::new(Config::new().data_dir(dir.path()));
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        (store, uni)
    }

    #[test]
    fn consistent_data_passes() {
        let dir = TempDir::new().unwrap();
        let (store, uni) = seeded_store(&dir);
        store.save(&uni).unwrap();
        run(&store).unwrap();
    }

    #[test]
    fn stale_links_fail() {
        let dir = TempDir::new().unwrap();
        let (store, mut uni) = seeded_store(&dir);
        let _ = uni.assign_faculty_to_course("F0002", "CSE101");
        let _ = uni.remove_department("PHY");
        store.save(&uni).unwrap();

        // F0001 still lists CSE101; S0006 and F0005 name the removed PHY.
        assert!(matches!(run(&store), Err(CliError::IntegrityIssues(3))));
    }

    #[test]
    fn missing_data_passes() {
        let dir = TempDir::new().unwrap();
        let store = DataStore::new(Config::new().data_dir(dir.path()));
        run(&store).unwrap();
    }
}
