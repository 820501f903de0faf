//! Statistics and search screens.

use super::Menu;
use crate::commands::stats::{department_table, summary_lines};
use crate::error::CliResult;
use std::io::{BufRead, Write};

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    pub(super) fn show_statistics(&mut self) -> CliResult<()> {
        self.console.blank()?;
        for line in summary_lines(&self.uni.university_stats()) {
            self.console.line(line)?;
        }
        let rows = self.uni.department_stats();
        if rows.is_empty() {
            return Ok(());
        }
        self.console.blank()?;
        let (headers, rows) = department_table(&rows);
        self.print_table(&headers, &rows)
    }

    pub(super) fn search_menu(&mut self) -> CliResult<()> {
        loop {
            let choice = self.console.menu(
                "Search",
                &[
                    ("1", "Search Students by Name"),
                    ("2", "Search Faculty by Name"),
                    ("3", "Search Courses by Name"),
                    ("4", "Search Departments by Name"),
                    ("0", "Back"),
                ],
            )?;
            if choice == "0" {
                return Ok(());
            }
            if !matches!(choice.as_str(), "1" | "2" | "3" | "4") {
                self.console.fail("Invalid choice.")?;
                continue;
            }
            let query = self.console.ask("Enter name to search: ")?;
            match choice.as_str() {
                "1" => self.search_students(&query)?,
                "2" => self.search_faculty(&query)?,
                "3" => self.search_courses(&query)?,
                _ => self.search_departments(&query)?,
            }
        }
    }
}
