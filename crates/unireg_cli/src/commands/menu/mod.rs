//! Interactive menu command.
//!
//! The menu is a tree of numbered choices. Each submenu lives in its own
//! module and works on the registry only through its public operations.

mod courses;
mod departments;
mod faculty;
mod reports;
mod students;

use crate::console::{ChannelInput, Console};
use crate::error::{CliError, CliResult};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};
use unireg_core::{sample, DataStore, LoadReport, Outcome, University};

/// Runs an interactive session on the terminal.
///
/// Ctrl-C ends the session at the next prompt instead of killing the
/// process, so the state is still saved.
pub fn run(store: &DataStore, save: bool) -> CliResult<()> {
    let input = ChannelInput::stdin()?;
    let stdout = io::stdout();
    let mut console = Console::new(input, stdout.lock());
    run_with(store, save, &mut console)
}

/// Loads saved data, runs the menu, then saves if `save` is set.
///
/// The save happens however the session ended. A session error is
/// returned after saving.
pub fn run_with<R: BufRead, W: Write>(
    store: &DataStore,
    save: bool,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    let mut university = University::from_config(store.config());

    console.line("=".repeat(50))?;
    console.line("  University Records Manager")?;
    console.line("=".repeat(50))?;

    match store.load(&mut university) {
        Ok(report) => describe_load(console, &report)?,
        Err(err) => {
            error!("Loading saved data failed: {err}");
            console.fail(format_args!("Could not load saved data: {err}"))?;
        }
    }

    let outcome = session(&mut university, console);
    if let Err(err) = &outcome {
        error!("Session ended with an error: {err}");
    }

    if save {
        let saved = store.save(&university);
        match saved {
            Ok(path) => console.ok(format_args!("Data saved to {}", path.display()))?,
            Err(err) => console.fail(format_args!("Could not save data: {err}"))?,
        }
    }
    console.line("Goodbye!")?;
    outcome
}

/// Drives the main menu until the user exits, input ends, or Ctrl-C.
pub fn session<R: BufRead, W: Write>(
    university: &mut University,
    console: &mut Console<R, W>,
) -> CliResult<()> {
    let result = Menu::new(university, console).main_loop();
    match result {
        Err(CliError::EndOfInput) => {
            info!("Input closed; ending session");
            Ok(())
        }
        Err(CliError::Interrupted) => {
            warn!("Session interrupted");
            console.line("Program interrupted by user.")
        }
        other => other,
    }
}

fn describe_load<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    report: &LoadReport,
) -> CliResult<()> {
    match report {
        LoadReport::Unified { counts } | LoadReport::Legacy { counts } => {
            console.ok(format_args!("Loaded {counts}"))
        }
        LoadReport::Fresh => console.line("No saved data found. Starting with an empty registry."),
        LoadReport::Corrupt { path, message } => console.fail(format_args!(
            "Could not read {}: {message}. Starting with an empty registry.",
            path.display()
        )),
    }
}

/// Menu state: the registry being edited and the terminal.
pub(crate) struct Menu<'a, R, W> {
    uni: &'a mut University,
    console: &'a mut Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    fn new(uni: &'a mut University, console: &'a mut Console<R, W>) -> Self {
        Self { uni, console }
    }

    fn main_loop(&mut self) -> CliResult<()> {
        loop {
            let choice = self.console.menu(
                "Main Menu",
                &[
                    ("1", "Student Management"),
                    ("2", "Faculty Management"),
                    ("3", "Course Management"),
                    ("4", "Department Management"),
                    ("5", "University Operations"),
                    ("6", "Statistics"),
                    ("7", "Search"),
                    ("8", "Generate Sample Data"),
                    ("0", "Exit"),
                ],
            )?;
            match choice.as_str() {
                "1" => self.student_menu()?,
                "2" => self.faculty_menu()?,
                "3" => self.course_menu()?,
                "4" => self.department_menu()?,
                "5" => self.operations_menu()?,
                "6" => self.show_statistics()?,
                "7" => self.search_menu()?,
                "8" => self.generate_sample_data()?,
                "0" => return Ok(()),
                _ => self.console.fail("Invalid choice. Please try again.")?,
            }
        }
    }

    fn operations_menu(&mut self) -> CliResult<()> {
        loop {
            let choice = self.console.menu(
                "University Operations",
                &[
                    ("1", "Enroll Student in Course"),
                    ("2", "Assign Faculty to Course"),
                    ("3", "Assign Grade"),
                    ("4", "Set Head of Department"),
                    ("5", "Recalculate GPAs"),
                    ("0", "Back"),
                ],
            )?;
            match choice.as_str() {
                "1" => self.enroll_student()?,
                "2" => self.assign_faculty()?,
                "3" => self.assign_grade()?,
                "4" => self.set_head()?,
                "5" => self.show_average_gpa()?,
                "0" => return Ok(()),
                _ => self.console.fail("Invalid choice.")?,
            }
        }
    }

    fn generate_sample_data(&mut self) -> CliResult<()> {
        if !self.uni.is_empty()
            && !self
                .console
                .confirm("This replaces all existing records. Continue? (yes/no): ")?
        {
            return self.console.line("Cancelled.");
        }
        let summary = sample::populate(self.uni)?;
        self.console.ok(format_args!(
            "Sample data generated: {} departments, {} faculty, {} courses, {} students, {} grades",
            summary.departments, summary.faculty, summary.courses, summary.students, summary.grades
        ))
    }

    // Link operations shared by several submenus.

    fn enroll_student(&mut self) -> CliResult<()> {
        let student_id = self.console.ask("Enter Student ID: ")?;
        let course_id = self.console.ask_code("Enter Course ID: ")?;
        let outcome = self.uni.enroll_student_in_course(&student_id, &course_id);
        self.report(outcome, format_args!("{student_id} enrolled in {course_id}."))
    }

    fn unenroll_student(&mut self) -> CliResult<()> {
        let student_id = self.console.ask("Enter Student ID: ")?;
        let course_id = self.console.ask_code("Enter Course ID: ")?;
        let outcome = self.uni.unenroll_student_from_course(&student_id, &course_id);
        self.report(outcome, format_args!("{student_id} removed from {course_id}."))
    }

    fn assign_faculty(&mut self) -> CliResult<()> {
        let faculty_id = self.console.ask("Enter Faculty ID: ")?;
        let course_id = self.console.ask_code("Enter Course ID: ")?;
        let outcome = self.uni.assign_faculty_to_course(&faculty_id, &course_id);
        self.report(outcome, format_args!("{faculty_id} assigned to {course_id}."))
    }

    fn assign_grade(&mut self) -> CliResult<()> {
        let student_id = self.console.ask("Enter Student ID: ")?;
        if self.uni.find_student(&student_id).is_none() {
            return self.console.fail("Student not found.");
        }
        let course_id = self.console.ask_code("Enter Course ID: ")?;
        let grade = self
            .console
            .ask_until("Enter grade (0.0-4.0): ", crate::console::grade)?;
        let outcome = self.uni.assign_grade(&student_id, &course_id, grade);
        self.report(
            outcome,
            format_args!("Grade {grade:.2} recorded for {student_id} in {course_id}."),
        )
    }

    fn set_head(&mut self) -> CliResult<()> {
        let department_id = self.console.ask_code("Enter Department ID: ")?;
        let faculty_id = self.console.ask("Enter Faculty ID: ")?;
        let outcome = self.uni.set_head_of_department(&department_id, &faculty_id);
        self.report(outcome, format_args!("{faculty_id} is now head of {department_id}."))
    }

    fn show_average_gpa(&mut self) -> CliResult<()> {
        // GPAs are kept current on every grade change; this only reports.
        let average = self.uni.average_gpa();
        self.console.ok(format_args!(
            "GPAs are up to date for {} students. Average GPA: {average:.2}",
            self.uni.students().len()
        ))
    }

    /// Prints `success` for an applied outcome and the outcome itself otherwise.
    fn report(&mut self, outcome: Outcome, success: impl std::fmt::Display) -> CliResult<()> {
        match outcome {
            Outcome::Applied => self.console.ok(success),
            Outcome::Unchanged => self.console.line("Nothing to change."),
            other => self.console.fail(capitalize(&other.to_string())),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>() + ".",
        None => String::new(),
    }
}

/// Renders rows as left-aligned columns sized to fit.
fn table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers.iter().copied(), &widths));
    let rule = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    lines.push("-".repeat(rule));
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str), &widths));
    }
    lines
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn print_table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> CliResult<()> {
        for line in table(headers, rows) {
            self.console.line(line)?;
        }
        Ok(())
    }
}
