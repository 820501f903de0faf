//! Faculty management submenu.

use super::Menu;
use crate::console::{keep_if_blank, non_empty};
use crate::error::CliResult;
use std::io::{BufRead, Write};
use unireg_core::{Faculty, FacultyId, FacultyPatch};

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    pub(super) fn faculty_menu(&mut self) -> CliResult<()> {
        loop {
            let choice = self.console.menu(
                "Faculty Management",
                &[
                    ("1", "Add Faculty"),
                    ("2", "View All Faculty"),
                    ("3", "Find Faculty by ID"),
                    ("4", "Update Faculty"),
                    ("5", "Delete Faculty"),
                    ("6", "View Faculty Courses"),
                    ("0", "Back"),
                ],
            )?;
            match choice.as_str() {
                "1" => self.add_faculty()?,
                "2" => self.list_faculty()?,
                "3" => self.find_faculty()?,
                "4" => self.update_faculty()?,
                "5" => self.delete_faculty()?,
                "6" => self.faculty_courses()?,
                "0" => return Ok(()),
                _ => self.console.fail("Invalid choice.")?,
            }
        }
    }

    fn add_faculty(&mut self) -> CliResult<()> {
        let id = loop {
            let raw = self.console.ask("Enter Faculty ID (e.g., F0001): ")?;
            if !FacultyId::is_valid(&raw) {
                self.console
                    .fail("Invalid faculty ID. Use F followed by 4 digits.")?;
            } else if self.uni.find_faculty(&raw).is_some() {
                self.console.fail("Faculty ID already exists.")?;
            } else {
                break raw;
            }
        };
        let name = self.console.ask_until("Enter name: ", non_empty)?;
        let department = self.console.ask_code("Enter department ID: ")?;

        let member = match Faculty::new(&id, name, department) {
            Ok(member) => member,
            Err(err) => return self.console.fail(err),
        };
        let outcome = self.uni.add_faculty(member);
        self.report(outcome, format_args!("Faculty {id} added."))
    }

    fn list_faculty(&mut self) -> CliResult<()> {
        if self.uni.faculty().is_empty() {
            return self.console.line("No faculty found.");
        }
        let rows = faculty_rows(self.uni.faculty().iter());
        self.print_table(FACULTY_HEADERS, &rows)
    }

    fn find_faculty(&mut self) -> CliResult<()> {
        let id = self.console.ask("Enter Faculty ID: ")?;
        let Some(member) = self.uni.find_faculty(&id) else {
            return self.console.fail("Faculty not found.");
        };
        let lines = [
            format!("Faculty ID: {}", member.id()),
            format!("Name:       {}", member.name()),
            format!("Department: {}", member.department()),
            format!("Courses:    {}", join_ids(member.courses_taught())),
        ];
        for line in lines {
            self.console.line(line)?;
        }
        Ok(())
    }

    fn update_faculty(&mut self) -> CliResult<()> {
        let id = self.console.ask("Enter Faculty ID to update: ")?;
        if self.uni.find_faculty(&id).is_none() {
            return self.console.fail("Faculty not found.");
        }
        self.console.line("Leave a field blank to keep its current value.")?;
        let patch = FacultyPatch {
            name: keep_if_blank(self.console.ask("New name: ")?),
            department: keep_if_blank(self.console.ask_code("New department ID: ")?),
        };
        match self.uni.update_faculty(&id, patch) {
            Ok(outcome) => self.report(outcome, format_args!("Faculty {id} updated.")),
            Err(err) => self.console.fail(err),
        }
    }

    fn delete_faculty(&mut self) -> CliResult<()> {
        let id = self.console.ask("Enter Faculty ID to delete: ")?;
        let Some(member) = self.uni.find_faculty(&id) else {
            return self.console.fail("Faculty not found.");
        };
        let prompt = format!("Delete {} ({id})? (yes/no): ", member.name());
        if !self.console.confirm(&prompt)? {
            return self.console.line("Deletion cancelled.");
        }
        let outcome = self.uni.remove_faculty(&id);
        self.report(outcome, format_args!("Faculty {id} deleted."))
    }

    fn faculty_courses(&mut self) -> CliResult<()> {
        let id = self.console.ask("Enter Faculty ID: ")?;
        let Some(member) = self.uni.find_faculty(&id) else {
            return self.console.fail("Faculty not found.");
        };
        if member.courses_taught().is_empty() {
            return self.console.line("Not teaching any courses.");
        }
        let rows: Vec<Vec<String>> = member
            .courses_taught()
            .iter()
            .map(|course_id| match self.uni.find_course(course_id.as_str()) {
                Some(course) => vec![
                    course_id.to_string(),
                    course.name().to_string(),
                    course.credit_hours().to_string(),
                    course.enrolled_students().len().to_string(),
                ],
                None => vec![course_id.to_string(), "(unknown course)".to_string()],
            })
            .collect();
        self.print_table(&["Course", "Name", "Credits", "Enrolled"], &rows)
    }

    pub(super) fn search_faculty(&mut self, query: &str) -> CliResult<()> {
        let hits = self.uni.search_faculty_by_name(query);
        if hits.is_empty() {
            return self.console.line("No matching faculty.");
        }
        let rows = faculty_rows(hits.into_iter());
        self.print_table(FACULTY_HEADERS, &rows)
    }
}

const FACULTY_HEADERS: &[&str] = &["ID", "Name", "Dept", "Courses"];

fn faculty_rows<'f>(members: impl Iterator<Item = &'f Faculty>) -> Vec<Vec<String>> {
    members
        .map(|f| {
            vec![
                f.id().to_string(),
                f.name().to_string(),
                f.department().to_string(),
                join_ids(f.courses_taught()),
            ]
        })
        .collect()
}

pub(super) fn join_ids<T: AsRef<str>>(ids: &[T]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter().map(|id| id.as_ref()).collect::<Vec<&str>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::super::tests::run_script;
    use unireg_core::{sample, University};

    #[test]
    fn delete_clears_assignments() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        let out = run_script(&mut uni, "2\n5\nF0001\nyes\n0\n0\n");
        assert!(out.contains("Faculty F0001 deleted."));
        assert!(uni.find_course("CSE101").unwrap().assigned_faculty().is_none());
        assert!(uni.find_department("CSE").unwrap().head().is_none());
    }

    #[test]
    fn view_courses_lists_taught_set() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        let out = run_script(&mut uni, "2\n6\nF0002\n0\n0\n");
        assert!(out.contains("Data Structures"));
        assert!(out.contains("Database Systems"));
    }

    #[test]
    fn update_keeps_blank_fields() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        run_script(&mut uni, "2\n4\nF0003\n\nmat\n0\n0\n");
        let member = uni.find_faculty("F0003").unwrap();
        assert_eq!(member.name(), "Dr. Emily Davis");
        assert_eq!(member.department(), "MAT");
    }
}
