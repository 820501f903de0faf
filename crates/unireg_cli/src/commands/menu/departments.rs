//! Department management submenu.

use super::faculty::join_ids;
use super::Menu;
use crate::console::{keep_if_blank, non_empty};
use crate::error::CliResult;
use std::io::{BufRead, Write};
use unireg_core::{Department, DepartmentId, DepartmentPatch};

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    pub(super) fn department_menu(&mut self) -> CliResult<()> {
        loop {
            let choice = self.console.menu(
                "Department Management",
                &[
                    ("1", "Add Department"),
                    ("2", "View All Departments"),
                    ("3", "Find Department by ID"),
                    ("4", "Update Department"),
                    ("5", "Delete Department"),
                    ("6", "Set Head of Department"),
                    ("7", "Add Course to Department"),
                    ("8", "Remove Course from Department"),
                    ("0", "Back"),
                ],
            )?;
            match choice.as_str() {
                "1" => self.add_department()?,
                "2" => self.list_departments()?,
                "3" => self.find_department()?,
                "4" => self.update_department()?,
                "5" => self.delete_department()?,
                "6" => self.set_head()?,
                "7" => self.offer_course()?,
                "8" => self.withdraw_course()?,
                "0" => return Ok(()),
                _ => self.console.fail("Invalid choice.")?,
            }
        }
    }

    fn add_department(&mut self) -> CliResult<()> {
        let id = loop {
            let raw = self.console.ask_code("Enter Department ID (e.g., CSE): ")?;
            if !DepartmentId::is_valid(&raw) {
                self.console.fail("Invalid department ID. Use 2-4 letters.")?;
            } else if self.uni.find_department(&raw).is_some() {
                self.console.fail("Department ID already exists.")?;
            } else {
                break raw;
            }
        };
        let name = self.console.ask_until("Enter department name: ", non_empty)?;

        let department = match Department::new(&id, name) {
            Ok(department) => department,
            Err(err) => return self.console.fail(err),
        };
        let outcome = self.uni.add_department(department);
        self.report(outcome, format_args!("Department {id} added."))
    }

    fn list_departments(&mut self) -> CliResult<()> {
        if self.uni.departments().is_empty() {
            return self.console.line("No departments found.");
        }
        let rows = self.department_rows(self.uni.departments().iter());
        self.print_table(DEPARTMENT_HEADERS, &rows)
    }

    fn find_department(&mut self) -> CliResult<()> {
        let id = self.console.ask_code("Enter Department ID: ")?;
        let Some(department) = self.uni.find_department(&id) else {
            return self.console.fail("Department not found.");
        };
        let lines = [
            format!("Department ID: {}", department.id()),
            format!("Name:          {}", department.name()),
            format!("Head:          {}", self.head_label(department)),
            format!("Courses:       {}", join_ids(department.courses_offered())),
        ];
        for line in lines {
            self.console.line(line)?;
        }
        Ok(())
    }

    fn update_department(&mut self) -> CliResult<()> {
        let id = self.console.ask_code("Enter Department ID to update: ")?;
        if self.uni.find_department(&id).is_none() {
            return self.console.fail("Department not found.");
        }
        let patch = DepartmentPatch {
            name: keep_if_blank(self.console.ask("New name (blank to keep): ")?),
        };
        match self.uni.update_department(&id, patch) {
            Ok(outcome) => self.report(outcome, format_args!("Department {id} updated.")),
            Err(err) => self.console.fail(err),
        }
    }

    fn delete_department(&mut self) -> CliResult<()> {
        let id = self.console.ask_code("Enter Department ID to delete: ")?;
        let Some(department) = self.uni.find_department(&id) else {
            return self.console.fail("Department not found.");
        };
        let prompt = format!("Delete {} ({id})? (yes/no): ", department.name());
        if !self.console.confirm(&prompt)? {
            return self.console.line("Deletion cancelled.");
        }
        let outcome = self.uni.remove_department(&id);
        self.report(outcome, format_args!("Department {id} deleted."))
    }

    fn offer_course(&mut self) -> CliResult<()> {
        let department_id = self.console.ask_code("Enter Department ID: ")?;
        let course_id = self.console.ask_code("Enter Course ID: ")?;
        let outcome = self.uni.offer_course(&department_id, &course_id);
        self.report(outcome, format_args!("{department_id} now offers {course_id}."))
    }

    fn withdraw_course(&mut self) -> CliResult<()> {
        let department_id = self.console.ask_code("Enter Department ID: ")?;
        let course_id = self.console.ask_code("Enter Course ID: ")?;
        let outcome = self.uni.withdraw_course(&department_id, &course_id);
        self.report(outcome, format_args!("{department_id} no longer offers {course_id}."))
    }

    pub(super) fn search_departments(&mut self, query: &str) -> CliResult<()> {
        let hits = self.uni.search_departments_by_name(query);
        if hits.is_empty() {
            return self.console.line("No matching departments.");
        }
        let rows = self.department_rows(hits.into_iter());
        self.print_table(DEPARTMENT_HEADERS, &rows)
    }

    fn department_rows<'d>(
        &self,
        departments: impl Iterator<Item = &'d Department>,
    ) -> Vec<Vec<String>> {
        departments
            .map(|d| {
                vec![
                    d.id().to_string(),
                    d.name().to_string(),
                    self.head_label(d),
                    d.courses_offered().len().to_string(),
                ]
            })
            .collect()
    }

    fn head_label(&self, department: &Department) -> String {
        match department.head() {
            Some(fid) => match self.uni.find_faculty(fid.as_str()) {
                Some(member) => format!("{} ({fid})", member.name()),
                None => fid.to_string(),
            },
            None => "Not assigned".to_string(),
        }
    }
}

const DEPARTMENT_HEADERS: &[&str] = &["ID", "Name", "Head", "Courses"];

#[cfg(test)]
mod tests {
    use super::super::tests::run_script;
    use unireg_core::{sample, University};

    #[test]
    fn add_uppercases_the_code() {
        let mut uni = University::default();
        let out = run_script(&mut uni, "4\n1\nbiology\nbio\nBiology\n0\n0\n");
        assert!(out.contains("Invalid department ID"));
        assert_eq!(uni.find_department("BIO").unwrap().name(), "Biology");
    }

    #[test]
    fn listing_shows_head_names() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        let out = run_script(&mut uni, "4\n2\n0\n0\n");
        assert!(out.contains("Dr. Sarah Johnson (F0001)"));
    }

    #[test]
    fn delete_leaves_student_codes() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        run_script(&mut uni, "4\n5\nphy\nyes\n0\n0\n");
        assert!(uni.find_department("PHY").is_none());
        assert_eq!(uni.find_student("S0006").unwrap().department(), "PHY");
    }

    #[test]
    fn withdraw_then_offer() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        run_script(&mut uni, "4\n8\nmat\nmat101\n0\n0\n");
        assert!(!uni.find_department("MAT").unwrap().offers("MAT101"));
        run_script(&mut uni, "4\n7\nMAT\nMAT101\n0\n0\n");
        assert!(uni.find_department("MAT").unwrap().offers("MAT101"));
    }
}
