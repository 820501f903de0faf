//! Student management submenu.

use super::Menu;
use crate::console::{keep_if_blank, non_empty, positive_number};
use crate::error::CliResult;
use std::io::{BufRead, Write};
use unireg_core::{Student, StudentId, StudentPatch};

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    pub(super) fn student_menu(&mut self) -> CliResult<()> {
        loop {
            let choice = self.console.menu(
                "Student Management",
                &[
                    ("1", "Add Student"),
                    ("2", "View All Students"),
                    ("3", "Find Student by ID"),
                    ("4", "Update Student"),
                    ("5", "Delete Student"),
                    ("6", "View Student Courses & Grades"),
                    ("7", "Assign Grade"),
                    ("8", "Sort Students by GPA"),
                    ("0", "Back"),
                ],
            )?;
            match choice.as_str() {
                "1" => self.add_student()?,
                "2" => self.list_students()?,
                "3" => self.find_student()?,
                "4" => self.update_student()?,
                "5" => self.delete_student()?,
                "6" => self.student_grades()?,
                "7" => self.assign_grade()?,
                "8" => self.sort_students()?,
                "0" => return Ok(()),
                _ => self.console.fail("Invalid choice.")?,
            }
        }
    }

    fn add_student(&mut self) -> CliResult<()> {
        let id = loop {
            let raw = self.console.ask("Enter Student ID (e.g., S0001): ")?;
            if !StudentId::is_valid(&raw) {
                self.console
                    .fail("Invalid student ID. Use S followed by 4 digits.")?;
            } else if self.uni.find_student(&raw).is_some() {
                self.console.fail("Student ID already exists.")?;
            } else {
                break raw;
            }
        };
        let name = self.console.ask_until("Enter name: ", non_empty)?;
        let age = self.console.ask_until("Enter age: ", positive_number)?;
        let gender = match self.console.ask("Enter gender (M/F/Other): ")? {
            g if g.is_empty() => "Other".to_string(),
            g => g,
        };
        let department = self.console.ask_code("Enter department ID: ")?;

        let student = match Student::new(&id, name, age, gender, department) {
            Ok(student) => student,
            Err(err) => return self.console.fail(err),
        };
        let outcome = self.uni.add_student(student);
        self.report(outcome, format_args!("Student {id} added."))
    }

    fn list_students(&mut self) -> CliResult<()> {
        if self.uni.students().is_empty() {
            return self.console.line("No students found.");
        }
        let rows = student_rows(self.uni.students().iter());
        self.print_table(STUDENT_HEADERS, &rows)
    }

    fn find_student(&mut self) -> CliResult<()> {
        let id = self.console.ask("Enter Student ID: ")?;
        let Some(student) = self.uni.find_student(&id) else {
            return self.console.fail("Student not found.");
        };
        let lines = [
            format!("Student ID: {}", student.id()),
            format!("Name:       {}", student.name()),
            format!("Age:        {}", student.age()),
            format!("Gender:     {}", student.gender()),
            format!("Department: {}", student.department()),
            format!("GPA:        {:.2}", student.gpa()),
            format!("Courses:    {}", student.course_count()),
        ];
        for line in lines {
            self.console.line(line)?;
        }
        Ok(())
    }

    fn update_student(&mut self) -> CliResult<()> {
        let id = self.console.ask("Enter Student ID to update: ")?;
        if self.uni.find_student(&id).is_none() {
            return self.console.fail("Student not found.");
        }
        self.console.line("Leave a field blank to keep its current value.")?;

        let name = keep_if_blank(self.console.ask("New name: ")?);
        let age = match keep_if_blank(self.console.ask("New age: ")?) {
            None => None,
            Some(raw) => match positive_number(&raw) {
                Ok(age) => Some(age),
                Err(_) => return self.console.fail("Invalid age. No changes were made."),
            },
        };
        let gender = keep_if_blank(self.console.ask("New gender: ")?);
        let department = keep_if_blank(self.console.ask_code("New department ID: ")?);

        let patch = StudentPatch {
            name,
            age,
            gender,
            department,
        };
        match self.uni.update_student(&id, patch) {
            Ok(outcome) => self.report(outcome, format_args!("Student {id} updated.")),
            Err(err) => self.console.fail(err),
        }
    }

    fn delete_student(&mut self) -> CliResult<()> {
        let id = self.console.ask("Enter Student ID to delete: ")?;
        let Some(student) = self.uni.find_student(&id) else {
            return self.console.fail("Student not found.");
        };
        let prompt = format!("Delete {} ({id})? (yes/no): ", student.name());
        if !self.console.confirm(&prompt)? {
            return self.console.line("Deletion cancelled.");
        }
        let outcome = self.uni.remove_student(&id);
        self.report(outcome, format_args!("Student {id} deleted."))
    }

    fn student_grades(&mut self) -> CliResult<()> {
        let id = self.console.ask("Enter Student ID: ")?;
        let Some(student) = self.uni.find_student(&id) else {
            return self.console.fail("Student not found.");
        };
        if student.course_grades().is_empty() {
            return self.console.line("Not enrolled in any courses.");
        }
        let rows: Vec<Vec<String>> = student
            .course_grades()
            .iter()
            .map(|(course_id, grade)| {
                let name = self
                    .uni
                    .find_course(course_id.as_str())
                    .map_or("(unknown course)", |c| c.name());
                vec![course_id.to_string(), name.to_string(), format!("{grade:.2}")]
            })
            .collect();
        let summary = format!("GPA: {:.2}", student.gpa());
        self.print_table(&["Course", "Name", "Grade"], &rows)?;
        self.console.line(summary)
    }

    fn sort_students(&mut self) -> CliResult<()> {
        let descending = match self
            .console
            .ask("Sort order (1=High to Low, 2=Low to High): ")?
            .as_str()
        {
            "1" => true,
            "2" => false,
            _ => return self.console.fail("Invalid choice."),
        };
        if self.uni.students().is_empty() {
            return self.console.line("No students found.");
        }
        let rows = student_rows(self.uni.sort_students_by_gpa(descending).into_iter());
        self.print_table(STUDENT_HEADERS, &rows)
    }

    pub(super) fn search_students(&mut self, query: &str) -> CliResult<()> {
        let hits = self.uni.search_students_by_name(query);
        if hits.is_empty() {
            return self.console.line("No matching students.");
        }
        let rows = student_rows(hits.into_iter());
        self.print_table(STUDENT_HEADERS, &rows)
    }
}

const STUDENT_HEADERS: &[&str] = &["ID", "Name", "Age", "Gender", "Dept", "GPA", "Courses"];

fn student_rows<'s>(students: impl Iterator<Item = &'s Student>) -> Vec<Vec<String>> {
    students
        .map(|s| {
            vec![
                s.id().to_string(),
                s.name().to_string(),
                s.age().to_string(),
                s.gender().to_string(),
                s.department().to_string(),
                format!("{:.2}", s.gpa()),
                s.course_count().to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::tests::run_script;
    use super::*;
    use unireg_core::{EntityKind, Outcome, University};

    #[test]
    fn add_reprompts_until_valid() {
        let mut uni = University::default();
        let out = run_script(
            &mut uni,
            "1\n1\nS01\nS0001\n\nAlice Johnson\nold\n0\n20\n\ncse\n0\n0\n",
        );
        assert!(out.contains("Invalid student ID"));
        assert!(out.contains("cannot be empty"));
        assert!(out.contains("✓ Student S0001 added."));

        let alice = uni.find_student("S0001").unwrap();
        assert_eq!(alice.age(), 20);
        assert_eq!(alice.gender(), "Other");
        assert_eq!(alice.department(), "CSE");
    }

    #[test]
    fn duplicate_id_reprompts() {
        let mut uni = University::default();
        let _ = uni.add_student(Student::new("S0001", "Alice", 20, "F", "CSE").unwrap());
        let out = run_script(&mut uni, "1\n1\nS0001\nS0002\nBob\n21\nM\nCSE\n0\n0\n");
        assert!(out.contains("Student ID already exists."));
        assert_eq!(uni.students().len(), 2);
    }

    #[test]
    fn invalid_age_abandons_update() {
        let mut uni = University::default();
        let _ = uni.add_student(Student::new("S0001", "Alice", 20, "F", "CSE").unwrap());
        let out = run_script(&mut uni, "1\n4\nS0001\nAlicia\nabc\n0\n0\n");
        assert!(out.contains("No changes were made."));
        assert_eq!(uni.find_student("S0001").unwrap().name(), "Alice");

        run_script(&mut uni, "1\n4\nS0001\n\n22\n\nmat\n0\n0\n");
        let alice = uni.find_student("S0001").unwrap();
        assert_eq!((alice.name(), alice.age(), alice.department()), ("Alice", 22, "MAT"));
    }

    #[test]
    fn delete_needs_yes() {
        let mut uni = University::default();
        let _ = uni.add_student(Student::new("S0001", "Alice", 20, "F", "CSE").unwrap());
        run_script(&mut uni, "1\n5\nS0001\nno\n0\n0\n");
        assert!(uni.find_student("S0001").is_some());
        let out = run_script(&mut uni, "1\n5\nS0001\nyes\n0\n0\n");
        assert!(out.contains("Student S0001 deleted."));
        assert_eq!(uni.remove_student("S0001"), Outcome::NotFound(EntityKind::Student));
    }

    #[test]
    fn sorted_listing() {
        let mut uni = University::default();
        unireg_core::sample::populate(&mut uni).unwrap();
        let out = run_script(&mut uni, "1\n8\n1\n0\n0\n");
        let diana = out.find("Diana Prince").unwrap();
        let bob = out.find("Bob Smith").unwrap();
        assert!(diana < bob);
    }
}
