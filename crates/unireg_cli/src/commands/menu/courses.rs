//! Course management submenu.

use super::faculty::join_ids;
use super::Menu;
use crate::console::{keep_if_blank, non_empty, positive_number};
use crate::error::CliResult;
use std::io::{BufRead, Write};
use unireg_core::{Course, CourseId, CoursePatch, Outcome};

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    pub(super) fn course_menu(&mut self) -> CliResult<()> {
        loop {
            let choice = self.console.menu(
                "Course Management",
                &[
                    ("1", "Add Course"),
                    ("2", "View All Courses"),
                    ("3", "Find Course by ID"),
                    ("4", "Update Course"),
                    ("5", "Delete Course"),
                    ("6", "Assign Faculty to Course"),
                    ("7", "Enroll Student in Course"),
                    ("8", "Remove Student from Course"),
                    ("0", "Back"),
                ],
            )?;
            match choice.as_str() {
                "1" => self.add_course()?,
                "2" => self.list_courses()?,
                "3" => self.find_course()?,
                "4" => self.update_course()?,
                "5" => self.delete_course()?,
                "6" => self.assign_faculty()?,
                "7" => self.enroll_student()?,
                "8" => self.unenroll_student()?,
                "0" => return Ok(()),
                _ => self.console.fail("Invalid choice.")?,
            }
        }
    }

    fn add_course(&mut self) -> CliResult<()> {
        let id = loop {
            let raw = self.console.ask_code("Enter Course ID (e.g., CSE101): ")?;
            if !CourseId::is_valid(&raw) {
                self.console
                    .fail("Invalid course ID. Use letters followed by 3 digits.")?;
            } else if self.uni.find_course(&raw).is_some() {
                self.console.fail("Course ID already exists.")?;
            } else {
                break raw;
            }
        };
        let name = self.console.ask_until("Enter course name: ", non_empty)?;
        let credits = self
            .console
            .ask_until("Enter credit hours: ", positive_number)?;
        let department = self
            .console
            .ask_code("Offering department ID (blank for none): ")?;

        let course = match Course::new(&id, name, credits) {
            Ok(course) => course,
            Err(err) => return self.console.fail(err),
        };
        let outcome = self.uni.add_course(course);
        self.report(outcome, format_args!("Course {id} added."))?;

        if !department.is_empty() {
            match self.uni.offer_course(&department, &id) {
                Outcome::Applied => self.console.ok(format_args!("{department} now offers {id}."))?,
                _ => self
                    .console
                    .fail(format_args!("Department {department} not found; course not offered."))?,
            }
        }
        Ok(())
    }

    fn list_courses(&mut self) -> CliResult<()> {
        if self.uni.courses().is_empty() {
            return self.console.line("No courses found.");
        }
        let rows = course_rows(self.uni.courses().iter());
        self.print_table(COURSE_HEADERS, &rows)
    }

    fn find_course(&mut self) -> CliResult<()> {
        let id = self.console.ask_code("Enter Course ID: ")?;
        let Some(course) = self.uni.find_course(&id) else {
            return self.console.fail("Course not found.");
        };
        let instructor = match course.assigned_faculty() {
            Some(fid) => match self.uni.find_faculty(fid.as_str()) {
                Some(member) => format!("{} ({fid})", member.name()),
                None => fid.to_string(),
            },
            None => "Not assigned".to_string(),
        };
        let lines = [
            format!("Course ID:    {}", course.id()),
            format!("Name:         {}", course.name()),
            format!("Credit hours: {}", course.credit_hours()),
            format!("Faculty:      {instructor}"),
            format!("Students:     {}", join_ids(course.enrolled_students())),
        ];
        for line in lines {
            self.console.line(line)?;
        }
        Ok(())
    }

    fn update_course(&mut self) -> CliResult<()> {
        let id = self.console.ask_code("Enter Course ID to update: ")?;
        if self.uni.find_course(&id).is_none() {
            return self.console.fail("Course not found.");
        }
        self.console.line("Leave a field blank to keep its current value.")?;
        let name = keep_if_blank(self.console.ask("New name: ")?);
        let credit_hours = match keep_if_blank(self.console.ask("New credit hours: ")?) {
            None => None,
            Some(raw) => match positive_number(&raw) {
                Ok(credits) => Some(credits),
                Err(_) => return self.console.fail("Invalid credit hours. No changes were made."),
            },
        };
        match self.uni.update_course(&id, CoursePatch { name, credit_hours }) {
            Ok(outcome) => self.report(outcome, format_args!("Course {id} updated.")),
            Err(err) => self.console.fail(err),
        }
    }

    fn delete_course(&mut self) -> CliResult<()> {
        let id = self.console.ask_code("Enter Course ID to delete: ")?;
        let Some(course) = self.uni.find_course(&id) else {
            return self.console.fail("Course not found.");
        };
        let prompt = format!("Delete {} ({id})? (yes/no): ", course.name());
        if !self.console.confirm(&prompt)? {
            return self.console.line("Deletion cancelled.");
        }
        let outcome = self.uni.remove_course(&id);
        self.report(outcome, format_args!("Course {id} deleted."))
    }

    pub(super) fn search_courses(&mut self, query: &str) -> CliResult<()> {
        let hits = self.uni.search_courses_by_name(query);
        if hits.is_empty() {
            return self.console.line("No matching courses.");
        }
        let rows = course_rows(hits.into_iter());
        self.print_table(COURSE_HEADERS, &rows)
    }
}

const COURSE_HEADERS: &[&str] = &["ID", "Name", "Credits", "Faculty", "Enrolled"];

fn course_rows<'c>(courses: impl Iterator<Item = &'c Course>) -> Vec<Vec<String>> {
    courses
        .map(|c| {
            vec![
                c.id().to_string(),
                c.name().to_string(),
                c.credit_hours().to_string(),
                c.assigned_faculty().map_or_else(|| "-".to_string(), |f| f.to_string()),
                c.enrolled_students().len().to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::tests::run_script;
    use unireg_core::{sample, Department, University};

    #[test]
    fn add_with_offering_department() {
        let mut uni = University::default();
        let _ = uni.add_department(Department::new("CSE", "Computer Science").unwrap());
        let out = run_script(&mut uni, "3\n1\ncse10\ncse601\nCompilers\n0\n3\ncse\n0\n0\n");
        assert!(out.contains("Invalid course ID"));
        assert!(out.contains("✓ Course CSE601 added."));
        assert_eq!(uni.find_course("CSE601").unwrap().credit_hours(), 3);
        assert!(uni.find_department("CSE").unwrap().offers("CSE601"));
    }

    #[test]
    fn delete_cascades_to_grade_maps() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        run_script(&mut uni, "3\n5\ncse101\nyes\n0\n0\n");
        assert!(uni.find_course("CSE101").is_none());
        assert!(!uni.find_student("S0001").unwrap().is_enrolled_in("CSE101"));
        assert!(!uni.find_department("CSE").unwrap().offers("CSE101"));
    }

    #[test]
    fn enroll_and_unenroll() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        let out = run_script(
            &mut uni,
            "3\n7\nS0001\nCSE201\n7\nS0001\nCSE201\n8\nS0001\nCSE201\n0\n0\n",
        );
        assert!(out.contains("S0001 enrolled in CSE201."));
        assert!(out.contains("Nothing to change."));
        assert!(out.contains("S0001 removed from CSE201."));
        assert!(!uni.find_course("CSE201").unwrap().has_student("S0001"));
    }

    #[test]
    fn invalid_credit_update_changes_nothing() {
        let mut uni = University::default();
        sample::populate(&mut uni).unwrap();
        run_script(&mut uni, "3\n4\nCSE101\nProgramming\n0\n0\n0\n");
        let course = uni.find_course("CSE101").unwrap();
        assert_eq!(course.name(), "Introduction to Programming");
        assert_eq!(course.credit_hours(), 3);
    }
}
