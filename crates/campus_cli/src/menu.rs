//! Interactive console menus over the campus database.
//!
//! # Responsibility
//! - Drive CRUD use-cases for students, instructors, courses and enrollments.
//! - Run batch registration through the in-memory store pipeline.
//!
//! # Invariants
//! - Repository errors are printed and the menu keeps running.
//! - End of input leaves every menu level cleanly.

use campus_core::{
    ConsoleRegistration, Course, CourseFactory, CourseService,
    EnrollmentRecorder, EnrollmentRepository, EnrollmentService, EnrollmentView,
    InMemoryRepository, Instructor, InstructorService, RepoError, RepoResult,
    SqliteCourseRepository, SqliteEnrollmentRepository, SqliteInstructorRepository,
    SqliteStudentRepository, Student, StudentService,
};
use log::debug;
use rusqlite::Connection;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

const MAIN_MENU: &str = "
=== Campus Menu ===
1. Students
2. Instructors
3. Courses
4. Enrollments
0. Exit";

const STUDENT_MENU: &str = "
--- Students Menu ---
1. Insert student
2. Find student by ID
3. Update student email
4. Delete student
5. View all students
6. Register students for course
7. Quick register (student + course type)
0. Back";

const INSTRUCTOR_MENU: &str = "
--- Instructors Menu ---
1. Insert instructor
2. Find instructor by ID
3. Update instructor email
4. Delete instructor
5. View all instructors
0. Back";

const COURSE_MENU: &str = "
--- Courses Menu ---
1. Create course from type
2. Find course by ID
3. Update course title
4. Delete course
5. View all courses
6. Assign instructor
0. Back";

const ENROLLMENT_MENU: &str = "
--- Enrollments Menu ---
1. Enroll student
2. Unenroll student
3. View all enrollments
4. View enrollments for course
5. View enrollments for student
0. Back";

const INVALID_OPTION: &str = "Invalid option. Try again.";

/// One parsed line of user input.
enum Input<T> {
    Value(T),
    Invalid,
    Eof,
}

/// Console session bound to one connection and one input/output pair.
pub struct Console<'conn, R, W> {
    conn: &'conn Connection,
    input: R,
    out: W,
    eof: bool,
}

impl<'conn, R: BufRead, W: Write> Console<'conn, R, W> {
    pub fn new(conn: &'conn Connection, input: R, out: W) -> Self {
        Self {
            conn,
            input,
            out,
            eof: false,
        }
    }

    /// Runs the main menu until `0` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        while !self.eof {
            writeln!(self.out, "{MAIN_MENU}")?;
            match self.read_choice("Choose option: ")? {
                Input::Value(1) => self.student_menu()?,
                Input::Value(2) => self.instructor_menu()?,
                Input::Value(3) => self.course_menu()?,
                Input::Value(4) => self.enrollment_menu()?,
                Input::Value(0) | Input::Eof => break,
                _ => writeln!(self.out, "{INVALID_OPTION}")?,
            }
        }
        writeln!(self.out, "Goodbye.")?;
        self.out.flush()
    }

    /// Consumes the console and returns its output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn student_menu(&mut self) -> io::Result<()> {
        let conn = self.conn;
        let service = match SqliteStudentRepository::try_new(conn) {
            Ok(repo) => StudentService::new(repo),
            Err(err) => return self.report(err),
        };

        while !self.eof {
            writeln!(self.out, "{STUDENT_MENU}")?;
            match self.read_choice("Choose: ")? {
                Input::Value(1) => {
                    let Some(student) = self.read_student()? else {
                        return Ok(());
                    };
                    match service.add_student(&student) {
                        Ok(Some(id)) => writeln!(
                            self.out,
                            "Student inserted: {} (id {id})",
                            student.full_name()
                        )?,
                        Ok(None) => writeln!(
                            self.out,
                            "Student with email {} already exists",
                            student.email
                        )?,
                        Err(err) => self.report(err)?,
                    }
                }
                Input::Value(2) => {
                    let Some(id) = self.read_id("Student ID: ")? else {
                        continue;
                    };
                    match service.get_student(id) {
                        Ok(Some(student)) => {
                            writeln!(self.out, "Found: {}", student_row(&student))?
                        }
                        Ok(None) => writeln!(self.out, "Not found")?,
                        Err(err) => self.report(err)?,
                    }
                }
                Input::Value(3) => {
                    let Some(id) = self.read_id("Student ID: ")? else {
                        continue;
                    };
                    let Some(email) = self.prompt("New email: ")? else {
                        return Ok(());
                    };
                    let result = service.change_email(id, &email);
                    self.outcome(result, "Updated")?;
                }
                Input::Value(4) => {
                    let Some(id) = self.read_id("Student ID to delete: ")? else {
                        continue;
                    };
                    let result = service.remove_student(id);
                    self.outcome(result, "Deleted")?;
                }
                Input::Value(5) => match service.list_students() {
                    Ok(students) => {
                        writeln!(self.out, "Current students:")?;
                        for student in &students {
                            writeln!(self.out, "{}", student_row(student))?;
                        }
                    }
                    Err(err) => self.report(err)?,
                },
                Input::Value(6) => self.register_by_prefix(&service)?,
                Input::Value(7) => self.quick_register()?,
                Input::Value(0) | Input::Eof => return Ok(()),
                _ => writeln!(self.out, "{INVALID_OPTION}")?,
            }
        }
        Ok(())
    }

    /// Registers every stored student whose number starts with a prefix.
    fn register_by_prefix(
        &mut self,
        service: &StudentService<SqliteStudentRepository<'conn>>,
    ) -> io::Result<()> {
        let Some(prefix) = self.prompt("Student number prefix (e.g. CS): ")? else {
            return Ok(());
        };
        let Some(code) = self.prompt("Course code: ")? else {
            return Ok(());
        };

        let course = match find_course(self.conn, &code) {
            Ok(Some(course)) => course,
            Ok(None) => return writeln!(self.out, "Course {code} not found"),
            Err(err) => return self.report(err),
        };
        let store = match service.load_into_memory() {
            Ok(store) => store,
            Err(err) => return self.report(err),
        };

        let prefix = prefix.to_ascii_uppercase();
        let pipeline = EnrollmentService::new(store, EnrollmentRecorder::new(self.conn));
        let mut confirmed = Vec::new();
        let mut confirm = |student: &Student, course: &Course| {
            confirmed.push((student.id, format!("{student} -> {}", course.code)));
        };
        let result = pipeline.register_all(
            |student: &Student| {
                student
                    .student_number
                    .to_ascii_uppercase()
                    .starts_with(prefix.as_str())
            },
            &course,
            Some(&mut confirm),
        );

        let existing: Vec<i64> = pipeline
            .action()
            .already_enrolled()
            .iter()
            .map(|enrollment| enrollment.student_id)
            .collect();

        let mut fresh = 0;
        for (student_id, line) in &confirmed {
            if student_id.is_some_and(|id| existing.contains(&id)) {
                writeln!(self.out, "Already enrolled: {line}")?;
            } else {
                fresh += 1;
                writeln!(self.out, "Registered: {line}")?;
            }
        }
        match result {
            Ok(_) if existing.is_empty() => {
                writeln!(self.out, "{fresh} student(s) registered for {}", course.code)
            }
            Ok(_) => writeln!(
                self.out,
                "{fresh} student(s) registered for {} ({} already enrolled)",
                course.code,
                existing.len()
            ),
            Err(err) => self.report(err),
        }
    }

    /// Builds one student and a course from its type tag, then prints a
    /// registration confirmation when the student number starts with `CS`
    /// (case-sensitive).
    ///
    /// Nothing is persisted; use option 6 to record enrollments.
    fn quick_register(&mut self) -> io::Result<()> {
        let Some(student) = self.read_student()? else {
            return Ok(());
        };
        let Some(tag) = self.prompt("Enter course type (LECTURE / LAB): ")? else {
            return Ok(());
        };
        let course = match CourseFactory::create(&tag) {
            Ok(course) => course,
            Err(err) => return self.report(err),
        };

        let summary = student.to_string();
        let store = InMemoryRepository::with_items([student]);
        let pipeline = EnrollmentService::new(store, ConsoleRegistration::new(&mut self.out));
        let result = pipeline.register_all(
            |s: &Student| s.student_number.starts_with("CS"),
            &course,
            None,
        );
        drop(pipeline);

        match result {
            Ok(0) => writeln!(
                self.out,
                "Only CS students are registered automatically; {summary} skipped"
            ),
            Ok(_) => Ok(()),
            Err(err) => self.report(err),
        }
    }

    fn instructor_menu(&mut self) -> io::Result<()> {
        let conn = self.conn;
        let service = match SqliteInstructorRepository::try_new(conn) {
            Ok(repo) => InstructorService::new(repo),
            Err(err) => return self.report(err),
        };

        while !self.eof {
            writeln!(self.out, "{INSTRUCTOR_MENU}")?;
            match self.read_choice("Choose: ")? {
                Input::Value(1) => {
                    let Some(first_name) = self.prompt("First name: ")? else {
                        return Ok(());
                    };
                    let Some(last_name) = self.prompt("Last name: ")? else {
                        return Ok(());
                    };
                    let Some(email) = self.prompt("Email: ")? else {
                        return Ok(());
                    };
                    let instructor = Instructor::new(first_name, last_name, email);
                    match service.add_instructor(&instructor) {
                        Ok(Some(id)) => writeln!(
                            self.out,
                            "Instructor inserted: {} {} (id {id})",
                            instructor.first_name, instructor.last_name
                        )?,
                        Ok(None) => writeln!(
                            self.out,
                            "Instructor with email {} already exists",
                            instructor.email
                        )?,
                        Err(err) => self.report(err)?,
                    }
                }
                Input::Value(2) => {
                    let Some(id) = self.read_id("Instructor ID: ")? else {
                        continue;
                    };
                    match service.get_instructor(id) {
                        Ok(Some(instructor)) => {
                            writeln!(self.out, "Found: {}", instructor_row(&instructor))?
                        }
                        Ok(None) => writeln!(self.out, "Not found")?,
                        Err(err) => self.report(err)?,
                    }
                }
                Input::Value(3) => {
                    let Some(id) = self.read_id("Instructor ID: ")? else {
                        continue;
                    };
                    let Some(email) = self.prompt("New email: ")? else {
                        return Ok(());
                    };
                    let result = service.change_email(id, &email);
                    self.outcome(result, "Updated")?;
                }
                Input::Value(4) => {
                    let Some(id) = self.read_id("Instructor ID to delete: ")? else {
                        continue;
                    };
                    let result = service.remove_instructor(id);
                    self.outcome(result, "Deleted")?;
                }
                Input::Value(5) => match service.list_instructors() {
                    Ok(instructors) => {
                        writeln!(self.out, "Current instructors:")?;
                        for instructor in &instructors {
                            writeln!(self.out, "{}", instructor_row(instructor))?;
                        }
                    }
                    Err(err) => self.report(err)?,
                },
                Input::Value(0) | Input::Eof => return Ok(()),
                _ => writeln!(self.out, "{INVALID_OPTION}")?,
            }
        }
        Ok(())
    }

    fn course_menu(&mut self) -> io::Result<()> {
        let conn = self.conn;
        let service = match SqliteCourseRepository::try_new(conn) {
            Ok(repo) => CourseService::new(repo),
            Err(err) => return self.report(err),
        };

        while !self.eof {
            writeln!(self.out, "{COURSE_MENU}")?;
            match self.read_choice("Choose: ")? {
                Input::Value(1) => {
                    let Some(tag) = self.prompt("Course type (LECTURE / LAB): ")? else {
                        return Ok(());
                    };
                    let Some(code) = self.prompt("Code (blank for default): ")? else {
                        return Ok(());
                    };
                    let Some(title) = self.prompt("Title (blank for default): ")? else {
                        return Ok(());
                    };
                    match service.create_from_tag(&tag, &code, &title) {
                        Ok(course) => writeln!(self.out, "Course ready: {}", course_row(&course))?,
                        Err(err) => self.report(err)?,
                    }
                }
                Input::Value(2) => {
                    let Some(id) = self.read_id("Course ID: ")? else {
                        continue;
                    };
                    match service.get_course(id) {
                        Ok(Some(course)) => writeln!(self.out, "Found: {}", course_row(&course))?,
                        Ok(None) => writeln!(self.out, "Not found")?,
                        Err(err) => self.report(err)?,
                    }
                }
                Input::Value(3) => {
                    let Some(id) = self.read_id("Course ID: ")? else {
                        continue;
                    };
                    let Some(title) = self.prompt("New title: ")? else {
                        return Ok(());
                    };
                    let result = service.rename_course(id, &title);
                    self.outcome(result, "Updated")?;
                }
                Input::Value(4) => {
                    let Some(id) = self.read_id("Course ID to delete: ")? else {
                        continue;
                    };
                    let result = service.remove_course(id);
                    self.outcome(result, "Deleted")?;
                }
                Input::Value(5) => match service.list_courses() {
                    Ok(courses) => {
                        writeln!(self.out, "Current courses:")?;
                        for course in &courses {
                            writeln!(self.out, "{}", course_row(course))?;
                        }
                    }
                    Err(err) => self.report(err)?,
                },
                Input::Value(6) => {
                    let Some(id) = self.read_id("Course ID: ")? else {
                        continue;
                    };
                    let Some(raw) = self.prompt("Instructor ID (blank to clear): ")? else {
                        return Ok(());
                    };
                    let instructor_id = if raw.is_empty() {
                        None
                    } else {
                        match raw.parse::<i64>() {
                            Ok(value) => Some(value),
                            Err(_) => {
                                writeln!(self.out, "Invalid ID.")?;
                                continue;
                            }
                        }
                    };
                    let result = service.assign_instructor(id, instructor_id);
                    self.outcome(result, "Updated")?;
                }
                Input::Value(0) | Input::Eof => return Ok(()),
                _ => writeln!(self.out, "{INVALID_OPTION}")?,
            }
        }
        Ok(())
    }

    fn enrollment_menu(&mut self) -> io::Result<()> {
        let repo = match SqliteEnrollmentRepository::try_new(self.conn) {
            Ok(repo) => repo,
            Err(err) => return self.report(err),
        };

        while !self.eof {
            writeln!(self.out, "{ENROLLMENT_MENU}")?;
            match self.read_choice("Choose: ")? {
                Input::Value(1) => {
                    let Some((student_id, course_id)) = self.read_pair()? else {
                        continue;
                    };
                    match repo.enroll(student_id, course_id) {
                        Ok(true) => writeln!(self.out, "Enrolled")?,
                        Ok(false) => writeln!(self.out, "Already enrolled")?,
                        Err(err) => self.report(err)?,
                    }
                }
                Input::Value(2) => {
                    let Some((student_id, course_id)) = self.read_pair()? else {
                        continue;
                    };
                    let result = repo.unenroll(student_id, course_id);
                    self.outcome(result, "Unenrolled")?;
                }
                Input::Value(3) => {
                    let result = repo.list_enrollments();
                    self.print_enrollments(result)?;
                }
                Input::Value(4) => {
                    let Some(id) = self.read_id("Course ID: ")? else {
                        continue;
                    };
                    let result = repo.list_for_course(id);
                    self.print_enrollments(result)?;
                }
                Input::Value(5) => {
                    let Some(id) = self.read_id("Student ID: ")? else {
                        continue;
                    };
                    let result = repo.list_for_student(id);
                    self.print_enrollments(result)?;
                }
                Input::Value(0) | Input::Eof => return Ok(()),
                _ => writeln!(self.out, "{INVALID_OPTION}")?,
            }
        }
        Ok(())
    }

    fn print_enrollments(&mut self, result: RepoResult<Vec<EnrollmentView>>) -> io::Result<()> {
        match result {
            Ok(views) if views.is_empty() => writeln!(self.out, "No enrollments"),
            Ok(views) => {
                for view in &views {
                    writeln!(
                        self.out,
                        "{} | {} | {} | {}",
                        view.enrollment_id, view.student_name, view.student_number, view.course_code
                    )?;
                }
                Ok(())
            }
            Err(err) => self.report(err),
        }
    }

    fn read_student(&mut self) -> io::Result<Option<Student>> {
        let Some(first_name) = self.prompt("First name: ")? else {
            return Ok(None);
        };
        let Some(last_name) = self.prompt("Last name: ")? else {
            return Ok(None);
        };
        let Some(email) = self.prompt("Email: ")? else {
            return Ok(None);
        };
        let Some(student_number) = self.prompt("Student number: ")? else {
            return Ok(None);
        };
        Ok(Some(
            Student::builder()
                .first_name(first_name)
                .last_name(last_name)
                .email(email)
                .student_number(student_number)
                .build(),
        ))
    }

    fn read_pair(&mut self) -> io::Result<Option<(i64, i64)>> {
        let Some(student_id) = self.read_id("Student ID: ")? else {
            return Ok(None);
        };
        let Some(course_id) = self.read_id("Course ID: ")? else {
            return Ok(None);
        };
        Ok(Some((student_id, course_id)))
    }

    /// Reads a numeric id; prints a message and returns `None` when invalid.
    fn read_id(&mut self, label: &str) -> io::Result<Option<i64>> {
        match self.read_number(label)? {
            Input::Value(id) => Ok(Some(id)),
            Input::Invalid => {
                writeln!(self.out, "Invalid ID.")?;
                Ok(None)
            }
            Input::Eof => Ok(None),
        }
    }

    fn read_choice(&mut self, label: &str) -> io::Result<Input<i64>> {
        self.read_number(label)
    }

    fn read_number(&mut self, label: &str) -> io::Result<Input<i64>> {
        Ok(match self.prompt(label)? {
            None => Input::Eof,
            Some(line) => match line.parse::<i64>() {
                Ok(value) => Input::Value(value),
                Err(_) => Input::Invalid,
            },
        })
    }

    /// Prints `label` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eof = true;
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn outcome(&mut self, result: RepoResult<()>, done: &str) -> io::Result<()> {
        match result {
            Ok(()) => writeln!(self.out, "{done}"),
            Err(RepoError::NotFound { .. }) => writeln!(self.out, "Not found"),
            Err(err) => self.report(err),
        }
    }

    fn report(&mut self, err: impl Display) -> io::Result<()> {
        debug!("event=menu_action module=cli status=error error={err}");
        writeln!(self.out, "Error: {err}")
    }
}

fn find_course(conn: &Connection, code: &str) -> RepoResult<Option<Course>> {
    CourseService::new(SqliteCourseRepository::try_new(conn)?).find_by_code(code)
}

fn student_row(student: &Student) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        student.id.unwrap_or_default(),
        student.first_name,
        student.last_name,
        student.email,
        student.student_number
    )
}

fn instructor_row(instructor: &Instructor) -> String {
    format!(
        "{} | {} | {} | {}",
        instructor.id.unwrap_or_default(),
        instructor.first_name,
        instructor.last_name,
        instructor.email
    )
}

fn course_row(course: &Course) -> String {
    let instructor = course
        .instructor_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} | {} | {} | {} | {} credits | instructor {}",
        course.id.unwrap_or_default(),
        course.code,
        course.title,
        course.kind.as_str(),
        course.credits,
        instructor
    )
}

#[cfg(test)]
mod tests {
    use super::Console;
    use campus_core::db::{open_db, open_db_in_memory};
    use campus_core::{seed_demo_data, EnrollmentRepository, SqliteEnrollmentRepository};
    use rusqlite::Connection;
    use std::io::Cursor;

    fn seeded() -> Connection {
        let conn = open_db_in_memory().expect("open in-memory db");
        seed_demo_data(&conn).expect("seed demo data");
        conn
    }

    fn run_script(conn: &Connection, script: &str) -> String {
        let mut console = Console::new(conn, Cursor::new(script.to_string()), Vec::new());
        console.run().expect("menu loop");
        String::from_utf8(console.into_output()).expect("utf8 output")
    }

    #[test]
    fn invalid_option_is_reported_and_loop_continues() {
        let conn = seeded();
        let output = run_script(&conn, "abc\n9\n0\n");

        assert_eq!(output.matches("Invalid option. Try again.").count(), 2);
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[test]
    fn end_of_input_exits_from_nested_menu() {
        let conn = seeded();
        let output = run_script(&conn, "1\n");

        assert!(output.contains("--- Students Menu ---"));
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[test]
    fn inserted_student_shows_up_in_listing() {
        let conn = seeded();
        let output = run_script(
            &conn,
            "1\n1\nAlma\nKaz\nalma@uni.kz\nCS-3001\n5\n0\n0\n",
        );

        assert!(output.contains("Student inserted: Alma Kaz (id 4)"));
        assert!(output.contains("4 | Alma | Kaz | alma@uni.kz | CS-3001"));
        assert!(output.contains("3 | Timur | Bekov | timur.bekov@uni.kz | CS-2415"));
    }

    #[test]
    fn duplicate_email_is_ignored() {
        let conn = seeded();
        let output = run_script(
            &conn,
            "1\n1\nAyan\nSadykov\nayan.sadykov@uni.kz\nIT-0000\n0\n0\n",
        );

        assert!(output.contains("Student with email ayan.sadykov@uni.kz already exists"));
    }

    #[test]
    fn invalid_email_is_reported_without_crashing() {
        let conn = seeded();
        let output = run_script(&conn, "1\n1\nBad\nMail\nnot-an-email\nCS-1\n0\n0\n");

        assert!(output.contains("Error: "));
        assert!(output.ends_with("Goodbye.\n"));
    }

    #[test]
    fn missing_rows_print_not_found() {
        let conn = seeded();
        let output = run_script(&conn, "1\n2\n99\n4\n99\n0\n0\n");

        assert_eq!(output.matches("Not found").count(), 2);
    }

    #[test]
    fn prefix_registration_enrolls_matching_students_only() {
        let conn = seeded();
        let output = run_script(&conn, "1\n6\ncs\nCS-101\n0\n0\n");

        assert!(output.contains("Registered: Timur Bekov (CS-2415) -> CS-101"));
        assert!(output.contains("1 student(s) registered for CS-101"));
        assert!(!output.contains("Ayan Sadykov (IT-2513) -> CS-101"));

        let enrollments = SqliteEnrollmentRepository::try_new(&conn)
            .expect("enrollment repo")
            .list_enrollments()
            .expect("list enrollments");
        assert_eq!(enrollments.len(), 1);
        assert_eq!(enrollments[0].student_number, "CS-2415");
        assert_eq!(enrollments[0].course_code, "CS-101");
    }

    #[test]
    fn repeated_prefix_registration_reports_existing_enrollments() {
        let conn = seeded();
        run_script(&conn, "1\n6\nCS\nCS-101\n0\n0\n");
        let output = run_script(&conn, "1\n6\nCS\nCS-101\n0\n0\n");

        assert!(output.contains("Already enrolled: Timur Bekov (CS-2415) -> CS-101"));
        assert!(output.contains("0 student(s) registered for CS-101 (1 already enrolled)"));
        assert!(!output.contains("Registered: "));

        let enrollments = SqliteEnrollmentRepository::try_new(&conn)
            .expect("enrollment repo")
            .list_enrollments()
            .expect("list enrollments");
        assert_eq!(enrollments.len(), 1);
    }

    #[test]
    fn quick_register_prefix_check_is_case_sensitive() {
        let conn = seeded();
        let output = run_script(&conn, "1\n7\nAnn\nLee\nann@uni.kz\ncs-9\nLAB\n0\n0\n");

        assert!(output.contains("Only CS students are registered automatically; Ann Lee (cs-9) skipped"));
        assert!(!output.contains("Registered Ann Lee"));
    }

    #[test]
    fn prefix_registration_with_unknown_course_changes_nothing() {
        let conn = seeded();
        let output = run_script(&conn, "1\n6\nCS\nNOPE-1\n0\n0\n");

        assert!(output.contains("Course NOPE-1 not found"));
        let enrollments = SqliteEnrollmentRepository::try_new(&conn)
            .expect("enrollment repo")
            .list_enrollments()
            .expect("list enrollments");
        assert!(enrollments.is_empty());
    }

    #[test]
    fn quick_register_prints_confirmation_for_cs_student() {
        let conn = seeded();
        let output = run_script(&conn, "1\n7\nAnn\nLee\nann@uni.kz\nCS-9\nlecture\n0\n0\n");

        assert!(output.contains("Registered Ann Lee (CS-9) for LEC-101 General Lecture (lecture)"));
    }

    #[test]
    fn quick_register_skips_other_programs_and_rejects_unknown_tags() {
        let conn = seeded();
        let output = run_script(
            &conn,
            "1\n7\nBo\nKim\nbo@uni.kz\nIT-1\nLAB\n7\nCy\nPark\ncy@uni.kz\nCS-2\nseminar\n0\n0\n",
        );

        assert!(output.contains("Only CS students are registered automatically; Bo Kim (IT-1) skipped"));
        assert!(output.contains("Error: "));
        assert!(!output.contains("Registered Cy"));
    }

    #[test]
    fn course_created_from_tag_and_enrollment_listed() {
        let conn = seeded();
        let output = run_script(
            &conn,
            "3\n1\nLAB\n\n\n5\n0\n4\n1\n1\n3\n3\n4\n3\n0\n0\n",
        );

        assert!(output.contains("Course ready: 3 | LAB-101 | Laboratory Practice | lab | 1 credits"));
        assert!(output.contains("Enrolled"));
        assert!(output.contains("Ayan Sadykov | IT-2513 | LAB-101"));
    }

    #[test]
    fn non_numeric_id_prints_invalid_id() {
        let conn = seeded();
        let output = run_script(&conn, "4\n4\nabc\n0\n0\n");

        assert!(output.contains("Invalid ID."));
    }

    #[test]
    fn file_database_keeps_rows_between_sessions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("campus.sqlite3");

        {
            let conn = open_db(&path).expect("open file db");
            run_script(&conn, "2\n1\nNurlan\nAbdi\nn.abdi@uni.kz\n0\n0\n");
        }

        let conn = open_db(&path).expect("reopen file db");
        let output = run_script(&conn, "2\n5\n0\n0\n");
        assert!(output.contains("1 | Nurlan | Abdi | n.abdi@uni.kz"));
    }
}
