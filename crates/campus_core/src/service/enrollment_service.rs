//! Batch registration pipeline over a [`Repository`].
//!
//! # Responsibility
//! - Select entities from a store with a caller predicate.
//! - Apply a [`RegistrationAction`] to each selected entity and notify an
//!   optional observer after every success.
//!
//! # Invariants
//! - The selection is one `find` snapshot taken before any action runs;
//!   concurrent saves/deletes during the batch are not observed.
//! - The callback runs at most once per selected entity, in snapshot order,
//!   and only after that entity's action completed.
//! - The first failing action stops the batch. Earlier registrations stay
//!   applied and the error is returned unchanged.

use crate::repo::repository::Repository;
use crate::service::registration::RegistrationAction;
use log::{info, warn};

/// Registration pipeline bound to one store and one action.
pub struct EnrollmentService<R, A> {
    repo: R,
    action: A,
}

impl<R, A> EnrollmentService<R, A> {
    pub fn new(repo: R, action: A) -> Self {
        Self { repo, action }
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    /// Consumes the service and returns the store and action.
    pub fn into_parts(self) -> (R, A) {
        (self.repo, self.action)
    }

    /// Registers every entity matching `predicate` into `target`.
    ///
    /// Returns how many entities were registered.
    ///
    /// # Errors
    /// - Returns the action error of the first entity that fails; remaining
    ///   entities are not processed. A panicking callback unwinds the same way.
    pub fn register_all<T, C, P>(
        &self,
        predicate: P,
        target: &C,
        mut callback: Option<&mut dyn FnMut(&T, &C)>,
    ) -> Result<usize, A::Error>
    where
        R: Repository<T>,
        A: RegistrationAction<T, C>,
        P: Fn(&T) -> bool,
    {
        let selected = self.repo.find(predicate);
        let mut registered = 0;

        for entity in &selected {
            if let Err(err) = self.action.register(entity, target) {
                warn!(
                    "event=register_all module=enrollment status=error matched={} registered={}",
                    selected.len(),
                    registered
                );
                return Err(err);
            }
            registered += 1;

            if let Some(notify) = callback.as_deref_mut() {
                notify(entity, target);
            }
        }

        info!(
            "event=register_all module=enrollment status=ok matched={} registered={}",
            selected.len(),
            registered
        );
        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use super::EnrollmentService;
    use crate::model::course::{Course, CourseKind};
    use crate::model::student::Student;
    use crate::repo::memory_repo::InMemoryRepository;
    use crate::repo::repository::Repository;
    use crate::service::registration::RegistrationAction;
    use std::cell::RefCell;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;

    /// Records every registration; fails for the configured student number.
    #[derive(Default)]
    struct RecordingAction {
        seen: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RegistrationAction<Student, Course> for RecordingAction {
        type Error = String;

        fn register(&self, entity: &Student, target: &Course) -> Result<(), Self::Error> {
            if self.fail_on == Some(entity.student_number.as_str()) {
                return Err(format!("cannot register {}", entity.student_number));
            }
            self.seen
                .borrow_mut()
                .push(format!("{}->{}", entity.student_number, target.code));
            Ok(())
        }
    }

    fn student(number: &str) -> Student {
        Student::new(
            number,
            "Student",
            format!("{}@uni.kz", number.to_lowercase()),
            number,
        )
    }

    fn course() -> Course {
        Course::new("CS-101", "Programming Basics", CourseKind::Lecture, 5)
    }

    fn cs_only(s: &Student) -> bool {
        s.student_number.starts_with("CS")
    }

    #[test]
    fn registers_only_matching_students_in_order() {
        let repo = InMemoryRepository::with_items(vec![student("CS1"), student("IT2"), student("CS3")]);
        let service = EnrollmentService::new(repo, RecordingAction::default());
        let mut notified = Vec::new();
        let mut record = |s: &Student, c: &Course| {
            notified.push(format!("{}@{}", s.student_number, c.code));
        };

        let count = service
            .register_all(cs_only, &course(), Some(&mut record))
            .expect("recording action never fails");

        assert_eq!(count, 2);
        assert_eq!(notified, vec!["CS1@CS-101", "CS3@CS-101"]);
        assert_eq!(
            *service.action().seen.borrow(),
            vec!["CS1->CS-101", "CS3->CS-101"]
        );
    }

    #[test]
    fn empty_store_registers_nothing() {
        let repo: InMemoryRepository<Student> = InMemoryRepository::new();
        let service = EnrollmentService::new(repo, RecordingAction::default());
        let mut calls = 0;
        let mut count_calls = |_: &Student, _: &Course| calls += 1;

        let count = service
            .register_all(|_| true, &course(), Some(&mut count_calls))
            .expect("empty batch succeeds");

        assert_eq!(count, 0);
        assert_eq!(calls, 0);
        assert!(service.action().seen.borrow().is_empty());
    }

    #[test]
    fn missing_callback_still_runs_the_action() {
        let repo = InMemoryRepository::with_items(vec![student("CS1"), student("CS2")]);
        let service = EnrollmentService::new(repo, RecordingAction::default());

        let count = service
            .register_all(cs_only, &course(), None)
            .expect("recording action never fails");

        assert_eq!(count, 2);
        assert_eq!(service.action().seen.borrow().len(), 2);
    }

    #[test]
    fn failing_action_stops_batch_without_rollback() {
        let repo = InMemoryRepository::with_items(vec![student("CS1"), student("CS2"), student("CS3")]);
        let action = RecordingAction {
            fail_on: Some("CS2"),
            ..RecordingAction::default()
        };
        let service = EnrollmentService::new(repo, action);
        let mut notified = Vec::new();
        let mut record = |s: &Student, _: &Course| notified.push(s.student_number.clone());

        let err = service
            .register_all(cs_only, &course(), Some(&mut record))
            .expect_err("CS2 must fail");

        assert_eq!(err, "cannot register CS2");
        assert_eq!(notified, vec!["CS1"]);
        assert_eq!(*service.action().seen.borrow(), vec!["CS1->CS-101"]);
    }

    #[test]
    fn panicking_callback_stops_the_batch() {
        let repo = InMemoryRepository::with_items(vec![student("CS1"), student("CS2"), student("CS3")]);
        let service = EnrollmentService::new(repo, RecordingAction::default());
        let mut callbacks = Vec::new();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut notify = |s: &Student, _: &Course| {
                callbacks.push(s.student_number.clone());
                if s.student_number == "CS2" {
                    panic!("observer failed for CS2");
                }
            };
            service.register_all(cs_only, &course(), Some(&mut notify))
        }));

        assert!(outcome.is_err());
        assert_eq!(callbacks, vec!["CS1", "CS2"]);
        assert_eq!(
            *service.action().seen.borrow(),
            vec!["CS1->CS-101", "CS2->CS-101"]
        );
    }

    #[test]
    fn callback_set_matches_find_at_call_time() {
        let repo = Arc::new(InMemoryRepository::with_items(vec![
            student("CS1"),
            student("SE2"),
            student("CS3"),
            student("CS4"),
        ]));
        repo.delete(&student("CS4"));
        let expected: Vec<String> = repo
            .find(cs_only)
            .into_iter()
            .map(|s| s.student_number)
            .collect();

        let service = EnrollmentService::new(Arc::clone(&repo), RecordingAction::default());
        let mut notified = Vec::new();
        let mut record = |s: &Student, _: &Course| notified.push(s.student_number.clone());
        service
            .register_all(cs_only, &course(), Some(&mut record))
            .expect("recording action never fails");

        assert_eq!(notified, expected);
    }

    #[test]
    fn works_with_non_student_entities() {
        struct Shout;

        impl RegistrationAction<u32, &'static str> for Shout {
            type Error = std::convert::Infallible;

            fn register(&self, _: &u32, _: &&'static str) -> Result<(), Self::Error> {
                Ok(())
            }
        }

        let service = EnrollmentService::new(InMemoryRepository::with_items(1..=6u32), Shout);
        let mut seen = Vec::new();
        let mut record = |value: &u32, target: &&'static str| seen.push((*value, *target));

        let count = service
            .register_all(|value| value % 3 == 0, &"fizz", Some(&mut record))
            .expect("infallible");

        assert_eq!(count, 2);
        assert_eq!(seen, vec![(3, "fizz"), (6, "fizz")]);
    }
}
