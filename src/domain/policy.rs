//! Access-control rule table.
//!
//! Two roles, four resources. The table below is the single source of truth
//! for who may do what; handlers call [`authorize`] at the boundary, and the
//! student service additionally enforces the own-profile rule because a
//! role check cannot express per-row ownership.
//!
//! | Resource   | TEACHER     | STUDENT                       | anonymous |
//! |------------|-------------|-------------------------------|-----------|
//! | Department | full CRUD   | none                          | none      |
//! | Teacher    | full CRUD   | none                          | none      |
//! | Course     | full CRUD   | view + self enroll/unenroll   | view      |
//! | Student    | full CRUD   | view + edit own profile       | view      |

use super::Role;
use crate::errors::{AppError, AppResult};

/// Entity type an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Department,
    Teacher,
    Student,
    Course,
}

/// Operation being attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    Enroll,
    Unenroll,
    EditOwnProfile,
}

/// Pure rule-table lookup. `None` is an unauthenticated caller.
pub fn permits(role: Option<Role>, resource: Resource, action: Action) -> bool {
    // Course and student listings/detail are readable without logging in.
    if action == Action::View && matches!(resource, Resource::Course | Resource::Student) {
        return true;
    }

    match role {
        Some(Role::Teacher) => matches!(
            action,
            Action::View | Action::Create | Action::Update | Action::Delete
        ),
        Some(Role::Student) => matches!(
            (resource, action),
            (Resource::Course, Action::Enroll | Action::Unenroll)
                | (Resource::Student, Action::EditOwnProfile)
        ),
        None => false,
    }
}

/// Boundary check: denial maps to Unauthorized for anonymous callers and
/// Forbidden for authenticated ones.
pub fn authorize(role: Option<Role>, resource: Resource, action: Action) -> AppResult<()> {
    if permits(role, resource, action) {
        Ok(())
    } else if role.is_none() {
        Err(AppError::Unauthorized)
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_has_full_crud_everywhere() {
        for resource in [
            Resource::Department,
            Resource::Teacher,
            Resource::Student,
            Resource::Course,
        ] {
            for action in [Action::View, Action::Create, Action::Update, Action::Delete] {
                assert!(permits(Some(Role::Teacher), resource, action));
            }
        }
    }

    #[test]
    fn teacher_does_not_self_enroll() {
        assert!(!permits(Some(Role::Teacher), Resource::Course, Action::Enroll));
        assert!(!permits(Some(Role::Teacher), Resource::Course, Action::Unenroll));
    }

    #[test]
    fn student_is_view_only_plus_enrollment() {
        assert!(permits(Some(Role::Student), Resource::Course, Action::View));
        assert!(permits(Some(Role::Student), Resource::Course, Action::Enroll));
        assert!(permits(Some(Role::Student), Resource::Course, Action::Unenroll));
        assert!(permits(Some(Role::Student), Resource::Student, Action::View));
        assert!(permits(
            Some(Role::Student),
            Resource::Student,
            Action::EditOwnProfile
        ));

        assert!(!permits(Some(Role::Student), Resource::Course, Action::Create));
        assert!(!permits(Some(Role::Student), Resource::Student, Action::Update));
        assert!(!permits(Some(Role::Student), Resource::Department, Action::View));
        assert!(!permits(Some(Role::Student), Resource::Teacher, Action::View));
    }

    #[test]
    fn anonymous_may_only_view_courses_and_students() {
        assert!(permits(None, Resource::Course, Action::View));
        assert!(permits(None, Resource::Student, Action::View));
        assert!(!permits(None, Resource::Department, Action::View));
        assert!(!permits(None, Resource::Teacher, Action::View));
        assert!(!permits(None, Resource::Course, Action::Create));
        assert!(!permits(None, Resource::Course, Action::Enroll));
    }

    #[test]
    fn authorize_distinguishes_unauthorized_from_forbidden() {
        assert!(matches!(
            authorize(None, Resource::Department, Action::View),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            authorize(Some(Role::Student), Resource::Department, Action::View),
            Err(AppError::Forbidden)
        ));
        assert!(authorize(Some(Role::Teacher), Resource::Department, Action::Delete).is_ok());
    }
}
