//! Shared person capability for teachers and students.
//!
//! The original data model used a base class; here the shared fields are a
//! plain struct embedded in each concrete record, plus a role tag. Anything
//! that only needs "an authenticatable person" goes through the [`Account`]
//! trait.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_STUDENT, ROLE_TEACHER};

/// Role tag deciding access-control outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => ROLE_TEACHER,
            Role::Student => ROLE_STUDENT,
        }
    }

    /// Parse a stored role string. Unknown values are rejected rather than
    /// defaulted; a bad role tag must never grant teacher rights.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ROLE_TEACHER => Some(Role::Teacher),
            ROLE_STUDENT => Some(Role::Student),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field set shared by every person in the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub enabled: bool,
}

impl Person {
    /// Display name used in projections (e.g. the teacher name on a course)
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Borrowed view of the fields needed to authenticate a person
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Common capability of Teacher and Student: expose identity and
/// credentials without caring which variant the caller holds.
pub trait Account {
    fn identity(&self) -> &Person;

    fn credentials(&self) -> Credentials<'_> {
        let person = self.identity();
        Credentials {
            username: &person.username,
            password_hash: &person.password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!(Role::parse("TEACHER"), Some(Role::Teacher));
        assert_eq!(Role::parse("STUDENT"), Some(Role::Student));
        assert_eq!(Role::Teacher.as_str(), "TEACHER");
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(Role::parse("ADMIN"), None);
        assert_eq!(Role::parse("teacher"), None);
    }
}
