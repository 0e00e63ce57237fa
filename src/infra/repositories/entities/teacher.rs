//! Teacher entity - `teachers` table.
//!
//! Carries the shared person columns inline; `role` is stored as a string
//! tag so the teachers and students tables have the same account shape.

use sea_orm::entity::prelude::*;

use crate::domain::{self, Person, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(unique)]
    pub username: String,

    /// Password hash, never plain text
    pub password: String,

    #[sea_orm(unique)]
    pub email: String,

    pub first_name: String,

    pub last_name: String,

    pub phone: Option<String>,

    pub role: String,

    pub enabled: bool,

    #[sea_orm(unique)]
    pub employee_id: String,

    pub specialization: Option<String>,

    pub department_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::course::Entity")]
    Courses,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity, attaching the resolved department name.
    pub fn into_domain(self, department_name: Option<String>) -> domain::Teacher {
        domain::Teacher {
            person: Person {
                id: self.id,
                username: self.username,
                password_hash: self.password,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                phone: self.phone,
                role: Role::parse(&self.role).unwrap_or(Role::Teacher),
                enabled: self.enabled,
            },
            employee_id: self.employee_id,
            specialization: self.specialization,
            department_id: self.department_id,
            department_name,
        }
    }
}
