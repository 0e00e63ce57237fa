//! Student entity - `students` table.

use sea_orm::entity::prelude::*;

use crate::domain::{self, CourseRef, Person, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
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
    pub student_id: String,

    pub year: i32,

    pub address: Option<String>,

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
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

// Many-to-many to courses through the enrollments join table.
impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::enrollment::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::enrollment::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity, attaching the resolved department name
    /// and enrolled-course set.
    pub fn into_domain(
        self,
        department_name: Option<String>,
        courses: Vec<CourseRef>,
    ) -> domain::Student {
        domain::Student {
            person: Person {
                id: self.id,
                username: self.username,
                password_hash: self.password,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                phone: self.phone,
                role: Role::parse(&self.role).unwrap_or(Role::Student),
                enabled: self.enabled,
            },
            student_id: self.student_id,
            year: self.year,
            address: self.address,
            department_id: self.department_id,
            department_name,
            courses,
        }
    }
}
