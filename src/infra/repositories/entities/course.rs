//! Course entity - `courses` table.

use sea_orm::entity::prelude::*;

use crate::domain::{self, CourseRef};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    #[sea_orm(unique)]
    pub code: String,

    pub description: Option<String>,

    pub credits: i32,

    pub department_id: Option<i64>,

    pub teacher_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::Id"
    )]
    Teacher,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

// Many-to-many to students through the enrollments join table.
impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        super::enrollment::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::enrollment::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity, attaching the resolved department and
    /// teacher display names.
    pub fn into_domain(
        self,
        department_name: Option<String>,
        teacher_name: Option<String>,
    ) -> domain::Course {
        domain::Course {
            id: self.id,
            name: self.name,
            code: self.code,
            description: self.description,
            credits: self.credits,
            department_id: self.department_id,
            department_name,
            teacher_id: self.teacher_id,
            teacher_name,
        }
    }
}

impl From<Model> for CourseRef {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
        }
    }
}
