//! Teacher repository - read-side data access for teachers.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::entities::{department, teacher};
use crate::domain::Teacher;
use crate::errors::AppResult;

/// Read operations over teachers. Mutations go through the unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Teacher>>;

    /// Lookup by login name, used by authentication.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Teacher>>;

    async fn list(&self) -> AppResult<Vec<Teacher>>;

    async fn list_by_department(&self, department_id: i64) -> AppResult<Vec<Teacher>>;
}

/// SeaORM-backed teacher repository
pub struct TeacherStore {
    db: DatabaseConnection,
}

impl TeacherStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_domain(pair: (teacher::Model, Option<department::Model>)) -> Teacher {
    let (model, dept) = pair;
    model.into_domain(dept.map(|d| d.name))
}

#[async_trait]
impl TeacherRepository for TeacherStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Teacher>> {
        let result = teacher::Entity::find_by_id(id)
            .find_also_related(department::Entity)
            .one(&self.db)
            .await?;
        Ok(result.map(into_domain))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Teacher>> {
        let result = teacher::Entity::find()
            .filter(teacher::Column::Username.eq(username))
            .find_also_related(department::Entity)
            .one(&self.db)
            .await?;
        Ok(result.map(into_domain))
    }

    async fn list(&self) -> AppResult<Vec<Teacher>> {
        let results = teacher::Entity::find()
            .find_also_related(department::Entity)
            .order_by_asc(teacher::Column::LastName)
            .all(&self.db)
            .await?;
        Ok(results.into_iter().map(into_domain).collect())
    }

    async fn list_by_department(&self, department_id: i64) -> AppResult<Vec<Teacher>> {
        let results = teacher::Entity::find()
            .filter(teacher::Column::DepartmentId.eq(department_id))
            .find_also_related(department::Entity)
            .order_by_asc(teacher::Column::LastName)
            .all(&self.db)
            .await?;
        Ok(results.into_iter().map(into_domain).collect())
    }
}
