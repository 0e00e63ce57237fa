//! Department repository - read-side data access for departments.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use super::entities::department;
use crate::domain::Department;
use crate::errors::AppResult;

/// Read operations over departments. Mutations go through the unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Department>>;

    async fn list(&self) -> AppResult<Vec<Department>>;
}

/// SeaORM-backed department repository
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Department>> {
        let model = department::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Department::from))
    }

    async fn list(&self) -> AppResult<Vec<Department>> {
        let models = department::Entity::find()
            .order_by_asc(department::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Department::from).collect())
    }
}
