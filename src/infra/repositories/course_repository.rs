//! Course repository - read-side data access for courses.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::entities::{course, department, teacher};
use crate::domain::Course;
use crate::errors::AppResult;

/// Read operations over courses. Mutations go through the unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>>;

    async fn list(&self) -> AppResult<Vec<Course>>;

    async fn list_by_department(&self, department_id: i64) -> AppResult<Vec<Course>>;

    async fn list_by_teacher(&self, teacher_id: i64) -> AppResult<Vec<Course>>;
}

/// SeaORM-backed course repository
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve teacher display names for a batch of course rows in one query.
    async fn teacher_names(
        &self,
        rows: &[(course::Model, Option<department::Model>)],
    ) -> AppResult<HashMap<i64, String>> {
        let teacher_ids: Vec<i64> = rows
            .iter()
            .filter_map(|(c, _)| c.teacher_id)
            .collect();
        if teacher_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let teachers = teacher::Entity::find()
            .filter(teacher::Column::Id.is_in(teacher_ids))
            .all(&self.db)
            .await?;
        Ok(teachers
            .into_iter()
            .map(|t| (t.id, format!("{} {}", t.first_name, t.last_name)))
            .collect())
    }

    async fn into_domain_batch(
        &self,
        rows: Vec<(course::Model, Option<department::Model>)>,
    ) -> AppResult<Vec<Course>> {
        let names = self.teacher_names(&rows).await?;
        Ok(rows
            .into_iter()
            .map(|(model, dept)| {
                let teacher_name = model.teacher_id.and_then(|id| names.get(&id).cloned());
                model.into_domain(dept.map(|d| d.name), teacher_name)
            })
            .collect())
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>> {
        let result = course::Entity::find_by_id(id)
            .find_also_related(department::Entity)
            .one(&self.db)
            .await?;

        match result {
            Some(row) => {
                let mut courses = self.into_domain_batch(vec![row]).await?;
                Ok(courses.pop())
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> AppResult<Vec<Course>> {
        let rows = course::Entity::find()
            .find_also_related(department::Entity)
            .order_by_asc(course::Column::Code)
            .all(&self.db)
            .await?;
        self.into_domain_batch(rows).await
    }

    async fn list_by_department(&self, department_id: i64) -> AppResult<Vec<Course>> {
        let rows = course::Entity::find()
            .filter(course::Column::DepartmentId.eq(department_id))
            .find_also_related(department::Entity)
            .order_by_asc(course::Column::Code)
            .all(&self.db)
            .await?;
        self.into_domain_batch(rows).await
    }

    async fn list_by_teacher(&self, teacher_id: i64) -> AppResult<Vec<Course>> {
        let rows = course::Entity::find()
            .filter(course::Column::TeacherId.eq(teacher_id))
            .find_also_related(department::Entity)
            .order_by_asc(course::Column::Code)
            .all(&self.db)
            .await?;
        self.into_domain_batch(rows).await
    }
}
