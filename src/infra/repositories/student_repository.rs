//! Student repository - read-side data access for students.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};

use super::entities::{course, department, student};
use crate::domain::{CourseRef, Student};
use crate::errors::AppResult;

/// Read operations over students. Mutations go through the unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Fetch a student with department name and enrolled courses resolved.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>>;

    /// Lookup by login name, used by authentication. Leaves the course
    /// set unloaded.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Student>>;

    async fn list(&self) -> AppResult<Vec<Student>>;

    async fn list_by_department(&self, department_id: i64) -> AppResult<Vec<Student>>;
}

/// SeaORM-backed student repository
pub struct StudentStore {
    db: DatabaseConnection,
}

impl StudentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn courses_of(&self, model: &student::Model) -> AppResult<Vec<CourseRef>> {
        let courses = model
            .find_related(course::Entity)
            .order_by_asc(course::Column::Code)
            .all(&self.db)
            .await?;
        Ok(courses.into_iter().map(CourseRef::from).collect())
    }
}

#[async_trait]
impl StudentRepository for StudentStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>> {
        let result = student::Entity::find_by_id(id)
            .find_also_related(department::Entity)
            .one(&self.db)
            .await?;

        match result {
            Some((model, dept)) => {
                let courses = self.courses_of(&model).await?;
                Ok(Some(model.into_domain(dept.map(|d| d.name), courses)))
            }
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Student>> {
        let result = student::Entity::find()
            .filter(student::Column::Username.eq(username))
            .find_also_related(department::Entity)
            .one(&self.db)
            .await?;
        Ok(result.map(|(model, dept)| model.into_domain(dept.map(|d| d.name), Vec::new())))
    }

    async fn list(&self) -> AppResult<Vec<Student>> {
        let results = student::Entity::find()
            .find_also_related(department::Entity)
            .order_by_asc(student::Column::LastName)
            .all(&self.db)
            .await?;
        Ok(results
            .into_iter()
            .map(|(model, dept)| model.into_domain(dept.map(|d| d.name), Vec::new()))
            .collect())
    }

    async fn list_by_department(&self, department_id: i64) -> AppResult<Vec<Student>> {
        let results = student::Entity::find()
            .filter(student::Column::DepartmentId.eq(department_id))
            .find_also_related(department::Entity)
            .order_by_asc(student::Column::LastName)
            .all(&self.db)
            .await?;
        Ok(results
            .into_iter()
            .map(|(model, dept)| model.into_domain(dept.map(|d| d.name), Vec::new()))
            .collect())
    }
}
