//! Department service - Handles department-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateDepartment, Department, UpdateDepartment};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Department service trait for dependency injection.
#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn get_department(&self, id: i64) -> AppResult<Department>;

    async fn list_departments(&self) -> AppResult<Vec<Department>>;

    async fn create_department(&self, input: CreateDepartment) -> AppResult<Department>;

    async fn update_department(&self, id: i64, input: UpdateDepartment) -> AppResult<Department>;

    /// Delete the department and everything it owns: enrollments, courses,
    /// students and teachers, in that order, atomically.
    async fn delete_department(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of DepartmentService using Unit of Work.
pub struct DepartmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DepartmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DepartmentService for DepartmentManager<U> {
    async fn get_department(&self, id: i64) -> AppResult<Department> {
        self.uow
            .departments()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Department")
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.uow.departments().list().await
    }

    async fn create_department(&self, input: CreateDepartment) -> AppResult<Department> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    if ctx.departments().name_exists(&input.name).await? {
                        return Err(AppError::conflict("Department name"));
                    }
                    ctx.departments().insert(&input).await
                })
            })
            .await
    }

    async fn update_department(&self, id: i64, input: UpdateDepartment) -> AppResult<Department> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .departments()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found("Department")?;
                    // A renamed-into-duplicate slips past here and is caught
                    // by the unique index, surfacing as Conflict.
                    ctx.departments().update(&existing, &input).await
                })
            })
            .await
    }

    async fn delete_department(&self, id: i64) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .departments()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found("Department")?;

                    // Dependents before parent: join rows, courses (both the
                    // department's own and those taught by its teachers),
                    // students, teachers, then the department itself.
                    let enrollments = ctx.enrollments().delete_by_department(existing.id).await?;
                    let mut courses = ctx.courses().delete_by_department(existing.id).await?;
                    courses += ctx
                        .courses()
                        .delete_by_department_teachers(existing.id)
                        .await?;
                    let students = ctx.students().delete_by_department(existing.id).await?;
                    let teachers = ctx.teachers().delete_by_department(existing.id).await?;
                    ctx.departments().delete(existing.id).await?;

                    tracing::info!(
                        department_id = existing.id,
                        teachers,
                        students,
                        courses,
                        enrollments,
                        "Department deleted with dependents"
                    );
                    Ok(())
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockDepartmentRepository;
    use crate::services::test_support::StubUow;

    fn department(id: i64, name: &str) -> Department {
        Department {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn get_department_returns_entity() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 7)
            .returning(|_| Ok(Some(department(7, "Physics"))));

        let uow = StubUow::new().with_departments(repo);
        let service = DepartmentManager::new(Arc::new(uow));

        let dept = service.get_department(7).await.unwrap();
        assert_eq!(dept.name, "Physics");
    }

    #[tokio::test]
    async fn get_department_maps_missing_to_not_found() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let uow = StubUow::new().with_departments(repo);
        let service = DepartmentManager::new(Arc::new(uow));

        let err = service.get_department(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_departments_passes_through() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_list()
            .returning(|| Ok(vec![department(1, "CS"), department(2, "EE")]));

        let uow = StubUow::new().with_departments(repo);
        let service = DepartmentManager::new(Arc::new(uow));

        let depts = service.list_departments().await.unwrap();
        assert_eq!(depts.len(), 2);
    }
}
