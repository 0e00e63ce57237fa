//! Course service - Handles course-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Course, CreateCourse, UpdateCourse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Course service trait for dependency injection.
#[async_trait]
pub trait CourseService: Send + Sync {
    async fn get_course(&self, id: i64) -> AppResult<Course>;

    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    async fn list_courses_by_department(&self, department_id: i64) -> AppResult<Vec<Course>>;

    async fn list_courses_by_teacher(&self, teacher_id: i64) -> AppResult<Vec<Course>>;

    async fn create_course(&self, input: CreateCourse) -> AppResult<Course>;

    async fn update_course(&self, id: i64, input: UpdateCourse) -> AppResult<Course>;

    /// Delete the course and its enrollment rows. Students survive.
    async fn delete_course(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of CourseService using Unit of Work.
pub struct CourseManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CourseManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CourseService for CourseManager<U> {
    async fn get_course(&self, id: i64) -> AppResult<Course> {
        self.uow
            .courses()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Course")
    }

    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.uow.courses().list().await
    }

    async fn list_courses_by_department(&self, department_id: i64) -> AppResult<Vec<Course>> {
        self.uow.courses().list_by_department(department_id).await
    }

    async fn list_courses_by_teacher(&self, teacher_id: i64) -> AppResult<Vec<Course>> {
        self.uow.courses().list_by_teacher(teacher_id).await
    }

    async fn create_course(&self, input: CreateCourse) -> AppResult<Course> {
        let created = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    if ctx.courses().code_exists(&input.code).await? {
                        return Err(AppError::conflict("Course code"));
                    }
                    if let Some(department_id) = input.department_id {
                        ctx.departments()
                            .find_by_id(department_id)
                            .await?
                            .ok_or_not_found("Department")?;
                    }
                    if let Some(teacher_id) = input.teacher_id {
                        ctx.teachers()
                            .find_by_id(teacher_id)
                            .await?
                            .ok_or_not_found("Teacher")?;
                    }

                    ctx.courses().insert(&input).await
                })
            })
            .await?;

        tracing::info!(course_id = created.id, code = %created.code, "Course created");
        self.get_course(created.id).await
    }

    async fn update_course(&self, id: i64, input: UpdateCourse) -> AppResult<Course> {
        let updated = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .courses()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found("Course")?;

                    // The course may keep its own code but not take another's.
                    if ctx
                        .courses()
                        .code_taken_by_other(&input.code, existing.id)
                        .await?
                    {
                        return Err(AppError::conflict("Course code"));
                    }
                    if let Some(department_id) = input.department_id {
                        ctx.departments()
                            .find_by_id(department_id)
                            .await?
                            .ok_or_not_found("Department")?;
                    }
                    if let Some(teacher_id) = input.teacher_id {
                        ctx.teachers()
                            .find_by_id(teacher_id)
                            .await?
                            .ok_or_not_found("Teacher")?;
                    }

                    ctx.courses().update(&existing, &input).await
                })
            })
            .await?;

        self.get_course(updated.id).await
    }

    async fn delete_course(&self, id: i64) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .courses()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found("Course")?;

                    ctx.enrollments().delete_by_course(existing.id).await?;
                    ctx.courses().delete(existing.id).await?;

                    tracing::info!(course_id = existing.id, "Course deleted");
                    Ok(())
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockCourseRepository;
    use crate::services::test_support::StubUow;

    fn course(id: i64, code: &str) -> Course {
        Course {
            id,
            name: "Calculus I".to_string(),
            code: code.to_string(),
            description: None,
            credits: 5,
            department_id: Some(1),
            department_name: Some("Mathematics".to_string()),
            teacher_id: None,
            teacher_name: None,
        }
    }

    #[tokio::test]
    async fn get_course_returns_entity() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 11)
            .returning(|_| Ok(Some(course(11, "M101"))));

        let uow = StubUow::new().with_courses(repo);
        let service = CourseManager::new(Arc::new(uow));

        let found = service.get_course(11).await.unwrap();
        assert_eq!(found.code, "M101");
    }

    #[tokio::test]
    async fn get_course_maps_missing_to_not_found() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let uow = StubUow::new().with_courses(repo);
        let service = CourseManager::new(Arc::new(uow));

        let err = service.get_course(0).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_courses_by_teacher_filters() {
        let mut repo = MockCourseRepository::new();
        repo.expect_list_by_teacher()
            .withf(|id| *id == 3)
            .returning(|_| Ok(vec![course(11, "M101"), course(12, "M102")]));

        let uow = StubUow::new().with_courses(repo);
        let service = CourseManager::new(Arc::new(uow));

        let courses = service.list_courses_by_teacher(3).await.unwrap();
        assert_eq!(courses.len(), 2);
    }
}
