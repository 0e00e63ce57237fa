//! Teacher service - Handles teacher-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateTeacher, Hasher, Teacher, UpdateTeacher};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Teacher service trait for dependency injection.
#[async_trait]
pub trait TeacherService: Send + Sync {
    async fn get_teacher(&self, id: i64) -> AppResult<Teacher>;

    async fn get_teacher_by_username(&self, username: &str) -> AppResult<Teacher>;

    async fn list_teachers(&self) -> AppResult<Vec<Teacher>>;

    async fn list_teachers_by_department(&self, department_id: i64) -> AppResult<Vec<Teacher>>;

    async fn create_teacher(&self, input: CreateTeacher) -> AppResult<Teacher>;

    async fn update_teacher(&self, id: i64, input: UpdateTeacher) -> AppResult<Teacher>;

    /// Delete the teacher along with the courses they teach and those
    /// courses' enrollment rows.
    async fn delete_teacher(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of TeacherService using Unit of Work.
pub struct TeacherManager<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn Hasher>,
}

impl<U: UnitOfWork> TeacherManager<U> {
    pub fn new(uow: Arc<U>, hasher: Arc<dyn Hasher>) -> Self {
        Self { uow, hasher }
    }
}

#[async_trait]
impl<U: UnitOfWork> TeacherService for TeacherManager<U> {
    async fn get_teacher(&self, id: i64) -> AppResult<Teacher> {
        self.uow
            .teachers()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Teacher")
    }

    async fn get_teacher_by_username(&self, username: &str) -> AppResult<Teacher> {
        self.uow
            .teachers()
            .find_by_username(username)
            .await?
            .ok_or_not_found("Teacher")
    }

    async fn list_teachers(&self) -> AppResult<Vec<Teacher>> {
        self.uow.teachers().list().await
    }

    async fn list_teachers_by_department(&self, department_id: i64) -> AppResult<Vec<Teacher>> {
        self.uow.teachers().list_by_department(department_id).await
    }

    async fn create_teacher(&self, input: CreateTeacher) -> AppResult<Teacher> {
        // Hash outside the transaction; argon2 is deliberately slow.
        let password_hash = self.hasher.hash(&input.password)?;

        let created = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    if let Some(department_id) = input.department_id {
                        ctx.departments()
                            .find_by_id(department_id)
                            .await?
                            .ok_or_not_found("Department")?;
                    }

                    // Login names and emails are shared across both account
                    // tables, so check both.
                    if ctx.teachers().username_exists(&input.username).await?
                        || ctx.students().username_exists(&input.username).await?
                    {
                        return Err(AppError::conflict("Username"));
                    }
                    if ctx.teachers().email_exists(&input.email).await?
                        || ctx.students().email_exists(&input.email).await?
                    {
                        return Err(AppError::conflict("Email"));
                    }
                    if ctx.teachers().employee_id_exists(&input.employee_id).await? {
                        return Err(AppError::conflict("Employee ID"));
                    }

                    ctx.teachers().insert(&input, password_hash).await
                })
            })
            .await?;

        tracing::info!(teacher_id = created.person.id, "Teacher created");
        // Re-read to resolve the department display name
        self.get_teacher(created.person.id).await
    }

    async fn update_teacher(&self, id: i64, input: UpdateTeacher) -> AppResult<Teacher> {
        let password_hash = match input.password.as_deref() {
            Some(p) if !p.is_empty() => Some(self.hasher.hash(p)?),
            _ => None,
        };

        let updated = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .teachers()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found("Teacher")?;

                    if input.email != existing.person.email
                        && (ctx.teachers().email_exists(&input.email).await?
                            || ctx.students().email_exists(&input.email).await?)
                    {
                        return Err(AppError::conflict("Email"));
                    }
                    if let Some(department_id) = input.department_id {
                        ctx.departments()
                            .find_by_id(department_id)
                            .await?
                            .ok_or_not_found("Department")?;
                    }

                    ctx.teachers().update(&existing, &input, password_hash).await
                })
            })
            .await?;

        self.get_teacher(updated.person.id).await
    }

    async fn delete_teacher(&self, id: i64) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .teachers()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found("Teacher")?;

                    let enrollments = ctx.enrollments().delete_by_teacher(existing.person.id).await?;
                    let courses = ctx.courses().delete_by_teacher(existing.person.id).await?;
                    ctx.teachers().delete(existing.person.id).await?;

                    tracing::info!(
                        teacher_id = existing.person.id,
                        courses,
                        enrollments,
                        "Teacher deleted with owned courses"
                    );
                    Ok(())
                })
            })
            .await
    }
}
