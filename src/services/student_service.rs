//! Student service - Handles student-related business logic, including
//! self-service profile edits and course enrollment.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateStudent, Hasher, Student, UpdateStudent, UpdateStudentProfile};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Student service trait for dependency injection.
#[async_trait]
pub trait StudentService: Send + Sync {
    async fn get_student(&self, id: i64) -> AppResult<Student>;

    async fn get_student_by_username(&self, username: &str) -> AppResult<Student>;

    async fn list_students(&self) -> AppResult<Vec<Student>>;

    async fn list_students_by_department(&self, department_id: i64) -> AppResult<Vec<Student>>;

    async fn create_student(&self, input: CreateStudent) -> AppResult<Student>;

    /// Staff-driven update: any mutable field.
    async fn update_student(&self, id: i64, input: UpdateStudent) -> AppResult<Student>;

    /// Self-service update, restricted to contact details and password.
    /// The caller's login name must match the target row; the route layer
    /// cannot express per-row ownership, so it is enforced here.
    async fn update_own_profile(
        &self,
        id: i64,
        input: UpdateStudentProfile,
        caller_username: &str,
    ) -> AppResult<Student>;

    /// Enroll the student in a course. Already-enrolled is a no-op.
    async fn enroll(&self, student_id: i64, course_id: i64) -> AppResult<Student>;

    /// Remove the student from a course. Not-enrolled is a no-op.
    async fn unenroll(&self, student_id: i64, course_id: i64) -> AppResult<Student>;

    /// Delete the student and their enrollment rows. Courses survive.
    async fn delete_student(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of StudentService using Unit of Work.
pub struct StudentManager<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn Hasher>,
}

impl<U: UnitOfWork> StudentManager<U> {
    pub fn new(uow: Arc<U>, hasher: Arc<dyn Hasher>) -> Self {
        Self { uow, hasher }
    }
}

#[async_trait]
impl<U: UnitOfWork> StudentService for StudentManager<U> {
    async fn get_student(&self, id: i64) -> AppResult<Student> {
        self.uow
            .students()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Student")
    }

    async fn get_student_by_username(&self, username: &str) -> AppResult<Student> {
        self.uow
            .students()
            .find_by_username(username)
            .await?
            .ok_or_not_found("Student")
    }

    async fn list_students(&self) -> AppResult<Vec<Student>> {
        self.uow.students().list().await
    }

    async fn list_students_by_department(&self, department_id: i64) -> AppResult<Vec<Student>> {
        self.uow.students().list_by_department(department_id).await
    }

    async fn create_student(&self, input: CreateStudent) -> AppResult<Student> {
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

                    if ctx.students().username_exists(&input.username).await?
                        || ctx.teachers().username_exists(&input.username).await?
                    {
                        return Err(AppError::conflict("Username"));
                    }
                    if ctx.students().email_exists(&input.email).await?
                        || ctx.teachers().email_exists(&input.email).await?
                    {
                        return Err(AppError::conflict("Email"));
                    }
                    if ctx.students().student_id_exists(&input.student_id).await? {
                        return Err(AppError::conflict("Student ID"));
                    }

                    ctx.students().insert(&input, password_hash).await
                })
            })
            .await?;

        tracing::info!(student_id = created.person.id, "Student created");
        self.get_student(created.person.id).await
    }

    async fn update_student(&self, id: i64, input: UpdateStudent) -> AppResult<Student> {
        let password_hash = match input.password.as_deref() {
            Some(p) if !p.is_empty() => Some(self.hasher.hash(p)?),
            _ => None,
        };

        let updated = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .students()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found("Student")?;

                    if input.email != existing.person.email
                        && (ctx.students().email_exists(&input.email).await?
                            || ctx.teachers().email_exists(&input.email).await?)
                    {
                        return Err(AppError::conflict("Email"));
                    }
                    if let Some(department_id) = input.department_id {
                        ctx.departments()
                            .find_by_id(department_id)
                            .await?
                            .ok_or_not_found("Department")?;
                    }

                    ctx.students().update(&existing, &input, password_hash).await
                })
            })
            .await?;

        self.get_student(updated.person.id).await
    }

    async fn update_own_profile(
        &self,
        id: i64,
        input: UpdateStudentProfile,
        caller_username: &str,
    ) -> AppResult<Student> {
        let password_hash = match input.password.as_deref() {
            Some(p) if !p.is_empty() => Some(self.hasher.hash(p)?),
            _ => None,
        };
        let caller = caller_username.to_string();

        let updated = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .students()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found("Student")?;

                    if existing.person.username != caller {
                        return Err(AppError::Forbidden);
                    }

                    if input.email != existing.person.email
                        && (ctx.students().email_exists(&input.email).await?
                            || ctx.teachers().email_exists(&input.email).await?)
                    {
                        return Err(AppError::conflict("Email"));
                    }

                    ctx.students()
                        .update_profile(&existing, &input, password_hash)
                        .await
                })
            })
            .await?;

        self.get_student(updated.person.id).await
    }

    async fn enroll(&self, student_id: i64, course_id: i64) -> AppResult<Student> {
        self.uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    ctx.students()
                        .find_by_id(student_id)
                        .await?
                        .ok_or_not_found("Student")?;
                    ctx.courses()
                        .find_by_id(course_id)
                        .await?
                        .ok_or_not_found("Course")?;

                    let added = ctx.enrollments().add(student_id, course_id).await?;
                    if added {
                        tracing::info!(student_id, course_id, "Student enrolled");
                    }
                    Ok(())
                })
            })
            .await?;

        self.get_student(student_id).await
    }

    async fn unenroll(&self, student_id: i64, course_id: i64) -> AppResult<Student> {
        self.uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    ctx.students()
                        .find_by_id(student_id)
                        .await?
                        .ok_or_not_found("Student")?;
                    ctx.courses()
                        .find_by_id(course_id)
                        .await?
                        .ok_or_not_found("Course")?;

                    let removed = ctx.enrollments().remove(student_id, course_id).await?;
                    if removed {
                        tracing::info!(student_id, course_id, "Student unenrolled");
                    }
                    Ok(())
                })
            })
            .await?;

        self.get_student(student_id).await
    }

    async fn delete_student(&self, id: i64) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .students()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found("Student")?;

                    ctx.enrollments().delete_by_student(existing.person.id).await?;
                    ctx.students().delete(existing.person.id).await?;

                    tracing::info!(student_id = existing.person.id, "Student deleted");
                    Ok(())
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Person, Role};
    use crate::infra::repositories::MockStudentRepository;
    use crate::services::test_support::StubUow;

    fn student(id: i64, username: &str) -> Student {
        Student {
            person: Person {
                id,
                username: username.to_string(),
                password_hash: "hash".to_string(),
                email: format!("{username}@school.edu"),
                first_name: "Mary".to_string(),
                last_name: "Jones".to_string(),
                phone: None,
                role: Role::Student,
                enabled: true,
            },
            student_id: format!("S{id:04}"),
            year: 2,
            address: None,
            department_id: None,
            department_name: None,
            courses: Vec::new(),
        }
    }

    fn service_with(repo: MockStudentRepository) -> StudentManager<StubUow> {
        let uow = StubUow::new().with_students(repo);
        StudentManager::new(Arc::new(uow), Arc::new(crate::domain::Argon2Hasher))
    }

    #[tokio::test]
    async fn get_student_returns_entity() {
        let mut repo = MockStudentRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 5)
            .returning(|_| Ok(Some(student(5, "mjones"))));

        let service = service_with(repo);
        let found = service.get_student(5).await.unwrap();
        assert_eq!(found.student_id, "S0005");
    }

    #[tokio::test]
    async fn get_student_maps_missing_to_not_found() {
        let mut repo = MockStudentRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = service_with(repo);
        let err = service.get_student(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_students_passes_through() {
        let mut repo = MockStudentRepository::new();
        repo.expect_list()
            .returning(|| Ok(vec![student(1, "a"), student(2, "b"), student(3, "c")]));

        let service = service_with(repo);
        let students = service.list_students().await.unwrap();
        assert_eq!(students.len(), 3);
    }
}
