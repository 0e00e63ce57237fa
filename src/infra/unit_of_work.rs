//! Unit of Work pattern implementation.
//!
//! The Unit of Work pattern:
//! - Centralizes access to all repositories
//! - Manages database transactions (begin, commit, rollback)
//! - Ensures consistency across multiple repository operations
//! - Provides atomic operations for complex business workflows
//!
//! All writes in this crate go through a transaction context so that
//! uniqueness checks, cross-table deletes and the actual row mutation
//! observe a single consistent snapshot.

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::{course, department, enrollment, student, teacher};
use super::repositories::{
    CourseRepository, CourseStore, DepartmentRepository, DepartmentStore, StudentRepository,
    StudentStore, TeacherRepository, TeacherStore,
};
use crate::config::constants::{ROLE_STUDENT, ROLE_TEACHER};
use crate::domain::{
    Course, CourseRef, CreateCourse, CreateDepartment, CreateStudent, CreateTeacher, Department,
    Student, Teacher, UpdateCourse, UpdateDepartment, UpdateStudent, UpdateStudentProfile,
    UpdateTeacher,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock the repositories or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get department repository
    fn departments(&self) -> Arc<dyn DepartmentRepository>;

    /// Get teacher repository
    fn teachers(&self) -> Arc<dyn TeacherRepository>;

    /// Get student repository
    fn students(&self) -> Arc<dyn StudentRepository>;

    /// Get course repository
    fn courses(&self) -> Arc<dyn CourseRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back on error.
    /// Uses ReadCommitted isolation level by default for balanced consistency/performance.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    ///
    /// Use this for operations requiring the strongest consistency guarantees.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction. The context borrows the transaction
/// to ensure proper lifetime management.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    /// Create a new transaction context
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get department repository for this transaction
    pub fn departments(&self) -> TxDepartmentRepository<'_> {
        TxDepartmentRepository::new(self.txn)
    }

    /// Get teacher repository for this transaction
    pub fn teachers(&self) -> TxTeacherRepository<'_> {
        TxTeacherRepository::new(self.txn)
    }

    /// Get student repository for this transaction
    pub fn students(&self) -> TxStudentRepository<'_> {
        TxStudentRepository::new(self.txn)
    }

    /// Get course repository for this transaction
    pub fn courses(&self) -> TxCourseRepository<'_> {
        TxCourseRepository::new(self.txn)
    }

    /// Get enrollment repository for this transaction
    pub fn enrollments(&self) -> TxEnrollmentRepository<'_> {
        TxEnrollmentRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    department_repo: Arc<DepartmentStore>,
    teacher_repo: Arc<TeacherStore>,
    student_repo: Arc<StudentStore>,
    course_repo: Arc<CourseStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let department_repo = Arc::new(DepartmentStore::new(db.clone()));
        let teacher_repo = Arc::new(TeacherStore::new(db.clone()));
        let student_repo = Arc::new(StudentStore::new(db.clone()));
        let course_repo = Arc::new(CourseStore::new(db.clone()));
        Self {
            db,
            department_repo,
            teacher_repo,
            student_repo,
            course_repo,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.department_repo.clone()
    }

    fn teachers(&self) -> Arc<dyn TeacherRepository> {
        self.teacher_repo.clone()
    }

    fn students(&self) -> Arc<dyn StudentRepository> {
        self.student_repo.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.course_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f)
            .await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f)
            .await
    }
}

/// Transaction-aware department repository.
pub struct TxDepartmentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxDepartmentRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Department>> {
        let model = department::Entity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(Department::from))
    }

    pub async fn name_exists(&self, name: &str) -> AppResult<bool> {
        let count = department::Entity::find()
            .filter(department::Column::Name.eq(name))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    pub async fn insert(&self, input: &CreateDepartment) -> AppResult<Department> {
        let model = department::ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            ..Default::default()
        }
        .insert(self.txn)
        .await?;
        Ok(Department::from(model))
    }

    pub async fn update(
        &self,
        existing: &Department,
        input: &UpdateDepartment,
    ) -> AppResult<Department> {
        let model = department::ActiveModel {
            id: Set(existing.id),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
        }
        .update(self.txn)
        .await?;
        Ok(Department::from(model))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        department::Entity::delete_by_id(id).exec(self.txn).await?;
        Ok(())
    }
}

/// Transaction-aware teacher repository.
///
/// Domain entities returned here carry no resolved department name; callers
/// needing display names re-read through the read-side repository after
/// commit.
pub struct TxTeacherRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxTeacherRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Teacher>> {
        let model = teacher::Entity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(|m| m.into_domain(None)))
    }

    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let count = teacher::Entity::find()
            .filter(teacher::Column::Username.eq(username))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = teacher::Entity::find()
            .filter(teacher::Column::Email.eq(email))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    pub async fn employee_id_exists(&self, employee_id: &str) -> AppResult<bool> {
        let count = teacher::Entity::find()
            .filter(teacher::Column::EmployeeId.eq(employee_id))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    pub async fn insert(&self, input: &CreateTeacher, password_hash: String) -> AppResult<Teacher> {
        let model = teacher::ActiveModel {
            username: Set(input.username.clone()),
            password: Set(password_hash),
            email: Set(input.email.clone()),
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
            phone: Set(input.phone.clone()),
            role: Set(ROLE_TEACHER.to_string()),
            enabled: Set(true),
            employee_id: Set(input.employee_id.clone()),
            specialization: Set(input.specialization.clone()),
            department_id: Set(input.department_id),
            ..Default::default()
        }
        .insert(self.txn)
        .await?;
        Ok(model.into_domain(None))
    }

    /// Overwrite the mutable teacher fields. The password changes only when
    /// a new hash is supplied; the department reference changes only when
    /// the update carries one.
    pub async fn update(
        &self,
        existing: &Teacher,
        input: &UpdateTeacher,
        password_hash: Option<String>,
    ) -> AppResult<Teacher> {
        let mut model = teacher::ActiveModel {
            id: Set(existing.person.id),
            email: Set(input.email.clone()),
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
            phone: Set(input.phone.clone()),
            specialization: Set(input.specialization.clone()),
            ..Default::default()
        };
        if let Some(hash) = password_hash {
            model.password = Set(hash);
        }
        if let Some(department_id) = input.department_id {
            model.department_id = Set(Some(department_id));
        }

        let updated = model.update(self.txn).await?;
        Ok(updated.into_domain(None))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        teacher::Entity::delete_by_id(id).exec(self.txn).await?;
        Ok(())
    }

    pub async fn delete_by_department(&self, department_id: i64) -> AppResult<u64> {
        let result = teacher::Entity::delete_many()
            .filter(teacher::Column::DepartmentId.eq(department_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Transaction-aware student repository.
pub struct TxStudentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxStudentRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Student>> {
        let model = student::Entity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(|m| m.into_domain(None, Vec::new())))
    }

    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let count = student::Entity::find()
            .filter(student::Column::Username.eq(username))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = student::Entity::find()
            .filter(student::Column::Email.eq(email))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    pub async fn student_id_exists(&self, student_id: &str) -> AppResult<bool> {
        let count = student::Entity::find()
            .filter(student::Column::StudentId.eq(student_id))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    pub async fn insert(&self, input: &CreateStudent, password_hash: String) -> AppResult<Student> {
        let model = student::ActiveModel {
            username: Set(input.username.clone()),
            password: Set(password_hash),
            email: Set(input.email.clone()),
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
            phone: Set(input.phone.clone()),
            role: Set(ROLE_STUDENT.to_string()),
            enabled: Set(true),
            student_id: Set(input.student_id.clone()),
            year: Set(input.year),
            address: Set(input.address.clone()),
            department_id: Set(input.department_id),
            ..Default::default()
        }
        .insert(self.txn)
        .await?;
        Ok(model.into_domain(None, Vec::new()))
    }

    /// Staff-driven update: may change any mutable field.
    pub async fn update(
        &self,
        existing: &Student,
        input: &UpdateStudent,
        password_hash: Option<String>,
    ) -> AppResult<Student> {
        let mut model = student::ActiveModel {
            id: Set(existing.person.id),
            email: Set(input.email.clone()),
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
            phone: Set(input.phone.clone()),
            year: Set(input.year),
            address: Set(input.address.clone()),
            ..Default::default()
        };
        if let Some(hash) = password_hash {
            model.password = Set(hash);
        }
        if let Some(department_id) = input.department_id {
            model.department_id = Set(Some(department_id));
        }

        let updated = model.update(self.txn).await?;
        Ok(updated.into_domain(None, Vec::new()))
    }

    /// Self-service profile update: contact details and password only.
    pub async fn update_profile(
        &self,
        existing: &Student,
        input: &UpdateStudentProfile,
        password_hash: Option<String>,
    ) -> AppResult<Student> {
        let mut model = student::ActiveModel {
            id: Set(existing.person.id),
            email: Set(input.email.clone()),
            phone: Set(input.phone.clone()),
            address: Set(input.address.clone()),
            ..Default::default()
        };
        if let Some(hash) = password_hash {
            model.password = Set(hash);
        }

        let updated = model.update(self.txn).await?;
        Ok(updated.into_domain(None, Vec::new()))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        student::Entity::delete_by_id(id).exec(self.txn).await?;
        Ok(())
    }

    pub async fn delete_by_department(&self, department_id: i64) -> AppResult<u64> {
        let result = student::Entity::delete_many()
            .filter(student::Column::DepartmentId.eq(department_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Transaction-aware course repository.
pub struct TxCourseRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCourseRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>> {
        let model = course::Entity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(|m| m.into_domain(None, None)))
    }

    pub async fn code_exists(&self, code: &str) -> AppResult<bool> {
        let count = course::Entity::find()
            .filter(course::Column::Code.eq(code))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    /// True when another course already carries this code. Used on update so
    /// a course may keep its own code.
    pub async fn code_taken_by_other(&self, code: &str, id: i64) -> AppResult<bool> {
        let count = course::Entity::find()
            .filter(course::Column::Code.eq(code))
            .filter(course::Column::Id.ne(id))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    pub async fn insert(&self, input: &CreateCourse) -> AppResult<Course> {
        let model = course::ActiveModel {
            name: Set(input.name.clone()),
            code: Set(input.code.clone()),
            description: Set(input.description.clone()),
            credits: Set(input.credits),
            department_id: Set(input.department_id),
            teacher_id: Set(input.teacher_id),
            ..Default::default()
        }
        .insert(self.txn)
        .await?;
        Ok(model.into_domain(None, None))
    }

    pub async fn update(&self, existing: &Course, input: &UpdateCourse) -> AppResult<Course> {
        let mut model = course::ActiveModel {
            id: Set(existing.id),
            name: Set(input.name.clone()),
            code: Set(input.code.clone()),
            description: Set(input.description.clone()),
            credits: Set(input.credits),
            ..Default::default()
        };
        if let Some(department_id) = input.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(teacher_id) = input.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }

        let updated = model.update(self.txn).await?;
        Ok(updated.into_domain(None, None))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        course::Entity::delete_by_id(id).exec(self.txn).await?;
        Ok(())
    }

    pub async fn delete_by_department(&self, department_id: i64) -> AppResult<u64> {
        let result = course::Entity::delete_many()
            .filter(course::Column::DepartmentId.eq(department_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_teacher(&self, teacher_id: i64) -> AppResult<u64> {
        let result = course::Entity::delete_many()
            .filter(course::Column::TeacherId.eq(teacher_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Remove courses taught by any teacher of the department, wherever the
    /// course itself is homed. Needed before the department's teachers can
    /// be deleted.
    pub async fn delete_by_department_teachers(&self, department_id: i64) -> AppResult<u64> {
        let result = course::Entity::delete_many()
            .filter(
                course::Column::TeacherId.in_subquery(
                    Query::select()
                        .column(teacher::Column::Id)
                        .from(teacher::Entity)
                        .and_where(teacher::Column::DepartmentId.eq(department_id))
                        .to_owned(),
                ),
            )
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Transaction-aware enrollment repository.
///
/// The join table is the single authoritative record of membership; both
/// `add` and `remove` are idempotent and report whether anything changed.
pub struct TxEnrollmentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxEnrollmentRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn exists(&self, student_id: i64, course_id: i64) -> AppResult<bool> {
        let count = enrollment::Entity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    /// Enroll the student. Returns false when the pair was already present.
    pub async fn add(&self, student_id: i64, course_id: i64) -> AppResult<bool> {
        if self.exists(student_id, course_id).await? {
            return Ok(false);
        }

        enrollment::ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
        }
        .insert(self.txn)
        .await?;
        Ok(true)
    }

    /// Unenroll the student. Returns false when no such enrollment existed.
    pub async fn remove(&self, student_id: i64, course_id: i64) -> AppResult<bool> {
        let result = enrollment::Entity::delete_many()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_by_student(&self, student_id: i64) -> AppResult<u64> {
        let result = enrollment::Entity::delete_many()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_course(&self, course_id: i64) -> AppResult<u64> {
        let result = enrollment::Entity::delete_many()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Remove every enrollment touching a department, either through the
    /// student's membership or the course's ownership.
    pub async fn delete_by_department(&self, department_id: i64) -> AppResult<u64> {
        let by_student = enrollment::Entity::delete_many()
            .filter(
                enrollment::Column::StudentId.in_subquery(
                    Query::select()
                        .column(student::Column::Id)
                        .from(student::Entity)
                        .and_where(student::Column::DepartmentId.eq(department_id))
                        .to_owned(),
                ),
            )
            .exec(self.txn)
            .await?;

        let by_course = enrollment::Entity::delete_many()
            .filter(
                enrollment::Column::CourseId.in_subquery(
                    Query::select()
                        .column(course::Column::Id)
                        .from(course::Entity)
                        .and_where(course::Column::DepartmentId.eq(department_id))
                        .to_owned(),
                ),
            )
            .exec(self.txn)
            .await?;

        // Courses taught by the department's teachers but homed elsewhere
        let by_teacher = enrollment::Entity::delete_many()
            .filter(
                enrollment::Column::CourseId.in_subquery(
                    Query::select()
                        .column(course::Column::Id)
                        .from(course::Entity)
                        .and_where(
                            course::Column::TeacherId.in_subquery(
                                Query::select()
                                    .column(teacher::Column::Id)
                                    .from(teacher::Entity)
                                    .and_where(
                                        teacher::Column::DepartmentId.eq(department_id),
                                    )
                                    .to_owned(),
                            ),
                        )
                        .to_owned(),
                ),
            )
            .exec(self.txn)
            .await?;

        Ok(by_student.rows_affected + by_course.rows_affected + by_teacher.rows_affected)
    }

    /// Remove every enrollment in courses taught by the given teacher.
    pub async fn delete_by_teacher(&self, teacher_id: i64) -> AppResult<u64> {
        let result = enrollment::Entity::delete_many()
            .filter(
                enrollment::Column::CourseId.in_subquery(
                    Query::select()
                        .column(course::Column::Id)
                        .from(course::Entity)
                        .and_where(course::Column::TeacherId.eq(teacher_id))
                        .to_owned(),
                ),
            )
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Enrolled courses for a student, ordered by code.
    pub async fn courses_for_student(&self, student_id: i64) -> AppResult<Vec<CourseRef>> {
        let courses = course::Entity::find()
            .filter(
                course::Column::Id.in_subquery(
                    Query::select()
                        .column(enrollment::Column::CourseId)
                        .from(enrollment::Entity)
                        .and_where(enrollment::Column::StudentId.eq(student_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(course::Column::Code)
            .all(self.txn)
            .await?;
        Ok(courses.into_iter().map(CourseRef::from).collect())
    }
}
