//! Seed command - Inserts the initial departments and admin teacher.
//!
//! Idempotent: each block only runs against an empty table, so re-running
//! `seed` against a populated database changes nothing.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::config::{Config, ROLE_TEACHER, SEED_ADMIN_EMPLOYEE_ID, SEED_ADMIN_USERNAME};
use crate::domain::{Argon2Hasher, Hasher};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::entities::{department, teacher};
use crate::infra::Database;

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    run(&db, &config).await
}

/// Insert initial data into an empty database.
pub async fn run(db: &Database, config: &Config) -> AppResult<()> {
    let conn = db.connection();

    if department::Entity::find().count(conn).await? == 0 {
        for (name, description) in [
            (
                "Computer Science",
                "Department of Computer Science and Engineering",
            ),
            (
                "Electrical Engineering",
                "Department of Electrical Engineering",
            ),
        ] {
            department::ActiveModel {
                name: Set(name.to_string()),
                description: Set(Some(description.to_string())),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }
        tracing::info!("Seeded initial departments");
    } else {
        tracing::debug!("Departments already present, skipping seed");
    }

    if teacher::Entity::find().count(conn).await? == 0 {
        let computer_science = department::Entity::find()
            .filter(department::Column::Name.eq("Computer Science"))
            .one(conn)
            .await?;

        let password_hash = Argon2Hasher.hash(&config.admin_password)?;
        teacher::ActiveModel {
            username: Set(SEED_ADMIN_USERNAME.to_string()),
            password: Set(password_hash),
            email: Set("admin@school.edu".to_string()),
            first_name: Set("System".to_string()),
            last_name: Set("Administrator".to_string()),
            phone: Set(None),
            role: Set(ROLE_TEACHER.to_string()),
            enabled: Set(true),
            employee_id: Set(SEED_ADMIN_EMPLOYEE_ID.to_string()),
            specialization: Set(Some("Administration".to_string())),
            department_id: Set(computer_science.map(|d| d.id)),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        tracing::info!(
            username = SEED_ADMIN_USERNAME,
            employee_id = SEED_ADMIN_EMPLOYEE_ID,
            "Seeded admin teacher (password taken from ADMIN_PASSWORD)"
        );
    } else {
        tracing::debug!("Teachers already present, skipping seed");
    }

    Ok(())
}
