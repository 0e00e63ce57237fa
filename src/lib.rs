//! Campus Records - Role-based academic records service
//!
//! Departments, teachers, students and courses with student/course
//! enrollment, behind a JWT-authenticated JSON API. Built on Axum and
//! SeaORM with clean-architecture layering.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities, access policy and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (optionally seeding initial data)
//! cargo run -- serve --seed
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Insert initial departments and the admin teacher
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::Role;
pub use errors::{AppError, AppResult};
