//! Infrastructure layer - Database, repositories and transactional access.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::Database;
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
