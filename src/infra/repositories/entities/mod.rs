//! SeaORM entity definitions mapping database tables to Rust structs.

pub mod course;
pub mod department;
pub mod enrollment;
pub mod student;
pub mod teacher;
