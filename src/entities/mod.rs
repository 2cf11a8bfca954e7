//! SeaORM entities for the organization schema (database-first).

pub mod prelude;

pub mod departments;
pub mod positions;
pub mod role_departments;
pub mod roles;
