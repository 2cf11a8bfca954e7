//! Data models for department administration.

pub mod department;

pub use department::{CreateDepartment, DepartmentDto, DeptNode, UpdateDepartment};
