pub use super::departments::Entity as Departments;
pub use super::positions::Entity as Positions;
pub use super::role_departments::Entity as RoleDepartments;
pub use super::roles::Entity as Roles;
