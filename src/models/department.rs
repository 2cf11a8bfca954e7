//! Department DTOs and tree read model.

use crate::entities::departments;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Read-model projection of a department row.
///
/// Equality and hashing are defined by `id` alone so closure sets
/// deduplicate by department identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDto {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub display_order: i32,
    pub is_active: bool,
}

impl PartialEq for DepartmentDto {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DepartmentDto {}

impl Hash for DepartmentDto {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl From<departments::Model> for DepartmentDto {
    fn from(model: departments::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_id: model.parent_id,
            display_order: model.display_order,
            is_active: model.is_active,
        }
    }
}

/// A department with its assembled subtree.
#[derive(Debug, Clone, Serialize)]
pub struct DeptNode {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub display_order: i32,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeptNode>,
}

impl From<DepartmentDto> for DeptNode {
    fn from(dto: DepartmentDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            parent_id: dto.parent_id,
            display_order: dto.display_order,
            is_active: dto.is_active,
            children: Vec::new(),
        }
    }
}

/// DTO for creating a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    pub parent_id: Option<i32>,
    pub display_order: i32,
}

/// DTO for updating a department.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub parent_id: Option<Option<i32>>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn dto(id: i32, name: &str) -> DepartmentDto {
        DepartmentDto {
            id,
            name: name.to_string(),
            parent_id: None,
            display_order: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_dto_identity_by_id() {
        // Same id with different fields compares equal
        assert_eq!(dto(1, "Sales"), dto(1, "Renamed"));
        assert_ne!(dto(1, "Sales"), dto(2, "Sales"));
    }

    #[test]
    fn test_dto_set_dedups_by_id() {
        let mut set = HashSet::new();
        set.insert(dto(1, "Sales"));
        set.insert(dto(1, "Sales EMEA"));
        set.insert(dto(2, "Support"));
        assert_eq!(set.len(), 2);
    }
}
