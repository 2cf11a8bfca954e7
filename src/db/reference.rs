//! Queries over entities that reference departments.
//!
//! Used as the pre-check before a cascading delete: a department set may
//! only be removed when nothing else points into it.

use crate::entities::{positions, prelude::*, role_departments};
use sea_orm::*;

/// Count positions attached to any department in the set.
pub async fn count_positions_in<C: ConnectionTrait>(db: &C, dept_ids: &[i32]) -> Result<u64, DbErr> {
    Positions::find()
        .filter(positions::Column::DepartmentId.is_in(dept_ids.iter().copied()))
        .count(db)
        .await
}

/// Count role data-scope grants attached to any department in the set.
pub async fn count_role_grants_in<C: ConnectionTrait>(db: &C, dept_ids: &[i32]) -> Result<u64, DbErr> {
    RoleDepartments::find()
        .filter(role_departments::Column::DepartmentId.is_in(dept_ids.iter().copied()))
        .count(db)
        .await
}
