//! Department repository with CRUD operations.
//!
//! Functions are generic over [`ConnectionTrait`] so they run against the
//! pool or inside a transaction.

use crate::entities::{departments, prelude::*};
use crate::models::department::{CreateDepartment, UpdateDepartment};
use chrono::Utc;
use sea_orm::*;

/// List all departments ordered by display_order and name.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<departments::Model>, DbErr> {
    Departments::find()
        .order_by_asc(departments::Column::DisplayOrder)
        .order_by_asc(departments::Column::Name)
        .all(db)
        .await
}

/// Get department by ID.
pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<departments::Model>, DbErr> {
    Departments::find_by_id(id).one(db).await
}

/// Get direct children of a department.
pub async fn find_by_parent_id<C: ConnectionTrait>(
    db: &C,
    parent_id: i32,
) -> Result<Vec<departments::Model>, DbErr> {
    Departments::find()
        .filter(departments::Column::ParentId.eq(parent_id))
        .order_by_asc(departments::Column::DisplayOrder)
        .order_by_asc(departments::Column::Name)
        .all(db)
        .await
}

/// Create a new department.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    data: CreateDepartment,
) -> Result<departments::Model, DbErr> {
    let model = departments::ActiveModel {
        name: Set(data.name),
        parent_id: Set(data.parent_id),
        display_order: Set(data.display_order),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    model.insert(db).await
}

/// Update an existing department.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    data: UpdateDepartment,
) -> Result<Option<departments::Model>, DbErr> {
    let existing = Departments::find_by_id(id).one(db).await?;

    match existing {
        Some(model) => {
            let mut active: departments::ActiveModel = model.into();

            if let Some(name) = data.name {
                active.name = Set(name);
            }
            if let Some(parent_id) = data.parent_id {
                active.parent_id = Set(parent_id);
            }
            if let Some(display_order) = data.display_order {
                active.display_order = Set(display_order);
            }
            if let Some(is_active) = data.is_active {
                active.is_active = Set(is_active);
            }

            let updated = active.update(db).await?;
            Ok(Some(updated))
        }
        None => Ok(None),
    }
}

/// Delete a set of departments by ID. Returns the number of rows removed.
pub async fn delete_all<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<u64, DbErr> {
    let result = Departments::delete_many()
        .filter(departments::Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Check if department name exists (for validation).
pub async fn name_exists<C: ConnectionTrait>(
    db: &C,
    name: &str,
    exclude_id: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = Departments::find().filter(departments::Column::Name.eq(name));

    if let Some(id) = exclude_id {
        query = query.filter(departments::Column::Id.ne(id));
    }

    let count = query.count(db).await?;
    Ok(count > 0)
}
