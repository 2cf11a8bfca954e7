//! Department administration service.
//!
//! Owns the collect-then-delete policy: one transaction snapshots the
//! table, computes the closure set, counts referencing entities and deletes.
//! The delete is all-or-nothing; any conflict rolls the whole set back.

use crate::db::{department, reference};
use crate::error::{AppError, Result};
use crate::hierarchy;
use crate::models::department::{CreateDepartment, DepartmentDto, DeptNode, UpdateDepartment};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::BTreeSet;
use tracing::info;

const CONFLICT_HINT: &str =
    "selected departments still have positions or roles attached; detach them and try again";

/// Result of a cascading delete.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    /// Every department removed, requested ones and descendants, by id order.
    pub removed: Vec<DepartmentDto>,
}

impl DeleteOutcome {
    /// Get summary message.
    pub fn summary(&self) -> String {
        format!("Removed {} department(s)", self.removed.len())
    }
}

/// Service for department administration operations.
pub struct DeptService {
    db: DatabaseConnection,
}

impl DeptService {
    /// Create a new department service.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load the full department forest.
    pub async fn tree(&self) -> Result<Vec<DeptNode>> {
        let depts: Vec<DepartmentDto> = department::list_all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(hierarchy::build_tree(depts))
    }

    /// List the direct children of a department.
    pub async fn children(&self, parent_id: i32) -> Result<Vec<DepartmentDto>> {
        if department::get_by_id(&self.db, parent_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "department {parent_id} does not exist"
            )));
        }
        let children = department::find_by_parent_id(&self.db, parent_id).await?;
        Ok(children.into_iter().map(Into::into).collect())
    }

    /// Create a department under an existing parent (or as a root).
    pub async fn create(&self, data: CreateDepartment) -> Result<DepartmentDto> {
        let name = data.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("department name cannot be empty"));
        }
        if department::name_exists(&self.db, &name, None).await? {
            return Err(AppError::validation(format!("department '{name}' already exists")));
        }
        if let Some(parent_id) = data.parent_id {
            if department::get_by_id(&self.db, parent_id).await?.is_none() {
                return Err(AppError::not_found(format!(
                    "parent department {parent_id} does not exist"
                )));
            }
        }

        let model = department::create(
            &self.db,
            CreateDepartment {
                name,
                parent_id: data.parent_id,
                display_order: data.display_order,
            },
        )
        .await?;
        info!("Created department {} ({})", model.id, model.name);
        Ok(model.into())
    }

    /// Apply a partial update to a department.
    ///
    /// Re-parenting is validated against the forest invariant: a department
    /// may not be moved under itself or any of its descendants.
    pub async fn update(&self, id: i32, mut data: UpdateDepartment) -> Result<DepartmentDto> {
        if let Some(raw) = data.name.take() {
            let name = raw.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("department name cannot be empty"));
            }
            if department::name_exists(&self.db, &name, Some(id)).await? {
                return Err(AppError::validation(format!("department '{name}' already exists")));
            }
            data.name = Some(name);
        }

        if let Some(Some(new_parent)) = data.parent_id {
            if new_parent == id {
                return Err(AppError::validation(
                    "a department cannot be its own parent",
                ));
            }
            let snapshot: Vec<DepartmentDto> = department::list_all(&self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            let subtree = hierarchy::collect_subtrees(&snapshot, &BTreeSet::from([id]))?;
            if subtree.iter().any(|d| d.id == new_parent) {
                return Err(AppError::validation(
                    "cannot move a department under its own subtree",
                ));
            }
            if !snapshot.iter().any(|d| d.id == new_parent) {
                return Err(AppError::not_found(format!(
                    "parent department {new_parent} does not exist"
                )));
            }
        }

        match department::update(&self.db, id, data).await? {
            Some(model) => {
                info!("Updated department {id}");
                Ok(model.into())
            }
            None => Err(AppError::not_found(format!("department {id} does not exist"))),
        }
    }

    /// Delete the requested departments together with all descendants.
    ///
    /// Snapshot, closure collection, reference pre-check and delete all run
    /// inside one transaction; the whole set is removed or nothing is.
    pub async fn delete(&self, ids: &BTreeSet<i32>) -> Result<DeleteOutcome> {
        if ids.is_empty() {
            return Err(AppError::validation("no department ids given"));
        }

        // Snapshotting inside the transaction keeps the closure consistent
        // with what the delete sees; no orphan can slip in between.
        let txn = self.db.begin().await?;

        let snapshot: Vec<DepartmentDto> = department::list_all(&txn)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        let doomed = match hierarchy::collect_subtrees(&snapshot, ids) {
            Ok(doomed) => doomed,
            Err(e) => {
                txn.rollback().await?;
                return Err(e);
            }
        };

        let mut doomed_ids: Vec<i32> = doomed.iter().map(|d| d.id).collect();
        doomed_ids.sort_unstable();
        info!(
            "Collected {} department(s) for deletion from {} requested",
            doomed_ids.len(),
            ids.len()
        );

        let positions = reference::count_positions_in(&txn, &doomed_ids).await?;
        let role_grants = reference::count_role_grants_in(&txn, &doomed_ids).await?;
        if positions > 0 || role_grants > 0 {
            txn.rollback().await?;
            let mut attached = Vec::new();
            if positions > 0 {
                attached.push(format!("{positions} position(s)"));
            }
            if role_grants > 0 {
                attached.push(format!("{role_grants} role grant(s)"));
            }
            return Err(AppError::ReferentialConflict(format!(
                "selected departments still have {} attached; detach them and try again",
                attached.join(" and ")
            )));
        }

        // A concurrent writer can still attach a reference between the
        // check and the delete; the FK violation maps to the same conflict.
        let removed = department::delete_all(&txn, &doomed_ids)
            .await
            .map_err(|e| AppError::foreign_key(e, CONFLICT_HINT))?;
        txn.commit().await?;

        info!("Deleted {removed} department(s)");

        let mut removed_list: Vec<DepartmentDto> = doomed.into_iter().collect();
        removed_list.sort_by_key(|d| d.id);
        Ok(DeleteOutcome { removed: removed_list })
    }
}
