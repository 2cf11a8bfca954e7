//! Department hierarchy traversal.
//!
//! Pure functions over a snapshot of the department table: closure
//! collection for cascading deletes, and forest assembly for tree queries.
//! Both traverse the parent/child adjacency with an explicit stack, so depth
//! is bounded by heap instead of call stack.

use crate::error::{AppError, Result};
use crate::models::department::{DepartmentDto, DeptNode};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Collect the requested departments plus all their descendants.
///
/// Each department appears exactly once in the result no matter how many
/// requested subtrees reach it. A requested ID with no matching department
/// aborts the whole collection with [`AppError::NotFound`].
pub fn collect_subtrees(
    all: &[DepartmentDto],
    requested: &BTreeSet<i32>,
) -> Result<HashSet<DepartmentDto>> {
    let by_id: HashMap<i32, &DepartmentDto> = all.iter().map(|d| (d.id, d)).collect();

    let mut children: HashMap<i32, Vec<i32>> = HashMap::new();
    for dept in all {
        if let Some(parent_id) = dept.parent_id {
            children.entry(parent_id).or_default().push(dept.id);
        }
    }

    let mut stack: Vec<i32> = Vec::with_capacity(requested.len());
    for &id in requested {
        if !by_id.contains_key(&id) {
            return Err(AppError::not_found(format!("department {id} does not exist")));
        }
        stack.push(id);
    }

    let mut collected: HashSet<DepartmentDto> = HashSet::new();
    while let Some(id) = stack.pop() {
        // Visited-set insertion bounds the traversal; the parent graph is
        // a forest by invariant, so every branch terminates.
        if collected.insert(by_id[&id].clone()) {
            if let Some(kids) = children.get(&id) {
                stack.extend(kids.iter().copied());
            }
        }
    }

    Ok(collected)
}

/// Assemble a flat department list into an ordered forest.
///
/// A department whose parent is absent from the input is treated as
/// top-level, so a filtered list still renders as a tree. Siblings are
/// ordered by display_order then name.
pub fn build_tree(depts: Vec<DepartmentDto>) -> Vec<DeptNode> {
    let present: HashSet<i32> = depts.iter().map(|d| d.id).collect();

    let mut children: HashMap<i32, Vec<DepartmentDto>> = HashMap::new();
    let mut roots: Vec<DepartmentDto> = Vec::new();
    for dept in depts {
        match dept.parent_id {
            Some(parent_id) if present.contains(&parent_id) => {
                children.entry(parent_id).or_default().push(dept);
            }
            _ => roots.push(dept),
        }
    }

    sort_siblings(&mut roots);

    let mut forest: Vec<DeptNode> = Vec::new();
    for root in roots {
        forest.push(assemble(root, &mut children));
    }
    forest
}

fn sort_siblings(siblings: &mut [DepartmentDto]) {
    siblings.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Explicit-stack assembly: build each node, splicing finished subtrees
/// back into their parent once all descendants are done.
fn assemble(root: DepartmentDto, children: &mut HashMap<i32, Vec<DepartmentDto>>) -> DeptNode {
    struct Frame {
        node: DeptNode,
        pending: Vec<DepartmentDto>,
    }

    let mut pending = children.remove(&root.id).unwrap_or_default();
    sort_siblings(&mut pending);
    // Pop from the back to keep sorted order when pushing into children.
    pending.reverse();

    let mut stack = vec![Frame {
        node: DeptNode::from(root),
        pending,
    }];

    loop {
        let frame = stack.last_mut().unwrap();
        if let Some(next) = frame.pending.pop() {
            let mut pending = children.remove(&next.id).unwrap_or_default();
            sort_siblings(&mut pending);
            pending.reverse();
            stack.push(Frame {
                node: DeptNode::from(next),
                pending,
            });
        } else {
            let done = stack.pop().unwrap();
            match stack.last_mut() {
                Some(parent) => parent.node.children.push(done.node),
                None => return done.node,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: i32, parent_id: Option<i32>, name: &str) -> DepartmentDto {
        DepartmentDto {
            id,
            name: name.to_string(),
            parent_id,
            display_order: 0,
            is_active: true,
        }
    }

    /// Chain A(1) -> B(2) -> C(3).
    fn chain() -> Vec<DepartmentDto> {
        vec![
            dto(1, None, "A"),
            dto(2, Some(1), "B"),
            dto(3, Some(2), "C"),
        ]
    }

    fn ids(set: &HashSet<DepartmentDto>) -> BTreeSet<i32> {
        set.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_collect_leaf_yields_singleton() {
        let result = collect_subtrees(&chain(), &BTreeSet::from([3])).unwrap();
        assert_eq!(ids(&result), BTreeSet::from([3]));
    }

    #[test]
    fn test_collect_root_yields_whole_tree() {
        let result = collect_subtrees(&chain(), &BTreeSet::from([1])).unwrap();
        assert_eq!(ids(&result), BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_collect_mid_node_yields_its_subtree() {
        let result = collect_subtrees(&chain(), &BTreeSet::from([2])).unwrap();
        assert_eq!(ids(&result), BTreeSet::from([2, 3]));
    }

    #[test]
    fn test_collect_overlapping_subtrees_dedups() {
        // Ancestor and descendant both requested: size 3, not 5
        let result = collect_subtrees(&chain(), &BTreeSet::from([1, 2])).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(ids(&result), BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_collect_disjoint_subtrees() {
        let depts = vec![
            dto(1, None, "A"),
            dto(2, Some(1), "B"),
            dto(10, None, "X"),
            dto(11, Some(10), "Y"),
            dto(12, Some(10), "Z"),
        ];
        let result = collect_subtrees(&depts, &BTreeSet::from([2, 10])).unwrap();
        assert_eq!(ids(&result), BTreeSet::from([2, 10, 11, 12]));
    }

    #[test]
    fn test_collect_unknown_id_is_not_found() {
        let err = collect_subtrees(&chain(), &BTreeSet::from([1, 99])).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_collect_wide_tree() {
        let mut depts = vec![dto(1, None, "root")];
        for i in 2..=50 {
            depts.push(dto(i, Some(1), &format!("child-{i}")));
        }
        let result = collect_subtrees(&depts, &BTreeSet::from([1])).unwrap();
        assert_eq!(result.len(), 50);
    }

    #[test]
    fn test_collect_deep_chain_does_not_overflow() {
        // Explicit stack: a pathological chain must not blow the call stack
        let mut depts = vec![dto(1, None, "d1")];
        for i in 2..=10_000 {
            depts.push(dto(i, Some(i - 1), &format!("d{i}")));
        }
        let result = collect_subtrees(&depts, &BTreeSet::from([1])).unwrap();
        assert_eq!(result.len(), 10_000);
    }

    #[test]
    fn test_build_tree_nests_children() {
        let forest = build_tree(chain());
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, 1);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].id, 2);
        assert_eq!(forest[0].children[0].children[0].id, 3);
    }

    #[test]
    fn test_build_tree_orphan_parent_becomes_top_level() {
        // Filtered list: node 5's parent 4 is absent
        let forest = build_tree(vec![dto(1, None, "A"), dto(5, Some(4), "E")]);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_build_tree_sibling_order() {
        let mut b = dto(2, Some(1), "Beta");
        b.display_order = 2;
        let mut c = dto(3, Some(1), "Alpha");
        c.display_order = 1;
        let mut d = dto(4, Some(1), "Aardvark");
        d.display_order = 2;

        let forest = build_tree(vec![dto(1, None, "root"), b, c, d]);
        let names: Vec<&str> = forest[0].children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Aardvark", "Beta"]);
    }

    #[test]
    fn test_build_tree_empty_input() {
        assert!(build_tree(Vec::new()).is_empty());
    }

    #[test]
    fn test_build_tree_deep_chain_does_not_overflow() {
        let mut depts = Vec::new();
        depts.push(dto(1, None, "d1"));
        for i in 2..=10_000 {
            depts.push(dto(i, Some(i - 1), &format!("d{i}")));
        }
        let forest = build_tree(depts);
        assert_eq!(forest.len(), 1);

        let mut depth = 0;
        let mut node = &forest[0];
        while let Some(child) = node.children.first() {
            depth += 1;
            node = child;
        }
        assert_eq!(depth, 9_999);
    }
}
