//! List operations a move is made of.
//!
//! A cross-list move is a `Remove` followed by an `Insert`. Both are applied
//! to the same working copy of the block map; the caller publishes the copy
//! as a new `Document` only after the whole list has been applied.

use std::collections::BTreeMap;
use std::sync::Arc;

use blockdrop_api::{Block, BlockShape, ChildIds};
use tracing::trace;

use crate::locator::BlockLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Remove,
    Insert,
}

/// One edit of one ordered child list.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeOperation {
    pub kind: OperationKind,
    pub location: BlockLocation,
    pub node_id: String,
}

impl TreeOperation {
    pub fn remove(node_id: impl Into<String>, location: BlockLocation) -> Self {
        Self {
            kind: OperationKind::Remove,
            location,
            node_id: node_id.into(),
        }
    }

    pub fn insert(node_id: impl Into<String>, location: BlockLocation) -> Self {
        Self {
            kind: OperationKind::Insert,
            location,
            node_id: node_id.into(),
        }
    }

    /// Apply this operation to `blocks`.
    ///
    /// The parent block is re-read from `blocks`, so an earlier operation on
    /// the same block (another column of one ColumnsContainer) is preserved.
    /// The parent block and the edited list are copied; every other list of
    /// the parent stays shared.
    pub fn apply(&self, blocks: &mut BTreeMap<String, Arc<Block>>) {
        let parent_id = &self.location.parent_id;
        let Some(parent) = blocks.get(parent_id) else {
            trace!("Skipping {:?} of {}: parent {} is gone", self.kind, self.node_id, parent_id);
            return;
        };

        let mut parent = Block::clone(parent);
        let edited = match (&mut parent.shape, self.location.column_index) {
            (BlockShape::Root { children }, None) | (BlockShape::Container { children }, None) => {
                *children = self.edit(children);
                true
            }
            (BlockShape::ColumnsContainer { columns }, Some(column_index)) => {
                match columns.get_mut(column_index) {
                    Some(column) => {
                        column.children = self.edit(&column.children);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        };

        if edited {
            blocks.insert(parent_id.clone(), Arc::new(parent));
        } else {
            trace!(
                "Skipping {:?} of {}: {} does not accept children here",
                self.kind,
                self.node_id,
                parent_id
            );
        }
    }

    /// Copy of `children` with this operation applied
    fn edit(&self, children: &ChildIds) -> ChildIds {
        let mut list = Vec::clone(children);
        match self.kind {
            OperationKind::Remove => {
                // The location comes from the same snapshot, so the index is
                // exact unless the caller mixed snapshots.
                let index = if list.get(self.location.index) == Some(&self.node_id) {
                    Some(self.location.index)
                } else {
                    list.iter().position(|id| *id == self.node_id)
                };
                if let Some(index) = index {
                    list.remove(index);
                }
            }
            OperationKind::Insert => {
                let index = self.location.index.min(list.len());
                list.insert(index, self.node_id.clone());
            }
        }
        Arc::new(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdrop_api::{Column, Document, ParentShape, ROOT_BLOCK_ID};

    use crate::locator::find_location;

    #[test]
    fn test_remove_then_insert_across_columns_of_one_block() {
        let doc = Document::new()
            .with_block(ROOT_BLOCK_ID, Block::root(["grid"]))
            .with_block(
                "grid",
                Block::columns(vec![
                    Column::new(["a", "b"]),
                    Column::new(["c"]),
                    Column::new(["d"]),
                ]),
            );
        let source = find_location(&doc, "a").expect("a should be located");
        let target = find_location(&doc, "c").expect("c should be located");

        let mut blocks = doc.to_blocks();
        TreeOperation::remove("a", source).apply(&mut blocks);
        TreeOperation::insert("a", target.at_index(1)).apply(&mut blocks);
        let moved = Document::from_blocks(blocks);

        let grid = moved.get("grid").expect("grid");
        let BlockShape::ColumnsContainer { columns } = &grid.shape else {
            panic!("grid should stay a columns container");
        };
        assert_eq!(*columns[0].children, vec!["b"]);
        assert_eq!(*columns[1].children, vec!["c", "a"]);
        assert_eq!(*columns[2].children, vec!["d"]);
    }

    #[test]
    fn test_insert_index_is_clamped() {
        let doc = Document::new().with_block(ROOT_BLOCK_ID, Block::root(["a"]));
        let location = BlockLocation {
            parent_id: ROOT_BLOCK_ID.to_string(),
            parent_shape: ParentShape::Root,
            index: 7,
            column_index: None,
            children_ids: Arc::new(vec!["a".to_string()]),
        };

        let mut blocks = doc.to_blocks();
        TreeOperation::insert("z", location).apply(&mut blocks);
        let moved = Document::from_blocks(blocks);
        assert_eq!(
            moved.children_of(ROOT_BLOCK_ID).map(|c| c.as_slice()),
            Some(&["a".to_string(), "z".to_string()][..])
        );
    }

    #[test]
    fn test_leaf_parent_is_a_no_op() {
        let doc = Document::new().with_block("text", Block::leaf("Text"));
        let location = BlockLocation {
            parent_id: "text".to_string(),
            parent_shape: ParentShape::Container,
            index: 0,
            column_index: None,
            children_ids: Arc::default(),
        };

        let mut blocks = doc.to_blocks();
        TreeOperation::insert("z", location).apply(&mut blocks);
        let after = Document::from_blocks(blocks);
        assert!(Arc::ptr_eq(
            doc.get("text").expect("text"),
            after.get("text").expect("text")
        ));
    }
}
