//! Flat, id-keyed layout document.
//!
//! A `Document` is an immutable snapshot. Cloning is O(1); edits go through
//! [`Document::from_blocks`] with a modified copy of the block map, so readers
//! holding an older snapshot never observe a change.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::block::{Block, BlockShape, ChildIds};
use crate::ApiError;

/// A layout document: block id -> block.
///
/// Map order is ascending id ("scan order"). It carries no visual meaning:
/// sibling order lives in the child lists of the parent blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Arc<BTreeMap<String, Arc<Block>>>,
}

/// A referential-integrity problem found by [`Document::integrity_issues`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityIssue {
    /// A child list references an id that is not a key of the document
    DanglingChild { parent_id: String, child_id: String },
    /// An id appears in more than one child list
    SharedChild {
        child_id: String,
        parent_ids: Vec<String>,
    },
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityIssue::DanglingChild {
                parent_id,
                child_id,
            } => write!(f, "{} lists unknown child {}", parent_id, child_id),
            IntegrityIssue::SharedChild {
                child_id,
                parent_ids,
            } => write!(
                f,
                "{} is listed by several parents: {}",
                child_id,
                parent_ids.join(", ")
            ),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already built block map as a snapshot
    pub fn from_blocks(blocks: BTreeMap<String, Arc<Block>>) -> Self {
        Self {
            blocks: Arc::new(blocks),
        }
    }

    /// Builder: add or replace a block
    pub fn with_block(self, id: impl Into<String>, block: Block) -> Self {
        let mut blocks = self.to_blocks();
        blocks.insert(id.into(), Arc::new(block));
        Self::from_blocks(blocks)
    }

    /// Shallow copy of the block map (blocks stay shared)
    pub fn to_blocks(&self) -> BTreeMap<String, Arc<Block>> {
        (*self.blocks).clone()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Block>> {
        self.blocks.get(id)
    }

    /// Like [`Document::get`], but reports a missing block as an error
    pub fn block(&self, id: &str) -> Result<&Arc<Block>, ApiError> {
        self.blocks
            .get(id)
            .ok_or_else(|| ApiError::BlockNotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over all blocks in scan order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arc<Block>)> {
        self.blocks.iter()
    }

    /// Ordered children of a Root or Container block
    pub fn children_of(&self, id: &str) -> Option<&ChildIds> {
        match &self.blocks.get(id)?.shape {
            BlockShape::Root { children } | BlockShape::Container { children } => Some(children),
            BlockShape::ColumnsContainer { .. } | BlockShape::Leaf { .. } => None,
        }
    }

    /// Whether both values are the very same snapshot
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Arc::ptr_eq(&self.blocks, &other.blocks)
    }

    /// Flattened visual order of every listed child id.
    ///
    /// Depth-first pre-order from the Root block(s), descending into
    /// containers and into each column in column order. Child lists that are
    /// not reachable from a root are appended afterwards in scan order.
    pub fn visual_order(&self) -> Vec<String> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();

        let roots = self
            .blocks
            .iter()
            .filter(|(_, block)| matches!(block.shape, BlockShape::Root { .. }))
            .map(|(id, _)| id.as_str());
        for root_id in roots {
            self.flatten_into(root_id, &mut visited, &mut order);
        }

        // Detached parents (no root above them)
        for (id, block) in self.blocks.iter() {
            if block.is_parent() && !visited.contains(id.as_str()) {
                self.flatten_into(id, &mut visited, &mut order);
            }
        }

        order
    }

    fn flatten_into<'a>(
        &'a self,
        parent_id: &'a str,
        visited: &mut HashSet<&'a str>,
        order: &mut Vec<String>,
    ) {
        if !visited.insert(parent_id) {
            return;
        }
        let Some(block) = self.blocks.get(parent_id) else {
            return;
        };
        for (_, children) in block.shape.child_lists() {
            for child_id in children.iter() {
                order.push(child_id.clone());
                self.flatten_into(child_id, visited, order);
            }
        }
    }

    /// Report dangling and shared child ids.
    ///
    /// The move engine never enforces these; this is a diagnostic for
    /// callers loading documents from outside.
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        let mut parents_by_child: HashMap<&str, Vec<String>> = HashMap::new();

        for (parent_id, block) in self.blocks.iter() {
            for (_, children) in block.shape.child_lists() {
                for child_id in children.iter() {
                    if !self.blocks.contains_key(child_id) {
                        issues.push(IntegrityIssue::DanglingChild {
                            parent_id: parent_id.clone(),
                            child_id: child_id.clone(),
                        });
                    }
                    parents_by_child
                        .entry(child_id.as_str())
                        .or_default()
                        .push(parent_id.clone());
                }
            }
        }

        let mut shared: Vec<_> = parents_by_child
            .into_iter()
            .filter(|(_, parent_ids)| parent_ids.len() > 1)
            .collect();
        shared.sort_by(|a, b| a.0.cmp(b.0));
        issues.extend(shared.into_iter().map(|(child_id, parent_ids)| {
            IntegrityIssue::SharedChild {
                child_id: child_id.to_string(),
                parent_ids,
            }
        }));

        issues
    }

    /// Parse a document from its JSON form (`{ "<id>": { "type": ... } }`)
    pub fn from_json_str(json: &str) -> Result<Self, ApiError> {
        serde_json::from_str(json).map_err(|e| ApiError::InvalidDocument {
            message: e.to_string(),
        })
    }

    pub fn to_json_string_pretty(&self) -> Result<String, ApiError> {
        serde_json::to_string_pretty(self).map_err(|e| ApiError::InvalidDocument {
            message: e.to_string(),
        })
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.blocks == other.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Column, ROOT_BLOCK_ID};

    fn sample() -> Document {
        Document::new()
            .with_block(ROOT_BLOCK_ID, Block::root(["header", "cols", "footer"]))
            .with_block("header", Block::leaf("Heading"))
            .with_block(
                "cols",
                Block::columns(vec![Column::new(["left"]), Column::new(["box", "right"])]),
            )
            .with_block("left", Block::leaf("Text"))
            .with_block("box", Block::container(["inner"]))
            .with_block("inner", Block::leaf("Button"))
            .with_block("right", Block::leaf("Image"))
            .with_block("footer", Block::leaf("Text"))
    }

    #[test]
    fn test_visual_order_is_depth_first() {
        let doc = sample();
        assert_eq!(
            doc.visual_order(),
            vec!["header", "cols", "left", "box", "inner", "right", "footer"]
        );
    }

    #[test]
    fn test_visual_order_appends_detached_parents() {
        let doc = sample()
            .with_block("orphan", Block::container(["loose"]))
            .with_block("loose", Block::leaf("Text"));
        let order = doc.visual_order();
        assert_eq!(order.last().map(String::as_str), Some("loose"));
        assert_eq!(order.len(), 8);
    }

    #[test]
    fn test_visual_order_survives_self_containing_container() {
        let doc = Document::new()
            .with_block(ROOT_BLOCK_ID, Block::root(["loop"]))
            .with_block("loop", Block::container(["loop"]));
        assert_eq!(doc.visual_order(), vec!["loop", "loop"]);
    }

    #[test]
    fn test_integrity_issues() {
        assert!(sample().integrity_issues().is_empty());

        let doc = sample()
            .with_block("box", Block::container(["inner", "ghost", "left"]));
        let issues = doc.integrity_issues();
        assert_eq!(
            issues,
            vec![
                IntegrityIssue::DanglingChild {
                    parent_id: "box".to_string(),
                    child_id: "ghost".to_string(),
                },
                IntegrityIssue::SharedChild {
                    child_id: "left".to_string(),
                    parent_ids: vec!["box".to_string(), "cols".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_clone_shares_snapshot() {
        let doc = sample();
        let copy = doc.clone();
        assert!(doc.ptr_eq(&copy));

        let edited = doc.clone().with_block("footer", Block::leaf("Divider"));
        assert!(!doc.ptr_eq(&edited));
        assert_eq!(
            doc.get("footer").map(|b| &b.shape),
            Some(&BlockShape::Leaf {
                kind: "Text".to_string()
            })
        );
        assert!(Arc::ptr_eq(
            doc.get("header").expect("header"),
            edited.get("header").expect("header")
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample();
        let json = doc.to_json_string_pretty().expect("Failed to serialize");
        let parsed = Document::from_json_str(&json).expect("Failed to parse");
        assert_eq!(doc, parsed);
        assert_eq!(doc.children_of(ROOT_BLOCK_ID).map(|c| c.len()), Some(3));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = Document::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, ApiError::InvalidDocument { .. }));
        assert!(matches!(
            sample().block("nope"),
            Err(ApiError::BlockNotFound { .. })
        ));
    }
}
