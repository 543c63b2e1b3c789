use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::Value;

/// ID of the root block in a layout document.
/// The root block is the top-level list every other block hangs off.
pub const ROOT_BLOCK_ID: &str = "root";

/// Ordered child ids of a parent block, in display order.
///
/// Shared between document snapshots: a move replaces only the lists it
/// touches, every other list keeps pointing at the same allocation.
pub type ChildIds = Arc<Vec<String>>;

// =============================================================================
// BlockShape - Discriminated union for block shapes
// =============================================================================

/// Structural shape of a block.
///
/// Only `Root`, `Container` and `ColumnsContainer` can hold children.
/// Everything else is a `Leaf` whose `kind` is an open string, so new
/// content blocks do not touch the move engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BlockShape {
    /// Document root (one ordered list of children)
    Root {
        #[serde(default)]
        children: ChildIds,
    },

    /// Single-level container (one ordered list of children)
    Container {
        #[serde(default)]
        children: ChildIds,
    },

    /// Multi-column container (one ordered list per column)
    ColumnsContainer { columns: Vec<Column> },

    /// Content block without children (Text, Image, Button, ...)
    Leaf { kind: String },
}

impl BlockShape {
    /// The parent shape of this block, or None for leaves.
    pub fn parent_shape(&self) -> Option<ParentShape> {
        match self {
            BlockShape::Root { .. } => Some(ParentShape::Root),
            BlockShape::Container { .. } => Some(ParentShape::Container),
            BlockShape::ColumnsContainer { .. } => Some(ParentShape::ColumnsContainer),
            BlockShape::Leaf { .. } => None,
        }
    }

    /// Iterate over every ordered child list of this block, in column order.
    ///
    /// Yields `(column_index, children)`; `column_index` is None for Root and
    /// Container lists.
    pub fn child_lists(&self) -> Vec<(Option<usize>, &ChildIds)> {
        match self {
            BlockShape::Root { children } | BlockShape::Container { children } => {
                vec![(None, children)]
            }
            BlockShape::ColumnsContainer { columns } => columns
                .iter()
                .enumerate()
                .map(|(index, column)| (Some(index), &column.children))
                .collect(),
            BlockShape::Leaf { .. } => Vec::new(),
        }
    }
}

/// Shape of a block that can own children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParentShape {
    Root,
    Container,
    ColumnsContainer,
}

impl std::fmt::Display for ParentShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParentShape::Root => write!(f, "root"),
            ParentShape::Container => write!(f, "container"),
            ParentShape::ColumnsContainer => write!(f, "columns"),
        }
    }
}

/// One column of a `ColumnsContainer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Column {
    /// IDs of child blocks in display order
    #[serde(default)]
    pub children: ChildIds,
}

impl Column {
    pub fn new<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            children: Arc::new(children.into_iter().map(Into::into).collect()),
        }
    }
}

// =============================================================================
// Block - The main block structure
// =============================================================================

/// A block in a layout document.
///
/// Blocks do not know their id or their parent: the id is the key in the
/// `Document`, and the parent is whichever block lists the id among its
/// children.
///
/// # Example
///
/// ```rust
/// use blockdrop_api::{Block, Value};
///
/// let heading = Block::leaf("Heading").with_property("text", "Welcome");
/// assert_eq!(heading.get_property("text"), Some(&Value::from("Welcome")));
///
/// let section = Block::container(["heading-1", "text-1"]);
/// assert_eq!(section.shape.child_lists()[0].1.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    #[serde(flatten)]
    pub shape: BlockShape,
    /// Free-form block data (style, text, urls)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Value>,
}

impl Block {
    pub fn new(shape: BlockShape) -> Self {
        Self {
            shape,
            properties: HashMap::new(),
        }
    }

    /// Create a root block with the given children
    pub fn root<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(BlockShape::Root {
            children: collect_ids(children),
        })
    }

    /// Create a single-level container with the given children
    pub fn container<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(BlockShape::Container {
            children: collect_ids(children),
        })
    }

    /// Create a columns container from its columns
    pub fn columns(columns: Vec<Column>) -> Self {
        Self::new(BlockShape::ColumnsContainer { columns })
    }

    /// Create a leaf block of the given kind
    pub fn leaf(kind: impl Into<String>) -> Self {
        Self::new(BlockShape::Leaf { kind: kind.into() })
    }

    /// Builder: set a property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property value by key
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Whether this block can own children
    pub fn is_parent(&self) -> bool {
        self.shape.parent_shape().is_some()
    }
}

fn collect_ids<I, S>(ids: I) -> ChildIds
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(ids.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_serialization_uses_type_tag() {
        let block = Block::container(["a", "b"]).with_property("backgroundColor", "#fff");
        let json = serde_json::to_value(&block).expect("Failed to serialize");

        assert_eq!(json["type"], "Container");
        assert_eq!(json["children"], serde_json::json!(["a", "b"]));
        assert_eq!(json["properties"]["backgroundColor"], "#fff");

        let deserialized: Block = serde_json::from_value(json).expect("Failed to deserialize");
        assert_eq!(block, deserialized);
    }

    #[test]
    fn test_columns_deserialization() {
        let json = r#"{
            "type": "ColumnsContainer",
            "columns": [{ "children": ["a"] }, { "children": [] }, {}]
        }"#;
        let block: Block = serde_json::from_str(json).expect("Failed to deserialize");

        let lists = block.shape.child_lists();
        assert_eq!(lists.len(), 3);
        assert_eq!(lists[0], (Some(0), &Arc::new(vec!["a".to_string()])));
        assert!(lists[2].1.is_empty());
        assert_eq!(block.shape.parent_shape(), Some(ParentShape::ColumnsContainer));
    }

    #[test]
    fn test_leaf_is_not_a_parent() {
        let block = Block::leaf("Image").with_property("url", "https://example.com/a.png");
        assert!(!block.is_parent());
        assert!(block.shape.child_lists().is_empty());
        assert_eq!(block.shape.parent_shape(), None);
    }
}
