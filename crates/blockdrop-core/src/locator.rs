use blockdrop_api::{BlockShape, ChildIds, Document, ParentShape};

/// Where a block sits inside its parent.
///
/// Derived on demand from one snapshot. Never keep it across a move: the
/// next snapshot may have shifted every index.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLocation {
    /// ID of the block owning the child list
    pub parent_id: String,
    pub parent_shape: ParentShape,
    /// Position inside `children_ids`
    pub index: usize,
    /// Column of a `ColumnsContainer` parent, None for other shapes
    pub column_index: Option<usize>,
    /// The ordered list the block was found in
    pub children_ids: ChildIds,
}

impl BlockLocation {
    /// Whether both locations address the same ordered list
    pub fn same_list(&self, other: &BlockLocation) -> bool {
        self.parent_id == other.parent_id && self.column_index == other.column_index
    }

    /// Same list, different position
    pub fn at_index(&self, index: usize) -> Self {
        Self {
            index,
            ..self.clone()
        }
    }
}

/// Find the parent list that contains `node_id`.
///
/// Parents are searched by shape priority (Root, then Container, then
/// ColumnsContainer), each shape in scan order, columns left to right. The
/// first hit wins, so a malformed document listing an id twice still resolves
/// deterministically.
///
/// Returns None for the root block itself and for ids no parent lists.
pub fn find_location(document: &Document, node_id: &str) -> Option<BlockLocation> {
    const PRIORITY: [ParentShape; 3] = [
        ParentShape::Root,
        ParentShape::Container,
        ParentShape::ColumnsContainer,
    ];

    PRIORITY
        .iter()
        .find_map(|&shape| find_in_shape(document, node_id, shape))
}

fn find_in_shape(
    document: &Document,
    node_id: &str,
    wanted: ParentShape,
) -> Option<BlockLocation> {
    for (parent_id, block) in document.iter() {
        if block.shape.parent_shape() != Some(wanted) {
            continue;
        }

        let location = match &block.shape {
            BlockShape::Root { children } | BlockShape::Container { children } => {
                position_in(children, node_id).map(|index| BlockLocation {
                    parent_id: parent_id.clone(),
                    parent_shape: wanted,
                    index,
                    column_index: None,
                    children_ids: children.clone(),
                })
            }
            BlockShape::ColumnsContainer { columns } => {
                columns.iter().enumerate().find_map(|(column_index, column)| {
                    position_in(&column.children, node_id).map(|index| BlockLocation {
                        parent_id: parent_id.clone(),
                        parent_shape: wanted,
                        index,
                        column_index: Some(column_index),
                        children_ids: column.children.clone(),
                    })
                })
            }
            BlockShape::Leaf { .. } => None,
        };

        if location.is_some() {
            return location;
        }
    }

    None
}

fn position_in(children: &ChildIds, node_id: &str) -> Option<usize> {
    children.iter().position(|id| id == node_id)
}
