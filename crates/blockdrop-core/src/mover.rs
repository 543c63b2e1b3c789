//! Drag-and-drop moves of a single block.
//!
//! A move resolves both endpoints with [`find_location`] and then either
//! permutes one list (same parent, same column) or relocates the block from
//! one list to another through a `Remove` + `Insert` operation pair.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use blockdrop_api::Document;

use crate::locator::{find_location, BlockLocation};
use crate::operation::TreeOperation;

/// Pointer position relative to the hovered block, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropPosition {
    /// Vertical pointer offset
    pub pointer_y: f64,
    /// Vertical midpoint of the hovered block
    pub hover_midpoint_y: f64,
}

impl DropPosition {
    pub fn new(pointer_y: f64, hover_midpoint_y: f64) -> Self {
        Self {
            pointer_y,
            hover_midpoint_y,
        }
    }

    /// Pointer over the upper half of the hovered block
    pub fn is_upper_half(&self) -> bool {
        self.pointer_y < self.hover_midpoint_y
    }
}

/// Result of a move that found both endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Dragged and hovered blocks share one list; the list was permuted
    Reordered { document: Document },
    /// The block left one list and joined another
    Relocated { document: Document },
    /// Nothing to do (block dropped on itself or on its own slot)
    Unchanged,
}

impl MoveOutcome {
    /// The new snapshot, if the move changed anything
    pub fn document(&self) -> Option<&Document> {
        match self {
            MoveOutcome::Reordered { document } | MoveOutcome::Relocated { document } => {
                Some(document)
            }
            MoveOutcome::Unchanged => None,
        }
    }

    pub fn into_document(self) -> Option<Document> {
        match self {
            MoveOutcome::Reordered { document } | MoveOutcome::Relocated { document } => {
                Some(document)
            }
            MoveOutcome::Unchanged => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// No parent lists the block (root block, or removed while dragging)
    #[error("Block {id} has no location in the document")]
    LocationNotFound { id: String },
}

/// Move `drag_id` next to `hover_id` and return the new snapshot.
///
/// Never fails: when an endpoint cannot be located the move is abandoned,
/// logged, and `document` is returned as is.
///
/// # Example
///
/// ```rust
/// use blockdrop_api::{Block, Document, ROOT_BLOCK_ID};
/// use blockdrop_core::{move_block, DropPosition};
///
/// let doc = Document::new()
///     .with_block(ROOT_BLOCK_ID, Block::root(["a", "b", "c", "d"]))
///     .with_block("a", Block::leaf("Text"))
///     .with_block("b", Block::leaf("Text"))
///     .with_block("c", Block::leaf("Text"))
///     .with_block("d", Block::leaf("Text"));
///
/// let moved = move_block(&doc, "b", "d", DropPosition::new(40.0, 20.0));
/// let order: Vec<&str> = moved
///     .children_of(ROOT_BLOCK_ID)
///     .unwrap()
///     .iter()
///     .map(String::as_str)
///     .collect();
/// assert_eq!(order, ["a", "c", "d", "b"]);
/// ```
pub fn move_block(
    document: &Document,
    drag_id: &str,
    hover_id: &str,
    drop: DropPosition,
) -> Document {
    match try_move_block(document, drag_id, hover_id, drop) {
        Ok(outcome) => outcome.into_document().unwrap_or_else(|| document.clone()),
        Err(err) => {
            warn!("Ignoring move of {} onto {}: {}", drag_id, hover_id, err);
            document.clone()
        }
    }
}

/// Like [`move_block`], but tells the caller what happened.
pub fn try_move_block(
    document: &Document,
    drag_id: &str,
    hover_id: &str,
    drop: DropPosition,
) -> Result<MoveOutcome, MoveError> {
    if drag_id == hover_id {
        return Ok(MoveOutcome::Unchanged);
    }

    let source = locate(document, drag_id)?;
    let target = locate(document, hover_id)?;

    if source.same_list(&target) {
        if source.index == target.index {
            return Ok(MoveOutcome::Unchanged);
        }

        debug!(
            "Reordering {} in {} ({:?}): {} -> {}",
            drag_id, source.parent_id, source.column_index, source.index, target.index
        );
        let operations = [
            TreeOperation::remove(drag_id, source.clone()),
            TreeOperation::insert(drag_id, target),
        ];
        return Ok(MoveOutcome::Reordered {
            document: commit(document, &operations),
        });
    }

    let insertion_index = if drop.is_upper_half() {
        target.index
    } else {
        target.index + 1
    };
    debug!(
        "Relocating {} from {} ({:?})[{}] to {} ({:?})[{}]",
        drag_id,
        source.parent_id,
        source.column_index,
        source.index,
        target.parent_id,
        target.column_index,
        insertion_index
    );

    let operations = [
        TreeOperation::remove(drag_id, source),
        TreeOperation::insert(drag_id, target.at_index(insertion_index)),
    ];
    Ok(MoveOutcome::Relocated {
        document: commit(document, &operations),
    })
}

fn locate(document: &Document, id: &str) -> Result<BlockLocation, MoveError> {
    find_location(document, id).ok_or_else(|| MoveError::LocationNotFound { id: id.to_string() })
}

/// Apply all operations to one working copy, then publish it.
fn commit(document: &Document, operations: &[TreeOperation]) -> Document {
    let mut blocks = document.to_blocks();
    for operation in operations {
        operation.apply(&mut blocks);
    }
    Document::from_blocks(blocks)
}
