//! Tree location and move engine for layout documents
//!
//! This crate provides the pure functions behind block drag-and-drop:
//! - `find_location`: where a block sits inside its parent's ordered children
//! - `move_block` / `try_move_block`: reorder or re-parent a dragged block
//! - `DragGate`: hysteresis deciding whether a pointer move should move at all

pub mod hysteresis;
pub mod locator;
pub mod mover;
pub mod operation;


pub use hysteresis::{DragGate, DragState, GateDecision};
pub use locator::{find_location, BlockLocation};
pub use mover::{move_block, try_move_block, DropPosition, MoveError, MoveOutcome};
pub use operation::{OperationKind, TreeOperation};
