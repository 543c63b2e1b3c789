//! Drag hysteresis gate.
//!
//! Pointer-move events arrive for every pixel of movement. Moving the block on
//! each of them makes the layout flicker: the dragged block jumps past the
//! hovered one, the hovered one slides under the pointer again, and so on.
//! The gate only lets a move through once the pointer has crossed the hovered
//! block's midpoint in the direction of travel.

use tracing::trace;

use blockdrop_api::Document;

use crate::mover::DropPosition;

/// Drag state tracked between pointer events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Hovering { drag_id: String, hover_id: String },
}

/// Verdict for one pointer-move event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Run the move
    Move,
    /// Pointer is over the dragged block itself
    SameBlock,
    /// Moving down but still above the hovered block's midpoint
    SuppressedAboveMidpoint,
    /// Moving up but still below the hovered block's midpoint
    SuppressedBelowMidpoint,
}

impl GateDecision {
    pub fn allows_move(self) -> bool {
        matches!(self, GateDecision::Move)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragGate {
    state: DragState,
}

impl DragGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Decide whether hovering `hover_id` should move `drag_id`.
    ///
    /// Directions come from the flattened visual order of `document`. Ids
    /// missing from that order are let through; the mover reports them.
    pub fn on_pointer_move(
        &mut self,
        document: &Document,
        drag_id: &str,
        hover_id: &str,
        drop: DropPosition,
    ) -> GateDecision {
        if drag_id == hover_id {
            self.state = DragState::Idle;
            return GateDecision::SameBlock;
        }

        self.state = DragState::Hovering {
            drag_id: drag_id.to_string(),
            hover_id: hover_id.to_string(),
        };

        let order = document.visual_order();
        let drag_index = order.iter().position(|id| id == drag_id);
        let hover_index = order.iter().position(|id| id == hover_id);

        let decision = match (drag_index, hover_index) {
            (Some(drag_index), Some(hover_index)) => {
                Self::decide(drag_index, hover_index, drop)
            }
            _ => GateDecision::Move,
        };
        trace!(
            "Gate {} over {} ({:?} -> {:?}, y={} mid={}): {:?}",
            drag_id,
            hover_id,
            drag_index,
            hover_index,
            drop.pointer_y,
            drop.hover_midpoint_y,
            decision
        );
        decision
    }

    /// Forget the drag (pointer released or drag cancelled)
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    fn decide(drag_index: usize, hover_index: usize, drop: DropPosition) -> GateDecision {
        if drag_index < hover_index && drop.pointer_y < drop.hover_midpoint_y {
            GateDecision::SuppressedAboveMidpoint
        } else if drag_index > hover_index && drop.pointer_y > drop.hover_midpoint_y {
            GateDecision::SuppressedBelowMidpoint
        } else {
            GateDecision::Move
        }
    }
}
