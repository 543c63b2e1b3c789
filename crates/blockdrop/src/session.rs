use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use blockdrop_api::{ApiError, Document};
use blockdrop_core::{
    try_move_block, DragGate, DropPosition, GateDecision, MoveError, MoveOutcome,
};

use crate::config::EditorConfig;
use crate::sinks::{ChannelSinks, DocumentSink, SelectionSink};

/// Pointer events driving a drag, as delivered by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Pointer pressed on a block: start dragging it
    Down { block: String },
    /// Pointer moved over `hover`
    Move {
        hover: String,
        pointer_y: f64,
        hover_midpoint_y: f64,
    },
    /// Pointer released
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Same list, new position
    Reorder,
    /// Moved to another parent or column
    Relocate,
}

/// What a pointer event did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum DragReport {
    DragStarted,
    DragEnded,
    /// Pointer moved with no drag in progress
    Ignored,
    /// The hysteresis gate held the move back
    Suppressed(GateDecision),
    /// Move evaluated, nothing changed
    Unchanged,
    /// A new snapshot was published
    Moved(MoveKind),
    /// An endpoint vanished from the document; the move was dropped
    Aborted { id: String },
}

/// Owns the current document snapshot and drives drag gestures over it.
///
/// Events are processed one at a time; each either publishes one complete
/// snapshot or leaves the current one in place.
pub struct EditorSession {
    document: Document,
    config: EditorConfig,
    gate: DragGate,
    dragging: Option<String>,
    document_sink: Arc<dyn DocumentSink>,
    selection_sink: Arc<dyn SelectionSink>,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("blocks", &self.document.len())
            .field("config", &self.config)
            .field("dragging", &self.dragging)
            .field("gate", &self.gate)
            .finish()
    }
}

impl EditorSession {
    pub fn new(
        document: Document,
        config: EditorConfig,
        document_sink: Arc<dyn DocumentSink>,
        selection_sink: Arc<dyn SelectionSink>,
    ) -> Self {
        Self {
            document,
            config,
            gate: DragGate::new(),
            dragging: None,
            document_sink,
            selection_sink,
        }
    }

    /// Session publishing into a fresh `ChannelSinks` pair
    pub fn with_channels(document: Document, config: EditorConfig) -> (Self, Arc<ChannelSinks>) {
        let sinks = Arc::new(ChannelSinks::new(document.clone()));
        let session = Self::new(document, config, sinks.clone(), sinks.clone());
        (session, sinks)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Block currently being dragged
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Swap in a snapshot produced outside the session (load, undo, remote edit).
    ///
    /// A drag in progress continues against the new snapshot.
    pub fn load_document(&mut self, document: Document) {
        self.document = document;
        self.document_sink.replace_document(self.document.clone());
    }

    pub fn handle(&mut self, event: &PointerEvent) -> Result<DragReport, ApiError> {
        match event {
            PointerEvent::Down { block } => {
                self.begin_drag(block)?;
                Ok(DragReport::DragStarted)
            }
            PointerEvent::Move {
                hover,
                pointer_y,
                hover_midpoint_y,
            } => Ok(self.pointer_move(hover, DropPosition::new(*pointer_y, *hover_midpoint_y))),
            PointerEvent::Up => {
                self.end_drag();
                Ok(DragReport::DragEnded)
            }
        }
    }

    /// Start dragging `block_id`. Replaces a drag already in progress.
    pub fn begin_drag(&mut self, block_id: &str) -> Result<(), ApiError> {
        self.document.block(block_id)?;
        self.gate.reset();
        self.dragging = Some(block_id.to_string());
        debug!("Drag started on {}", block_id);
        Ok(())
    }

    /// Pointer moved over `hover_id` while dragging.
    pub fn pointer_move(&mut self, hover_id: &str, drop: DropPosition) -> DragReport {
        let Some(drag_id) = self.dragging.clone() else {
            return DragReport::Ignored;
        };

        if self.config.hysteresis {
            match self.gate.on_pointer_move(&self.document, &drag_id, hover_id, drop) {
                GateDecision::Move => {}
                GateDecision::SameBlock => return DragReport::Unchanged,
                suppressed => return DragReport::Suppressed(suppressed),
            }
        }

        match try_move_block(&self.document, &drag_id, hover_id, drop) {
            Ok(MoveOutcome::Unchanged) => DragReport::Unchanged,
            Ok(MoveOutcome::Reordered { document }) => {
                self.publish(&drag_id, document, MoveKind::Reorder)
            }
            Ok(MoveOutcome::Relocated { document }) => {
                self.publish(&drag_id, document, MoveKind::Relocate)
            }
            Err(MoveError::LocationNotFound { id }) => {
                warn!(
                    "Dropping move of {} onto {}: {} is not in the document",
                    drag_id, hover_id, id
                );
                DragReport::Aborted { id }
            }
        }
    }

    /// Pointer released. Returns the block that was being dragged.
    pub fn end_drag(&mut self) -> Option<String> {
        self.gate.reset();
        let ended = self.dragging.take();
        if let Some(id) = &ended {
            debug!("Drag ended on {}", id);
        }
        ended
    }

    fn publish(&mut self, drag_id: &str, document: Document, kind: MoveKind) -> DragReport {
        self.document = document;
        self.document_sink.replace_document(self.document.clone());
        if self.config.select_moved_block {
            self.selection_sink.set_selected(drag_id);
        }
        DragReport::Moved(kind)
    }
}
