//! Drag-and-drop editing session for layout documents
//!
//! Wires the move engine of `blockdrop-core` to the outside world:
//! - `EditorSession`: owns the current snapshot and the drag lifecycle
//! - `DocumentSink` / `SelectionSink`: where new snapshots and selections go
//! - `ChannelSinks`: watch-channel sinks exposing snapshots as streams
//! - `EditorConfig`: YAML configuration

pub mod config;
pub mod session;
pub mod sinks;

pub use config::EditorConfig;
pub use session::{DragReport, EditorSession, MoveKind, PointerEvent};
pub use sinks::{ChannelSinks, DocumentSink, SelectionSink};
