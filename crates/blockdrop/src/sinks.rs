//! Output sinks of an editing session.
//!
//! The session publishes every new document snapshot and every selection
//! change through these traits. Both are fire-and-forget: a sink must not
//! call back into the session.

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use blockdrop_api::Document;

/// Receives the document snapshot after every move
pub trait DocumentSink: Send + Sync {
    fn replace_document(&self, document: Document);
}

/// Receives the id of the block to select after a move
pub trait SelectionSink: Send + Sync {
    fn set_selected(&self, block_id: &str);
}

/// Sink pair backed by `tokio::sync::watch` channels.
///
/// Subscribers only ever see whole snapshots; a slow subscriber skips
/// intermediate ones and gets the latest.
///
/// # Example
///
/// ```rust,no_run
/// use blockdrop::ChannelSinks;
/// use blockdrop_api::Document;
/// use tokio_stream::StreamExt;
///
/// async fn example() {
///     let sinks = ChannelSinks::new(Document::new());
///     let mut documents = sinks.documents();
///     while let Some(document) = documents.next().await {
///         println!("{} blocks", document.len());
///     }
/// }
/// ```
#[derive(Debug)]
pub struct ChannelSinks {
    documents: watch::Sender<Document>,
    selection: watch::Sender<Option<String>>,
}

impl ChannelSinks {
    pub fn new(initial: Document) -> Self {
        let (documents, _) = watch::channel(initial);
        let (selection, _) = watch::channel(None);
        Self {
            documents,
            selection,
        }
    }

    /// Stream of document snapshots, starting with the current one
    pub fn documents(&self) -> WatchStream<Document> {
        WatchStream::new(self.documents.subscribe())
    }

    /// Stream of selected block ids, starting with the current one
    pub fn selection(&self) -> WatchStream<Option<String>> {
        WatchStream::new(self.selection.subscribe())
    }

    /// Latest published snapshot
    pub fn current_document(&self) -> Document {
        self.documents.borrow().clone()
    }

    /// Latest selected block id
    pub fn selected(&self) -> Option<String> {
        self.selection.borrow().clone()
    }
}

impl DocumentSink for ChannelSinks {
    fn replace_document(&self, document: Document) {
        self.documents.send_replace(document);
    }
}

impl SelectionSink for ChannelSinks {
    fn set_selected(&self, block_id: &str) {
        self.selection.send_replace(Some(block_id.to_string()));
    }
}
