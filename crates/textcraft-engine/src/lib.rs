pub mod editing;
pub mod modes;
pub mod observers;
pub mod session;

// Re-export key types for easier usage
pub use editing::{Cmd, Document, DocumentStats, EditError, History, TextFormat};
pub use modes::{EditorContext, EditorState};
pub use observers::{
    DocumentObserver, DocumentSubject, LoggingObserver, NotifyError, ObserverError, ObserverId,
    SharedObserver, StatisticsObserver,
};
pub use session::{EditorSession, SessionError};
