/// Rejected edit request; the document is left untouched when one is returned
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Invalid position {position} (must be 0-{doc_len})")]
    InvalidPosition { position: usize, doc_len: usize },
    #[error("Invalid range (position: {position}, length: {length}, doc length: {doc_len})")]
    InvalidRange {
        position: usize,
        length: usize,
        doc_len: usize,
    },
    #[error("Invalid cursor position {position} (valid range: 0-{doc_len})")]
    InvalidCursor { position: usize, doc_len: usize },
}
