use crate::editing::{Cmd, Document, EditError, History, TextFormat};
use crate::modes::EditorContext;
use crate::observers::{DocumentSubject, NotifyError, ObserverId, SharedObserver};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] EditError),
    /// The edit was committed but an observer failed while being told about it
    #[error("change applied but notification failed: {0}")]
    Notify(#[from] NotifyError),
}

/// One editing session: a document, its history, the active mode, the cursor
/// and the observers watching them
///
/// Every successful mutation notifies observers of the document change and,
/// where the edit moves the cursor, of the new cursor position. Notification
/// never rolls an edit back.
#[derive(Debug, Default)]
pub struct EditorSession {
    document: Document,
    history: History,
    context: EditorContext,
    subject: DocumentSubject,
    cursor: usize,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn attach(&mut self, observer: SharedObserver) -> ObserverId {
        self.subject.attach(observer)
    }

    pub fn detach(&mut self, id: ObserverId) -> Option<SharedObserver> {
        self.subject.detach(id)
    }

    pub fn observer_count(&self) -> usize {
        self.subject.len()
    }

    /// Insert `text` at `position`; the cursor moves to the end of the insertion
    ///
    /// # Errors
    ///
    /// [`SessionError::Edit`] when `position` is past the end of the document.
    pub fn insert(&mut self, position: usize, text: &str) -> Result<(), SessionError> {
        self.history
            .execute_command(Cmd::insert(position, text), &mut self.document)?;
        self.cursor = position + text.chars().count();
        self.notify_edit(true)
    }

    /// Delete `length` characters at `position`, returning the removed text;
    /// the cursor moves to `position`
    ///
    /// # Errors
    ///
    /// [`SessionError::Edit`] when the range exceeds the document.
    pub fn delete(&mut self, position: usize, length: usize) -> Result<String, SessionError> {
        self.history
            .execute_command(Cmd::delete(position, length), &mut self.document)?;
        let removed = self.last_deleted_text();
        self.cursor = position.min(self.document.len());
        self.notify_edit(true)?;
        Ok(removed)
    }

    /// # Errors
    ///
    /// [`SessionError::Edit`] when the range exceeds the document.
    pub fn format(
        &mut self,
        position: usize,
        length: usize,
        format: TextFormat,
    ) -> Result<(), SessionError> {
        self.history
            .execute_command(Cmd::format(position, length, format), &mut self.document)?;
        self.notify_edit(false)
    }

    /// Undo the last applied command; `Ok(false)` when there was nothing to undo
    ///
    /// # Errors
    ///
    /// [`SessionError::Notify`] when an observer failed after the undo.
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        if !self.history.undo(&mut self.document) {
            return Ok(false);
        }
        let cursor_moved = self.clamp_cursor();
        self.notify_edit(cursor_moved)?;
        Ok(true)
    }

    /// Redo the next undone command; `Ok(false)` when there was nothing to redo
    ///
    /// # Errors
    ///
    /// [`SessionError::Notify`] when an observer failed after the redo.
    pub fn redo(&mut self) -> Result<bool, SessionError> {
        if !self.history.redo(&mut self.document) {
            return Ok(false);
        }
        let cursor_moved = self.clamp_cursor();
        self.notify_edit(cursor_moved)?;
        Ok(true)
    }

    /// # Errors
    ///
    /// [`SessionError::Edit`] when `position` is outside `0..=len`.
    pub fn move_cursor(&mut self, position: usize) -> Result<(), SessionError> {
        if position > self.document.len() {
            return Err(EditError::InvalidCursor {
                position,
                doc_len: self.document.len(),
            }
            .into());
        }
        self.cursor = position;
        self.subject.notify_cursor_moved(position)?;
        Ok(())
    }

    /// Route a token to the active mode, returning its response
    pub fn handle_mode_input(&mut self, input: &str) -> String {
        self.context.handle_input(input)
    }

    fn last_deleted_text(&self) -> String {
        self.history
            .current_index()
            .and_then(|index| self.history.commands().nth(index))
            .and_then(|(_, cmd, _)| cmd.deleted_text())
            .unwrap_or_default()
            .to_string()
    }

    /// Undo/redo can shrink the document under the cursor; returns whether
    /// the cursor had to move
    fn clamp_cursor(&mut self) -> bool {
        let len = self.document.len();
        if self.cursor > len {
            self.cursor = len;
            return true;
        }
        false
    }

    fn notify_edit(&self, cursor_moved: bool) -> Result<(), SessionError> {
        let changed = self.subject.notify_document_changed(&self.document);
        let moved = if cursor_moved {
            self.subject.notify_cursor_moved(self.cursor)
        } else {
            Ok(())
        };
        changed?;
        moved?;
        Ok(())
    }
}
