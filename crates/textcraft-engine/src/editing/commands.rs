use std::collections::BTreeMap;

use crate::editing::{Document, EditError, TextFormat};

/// Reversible edits that can be applied to a [`Document`]
///
/// A command validates its range in [`execute`](Cmd::execute) and, when the
/// edit is destructive, captures what it is about to overwrite. That captured
/// state is what makes [`undo`](Cmd::undo) exact. `undo` and `redo` assume the
/// document is in the state the command left it in, which
/// [`History`](crate::editing::History) guarantees by replaying strictly in
/// stack order.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertText(InsertText),
    DeleteRange(DeleteRange),
    ApplyFormat(ApplyFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertText {
    at: usize,
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRange {
    at: usize,
    len: usize,
    /// `None` until executed
    deleted: Option<DeletedSpan>,
}

/// Text and formatting removed by a [`DeleteRange`]; format keys are relative
/// to the start of the deleted span
#[derive(Debug, Clone, PartialEq, Eq)]
struct DeletedSpan {
    text: String,
    formats: BTreeMap<usize, TextFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyFormat {
    at: usize,
    len: usize,
    format: TextFormat,
    /// Format each offset had before execution; `None` until executed
    previous: Option<Vec<(usize, Option<TextFormat>)>>,
}

impl Cmd {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Cmd::InsertText(InsertText {
            at,
            text: text.into(),
        })
    }

    pub fn delete(at: usize, len: usize) -> Self {
        Cmd::DeleteRange(DeleteRange {
            at,
            len,
            deleted: None,
        })
    }

    pub fn format(at: usize, len: usize, format: TextFormat) -> Self {
        Cmd::ApplyFormat(ApplyFormat {
            at,
            len,
            format,
            previous: None,
        })
    }

    /// Validate against `doc` and apply the edit
    ///
    /// # Errors
    ///
    /// Returns [`EditError`] when the position or range falls outside the
    /// document. Nothing is mutated or captured in that case.
    pub fn execute(&mut self, doc: &mut Document) -> Result<(), EditError> {
        match self {
            Cmd::InsertText(cmd) => cmd.execute(doc),
            Cmd::DeleteRange(cmd) => cmd.execute(doc),
            Cmd::ApplyFormat(cmd) => cmd.execute(doc),
        }
    }

    pub fn undo(&mut self, doc: &mut Document) {
        match self {
            Cmd::InsertText(cmd) => cmd.undo(doc),
            Cmd::DeleteRange(cmd) => cmd.undo(doc),
            Cmd::ApplyFormat(cmd) => cmd.undo(doc),
        }
    }

    pub fn redo(&mut self, doc: &mut Document) {
        match self {
            Cmd::InsertText(cmd) => cmd.redo(doc),
            Cmd::DeleteRange(cmd) => cmd.redo(doc),
            Cmd::ApplyFormat(cmd) => cmd.redo(doc),
        }
    }

    /// Text removed by an executed delete
    pub fn deleted_text(&self) -> Option<&str> {
        match self {
            Cmd::DeleteRange(DeleteRange {
                deleted: Some(span),
                ..
            }) => Some(&span.text),
            _ => None,
        }
    }
}

impl InsertText {
    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn execute(&mut self, doc: &mut Document) -> Result<(), EditError> {
        if self.at > doc.len() {
            return Err(EditError::InvalidPosition {
                position: self.at,
                doc_len: doc.len(),
            });
        }
        doc.insert_text(self.at, &self.text);
        Ok(())
    }

    fn undo(&self, doc: &mut Document) {
        doc.delete_text(self.at, self.char_len());
    }

    fn redo(&self, doc: &mut Document) {
        doc.insert_text(self.at, &self.text);
    }
}

impl DeleteRange {
    fn execute(&mut self, doc: &mut Document) -> Result<(), EditError> {
        check_range(doc, self.at, self.len)?;

        let formats = doc
            .formatting_in(self.at, self.len)
            .map(|(offset, format)| (offset - self.at, format))
            .collect();
        self.deleted = Some(DeletedSpan {
            text: doc.slice(self.at, self.len),
            formats,
        });

        doc.delete_text(self.at, self.len);
        Ok(())
    }

    fn undo(&self, doc: &mut Document) {
        let Some(span) = &self.deleted else {
            log::warn!("undo of delete at {} that never executed", self.at);
            return;
        };
        doc.insert_text(self.at, &span.text);
        // stamped per offset, matching the granularity they were captured at
        for (offset, format) in &span.formats {
            doc.apply_format(self.at + offset, 1, *format);
        }
    }

    fn redo(&self, doc: &mut Document) {
        let Some(span) = &self.deleted else {
            log::warn!("redo of delete at {} that never executed", self.at);
            return;
        };
        doc.delete_text(self.at, span.text.chars().count());
    }
}

impl ApplyFormat {
    fn execute(&mut self, doc: &mut Document) -> Result<(), EditError> {
        check_range(doc, self.at, self.len)?;

        self.previous = Some(
            (self.at..self.at + self.len)
                .map(|offset| (offset, doc.format_at(offset)))
                .collect(),
        );

        doc.apply_format(self.at, self.len, self.format);
        Ok(())
    }

    fn undo(&self, doc: &mut Document) {
        let Some(previous) = &self.previous else {
            log::warn!("undo of format at {} that never executed", self.at);
            return;
        };
        for (offset, format) in previous {
            match format {
                Some(format) => doc.apply_format(*offset, 1, *format),
                None => doc.remove_format(*offset, 1),
            }
        }
    }

    fn redo(&self, doc: &mut Document) {
        doc.apply_format(self.at, self.len, self.format);
    }
}

fn check_range(doc: &Document, position: usize, length: usize) -> Result<(), EditError> {
    match position.checked_add(length) {
        Some(end) if end <= doc.len() => Ok(()),
        _ => Err(EditError::InvalidRange {
            position,
            length,
            doc_len: doc.len(),
        }),
    }
}

impl std::fmt::Display for Cmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cmd::InsertText(cmd) => write!(f, "Insert '{}' at position {}", cmd.text, cmd.at),
            Cmd::DeleteRange(cmd) => {
                write!(f, "Delete {} characters from position {}", cmd.len, cmd.at)
            }
            Cmd::ApplyFormat(cmd) => write!(
                f,
                "Format {} characters at position {} as {}",
                cmd.len, cmd.at, cmd.format
            ),
        }
    }
}
