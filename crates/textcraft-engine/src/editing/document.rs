use std::collections::BTreeMap;

use serde::Serialize;

use crate::editing::TextFormat;

/// Text buffer with a sparse per-character formatting overlay
///
/// Content is a linear sequence of `char` slots addressed by zero-based
/// offsets. Formatting is kept in an ordered map from offset to
/// [`TextFormat`]; offsets without an entry are unformatted.
///
/// ## Shift-on-mutation
///
/// Every key in `formatting` addresses the *current* content. Inserting or
/// deleting text therefore moves every key at or after the mutation point by
/// the signed length of the edit, in one pass over that tail of the map. The
/// cost is proportional to the number of formatted offsets after the edit,
/// not to the document length.
///
/// ## Primitive contract
///
/// The four primitives (`insert_text`, `delete_text`, `apply_format`,
/// `remove_format`) do not validate their arguments against the caller's
/// intent; that is the job of the command layer
/// ([`Cmd`](crate::editing::Cmd)). They never panic: out-of-range positions
/// and lengths are clamped to the content bounds.
///
/// ```rust
/// # use textcraft_engine::editing::{Document, TextFormat};
/// let mut doc = Document::new();
/// doc.insert_text(0, "Hello");
/// doc.apply_format(0, 5, TextFormat::BOLD);
/// doc.insert_text(0, ">> ");
///
/// assert_eq!(doc.formatted_text(), ">> <b>Hello</b>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    content: Vec<char>,
    formatting: BTreeMap<usize, TextFormat>,
}

/// Summary figures shown by the editor's status and stats screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub length: usize,
    pub words: usize,
    pub lines: usize,
    pub formatted_chars: usize,
    pub formatted_percent: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content as a `String`
    pub fn text(&self) -> String {
        self.content.iter().collect()
    }

    /// Number of character slots
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Read access to the sparse formatting map
    pub fn formatting(&self) -> &BTreeMap<usize, TextFormat> {
        &self.formatting
    }

    pub fn format_at(&self, offset: usize) -> Option<TextFormat> {
        self.formatting.get(&offset).copied()
    }

    /// Copy of `length` characters starting at `position`, clamped to the content
    pub fn slice(&self, position: usize, length: usize) -> String {
        let range = self.clamp_range(position, length);
        self.content[range].iter().collect()
    }

    /// Formatting entries inside `[position, position + length)`
    pub fn formatting_in(
        &self,
        position: usize,
        length: usize,
    ) -> impl Iterator<Item = (usize, TextFormat)> + '_ {
        let range = self.clamp_range(position, length);
        self.formatting.range(range).map(|(k, f)| (*k, *f))
    }

    /// Splice `text` in at `position` and shift formatting keys `>= position`
    /// right by the inserted character count
    pub fn insert_text(&mut self, position: usize, text: &str) {
        let position = position.min(self.content.len());
        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        if count == 0 {
            return;
        }

        self.content.splice(position..position, inserted);

        let tail = self.formatting.split_off(&position);
        self.formatting
            .extend(tail.into_iter().map(|(offset, format)| (offset + count, format)));

        log::trace!("inserted {count} chars at {position}");
    }

    /// Remove `length` characters at `position`, dropping their formatting and
    /// shifting later keys left by `length`
    pub fn delete_text(&mut self, position: usize, length: usize) {
        let range = self.clamp_range(position, length);
        if range.is_empty() {
            return;
        }
        let (start, end) = (range.start, range.end);
        let removed = end - start;

        self.content.drain(range);

        // split into [.., start) | [start, end) | [end, ..); the middle is discarded
        let mut deleted = self.formatting.split_off(&start);
        let after = deleted.split_off(&end);
        self.formatting
            .extend(after.into_iter().map(|(offset, format)| (offset - removed, format)));

        log::trace!("deleted {removed} chars at {start}");
    }

    /// Set `format` on every offset in `[position, position + length)`
    pub fn apply_format(&mut self, position: usize, length: usize, format: TextFormat) {
        for offset in self.clamp_range(position, length) {
            self.formatting.insert(offset, format);
        }
    }

    /// Clear formatting on every offset in `[position, position + length)`
    pub fn remove_format(&mut self, position: usize, length: usize) {
        for offset in self.clamp_range(position, length) {
            self.formatting.remove(&offset);
        }
    }

    /// Render the content with `<b>`/`<i>` markers around each format run
    ///
    /// A change of format closes the previous run before opening the next one,
    /// so markers never interleave.
    pub fn formatted_text(&self) -> String {
        let mut out = String::with_capacity(self.content.len() + self.formatting.len());
        let mut current: Option<TextFormat> = None;

        for (offset, ch) in self.content.iter().enumerate() {
            let format = self.format_at(offset);
            if format != current {
                if let Some(previous) = current {
                    out.push_str(previous.close_tag());
                }
                if let Some(next) = format {
                    out.push_str(next.open_tag());
                }
                current = format;
            }
            out.push(*ch);
        }

        if let Some(previous) = current {
            out.push_str(previous.close_tag());
        }
        out
    }

    pub fn stats(&self) -> DocumentStats {
        let text = self.text();
        let length = self.content.len();
        let formatted_chars = self.formatting.len();
        DocumentStats {
            length,
            words: text.split_whitespace().count(),
            lines: if length == 0 { 0 } else { text.split('\n').count() },
            formatted_chars,
            formatted_percent: if length == 0 {
                0
            } else {
                formatted_chars * 100 / length
            },
        }
    }

    fn clamp_range(&self, position: usize, length: usize) -> std::ops::Range<usize> {
        let len = self.content.len();
        let start = position.min(len);
        let end = position.saturating_add(length).min(len);
        start..end
    }
}
