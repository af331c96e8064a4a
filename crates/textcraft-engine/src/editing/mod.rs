/*!
 * # Editing Core
 *
 * The mutable side of the engine: a [`Document`] with a sparse formatting
 * overlay, reversible [`Cmd`]s that mutate it, and a [`History`] that owns
 * executed commands and replays them for undo/redo.
 *
 * ## Edit loop
 *
 * 1. The caller builds a `Cmd` (`Cmd::insert`, `Cmd::delete`, `Cmd::format`)
 * 2. `History::execute_command` validates and applies it; rejected commands
 *    return an [`EditError`] and leave both document and history untouched
 * 3. `History::undo` / `History::redo` walk the stack strictly in order
 *
 * ```rust
 * use textcraft_engine::editing::*;
 *
 * let mut doc = Document::new();
 * let mut history = History::new();
 *
 * history.execute_command(Cmd::insert(0, "Hello"), &mut doc).unwrap();
 * history.execute_command(Cmd::format(0, 5, TextFormat::BOLD), &mut doc).unwrap();
 * assert_eq!(doc.formatted_text(), "<b>Hello</b>");
 *
 * assert!(history.undo(&mut doc));
 * assert_eq!(doc.formatted_text(), "Hello");
 * ```
 *
 * ## Module Structure
 *
 * - **`document`**: content buffer, formatting map and the shift-on-mutation primitives
 * - **`format`**: `TextFormat` flags and their markup
 * - **`commands`**: `Cmd` and the undo state each command captures
 * - **`history`**: the undo/redo log
 * - **`error`**: `EditError`
 */

pub mod commands;
pub mod document;
pub mod error;
pub mod format;
pub mod history;

pub use commands::Cmd;
pub use document::{Document, DocumentStats};
pub use error::EditError;
pub use format::TextFormat;
pub use history::History;
