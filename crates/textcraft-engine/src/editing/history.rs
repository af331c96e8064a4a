use crate::editing::{Cmd, Document, EditError};

/// Linear undo/redo log of executed commands
///
/// Entries `0..applied` have been applied to the document and are undone in
/// reverse order; entries `applied..` were undone and can be redone in
/// forward order. Executing a new command while redo entries exist discards
/// them: after diverging, the old future is unreachable.
#[derive(Debug, Default)]
pub struct History {
    commands: Vec<Cmd>,
    applied: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `cmd` and execute it against `doc`
    ///
    /// Any redo entries are discarded before the command runs, whether or not
    /// it succeeds.
    ///
    /// # Errors
    ///
    /// Returns the command's [`EditError`] when it is rejected. The document is
    /// left unchanged and the command is not recorded.
    pub fn execute_command(&mut self, mut cmd: Cmd, doc: &mut Document) -> Result<(), EditError> {
        if self.can_redo() {
            log::debug!(
                "discarding {} redo entries",
                self.commands.len() - self.applied
            );
            self.commands.truncate(self.applied);
        }

        if let Err(err) = cmd.execute(doc) {
            log::debug!("rejected {cmd}: {err}");
            return Err(err);
        }

        log::debug!("executed {cmd}");
        self.commands.push(cmd);
        self.applied += 1;
        Ok(())
    }

    /// Undo the most recently applied command; `false` when there is none
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.applied -= 1;
        let cmd = &mut self.commands[self.applied];
        cmd.undo(doc);
        log::debug!("undid {cmd}");
        true
    }

    /// Redo the next undone command; `false` when there is none
    pub fn redo(&mut self, doc: &mut Document) -> bool {
        if !self.can_redo() {
            return false;
        }
        let cmd = &mut self.commands[self.applied];
        cmd.redo(doc);
        self.applied += 1;
        log::debug!("redid {}", self.commands[self.applied - 1]);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.commands.len()
    }

    /// Index of the last applied command, `None` when nothing is applied
    pub fn current_index(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded commands in execution order, flagged with whether each is
    /// currently applied
    pub fn commands(&self) -> impl Iterator<Item = (usize, &Cmd, bool)> + '_ {
        self.commands
            .iter()
            .enumerate()
            .map(move |(index, cmd)| (index, cmd, index < self.applied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::TextFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_history_has_nothing_to_undo_or_redo() {
        let mut history = History::new();
        let mut doc = Document::new();

        assert!(!history.undo(&mut doc));
        assert!(!history.redo(&mut doc));
        assert_eq!(history.current_index(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn test_execute_advances_cursor() {
        let mut history = History::new();
        let mut doc = Document::new();

        history.execute_command(Cmd::insert(0, "ab"), &mut doc).unwrap();
        history.execute_command(Cmd::insert(2, "cd"), &mut doc).unwrap();

        assert_eq!(history.current_index(), Some(1));
        assert!(history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(doc.text(), "abcd");
    }

    #[test]
    fn test_undo_redo_walk_the_stack_in_order() {
        let mut history = History::new();
        let mut doc = Document::new();
        history.execute_command(Cmd::insert(0, "one"), &mut doc).unwrap();
        history.execute_command(Cmd::insert(3, " two"), &mut doc).unwrap();
        history
            .execute_command(Cmd::format(0, 3, TextFormat::BOLD), &mut doc)
            .unwrap();

        assert!(history.undo(&mut doc));
        assert!(history.undo(&mut doc));
        assert_eq!(doc.text(), "one");
        assert_eq!(history.current_index(), Some(0));

        assert!(history.redo(&mut doc));
        assert!(history.redo(&mut doc));
        assert!(!history.redo(&mut doc));
        assert_eq!(doc.formatted_text(), "<b>one</b> two");
    }

    #[test]
    fn test_new_command_after_undo_discards_redo_branch() {
        let mut history = History::new();
        let mut doc = Document::new();
        history.execute_command(Cmd::insert(0, "abc"), &mut doc).unwrap();
        history.execute_command(Cmd::delete(0, 1), &mut doc).unwrap();
        history.undo(&mut doc);
        assert!(history.can_redo());

        history.execute_command(Cmd::insert(3, "d"), &mut doc).unwrap();

        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(doc.text(), "abcd");
    }

    #[test]
    fn test_failed_command_after_undo_still_drops_redo_branch() {
        let mut history = History::new();
        let mut doc = Document::new();
        history.execute_command(Cmd::insert(0, "abc"), &mut doc).unwrap();
        history.execute_command(Cmd::insert(3, "def"), &mut doc).unwrap();
        history.undo(&mut doc);

        let result = history.execute_command(Cmd::delete(2, 5), &mut doc);

        assert!(result.is_err());
        assert_eq!(history.len(), 1);
        assert!(!history.can_redo());
        assert_eq!(history.current_index(), Some(0));
        assert_eq!(doc.text(), "abc");
    }

    #[test]
    fn test_commands_listing_marks_applied_entries() {
        let mut history = History::new();
        let mut doc = Document::new();
        history.execute_command(Cmd::insert(0, "Hi"), &mut doc).unwrap();
        history.execute_command(Cmd::delete(0, 1), &mut doc).unwrap();
        history.undo(&mut doc);

        let listing: Vec<(usize, String, bool)> = history
            .commands()
            .map(|(index, cmd, applied)| (index, cmd.to_string(), applied))
            .collect();

        assert_eq!(
            listing,
            vec![
                (0, "Insert 'Hi' at position 0".to_string(), true),
                (1, "Delete 1 characters from position 0".to_string(), false),
            ]
        );
    }
}
