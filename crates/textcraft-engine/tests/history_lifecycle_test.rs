use pretty_assertions::assert_eq;
use textcraft_engine::{Cmd, Document, History, TextFormat};

fn bold_keys(doc: &Document) -> Vec<usize> {
    doc.formatting()
        .iter()
        .filter(|(_, format)| **format == TextFormat::BOLD)
        .map(|(offset, _)| *offset)
        .collect()
}

/// Walks the insert/format/insert/undo sequence from a blank document
#[test]
fn hello_world_lifecycle() {
    let mut doc = Document::new();
    let mut history = History::new();

    history
        .execute_command(Cmd::insert(0, "Hello"), &mut doc)
        .unwrap();
    assert_eq!(doc.text(), "Hello");

    history
        .execute_command(Cmd::format(0, 5, TextFormat::BOLD), &mut doc)
        .unwrap();
    assert_eq!(doc.formatted_text(), "<b>Hello</b>");

    history
        .execute_command(Cmd::insert(5, " World"), &mut doc)
        .unwrap();
    assert_eq!(doc.text(), "Hello World");
    assert_eq!(bold_keys(&doc), vec![0, 1, 2, 3, 4]);
    assert!((5..11).all(|offset| doc.format_at(offset).is_none()));

    assert!(history.undo(&mut doc));
    assert_eq!(doc.text(), "Hello");
    assert_eq!(bold_keys(&doc), vec![0, 1, 2, 3, 4]);

    assert!(history.undo(&mut doc));
    assert!(doc.formatting().is_empty());
    assert_eq!(doc.text(), "Hello");

    assert!(history.undo(&mut doc));
    assert_eq!(doc.text(), "");
    assert!(!history.can_undo());
    assert!(!history.undo(&mut doc));
}

/// Undo right after execute restores the pre-state; redo restores the post-state
#[test]
fn undo_then_redo_restores_exact_states() {
    let mut doc = Document::new();
    let mut history = History::new();
    history
        .execute_command(Cmd::insert(0, "The quick brown fox"), &mut doc)
        .unwrap();
    history
        .execute_command(Cmd::format(4, 5, TextFormat::ITALIC), &mut doc)
        .unwrap();
    history
        .execute_command(Cmd::format(10, 9, TextFormat::BOLD), &mut doc)
        .unwrap();

    let commands = vec![
        Cmd::delete(2, 10),
        Cmd::format(0, 19, TextFormat::BOLD_ITALIC),
        Cmd::insert(9, " and lazy"),
        Cmd::delete(0, 19),
        Cmd::format(6, 6, TextFormat::BOLD),
    ];

    for cmd in commands {
        let before = doc.clone();
        let description = cmd.to_string();
        history.execute_command(cmd, &mut doc).unwrap();
        let after = doc.clone();

        assert!(history.undo(&mut doc));
        assert_eq!(doc, before, "undo of {description}");

        assert!(history.redo(&mut doc));
        assert_eq!(doc, after, "redo of {description}");

        // return to the base state for the next command
        history.undo(&mut doc);
    }
}

#[test]
fn executing_after_undo_drops_redo_entries() {
    let mut doc = Document::new();
    let mut history = History::new();
    history.execute_command(Cmd::insert(0, "a"), &mut doc).unwrap();
    history.execute_command(Cmd::insert(1, "b"), &mut doc).unwrap();
    history.execute_command(Cmd::insert(2, "c"), &mut doc).unwrap();

    history.undo(&mut doc);
    history.undo(&mut doc);
    assert!(history.can_redo());

    history.execute_command(Cmd::insert(1, "z"), &mut doc).unwrap();

    assert!(!history.can_redo());
    assert_eq!(history.len(), 2);
    assert_eq!(history.current_index(), Some(1));
    assert!(!history.redo(&mut doc));
    assert_eq!(doc.text(), "az");
}

#[test]
fn out_of_range_delete_is_rejected_without_mutation() {
    let mut doc = Document::new();
    let mut history = History::new();
    history
        .execute_command(Cmd::insert(0, "Hello"), &mut doc)
        .unwrap();
    history
        .execute_command(Cmd::format(1, 3, TextFormat::ITALIC), &mut doc)
        .unwrap();
    let before = doc.clone();

    let result = history.execute_command(Cmd::delete(3, 3), &mut doc);

    assert!(result.is_err());
    assert_eq!(doc, before);
    assert_eq!(history.len(), 2);
}

#[test]
fn rejected_command_after_undo_still_discards_redo_entries() {
    let mut doc = Document::new();
    let mut history = History::new();
    history.execute_command(Cmd::insert(0, "abc"), &mut doc).unwrap();
    history.execute_command(Cmd::insert(3, "def"), &mut doc).unwrap();
    history.undo(&mut doc);

    let result = history.execute_command(Cmd::delete(2, 50), &mut doc);

    assert!(result.is_err());
    assert_eq!(doc.text(), "abc");
    assert_eq!(history.len(), 1);
    assert!(!history.can_redo());
    assert!(!history.redo(&mut doc));
    assert!(history.undo(&mut doc));
    assert!(doc.is_empty());
}
