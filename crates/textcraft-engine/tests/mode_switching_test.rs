use pretty_assertions::assert_eq;
use textcraft_engine::{EditorContext, EditorSession, EditorState};

#[test]
fn normal_insert_visual_round_trip() {
    let mut context = EditorContext::new();
    assert_eq!(context.state(), EditorState::Normal);

    context.handle_input("i");
    assert_eq!(context.state(), EditorState::Insert);
    assert_eq!(context.prompt(), "INSERT> ");

    context.handle_input("esc");
    assert_eq!(context.state(), EditorState::Normal);

    context.handle_input("v");
    assert_eq!(
        context.state(),
        EditorState::Visual {
            selection_start: None
        }
    );

    context.handle_input("start");
    let response = context.handle_input("end 5");
    assert_eq!(response, "Selected text from 0 to 5");
    assert_eq!(
        context.state(),
        EditorState::Visual {
            selection_start: None
        }
    );
}

#[test]
fn unknown_tokens_never_change_state() {
    let mut context = EditorContext::new();
    for token in ["", "x", "start", "end 3", "esc"] {
        let response = context.handle_input(token);
        assert_eq!(response, "Unknown command. Type 'h' for help.");
        assert_eq!(context.state(), EditorState::Normal);
    }
}

#[test]
fn insert_mode_echo_does_not_touch_document() {
    let mut session = EditorSession::new();
    session.handle_mode_input("i");

    let response = session.handle_mode_input("some words");

    assert_eq!(response, "INSERT: some words");
    assert!(session.document().is_empty());
    assert!(!session.history().can_undo());
}
