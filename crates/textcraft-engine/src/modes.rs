//! Editor modes
//!
//! A closed set of states, each interpreting raw input tokens its own way.
//! Transitions are a total function of `(state, token)`: every token yields a
//! response string and a next state, unknown tokens included.

/// Active input mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditorState {
    /// Navigation and mode switching
    #[default]
    Normal,
    /// Text entry; tokens are echoed back
    Insert,
    /// Selection; `selection_start` is set once `start` is entered
    Visual { selection_start: Option<usize> },
}

const NORMAL_HELP: &str = "\
Normal Mode Commands:
i - Enter INSERT mode
v - Enter VISUAL mode
h - Show this help";

const INSERT_HELP: &str = "\
Insert Mode:
Type text to insert
ESC - Return to normal mode";

const VISUAL_HELP: &str = "\
Visual Mode:
start - Begin text selection
end <pos> - End selection at position
ESC - Return to normal mode";

const RETURNED_TO_NORMAL: &str = "Returned to NORMAL mode.";

impl EditorState {
    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Normal => "NORMAL",
            EditorState::Insert => "INSERT",
            EditorState::Visual { .. } => "VISUAL",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            EditorState::Normal => "NORMAL> ",
            EditorState::Insert => "INSERT> ",
            EditorState::Visual { .. } => "VISUAL> ",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            EditorState::Normal => NORMAL_HELP,
            EditorState::Insert => INSERT_HELP,
            EditorState::Visual { .. } => VISUAL_HELP,
        }
    }

    /// Interpret one token, returning the next state and the response to show
    pub fn handle_input(self, input: &str) -> (EditorState, String) {
        let token = input.to_lowercase();
        match self {
            EditorState::Normal => normal_input(&token),
            EditorState::Insert => insert_input(&token, input),
            EditorState::Visual { selection_start } => {
                visual_input(selection_start, &token, input)
            }
        }
    }
}

fn normal_input(token: &str) -> (EditorState, String) {
    match token {
        "i" => (
            EditorState::Insert,
            "Switched to INSERT mode. Type text, press ESC to return to normal mode.".to_string(),
        ),
        "v" => (
            EditorState::Visual {
                selection_start: None,
            },
            "Switched to VISUAL mode. Select text, press ESC to return to normal mode.".to_string(),
        ),
        "h" => (EditorState::Normal, NORMAL_HELP.to_string()),
        _ => (
            EditorState::Normal,
            "Unknown command. Type 'h' for help.".to_string(),
        ),
    }
}

fn insert_input(token: &str, raw: &str) -> (EditorState, String) {
    match token {
        "esc" => (EditorState::Normal, RETURNED_TO_NORMAL.to_string()),
        _ => (EditorState::Insert, format!("INSERT: {raw}")),
    }
}

fn visual_input(selection_start: Option<usize>, token: &str, raw: &str) -> (EditorState, String) {
    match token {
        "esc" => (EditorState::Normal, RETURNED_TO_NORMAL.to_string()),
        "start" => (
            EditorState::Visual {
                selection_start: Some(0),
            },
            "Selection started. Use 'end <pos>' to select text.".to_string(),
        ),
        _ => {
            // `end` is case-sensitive, unlike the single-word tokens
            let end = raw
                .strip_prefix("end ")
                .and_then(|pos| pos.parse::<usize>().ok());
            if let (Some(start), Some(end)) = (selection_start, end) {
                return (
                    EditorState::Visual {
                        selection_start: None,
                    },
                    format!("Selected text from {start} to {end}"),
                );
            }
            (
                EditorState::Visual { selection_start },
                "VISUAL: Use 'start' to begin selection, 'end <pos>' to finish, ESC to cancel"
                    .to_string(),
            )
        }
    }
}

/// Holds the single active [`EditorState`] and routes input to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorContext {
    state: EditorState,
}

impl EditorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_input(&mut self, input: &str) -> String {
        let (next, response) = self.state.handle_input(input);
        if next != self.state {
            log::debug!("mode {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
        response
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn prompt(&self) -> &'static str {
        self.state.prompt()
    }

    pub fn help(&self) -> &'static str {
        self.state.help()
    }
}
