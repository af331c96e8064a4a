use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use textcraft_config::Config;
use textcraft_engine::{EditorSession, LoggingObserver, SessionError, StatisticsObserver};

use crate::input::{Input, parse_line};

const RULE_WIDTH: usize = 70;

/// What the main loop should do after a line was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

pub struct App {
    session: EditorSession,
    statistics: Option<Rc<RefCell<StatisticsObserver>>>,
    command_count: usize,
    last_message: Option<String>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut session = EditorSession::new();

        if config.observers.logging {
            session.attach(Rc::new(RefCell::new(LoggingObserver::new("UI"))));
        }
        let statistics = config.observers.statistics.then(|| {
            let statistics = Rc::new(RefCell::new(StatisticsObserver::new()));
            session.attach(statistics.clone());
            statistics
        });

        log::debug!("attached {} observers", session.observer_count());

        Self {
            session,
            statistics,
            command_count: 0,
            last_message: None,
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn prompt(&self) -> &'static str {
        self.session.context().prompt()
    }

    /// Message produced by the most recent line, shown under the status panel
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Handle one trimmed input line
    pub fn handle_line(&mut self, line: &str) -> Step {
        let input = match parse_line(line) {
            Ok(input) => input,
            Err(err) => {
                self.last_message = Some(format!("✗ {err}"));
                return Step::Continue;
            }
        };

        let message = match input {
            Input::Quit => return Step::Quit,
            Input::Help => help_text(),
            Input::Stats => self.stats_text(),
            Input::History => self.history_text(),
            Input::Insert { position, text } => {
                self.command_count += 1;
                match self.session.insert(position, &text) {
                    Ok(()) => self.executed(format!(
                        "✓ Successfully inserted '{text}' at position {position}\n  → Cursor moved to position {}",
                        self.session.cursor()
                    )),
                    Err(err) => failure(err),
                }
            }
            Input::Delete { position, length } => {
                self.command_count += 1;
                match self.session.delete(position, length) {
                    Ok(removed) => self.executed(format!(
                        "✓ Successfully deleted {length} character(s) from position {position}\n  → Removed text: '{}'\n  → Cursor moved to position {}",
                        abbreviate(&removed),
                        self.session.cursor()
                    )),
                    Err(err) => failure(err),
                }
            }
            Input::Format {
                position,
                length,
                format,
            } => {
                self.command_count += 1;
                match self.session.format(position, length, format) {
                    Ok(()) => self.executed(format!(
                        "✓ Successfully applied {format} formatting to {length} character(s) at position {position}"
                    )),
                    Err(err) => failure(err),
                }
            }
            Input::Undo => match self.session.undo() {
                Ok(true) => "✓ Command undone successfully".to_string(),
                Ok(false) => "✗ Nothing to undo".to_string(),
                Err(err) => format!("⚠ {err}"),
            },
            Input::Redo => match self.session.redo() {
                Ok(true) => "✓ Command redone successfully".to_string(),
                Ok(false) => "✗ Nothing to redo".to_string(),
                Err(err) => format!("⚠ {err}"),
            },
            Input::Cursor(position) => match self.session.move_cursor(position) {
                Ok(()) => format!(
                    "✓ Cursor moved to position {position} (document length: {})",
                    self.session.document().len()
                ),
                Err(err) => format!("✗ {err}"),
            },
            Input::Mode(token) => self.session.handle_mode_input(&token),
        };

        self.last_message = Some(message);
        Step::Continue
    }

    fn executed(&self, message: String) -> String {
        format!("{message}\n  [Command #{} executed]", self.command_count)
    }

    /// Full editor screen: document, statistics, status and the last message
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let document = self.session.document();
        let stats = document.stats();
        let history = self.session.history();
        let context = self.session.context();

        writeln!(out, "{}", "═".repeat(RULE_WIDTH))?;
        writeln!(out, "  TextCraft  │  Patterns: Command | Observer | State")?;
        writeln!(out, "{}", "═".repeat(RULE_WIDTH))?;
        writeln!(out)?;

        writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;
        writeln!(out, "{:^width$}", " DOCUMENT CONTENT ", width = RULE_WIDTH)?;
        writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;
        if document.is_empty() {
            writeln!(out, "  (Document is empty - start by inserting text)")?;
        } else {
            for (index, line) in document.formatted_text().split('\n').enumerate() {
                writeln!(out, " {:>4} │ {}", index + 1, line)?;
            }
        }
        writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;
        writeln!(out)?;

        writeln!(
            out,
            "  Length: {} chars  │  Words: {}  │  Formatted: {} chars ({}%)",
            stats.length, stats.words, stats.formatted_chars, stats.formatted_percent
        )?;
        writeln!(
            out,
            "  Mode: {}  │  Cursor Position: {}  │  Undo: {}  │  Redo: {}",
            context.state().name(),
            self.session.cursor(),
            availability(history.can_undo()),
            availability(history.can_redo())
        )?;
        writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;
        writeln!(
            out,
            "  Commands: insert | delete | format | undo | redo | cursor | history | help | stats | quit"
        )?;
        writeln!(out, "  Modes: 'i' = Insert | 'v' = Visual | 'esc' = Normal")?;
        writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;

        if let Some(message) = &self.last_message {
            writeln!(out)?;
            writeln!(out, "{message}")?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn stats_text(&self) -> String {
        let document = self.session.document();
        let stats = document.stats();
        let history = self.session.history();
        let mut text = format!(
            "Content Metrics:\n    Total Characters: {}\n    Total Words: {}\n    Total Lines: {}\n    Formatted Characters: {}\n\nEditor State:\n    Current Mode: {}\n    Cursor Position: {}\n    Can Undo: {}\n    Can Redo: {}\n    Commands Issued: {}\n    Observers Active: {}",
            stats.length,
            stats.words,
            stats.lines,
            stats.formatted_chars,
            self.session.context().state().name(),
            self.session.cursor(),
            yes_no(history.can_undo()),
            yes_no(history.can_redo()),
            self.command_count,
            self.session.observer_count(),
        );
        if let Some(statistics) = &self.statistics {
            text.push_str(&format!(
                "\n    Document Changes: {}",
                statistics.borrow().change_count()
            ));
        }
        text
    }

    fn history_text(&self) -> String {
        let history = self.session.history();
        if history.is_empty() {
            return "History is empty".to_string();
        }
        history
            .commands()
            .map(|(index, cmd, applied)| {
                let marker = if applied { "✓" } else { "↷" };
                format!("  {marker} {:>3}. {cmd}", index + 1)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn help_text() -> String {
    "\
TEXT OPERATIONS:
    insert <pos> <text>        - Insert text at position
    delete <pos> <len>         - Delete text from position
    format <pos> <len> <type>  - Format text (bold|italic|both)

HISTORY OPERATIONS:
    undo                       - Undo last command
    redo                       - Redo last undone command
    history                    - List executed commands

NAVIGATION:
    cursor <pos>               - Move cursor to position

MODE SWITCHING:
    i                          - Enter INSERT mode
    v                          - Enter VISUAL mode
    esc                        - Return to NORMAL mode
    h                          - Help for the current mode

UTILITY:
    help, ?                    - Show this help
    stats                      - Show detailed statistics
    quit, q                    - Exit editor"
        .to_string()
}

fn failure(err: SessionError) -> String {
    match &err {
        SessionError::Edit(edit) => format!("✗ {edit}"),
        // the edit itself went through
        SessionError::Notify(_) => format!("⚠ {err}"),
    }
}

fn availability(available: bool) -> &'static str {
    if available { "✓ Available" } else { "✗ None" }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Long removed text is cut down for the status message
fn abbreviate(text: &str) -> String {
    if text.chars().count() <= 20 {
        text.to_string()
    } else {
        let head: String = text.chars().take(17).collect();
        format!("{head}...")
    }
}
