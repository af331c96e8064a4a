use textcraft_engine::TextFormat;

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Insert { position: usize, text: String },
    Delete { position: usize, length: usize },
    Format {
        position: usize,
        length: usize,
        format: TextFormat,
    },
    Undo,
    Redo,
    Cursor(usize),
    History,
    Help,
    Stats,
    Quit,
    /// Anything else is handed to the mode state machine
    Mode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Usage: insert <position> <text>")]
    InsertUsage,
    #[error("Usage: delete <position> <length>")]
    DeleteUsage,
    #[error("Usage: format <position> <length> <bold|italic|both>")]
    FormatUsage,
    #[error("Usage: cursor <position>")]
    CursorUsage,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Invalid position or length")]
    InvalidNumber,
    #[error("Invalid format type. Use: bold, italic, or both")]
    InvalidFormat,
}

/// Parse a trimmed input line
///
/// For `insert`, the text is everything after the first space following the
/// position, so inner and trailing spaces survive.
pub fn parse_line(line: &str) -> Result<Input, ParseError> {
    match line {
        "quit" | "q" => return Ok(Input::Quit),
        "help" | "?" => return Ok(Input::Help),
        "stats" => return Ok(Input::Stats),
        "history" => return Ok(Input::History),
        "undo" => return Ok(Input::Undo),
        "redo" => return Ok(Input::Redo),
        _ => {}
    }

    if let Some(rest) = line.strip_prefix("insert ") {
        let (position, text) = rest.split_once(' ').ok_or(ParseError::InsertUsage)?;
        let position = position
            .parse()
            .map_err(|_| ParseError::InvalidPosition)?;
        return Ok(Input::Insert {
            position,
            text: text.to_string(),
        });
    }

    if let Some(rest) = line.strip_prefix("delete ") {
        let [position, length] = split_exact(rest).ok_or(ParseError::DeleteUsage)?;
        return Ok(Input::Delete {
            position: parse_number(position)?,
            length: parse_number(length)?,
        });
    }

    if let Some(rest) = line.strip_prefix("format ") {
        let [position, length, kind] = split_exact(rest).ok_or(ParseError::FormatUsage)?;
        let position = parse_number(position)?;
        let length = parse_number(length)?;
        let format = TextFormat::from_keyword(kind).ok_or(ParseError::InvalidFormat)?;
        return Ok(Input::Format {
            position,
            length,
            format,
        });
    }

    if let Some(rest) = line.strip_prefix("cursor ") {
        let position = rest.parse().map_err(|_| ParseError::CursorUsage)?;
        return Ok(Input::Cursor(position));
    }

    Ok(Input::Mode(line.to_string()))
}

fn split_exact<const N: usize>(rest: &str) -> Option<[&str; N]> {
    let parts: Vec<&str> = rest.split(' ').collect();
    parts.try_into().ok()
}

fn parse_number(value: &str) -> Result<usize, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber)
}
