use serde::{Deserialize, Serialize};

/// Character formatting flags stored per offset in a [`Document`](crate::editing::Document)
///
/// Two formats with the same flags are interchangeable, so runs are detected
/// by plain value equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextFormat {
    pub bold: bool,
    pub italic: bool,
}

impl TextFormat {
    pub const BOLD: TextFormat = TextFormat {
        bold: true,
        italic: false,
    };
    pub const ITALIC: TextFormat = TextFormat {
        bold: false,
        italic: true,
    };
    pub const BOLD_ITALIC: TextFormat = TextFormat {
        bold: true,
        italic: true,
    };

    pub fn new(bold: bool, italic: bool) -> Self {
        Self { bold, italic }
    }

    /// Markers opening a run: bold is always opened before italic
    pub fn open_tag(&self) -> &'static str {
        match (self.bold, self.italic) {
            (true, true) => "<b><i>",
            (true, false) => "<b>",
            (false, true) => "<i>",
            (false, false) => "",
        }
    }

    /// Markers closing a run, mirroring [`open_tag`](Self::open_tag)
    pub fn close_tag(&self) -> &'static str {
        match (self.bold, self.italic) {
            (true, true) => "</i></b>",
            (true, false) => "</b>",
            (false, true) => "</i>",
            (false, false) => "",
        }
    }

    /// Parse the format keywords accepted by the console editor
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "bold" => Some(Self::BOLD),
            "italic" => Some(Self::ITALIC),
            "both" => Some(Self::BOLD_ITALIC),
            _ => None,
        }
    }
}

impl std::fmt::Display for TextFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.bold, self.italic) {
            (true, true) => write!(f, "bold+italic"),
            (true, false) => write!(f, "bold"),
            (false, true) => write!(f, "italic"),
            (false, false) => write!(f, "plain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(TextFormat::BOLD, "<b>", "</b>")]
    #[case(TextFormat::ITALIC, "<i>", "</i>")]
    #[case(TextFormat::BOLD_ITALIC, "<b><i>", "</i></b>")]
    #[case(TextFormat::default(), "", "")]
    fn test_tags_nest_bold_outside_italic(
        #[case] format: TextFormat,
        #[case] open: &str,
        #[case] close: &str,
    ) {
        assert_eq!(format.open_tag(), open);
        assert_eq!(format.close_tag(), close);
    }

    #[rstest]
    #[case("bold", Some(TextFormat::BOLD))]
    #[case("Italic", Some(TextFormat::ITALIC))]
    #[case("BOTH", Some(TextFormat::BOLD_ITALIC))]
    #[case("underline", None)]
    fn test_from_keyword(#[case] keyword: &str, #[case] expected: Option<TextFormat>) {
        assert_eq!(TextFormat::from_keyword(keyword), expected);
    }

    #[test]
    fn test_display_joins_flags() {
        assert_eq!(TextFormat::BOLD_ITALIC.to_string(), "bold+italic");
        assert_eq!(TextFormat::new(false, false).to_string(), "plain");
    }
}
