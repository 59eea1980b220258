//! Map alphabet and character classification

use serde::Serialize;

/// Start marker
pub const START: char = '@';
/// End marker
pub const END: char = 'x';
/// Horizontal path segment
pub const HORIZONTAL: char = '-';
/// Vertical path segment
pub const VERTICAL: char = '|';
/// Turn (junction where the direction may change)
pub const TURN: char = '+';
/// Empty cell
pub const EMPTY: char = ' ';

/// Every character a map may contain, in a stable order
pub const VALID_ALPHABET: [char; 32] = [
    START, END, HORIZONTAL, VERTICAL, TURN, EMPTY, 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// One of the two unique markers of a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Marker {
    Start,
    End,
}

impl Marker {
    /// The glyph used for this marker
    pub fn glyph(&self) -> char {
        match self {
            Marker::Start => START,
            Marker::End => END,
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Marker::Start => write!(f, "start"),
            Marker::End => write!(f, "end"),
        }
    }
}

/// Classified map character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Glyph {
    Start,
    End,
    Horizontal,
    Vertical,
    Turn,
    Empty,
    Letter(char),
}

impl Glyph {
    /// Classify a character, `None` if it is not part of the map alphabet
    pub fn from_char(c: char) -> Option<Glyph> {
        match c {
            START => Some(Glyph::Start),
            END => Some(Glyph::End),
            HORIZONTAL => Some(Glyph::Horizontal),
            VERTICAL => Some(Glyph::Vertical),
            TURN => Some(Glyph::Turn),
            EMPTY => Some(Glyph::Empty),
            c if is_letter(c) => Some(Glyph::Letter(c)),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Glyph::Start => START,
            Glyph::End => END,
            Glyph::Horizontal => HORIZONTAL,
            Glyph::Vertical => VERTICAL,
            Glyph::Turn => TURN,
            Glyph::Empty => EMPTY,
            Glyph::Letter(c) => c,
        }
    }
}

/// `-`, `|` or `+`
pub fn is_path_segment(c: char) -> bool {
    matches!(c, HORIZONTAL | VERTICAL | TURN)
}

/// Uppercase Latin letter `A`..=`Z`
pub fn is_letter(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Anything the walker may stand on: segments, letters and both markers
pub fn is_path_element(c: char) -> bool {
    is_path_segment(c) || is_letter(c) || c == START || c == END
}

pub fn is_valid_map_character(c: char) -> bool {
    is_path_element(c) || c == EMPTY
}

/// Every valid map character
pub fn valid_alphabet() -> &'static [char] {
    &VALID_ALPHABET
}
