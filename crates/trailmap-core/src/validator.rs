//! Structural validation of a map.
//!
//! Every check runs and contributes to one ordered defect list; only an empty
//! grid stops early. The grid is never modified.

use crate::charset::{
    is_letter, is_path_element, is_path_segment, is_valid_map_character, Marker, END,
    HORIZONTAL, START, TURN, VERTICAL,
};
use crate::grid::{Direction, Grid, Position};
use serde::{Serialize, Serializer};
use tracing::debug;

/// A structural problem found in a map.
///
/// The `Display` text is a stable, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Defect {
    EmptyMap,
    MissingMarker(Marker),
    DuplicateMarker { marker: Marker, count: usize },
    NoPathCharacters,
    MarkerNotAdjacent(Marker),
    BrokenPath,
    FakeTurn,
    InvalidCharacter { ch: char, position: Position },
}

impl std::fmt::Display for Defect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Defect::EmptyMap => write!(f, "Map cannot be empty"),
            Defect::MissingMarker(marker) => write!(
                f,
                "Map must have exactly one {} character \"{}\"",
                marker,
                marker.glyph()
            ),
            Defect::DuplicateMarker { marker, count } => write!(
                f,
                "Map has {} {} characters \"{}\", but must have exactly one",
                count,
                marker,
                marker.glyph()
            ),
            Defect::NoPathCharacters => {
                write!(f, "Map must have path characters connecting start and end")
            }
            Defect::MarkerNotAdjacent(Marker::Start) => {
                write!(f, "Start position must be adjacent to a path character")
            }
            Defect::MarkerNotAdjacent(Marker::End) => {
                write!(f, "End position must be adjacent to a path character")
            }
            Defect::BrokenPath => write!(
                f,
                "Map has a broken path - there is an empty row or column between path elements"
            ),
            Defect::FakeTurn => write!(
                f,
                "Map has fake turns - a '+' is used where the path could continue straight"
            ),
            Defect::InvalidCharacter { ch, position } => {
                write!(f, "Invalid character \"{}\" at position {}", ch, position)
            }
        }
    }
}

impl Serialize for Defect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of [`validate`]: serializes as `{"isValid": .., "errors": [..]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<Defect>,
}

impl ValidationResult {
    fn from_defects(errors: Vec<Defect>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// The defect messages in detection order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, defect: &Defect) -> bool {
        self.errors.contains(defect)
    }
}

/// Run every structural check over `grid`
pub fn validate(grid: &Grid) -> ValidationResult {
    if grid.is_empty() {
        return ValidationResult::from_defects(vec![Defect::EmptyMap]);
    }

    let mut defects = Vec::new();

    let start = check_marker(grid, Marker::Start, &mut defects);
    let end = check_marker(grid, Marker::End, &mut defects);

    if let (Some(start), Some(end)) = (start, end) {
        if !grid.cells().any(|(_, ch)| is_path_segment(ch)) {
            defects.push(Defect::NoPathCharacters);
        }
        if !has_adjacent_path(grid, start) {
            defects.push(Defect::MarkerNotAdjacent(Marker::Start));
        }
        if !has_adjacent_path(grid, end) {
            defects.push(Defect::MarkerNotAdjacent(Marker::End));
        }
        if has_broken_path(grid) {
            defects.push(Defect::BrokenPath);
        }
        if let Some(pos) = find_fake_turn(grid) {
            debug!(%pos, "redundant turn");
            defects.push(Defect::FakeTurn);
        }
    }

    for (position, ch) in grid.cells() {
        if !is_valid_map_character(ch) {
            defects.push(Defect::InvalidCharacter { ch, position });
        }
    }

    debug!(
        rows = grid.row_count(),
        defects = defects.len(),
        "validated map"
    );
    ValidationResult::from_defects(defects)
}

/// Records a count defect and returns the marker position when it is unique
fn check_marker(grid: &Grid, marker: Marker, defects: &mut Vec<Defect>) -> Option<Position> {
    match grid.find_symbols(marker.glyph()) {
        None => {
            defects.push(Defect::MissingMarker(marker));
            None
        }
        Some(found) if found.len() > 1 => {
            defects.push(Defect::DuplicateMarker {
                marker,
                count: found.len(),
            });
            None
        }
        Some(found) => found.first().copied(),
    }
}

/// Some orthogonal neighbour is a path segment or a letter
fn has_adjacent_path(grid: &Grid, pos: Position) -> bool {
    pos.neighbors()
        .into_iter()
        .filter_map(|n| grid.get(n))
        .any(|ch| is_path_segment(ch) || is_letter(ch))
}

/// An element-free row or column with path elements on both sides of it
fn has_broken_path(grid: &Grid) -> bool {
    let rows = grid.rows();
    let row_has_element: Vec<bool> = rows
        .iter()
        .map(|line| line.iter().any(|&ch| is_path_element(ch)))
        .collect();

    for i in 1..rows.len().saturating_sub(1) {
        if !row_has_element[i]
            && row_has_element[..i].iter().any(|&b| b)
            && row_has_element[i + 1..].iter().any(|&b| b)
        {
            return true;
        }
    }

    let width = grid.max_row_len();
    let col_has_element: Vec<bool> = (0..width)
        .map(|col| {
            rows.iter()
                .any(|line| line.get(col).is_some_and(|&ch| is_path_element(ch)))
        })
        .collect();

    for j in 1..width.saturating_sub(1) {
        if !col_has_element[j]
            && col_has_element[..j].iter().any(|&b| b)
            && col_has_element[j + 1..].iter().any(|&b| b)
        {
            return true;
        }
    }

    false
}

/// First `+` whose live neighbours all lie on one axis
fn find_fake_turn(grid: &Grid) -> Option<Position> {
    let connects = |pos: Position, direction: Direction, segment: char| {
        grid.get(pos.step(direction))
            .is_some_and(|ch| ch == segment || is_letter(ch) || ch == START || ch == END)
    };

    grid.cells()
        .filter(|&(_, ch)| ch == TURN)
        .map(|(pos, _)| pos)
        .find(|&pos| {
            let horizontal = [Direction::Left, Direction::Right]
                .into_iter()
                .filter(|&d| connects(pos, d, HORIZONTAL))
                .count();
            let vertical = [Direction::Up, Direction::Down]
                .into_iter()
                .filter(|&d| connects(pos, d, VERTICAL))
                .count();
            (horizontal == 2 && vertical == 0) || (vertical == 2 && horizontal == 0)
        })
}
