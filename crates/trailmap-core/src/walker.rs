//! Path walking state machine.
//!
//! A walk starts on the `@`, repeatedly picks the next cell under the
//! continuity rules and stops on the `x` (complete) or when no legal move is
//! left (stuck). Letters are collected in the order they are stepped on.

use crate::charset::{is_letter, Marker, EMPTY, END, HORIZONTAL, START, TURN, VERTICAL};
use crate::error::{MapError, Result};
use crate::grid::{Grid, GridModel, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Lifecycle of a walk. `Complete` and `Stuck` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WalkStatus {
    Walking,
    Complete,
    Stuck,
}

/// Letters and raw trace produced by a walk.
///
/// Serializes as `{"letters": .., "path": .., "isComplete": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkResult {
    pub letters: String,
    pub path: String,
    pub is_complete: bool,
}

impl WalkResult {
    /// Trace reported when a map could not be solved
    pub const FAILURE_PATH: &'static str = "Error solving map";

    /// The uniform result for invalid maps and internal faults
    pub fn failure() -> Self {
        Self {
            letters: String::new(),
            path: Self::FAILURE_PATH.to_string(),
            is_complete: false,
        }
    }

    pub fn is_failure(&self) -> bool {
        !self.is_complete && self.letters.is_empty() && self.path == Self::FAILURE_PATH
    }
}

/// Mutable state of one walk
#[derive(Debug, Clone)]
pub struct WalkerState {
    model: GridModel,
    previous: Option<Position>,
    end: Position,
    letters: String,
    trace: String,
    status: WalkStatus,
    steps: usize,
    /// Non-blank cells of the grid, fixed for the walk
    cells: usize,
}

impl WalkerState {
    /// Start a walk on `grid`
    pub fn new(grid: Grid) -> Result<Self> {
        Self::from_model(GridModel::new(grid))
    }

    /// Start a walk on a prepared model. Its overlay is kept as is.
    pub fn from_model(mut model: GridModel) -> Result<Self> {
        let start = first_symbol(model.grid(), Marker::Start)?;
        let end = first_symbol(model.grid(), Marker::End)?;

        let cells = model.grid().non_blank_count();
        model.set_cursor(start);
        model.mark_visited(start.row, start.col);

        Ok(Self {
            model,
            previous: None,
            end,
            letters: String::new(),
            trace: START.to_string(),
            status: WalkStatus::Walking,
            steps: 0,
            cells,
        })
    }

    /// The cell the walk would enter next, if any.
    ///
    /// Candidates are the in-bounds, non-blank neighbours other than the
    /// cell just left. On a segment or turn the candidate continuing the
    /// incoming direction wins; otherwise the first candidate in
    /// up/right/down/left order is taken.
    pub fn find_next_move(&self) -> Option<Position> {
        let grid = self.model.grid();
        let current = self.model.cursor();

        let candidates: Vec<Position> = current
            .neighbors()
            .into_iter()
            .filter(|&pos| matches!(grid.get(pos), Some(ch) if ch != EMPTY))
            .filter(|&pos| Some(pos) != self.previous)
            .collect();

        if let Some(prev) = self.previous {
            if matches!(grid.get(current), Some(HORIZONTAL | VERTICAL | TURN)) {
                let dr = current.row - prev.row;
                let dc = current.col - prev.col;
                let straight = candidates.iter().copied().find(|pos| {
                    if dc == 0 {
                        pos.col == current.col
                            && (dr == 0 || (pos.row - current.row).signum() == dr.signum())
                    } else {
                        pos.row == current.row
                            && (pos.col - current.col).signum() == dc.signum()
                    }
                });
                if straight.is_some() {
                    return straight;
                }
            }
        }

        candidates.first().copied()
    }

    /// Step onto `next`. A position outside the grid leaves the state untouched.
    pub fn make_move(&mut self, next: Position) {
        let Some(ch) = self.model.grid().get(next) else {
            return;
        };

        trace!(from = %self.model.cursor(), to = %next, %ch, "step");

        self.trace.push(ch);
        if is_letter(ch) {
            self.letters.push(ch);
        }
        self.previous = Some(self.model.cursor());
        self.model.set_cursor(next);
        self.model.mark_visited(next.row, next.col);
        self.steps += 1;
        self.status = if ch == END {
            WalkStatus::Complete
        } else {
            WalkStatus::Walking
        };
    }

    /// Apply one transition. Returns `true` if the walker moved.
    pub fn step(&mut self) -> bool {
        if self.status != WalkStatus::Walking {
            return false;
        }
        match self.find_next_move() {
            Some(next) => {
                self.make_move(next);
                true
            }
            None => {
                self.status = WalkStatus::Stuck;
                false
            }
        }
    }

    pub fn position(&self) -> Position {
        self.model.cursor()
    }

    pub fn previous(&self) -> Option<Position> {
        self.previous
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// Every character stepped on so far, starting with the `@`
    pub fn trace(&self) -> &str {
        &self.trace
    }

    pub fn status(&self) -> WalkStatus {
        self.status
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_complete(&self) -> bool {
        self.status == WalkStatus::Complete
    }

    pub fn is_stuck(&self) -> bool {
        self.status == WalkStatus::Stuck
    }

    pub fn is_finished(&self) -> bool {
        self.status != WalkStatus::Walking
    }

    pub fn into_result(self) -> WalkResult {
        WalkResult {
            letters: self.letters,
            path: self.trace,
            is_complete: self.status == WalkStatus::Complete,
        }
    }
}

fn first_symbol(grid: &Grid, marker: Marker) -> Result<Position> {
    grid.find_symbols(marker.glyph())
        .and_then(|found| found.first().copied())
        .ok_or(MapError::MissingMarker { marker })
}

/// Configuration for the walker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Maximum number of moves. `None` derives the bound from the grid
    /// (see [`Walker::step_limit`]).
    pub max_steps: Option<usize>,
}

/// Drives a [`WalkerState`] to a terminal state
#[derive(Debug, Clone, Default)]
pub struct Walker {
    options: WalkOptions,
}

impl Walker {
    /// Create a walker with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a walker with custom options
    pub fn with_options(options: WalkOptions) -> Self {
        Self { options }
    }

    /// Number of moves after which a walk is abandoned.
    ///
    /// The next move depends only on the current and previous cell, and
    /// after the first move the previous cell is one of four neighbours, so
    /// a walk has at most `4 * N` distinct states for `N` non-blank cells.
    /// A walk still running after `4 * N + 1` moves is in a cycle.
    pub fn step_limit(&self, grid: &Grid) -> usize {
        self.limit_for(grid.non_blank_count())
    }

    fn limit_for(&self, cells: usize) -> usize {
        self.options.max_steps.unwrap_or(4 * cells + 1)
    }

    /// One transition honouring the step limit. Returns `true` if the
    /// walker moved.
    pub fn advance(&self, state: &mut WalkerState) -> bool {
        if state.status == WalkStatus::Walking && state.steps >= self.limit_for(state.cells) {
            warn!(
                steps = state.steps,
                at = %state.position(),
                "step limit reached, abandoning walk"
            );
            state.status = WalkStatus::Stuck;
            return false;
        }
        state.step()
    }

    /// Run `state` until it is complete or stuck
    pub fn walk(&self, mut state: WalkerState) -> WalkerState {
        while self.advance(&mut state) {}
        debug!(
            steps = state.steps,
            letters = %state.letters,
            status = ?state.status,
            "walk finished"
        );
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    fn walk_text(text: &str) -> WalkerState {
        let state = WalkerState::new(Grid::from_text(text)).unwrap();
        Walker::new().walk(state)
    }

    #[test]
    fn test_initial_state() {
        let state = WalkerState::new(samples::find("id-1").unwrap().grid()).unwrap();
        assert_eq!(state.position(), Position::new(0, 0));
        assert_eq!(state.end(), Position::new(2, 0));
        assert_eq!(state.previous(), None);
        assert_eq!(state.letters(), "");
        assert_eq!(state.trace(), "@");
        assert_eq!(state.status(), WalkStatus::Walking);
        assert!(state.model().is_visited(0, 0));
        assert_eq!(state.model().visited_count(), 1);
    }

    #[test]
    fn test_markers_found_in_complex_map() {
        let state = WalkerState::new(samples::find("id-4").unwrap().grid()).unwrap();
        assert_eq!(state.position(), Position::new(3, 1));
        assert_eq!(state.end(), Position::new(7, 13));
    }

    #[test]
    fn test_missing_start() {
        let grid = Grid::from_text(" ---A---+\n        |\nx-B-+   C");
        let err = WalkerState::new(grid).unwrap_err();
        assert_eq!(
            err,
            MapError::MissingMarker {
                marker: Marker::Start
            }
        );
        assert_eq!(err.to_string(), "No start position found in the map");
    }

    #[test]
    fn test_missing_end() {
        let grid = Grid::from_text("@---A---+\n        |\n -B-+   C");
        let err = WalkerState::new(grid).unwrap_err();
        assert_eq!(err.to_string(), "No end position found in the map");
    }

    #[test]
    fn test_horizontal_path() {
        let state = walk_text("@-A-x");
        assert_eq!(state.letters(), "A");
        assert_eq!(state.trace(), "@-A-x");
        assert!(state.is_complete());
        assert!(!state.is_stuck());
        assert_eq!(state.steps(), 4);
    }

    #[test]
    fn test_vertical_path() {
        let state = walk_text("@\n|\nA\n|\nx");
        assert_eq!(state.letters(), "A");
        assert_eq!(state.trace(), "@|A|x");
        assert!(state.is_complete());
    }

    #[test]
    fn test_catalog_walks() {
        let expected = [
            ("id-1", "ACB", "@---A---+|C|+---+|+-B-x"),
            ("id-2", "ABCD", "@|A+---B--+|+--C-+|-||+---D--+|x"),
            ("id-3", "ACB", "@---A---+|||C---+|+-B-x"),
            ("id-4", "GOONIES", "@-G-O||+-O-N-+|I-+|ES|x"),
            ("id-5", "BLAH", "@B|+-L-+A-+Hx"),
            ("id-6", "AB", "@-A--+|+-B--x"),
            ("id-7", "A", "@-A-x"),
            ("id-8", "A", "@|A|x"),
            ("id-9", "ABC", "@---A---+|+---B---+|C------x"),
        ];
        for (id, letters, trace) in expected {
            let sample = samples::find(id).unwrap();
            let state = Walker::new().walk(WalkerState::new(sample.grid()).unwrap());
            assert_eq!(state.letters(), letters, "{}", sample.name);
            assert_eq!(state.trace(), trace, "{}", sample.name);
            assert!(state.is_complete(), "{}", sample.name);
            assert!(!state.is_stuck(), "{}", sample.name);
        }
    }

    #[test]
    fn test_goes_straight_through_intersection() {
        let state = walk_text("  @\n  |\n--+--\n  |\n  x");
        assert_eq!(state.trace(), "@|+|x");
    }

    #[test]
    fn test_letter_order_is_visit_order() {
        // B sits left of A in the grid but is reached second
        let state = walk_text("x-B-+\n    |\n@-A-+");
        assert_eq!(state.letters(), "AB");
    }

    #[test]
    fn test_stops_at_end() {
        let state = walk_text("@-A-x-B");
        assert_eq!(state.letters(), "A");
        assert_eq!(state.trace(), "@-A-x");
    }

    #[test]
    fn test_no_letters() {
        let state = walk_text("@-x");
        assert_eq!(state.letters(), "");
        assert_eq!(state.trace(), "@-x");
        assert!(state.is_complete());
    }

    #[test]
    fn test_dead_end_gets_stuck() {
        let state = walk_text("@-A-+\n    |\n     \n    B-x");
        assert!(state.is_stuck());
        assert!(!state.is_complete());
        assert_eq!(state.letters(), "A");
        assert_eq!(state.trace(), "@-A-+|");
        assert_eq!(state.find_next_move(), None);
    }

    #[test]
    fn test_first_candidate_order_without_history() {
        // From the start every neighbour is eligible: up wins over right
        let state = WalkerState::new(Grid::from_text("|\n@-x\n|")).unwrap();
        assert_eq!(state.find_next_move(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_previous_cell_is_excluded() {
        let mut state = WalkerState::new(Grid::from_text("@-x")).unwrap();
        state.make_move(Position::new(0, 1));
        assert_eq!(state.previous(), Some(Position::new(0, 0)));
        assert_eq!(state.find_next_move(), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_make_move_outside_grid_is_ignored() {
        let mut state = WalkerState::new(Grid::from_text("@-x")).unwrap();
        state.make_move(Position::new(5, 5));
        assert_eq!(state.trace(), "@");
        assert_eq!(state.steps(), 0);
        assert_eq!(state.position(), Position::new(0, 0));
    }

    #[test]
    fn test_overlay_records_visits() {
        let state = walk_text("@-A-x\n  B  ");
        for col in 0..5 {
            assert!(state.model().is_visited(0, col));
        }
        assert!(!state.model().is_visited(1, 2));
    }

    #[test]
    fn test_step_after_terminal_state_is_noop() {
        let mut state = walk_text("@-x");
        assert!(!state.step());
        assert_eq!(state.trace(), "@-x");
    }

    #[test]
    fn test_cycle_is_abandoned() {
        // Validator-clean, but the turns send the walker round in a loop
        let grid = Grid::from_text("@-+\n ++\n x");
        let walker = Walker::new();
        assert_eq!(walker.step_limit(&grid), 4 * 6 + 1);

        let state = walker.walk(WalkerState::new(grid).unwrap());
        assert!(state.is_stuck());
        assert!(!state.is_complete());
        assert_eq!(state.steps(), 25);
        assert!(state.trace().starts_with("@-+++-+++"));
    }

    #[test]
    fn test_explicit_step_cap() {
        let walker = Walker::with_options(WalkOptions { max_steps: Some(2) });
        let state = walker.walk(WalkerState::new(Grid::from_text("@-A-x")).unwrap());
        assert!(state.is_stuck());
        assert_eq!(state.trace(), "@-A");
        assert_eq!(state.letters(), "A");
    }

    #[test]
    fn test_walk_matches_repeated_advance() {
        let walker = Walker::with_options(WalkOptions { max_steps: Some(8) });
        let grid = Grid::from_text("@-+\n ++\n x");

        let walked = walker.walk(WalkerState::new(grid.clone()).unwrap());
        let mut stepped = WalkerState::new(grid).unwrap();
        while walker.advance(&mut stepped) {}

        assert!(walked.is_stuck());
        assert_eq!(walked.steps(), 8);
        assert_eq!(stepped.steps(), walked.steps());
        assert_eq!(stepped.trace(), walked.trace());
        assert!(!walker.advance(&mut stepped));
    }

    #[test]
    fn test_advance_matches_walk() {
        let grid = samples::find("id-4").unwrap().grid();
        let walker = Walker::new();
        let mut stepped = WalkerState::new(grid.clone()).unwrap();
        while walker.advance(&mut stepped) {}
        let walked = walker.walk(WalkerState::new(grid).unwrap());
        assert_eq!(stepped.trace(), walked.trace());
        assert_eq!(stepped.status(), walked.status());
    }

    #[test]
    fn test_into_result() {
        let result = walk_text("@-A-x").into_result();
        assert_eq!(
            result,
            WalkResult {
                letters: "A".into(),
                path: "@-A-x".into(),
                is_complete: true
            }
        );
        assert!(!result.is_failure());
        assert!(WalkResult::failure().is_failure());
    }
}
