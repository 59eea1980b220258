//! Validate-then-walk entry point.
//!
//! `solve` never fails: invalid maps and internal faults both come back as
//! [`WalkResult::failure`].

use crate::error::Result;
use crate::grid::{Grid, GridModel};
use crate::validator::validate;
use crate::walker::{WalkOptions, WalkResult, Walker, WalkerState};
use tracing::{debug, warn};

/// The accepted input forms, normalized once at the boundary
#[derive(Debug, Clone)]
pub enum SolveInput {
    /// A character grid
    Grid(Grid),
    /// Newline-delimited text, one row per line
    Text(String),
    /// String cells as delivered by JSON or foreign hosts
    Cells(Vec<Vec<String>>),
    /// A prepared model
    Model(GridModel),
}

impl SolveInput {
    /// Convert into the model the walker runs on
    pub fn into_model(self) -> Result<GridModel> {
        Ok(match self {
            SolveInput::Grid(grid) => GridModel::new(grid),
            SolveInput::Text(text) => GridModel::new(Grid::from_text(&text)),
            SolveInput::Cells(cells) => GridModel::new(Grid::from_cells(cells)?),
            SolveInput::Model(model) => model,
        })
    }
}

impl From<Grid> for SolveInput {
    fn from(grid: Grid) -> Self {
        SolveInput::Grid(grid)
    }
}

impl From<Vec<Vec<char>>> for SolveInput {
    fn from(rows: Vec<Vec<char>>) -> Self {
        SolveInput::Grid(Grid::new(rows))
    }
}

impl From<&str> for SolveInput {
    fn from(text: &str) -> Self {
        SolveInput::Text(text.to_string())
    }
}

impl From<String> for SolveInput {
    fn from(text: String) -> Self {
        SolveInput::Text(text)
    }
}

impl From<Vec<Vec<String>>> for SolveInput {
    fn from(cells: Vec<Vec<String>>) -> Self {
        SolveInput::Cells(cells)
    }
}

impl From<GridModel> for SolveInput {
    fn from(model: GridModel) -> Self {
        SolveInput::Model(model)
    }
}

/// Validate and walk a map with default options
pub fn solve(input: impl Into<SolveInput>) -> WalkResult {
    solve_with(input, &WalkOptions::default())
}

/// Validate and walk a map
pub fn solve_with(input: impl Into<SolveInput>, options: &WalkOptions) -> WalkResult {
    match try_solve(input.into(), options) {
        Ok(result) => result,
        Err(err) => {
            warn!(%err, "map could not be solved");
            WalkResult::failure()
        }
    }
}

fn try_solve(input: SolveInput, options: &WalkOptions) -> Result<WalkResult> {
    let model = input.into_model()?;

    let report = validate(model.grid());
    if !report.is_valid {
        debug!(defects = report.errors.len(), "map rejected by validator");
        return Ok(WalkResult::failure());
    }

    let state = WalkerState::from_model(model)?;
    let state = Walker::with_options(options.clone()).walk(state);
    Ok(state.into_result())
}
