use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use trailmap_core::{
    samples, solve, validate, Grid, MapError, Sample, ValidationResult, WalkResult, Walker,
    WalkerState,
};

uniffi::setup_scaffolding!();

/// Why a map could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum MapInputError {
    /// A cell was not exactly one character
    #[error("cell [{row}, {col}] holds {cell:?}, expected a single character")]
    InvalidCell { row: u32, col: u32, cell: String },
    /// The map has structural defects
    #[error("map is invalid: {}", defects.join("; "))]
    InvalidMap { defects: Vec<String> },
    /// No sample with this id
    #[error("unknown sample {id}")]
    UnknownSample { id: String },
}

impl From<MapError> for MapInputError {
    fn from(err: MapError) -> Self {
        match err {
            MapError::MultiCharCell { row, col, cell } => MapInputError::InvalidCell {
                row: row as u32,
                col: col as u32,
                cell,
            },
            // Only reachable for maps the validator accepted, which always
            // have both markers.
            MapError::MissingMarker { .. } => MapInputError::InvalidMap {
                defects: vec![err.to_string()],
            },
        }
    }
}

/// Outcome of validating a map
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MapValidation {
    pub is_valid: bool,
    /// Defect messages in detection order
    pub errors: Vec<String>,
}

impl From<ValidationResult> for MapValidation {
    fn from(report: ValidationResult) -> Self {
        Self {
            is_valid: report.is_valid,
            errors: report.messages(),
        }
    }
}

/// Letters and path of a walk
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MapSolution {
    pub letters: String,
    pub path: String,
    pub is_complete: bool,
}

impl From<WalkResult> for MapSolution {
    fn from(result: WalkResult) -> Self {
        Self {
            letters: result.letters,
            path: result.path,
            is_complete: result.is_complete,
        }
    }
}

/// A built-in demonstration map
#[derive(Debug, Clone, uniffi::Record)]
pub struct SampleMap {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rows: Vec<String>,
}

impl From<&Sample> for SampleMap {
    fn from(sample: &Sample) -> Self {
        Self {
            id: sample.id.to_string(),
            name: sample.name.to_string(),
            description: sample.description.to_string(),
            rows: sample.rows.iter().map(|row| row.to_string()).collect(),
        }
    }
}

/// Walker position (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct MapPosition {
    pub row: i32,
    pub col: i32,
}

// MARK: - Free functions

/// Validate a map given as rows of one-character strings
#[uniffi::export]
pub fn validate_grid(rows: Vec<Vec<String>>) -> Result<MapValidation, MapInputError> {
    let grid = Grid::from_cells(rows)?;
    Ok(validate(&grid).into())
}

/// Validate a newline-delimited map
#[uniffi::export]
pub fn validate_text(text: String) -> MapValidation {
    validate(&Grid::from_text(&text)).into()
}

/// Validate and walk a map given as rows of one-character strings.
/// Invalid maps yield the failure solution.
#[uniffi::export]
pub fn solve_grid(rows: Vec<Vec<String>>) -> MapSolution {
    solve(rows).into()
}

/// Validate and walk a newline-delimited map
#[uniffi::export]
pub fn solve_text(text: String) -> MapSolution {
    solve(text).into()
}

/// Walk a map and return `{"letters", "path", "isComplete"}` as JSON
#[uniffi::export]
pub fn solve_text_json(text: String) -> String {
    let result = solve(text);
    serde_json::to_string(&result).unwrap_or_else(|_| {
        format!(
            r#"{{"letters":"","path":"{}","isComplete":false}}"#,
            WalkResult::FAILURE_PATH
        )
    })
}

/// The valid demonstration maps
#[uniffi::export]
pub fn sample_maps() -> Vec<SampleMap> {
    samples::catalog().iter().map(SampleMap::from).collect()
}

/// Demonstration maps the validator rejects
#[uniffi::export]
pub fn invalid_sample_maps() -> Vec<SampleMap> {
    samples::invalid_catalog().iter().map(SampleMap::from).collect()
}

// MARK: - Step-by-step session

/// A walk that the host advances one move at a time
#[derive(uniffi::Object)]
pub struct MapSession {
    initial: WalkerState,
    state: Mutex<WalkerState>,
    walker: Walker,
}

impl MapSession {
    fn start(grid: Grid) -> Result<Arc<Self>, MapInputError> {
        let report = validate(&grid);
        if !report.is_valid {
            return Err(MapInputError::InvalidMap {
                defects: report.messages(),
            });
        }
        let state = WalkerState::new(grid)?;
        Ok(Arc::new(Self {
            initial: state.clone(),
            state: Mutex::new(state),
            walker: Walker::new(),
        }))
    }

    fn state(&self) -> MutexGuard<'_, WalkerState> {
        // A panic mid-step leaves a consistent state; keep using it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[uniffi::export]
impl MapSession {
    /// Start a walk on a newline-delimited map
    #[uniffi::constructor]
    pub fn from_text(text: String) -> Result<Arc<Self>, MapInputError> {
        Self::start(Grid::from_text(&text))
    }

    /// Start a walk on rows of one-character strings
    #[uniffi::constructor]
    pub fn from_grid(rows: Vec<Vec<String>>) -> Result<Arc<Self>, MapInputError> {
        Self::start(Grid::from_cells(rows)?)
    }

    /// Start a walk on a built-in sample
    #[uniffi::constructor]
    pub fn from_sample(id: String) -> Result<Arc<Self>, MapInputError> {
        let sample = samples::find(&id).ok_or(MapInputError::UnknownSample { id })?;
        Self::start(sample.grid())
    }

    /// Take one step. Returns `false` once the walk is over.
    pub fn step(&self) -> bool {
        let mut state = self.state();
        self.walker.advance(&mut state)
    }

    /// Run the walk to the end
    pub fn finish(&self) -> MapSolution {
        let mut state = self.state();
        while self.walker.advance(&mut state) {}
        state.clone().into_result().into()
    }

    /// Go back to the start
    pub fn restart(&self) {
        *self.state() = self.initial.clone();
    }

    pub fn letters(&self) -> String {
        self.state().letters().to_string()
    }

    pub fn path(&self) -> String {
        self.state().trace().to_string()
    }

    pub fn position(&self) -> MapPosition {
        let pos = self.state().position();
        MapPosition {
            row: pos.row,
            col: pos.col,
        }
    }

    pub fn steps(&self) -> u64 {
        self.state().steps() as u64
    }

    pub fn is_visited(&self, row: i32, col: i32) -> bool {
        self.state().model().is_visited(row, col)
    }

    pub fn is_complete(&self) -> bool {
        self.state().is_complete()
    }

    pub fn is_stuck(&self) -> bool {
        self.state().is_stuck()
    }

    /// The map rows, for drawing
    pub fn rows(&self) -> Vec<String> {
        self.initial
            .model()
            .grid()
            .rows()
            .iter()
            .map(|row| row.iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: &[&str]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.chars().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_validate_text() {
        let report = validate_text("@-A-x".to_string());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());

        let report = validate_text("@-A-+-B-x".to_string());
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_validate_grid_rejects_wide_cells() {
        let rows = vec![vec!["@".to_string(), "--".to_string(), "x".to_string()]];
        assert_eq!(
            validate_grid(rows),
            Err(MapInputError::InvalidCell {
                row: 0,
                col: 1,
                cell: "--".to_string()
            })
        );
    }

    #[test]
    fn test_solve_grid() {
        let solution = solve_grid(cells(&["@", "|", "A", "|", "x"]));
        assert_eq!(solution.letters, "A");
        assert_eq!(solution.path, "@|A|x");
        assert!(solution.is_complete);
    }

    #[test]
    fn test_solve_text_failure() {
        let solution = solve_text("x-B-@-A-x".to_string());
        assert_eq!(solution.letters, "");
        assert_eq!(solution.path, "Error solving map");
        assert!(!solution.is_complete);
    }

    #[test]
    fn test_solve_text_json() {
        let json: serde_json::Value =
            serde_json::from_str(&solve_text_json("@-A-x".to_string())).unwrap();
        assert_eq!(json["letters"], "A");
        assert_eq!(json["isComplete"], true);
    }

    #[test]
    fn test_sample_maps() {
        let maps = sample_maps();
        assert_eq!(maps.len(), 9);
        assert_eq!(maps[3].name, "Goonies");
        assert_eq!(invalid_sample_maps().len(), 7);
    }

    #[test]
    fn test_session_steps() {
        let session = MapSession::from_text("@-A-x".to_string()).unwrap();
        assert_eq!(session.position(), MapPosition { row: 0, col: 0 });
        assert!(session.step());
        assert!(session.step());
        assert_eq!(session.letters(), "A");
        assert_eq!(session.path(), "@-A");
        assert!(session.is_visited(0, 1));
        assert!(!session.is_visited(0, 3));

        let solution = session.finish();
        assert!(solution.is_complete);
        assert!(session.is_complete());
        assert!(!session.step());
        assert_eq!(session.steps(), 4);
    }

    #[test]
    fn test_session_restart() {
        let session = MapSession::from_sample("id-4".to_string()).unwrap();
        assert_eq!(session.finish().letters, "GOONIES");
        session.restart();
        assert_eq!(session.path(), "@");
        assert_eq!(session.steps(), 0);
        assert_eq!(session.rows().len(), 8);
    }

    #[test]
    fn test_session_rejects_invalid_map() {
        match MapSession::from_sample("invalid-4".to_string()) {
            Err(MapInputError::InvalidMap { defects }) => assert!(!defects.is_empty()),
            _ => panic!("expected an invalid map"),
        }
        assert!(matches!(
            MapSession::from_sample("nope".to_string()),
            Err(MapInputError::UnknownSample { .. })
        ));
    }

    #[test]
    fn test_session_stuck_on_loop() {
        let session = MapSession::from_text("@-+\n ++\n x".to_string()).unwrap();
        let solution = session.finish();
        assert!(!solution.is_complete);
        assert!(session.is_stuck());
    }
}
