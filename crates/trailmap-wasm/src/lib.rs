//! WebAssembly bindings for the trail map validator and walker
//!
//! Maps come in from JavaScript either as a newline-delimited string or as an
//! array of rows of one-character strings. Results go back as plain objects
//! in the same camelCase shape the JSON output uses.

use serde::{Deserialize, Serialize};
use trailmap_core::{
    samples, solve, validate, Grid, MapError, SolveInput, WalkResult, Walker, WalkerState,
};
use wasm_bindgen::prelude::*;


// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// A map as delivered by JavaScript
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum MapInput {
    Text(String),
    Cells(Vec<Vec<String>>),
}

impl MapInput {
    fn into_grid(self) -> Result<Grid, MapError> {
        match self {
            MapInput::Text(text) => Ok(Grid::from_text(&text)),
            MapInput::Cells(cells) => Grid::from_cells(cells),
        }
    }
}

impl From<MapInput> for SolveInput {
    fn from(input: MapInput) -> Self {
        match input {
            MapInput::Text(text) => SolveInput::Text(text),
            MapInput::Cells(cells) => SolveInput::Cells(cells),
        }
    }
}

fn parse_input(value: JsValue) -> Result<MapInput, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        JsValue::from_str(&format!(
            "expected a string or an array of rows of single characters: {e}"
        ))
    })
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn map_error(err: MapError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Validate a map. Returns `{isValid, errors}`.
///
/// Throws if the input is neither a string nor an array of rows.
#[wasm_bindgen(js_name = validateMap)]
pub fn validate_map(input: JsValue) -> Result<JsValue, JsValue> {
    let grid = parse_input(input)?.into_grid().map_err(map_error)?;
    to_js(&validate(&grid))
}

/// Validate and walk a map. Returns `{letters, path, isComplete}`.
///
/// Unreadable input yields the failure result rather than an exception.
#[wasm_bindgen(js_name = solveMap)]
pub fn solve_map(input: JsValue) -> Result<JsValue, JsValue> {
    let result = match parse_input(input) {
        Ok(map) => solve(map),
        Err(_) => WalkResult::failure(),
    };
    to_js(&result)
}

/// The valid demonstration maps as `{id, name, description, rows}` objects
#[wasm_bindgen(js_name = sampleMaps)]
pub fn sample_maps() -> Result<JsValue, JsValue> {
    to_js(samples::catalog())
}

/// The invalid demonstration maps
#[wasm_bindgen(js_name = invalidSampleMaps)]
pub fn invalid_sample_maps() -> Result<JsValue, JsValue> {
    to_js(samples::invalid_catalog())
}

/// Step-by-step walk for animating a map in the page
#[wasm_bindgen]
pub struct MapWalk {
    state: WalkerState,
    walker: Walker,
}

#[wasm_bindgen]
impl MapWalk {
    /// Start a walk. Throws with the defect list if the map is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(input: JsValue) -> Result<MapWalk, JsValue> {
        let grid = parse_input(input)?.into_grid().map_err(map_error)?;
        let report = validate(&grid);
        if !report.is_valid {
            return Err(JsValue::from_str(&report.messages().join("\n")));
        }
        let state = WalkerState::new(grid).map_err(map_error)?;
        Ok(MapWalk {
            state,
            walker: Walker::new(),
        })
    }

    /// Take one step. Returns `false` once the walk is over.
    pub fn step(&mut self) -> bool {
        self.walker.advance(&mut self.state)
    }

    /// Run to the end
    pub fn finish(&mut self) {
        while self.walker.advance(&mut self.state) {}
    }

    pub fn letters(&self) -> String {
        self.state.letters().to_string()
    }

    pub fn path(&self) -> String {
        self.state.trace().to_string()
    }

    pub fn row(&self) -> i32 {
        self.state.position().row
    }

    pub fn col(&self) -> i32 {
        self.state.position().col
    }

    #[wasm_bindgen(js_name = isVisited)]
    pub fn is_visited(&self, row: i32, col: i32) -> bool {
        self.state.model().is_visited(row, col)
    }

    #[wasm_bindgen(js_name = isComplete)]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    #[wasm_bindgen(js_name = isStuck)]
    pub fn is_stuck(&self) -> bool {
        self.state.is_stuck()
    }
}

#[cfg(test)]
mod input_tests {
    use super::*;

    fn parse(json: &str) -> MapInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_input() {
        assert_eq!(parse(r#""@-x""#), MapInput::Text("@-x".to_string()));
    }

    #[test]
    fn test_cell_input() {
        let input = parse(r#"[["@","-","A"],[" "," ","x"]]"#);
        let grid = input.into_grid().unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.char_at(1, 2), Some('x'));
    }

    #[test]
    fn test_multi_char_cell_is_rejected() {
        let err = parse(r#"[["@","--","x"]]"#).into_grid().unwrap_err();
        assert!(matches!(err, MapError::MultiCharCell { row: 0, col: 1, .. }));
    }

    #[test]
    fn test_input_solves() {
        let result = solve(parse(r#"[["@","-","A","-","x"]]"#));
        assert_eq!(result.letters, "A");
        assert_eq!(result.path, "@-A-x");
    }
}
