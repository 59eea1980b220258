//! Trail map engine.
//!
//! A trail map is a character grid holding one path from a start marker
//! `@` to an end marker `x`, drawn with `-`, `|` and `+` and dotted with
//! letters `A`-`Z`. This crate checks a grid for structural defects and
//! walks the path, collecting letters in visit order.
//!
//! ```
//! use trailmap_core::solve;
//!
//! let result = solve("@-A-+\n    |\nx-B-+");
//! assert_eq!(result.letters, "AB");
//! assert_eq!(result.path, "@-A-+|+-B-x");
//! assert!(result.is_complete);
//! ```

pub mod charset;
mod error;
mod grid;
pub mod samples;
mod solve;
mod validator;
mod walker;

pub use charset::{Glyph, Marker};
pub use error::{MapError, Result};
pub use grid::{Direction, Grid, GridModel, Position};
pub use samples::Sample;
pub use solve::{solve, solve_with, SolveInput};
pub use validator::{validate, Defect, ValidationResult};
pub use walker::{WalkOptions, WalkResult, WalkStatus, Walker, WalkerState};
