//! Basic example of using the trail map engine

use trailmap_core::{samples, solve, validate, Grid, Walker, WalkerState};

fn main() {
    // Solve a map given as text
    let map = "@---A---+\n        |\nx-B-+   C\n    |   |\n    +---+";
    println!("Map:\n{}\n", map);

    let result = solve(map);
    println!("Letters: {}", result.letters);
    println!("Path:    {}", result.path);
    println!("Complete: {}\n", result.is_complete);

    // Inspect why a map is rejected
    let broken = Grid::from_text("@-A-+-B-x");
    let report = validate(&broken);
    println!("Fake turn map valid: {}", report.is_valid);
    for defect in &report.errors {
        println!("  - {}", defect);
    }

    // Walk step by step
    println!("\n--- Stepping through the Goonies map ---\n");
    if let Some(sample) = samples::find("id-4") {
        println!("{}\n", sample.text());
        match WalkerState::new(sample.grid()) {
            Ok(mut state) => {
                let walker = Walker::new();
                while walker.advance(&mut state) {
                    println!("{} -> {}", state.position(), state.trace());
                }
                println!("\nCollected: {}", state.letters());
            }
            Err(err) => println!("Cannot walk: {}", err),
        }
    }
}
