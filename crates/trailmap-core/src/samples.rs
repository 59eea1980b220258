//! Built-in demonstration maps

use crate::grid::Grid;
use serde::Serialize;

/// A named demonstration map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub rows: &'static [&'static str],
}

impl Sample {
    pub fn grid(&self) -> Grid {
        Grid::new(self.rows.iter().map(|row| row.chars().collect()).collect())
    }

    /// The map as newline-delimited text
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }
}

const CATALOG: &[Sample] = &[
    Sample {
        id: "id-1",
        name: "Basic",
        description: "Just a basic example.",
        rows: &[
            "@---A---+",
            "        |",
            "x-B-+   C",
            "    |   |",
            "    +---+",
        ],
    },
    Sample {
        id: "id-2",
        name: "Go Straight",
        description: "Go Straight Through Intersections.",
        rows: &[
            "  @",
            "  | +-C--+",
            "  A |    |",
            "  +---B--+",
            "    |      x",
            "    |      |",
            "    +---D--+",
        ],
    },
    Sample {
        id: "id-3",
        name: "Simple",
        description: "Letters may be found on turns.",
        rows: &[
            "@---A---+",
            "        |",
            "x-B-+   |",
            "    |   |",
            "    +---C",
        ],
    },
    Sample {
        id: "id-4",
        name: "Goonies",
        description: "Do Not Collect a Letter Twice (GOONIES).",
        rows: &[
            "     +-O-N-+",
            "     |     |",
            "     |   +-I-+",
            " @-G-O-+ | | |",
            "     | | +-+ E",
            "     +-+     S",
            "             |",
            "             x",
        ],
    },
    Sample {
        id: "id-5",
        name: "Compact Map",
        description: "Keep Direction, Even in a Compact Space.",
        rows: &[
            " +-L-+",
            " |  +A-+",
            "@B+ ++ H",
            " ++    x",
        ],
    },
    Sample {
        id: "id-6",
        name: "Ignored",
        description: "Ignore Stuff After End of Path.",
        rows: &[
            "  @-A--+",
            "       |",
            "       +-B--x-C--D",
        ],
    },
    Sample {
        id: "id-7",
        name: "Simple Horizontal",
        description: "Simple Horizontal Path with One Letter.",
        rows: &["@-A-x"],
    },
    Sample {
        id: "id-8",
        name: "Simple Vertical",
        description: "Simple Vertical Path.",
        rows: &["@", "|", "A", "|", "x"],
    },
    Sample {
        id: "id-9",
        name: "Intersection",
        description: "Intersection with Extra Letters.",
        rows: &[
            "   @---A---+",
            "           |",
            "   +---B---+",
            "   |       ",
            "   C------x",
        ],
    },
];

const INVALID_CATALOG: &[Sample] = &[
    Sample {
        id: "invalid-1",
        name: "Missing Start",
        description: "No '@' is present.",
        rows: &[
            "x  -A---+",
            "        |",
            "x-B-+   C",
            "    |   |",
            "    +---+",
        ],
    },
    Sample {
        id: "invalid-2",
        name: "Missing End",
        description: "No 'x' is present.",
        rows: &[
            "   @--A---+",
            "          |",
            "   +--B---+",
            "   |      |",
            "   C       ",
        ],
    },
    Sample {
        id: "invalid-3",
        name: "Multiple Starts",
        description: "More than one '@' is present.",
        rows: &["@-A-@-+", "       ", "x-B-+ C"],
    },
    Sample {
        id: "invalid-4",
        name: "Fork",
        description: "A turn leads to more than one valid path.",
        rows: &[
            "   x-B",
            "    | ",
            "@--A--+",
            "    | ",
            " x+  C",
            "  | | ",
            "  +--+",
        ],
    },
    Sample {
        id: "invalid-5",
        name: "Broken Path",
        description: "The path stops unexpectedly.",
        rows: &["@-A-+ ", "    | ", "      ", "    B-x"],
    },
    Sample {
        id: "invalid-6",
        name: "Multiple Starting Paths",
        description: "More than one cell next to '@' leads somewhere.",
        rows: &["x-B-@-A-x"],
    },
    Sample {
        id: "invalid-7",
        name: "Fake Turn",
        description: "A '+' is used even though the path could continue straight.",
        rows: &["@-A-+-B-x"],
    },
];

/// Valid demonstration maps, in catalogue order
pub fn catalog() -> &'static [Sample] {
    CATALOG
}

/// Maps that the validator rejects, one per defect family
pub fn invalid_catalog() -> &'static [Sample] {
    INVALID_CATALOG
}

/// Look a sample up by id in both catalogues
pub fn find(id: &str) -> Option<&'static Sample> {
    CATALOG
        .iter()
        .chain(INVALID_CATALOG.iter())
        .find(|sample| sample.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = catalog()
            .iter()
            .chain(invalid_catalog())
            .map(|s| s.id)
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("id-7").map(|s| s.name), Some("Simple Horizontal"));
        assert_eq!(find("invalid-7").map(|s| s.name), Some("Fake Turn"));
        assert!(find("id-42").is_none());
    }

    #[test]
    fn test_text_matches_grid() {
        for sample in catalog() {
            assert_eq!(Grid::from_text(&sample.text()), sample.grid());
        }
    }

    #[test]
    fn test_rows_keep_their_lengths() {
        let grid = find("id-2").unwrap().grid();
        let lengths: Vec<usize> = grid.rows().iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![3, 10, 10, 10, 12, 12, 12]);
    }
}
