use thiserror::Error;

use crate::feature::Feature;
use crate::location::Site;

/// Why a partial assignment cannot extend to any solution.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum Contradiction {
    /// A rule demanded a value for a site that already holds a different one.
    #[error("site {site:?} holds {present} but must become {wanted}")]
    Conflict {
        /// The contested site.
        site: Site,
        /// The value already there.
        present: Feature,
        /// The value a rule tried to assign.
        wanted: Feature,
    },
    /// Three segments meet at one clue site.
    #[error("three segments meet at {site:?}")]
    Branch {
        /// The clue site where they meet.
        site: Site,
    },
    /// A segment closed a loop while other fragments were still open.
    #[error("segment at {site:?} closes a loop while other fragments remain open")]
    PrematureLoop {
        /// The closing segment.
        site: Site,
    },
    /// A segment appeared after the loop was already closed.
    #[error("segment at {site:?} lies outside the closed loop")]
    Stray {
        /// The extra segment.
        site: Site,
    },
}

/// Reasons a pattern template fails to parse.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum TemplateError {
    /// A line of a grid differs in length from the first line.
    #[error("line {line} of the template grid has a different length than the first line")]
    RaggedLine {
        /// Zero-based line number.
        line: usize,
    },
    /// The before and after grids have different dimensions.
    #[error("before grid is {before:?} but after grid is {after:?}")]
    ShapeMismatch {
        /// `(width, height)` of the before grid.
        before: (usize, usize),
        /// `(width, height)` of the after grid.
        after: (usize, usize),
    },
    /// A character that names no feature.
    #[error("unknown glyph {glyph:?} at line {line}, column {column}")]
    UnknownGlyph {
        /// The offending character.
        glyph: char,
        /// Zero-based line number.
        line: usize,
        /// Zero-based column number.
        column: usize,
    },
    /// A wildcard appears in the after grid without one at the same place in the before grid.
    #[error("wildcard introduced by the after grid at line {line}, column {column}")]
    WildcardInResult {
        /// Zero-based line number.
        line: usize,
        /// Zero-based column number.
        column: usize,
    },
}

/// Reasons a configuration cannot be loaded.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// An environment value could not be understood.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
