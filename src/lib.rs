#![warn(missing_docs)]

//! # `masyu`
//!
//! A solver for [Masyu](https://en.wikipedia.org/wiki/Masyu), the loop puzzle with black and white circle clues.
//! Begin by building a board with a [`BoardBuilder`], or with [`Board::new`] and [`Board::set_circle`],
//! then call [`solve()`](Board::solve) and read the result back through the board's accessors or its [`Display`](std::fmt::Display) form.
//!
//! # Internals
//! The board is stored at double resolution: a `W`x`H` puzzle becomes a `(2W+1)`x`(2H+1)` grid of [`Site`]s
//! holding circles, edges (segment or blocked) and corners (inside or outside the loop).
//! The outer ring of edges is blocked and the outer corners are outside from the start.
//!
//! Deduction proceeds in three layers:
//! 1. A catalogue of local rules, each a pair of small before/after grids (see [`Template`]),
//! expanded over the eight symmetries of the square and indexed by the site and feature that trigger them.
//! Propagation applies every triggered rule until nothing changes, or until two rules disagree about a site.
//! 2. Every committed segment is tracked as part of a fragment with two open ends.
//! A fragment may only close into a loop once it is the last one open,
//! so while several fragments exist, any edge that would join a fragment's two ends is blocked.
//! 3. A shallow search tries a segment on each undecided edge in turn.
//! If propagation from that segment hits a contradiction, the edge is blocked for good and the scan starts over.
//!
//! The search never nests trials, so it is sound but incomplete: puzzles that need deeper lookahead are left partly undecided.
//! [`Board::validity`] tells whether the loop is finished.

pub use board::Board;
pub use builder::{BoardBuilder, BuilderInvalidReason};
pub use config::{Config, SearchDepth};
pub use error::{ConfigError, Contradiction, TemplateError};
pub use feature::{Circle, Feature, Line, Side};
pub use library::PatternLibrary;
pub use location::{Dimension, Location, Orientation, Site, SiteKind};
pub use pattern::Template;
pub use propagation::Propagation;
pub use solver::SolveReport;
pub use validity::Validity;

pub(crate) mod board;
pub(crate) mod builder;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod feature;
pub(crate) mod library;
pub(crate) mod location;
pub(crate) mod pattern;
pub(crate) mod propagation;
pub(crate) mod shape;
pub(crate) mod solver;
pub(crate) mod tracker;
pub(crate) mod validity;
mod tests;
