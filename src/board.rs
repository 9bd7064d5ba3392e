use std::fmt::{Display, Formatter};
use std::sync::Arc;

use log::{info, warn};
use ndarray::Array2;

use crate::error::Contradiction;
use crate::feature::{Circle, Feature, Line, Side, BLOCKED};
use crate::library::PatternLibrary;
use crate::location::{Coord, Dimension, Location, Orientation, Site, SiteKind};
use crate::propagation::{Propagation, Seed};
use crate::tracker::{LoopTracker, PathNeighbors};

/// Everything a speculative trial may change. Copied before a trial and put back afterwards.
#[derive(Clone, Debug)]
pub(crate) struct State {
    pub(crate) grid: Array2<Feature>,
    pub(crate) tracker: LoopTracker,
}

/// A Masyu puzzle together with everything deduced about it so far.
///
/// Boards can be made directly with [`Board::new`] and [`Board::set_circle`], or with a [`BoardBuilder`](crate::BoardBuilder).
/// Internally the board is a doubled grid of [`Site`]s; the accessors here take puzzle [`Location`]s instead.
#[derive(Clone, Debug)]
pub struct Board {
    dims: (Dimension, Dimension),
    pub(crate) state: State,
    pub(crate) library: Arc<PatternLibrary>,
}

pub(crate) fn grid_dims_of(dims: (Dimension, Dimension)) -> (Coord, Coord) {
    (dims.0.get() * 2 + 1, dims.1.get() * 2 + 1)
}

impl Board {
    /// An empty puzzle of `dims` cells, in `(x, y)` order.
    ///
    /// This builds a fresh [`PatternLibrary`]; to share one between boards of the same size, use [`BoardBuilder::build_with`](crate::BoardBuilder::build_with).
    pub fn new(dims: (Dimension, Dimension)) -> Self {
        Self::with_library(dims, Arc::new(PatternLibrary::for_grid(grid_dims_of(dims))))
    }

    pub(crate) fn with_library(dims: (Dimension, Dimension), library: Arc<PatternLibrary>) -> Self {
        let grid_dims = grid_dims_of(dims);
        // the loop never leaves the board, so the outer ring is known from the start
        let grid = Array2::from_shape_fn((grid_dims.1, grid_dims.0), |index| {
            let site = Site::from(index);
            match site.kind() {
                _ if !site.on_border(grid_dims) => Feature::Empty,
                SiteKind::Edge => BLOCKED,
                SiteKind::Corner => Feature::Side(Side::Out),
                SiteKind::Clue => Feature::Empty,
            }
        });
        let tracker = LoopTracker::new(Arc::new(PathNeighbors::new(grid_dims)));

        Self { dims, state: State { grid, tracker }, library }
    }

    /// Width and height of the puzzle, in cells.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    pub(crate) fn grid_dims(&self) -> (Coord, Coord) {
        grid_dims_of(self.dims)
    }

    fn contains(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    fn feature_at(&self, site: Site) -> Feature {
        self.state.grid.get(site.as_index()).copied().unwrap_or_default()
    }

    /// Toggle a circle at `location`: an occupied cell is cleared, whatever its circle, and an empty one receives `circle`.
    ///
    /// Nothing is propagated; call [`Self::run_propagation`] or [`Self::solve`] afterwards.
    pub fn set_circle(&mut self, location: Location, circle: Circle) {
        if !self.contains(location) {
            warn!("ignoring circle at {location:?}, outside a {}x{} board", self.dims.0, self.dims.1);
            return;
        }

        let cell = &mut self.state.grid[location.clue_site().as_index()];
        *cell = match *cell {
            Feature::Circle(_) => Feature::Empty,
            _ => Feature::Circle(circle),
        };
    }

    /// The circle at `location`, if any.
    pub fn circle(&self, location: Location) -> Option<Circle> {
        if !self.contains(location) {
            return None;
        }
        match self.feature_at(location.clue_site()) {
            Feature::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    /// Whether the loop is known to use the edge right of ([`Horizontal`](Orientation::Horizontal)) or below ([`Vertical`](Orientation::Vertical)) `location`.
    pub fn is_segment(&self, location: Location, orientation: Orientation) -> bool {
        self.contains(location) && self.feature_at(location.edge_site(orientation)) == Feature::Line(Line::Segment)
    }

    /// Whether the loop is known not to use the edge right of or below `location`.
    ///
    /// Edges along the outside of the board are always blocked.
    pub fn is_blocked(&self, location: Location, orientation: Orientation) -> bool {
        self.contains(location) && self.feature_at(location.edge_site(orientation)) == BLOCKED
    }

    /// Which side of the loop the corner below and to the right of `location` is known to be on.
    pub fn corner_marker(&self, location: Location) -> Option<Side> {
        if !self.contains(location) {
            return None;
        }
        match self.feature_at(location.corner_site()) {
            Feature::Side(side) => Some(side),
            _ => None,
        }
    }

    /// Forget every deduction, keeping the circles and the outer ring.
    pub(crate) fn clear(&mut self) {
        let grid_dims = self.grid_dims();
        for (index, feature) in self.state.grid.indexed_iter_mut() {
            if !Site::from(index).on_border(grid_dims) && !matches!(feature, Feature::Circle(_)) {
                *feature = Feature::Empty;
            }
        }
        self.state.tracker.reset();
    }

    pub(crate) fn propagate(&mut self, seed: Seed) -> Result<Propagation, Contradiction> {
        self.state.propagate(&self.library, seed)
    }

    /// Start over from the circles alone and deduce everything the pattern catalogue allows.
    pub fn run_propagation(&mut self) -> Result<Propagation, Contradiction> {
        self.clear();

        let outcome = self.propagate(Seed::Clues);
        match &outcome {
            Ok(Propagation::Progress) => info!("propagation finished with new deductions"),
            Ok(Propagation::Unchanged) => info!("propagation finished without new deductions"),
            Err(contradiction) => warn!("contradiction found: {contradiction}"),
        }

        outcome
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.state.grid.rows() {
            for feature in row {
                write!(f, "{}", feature.glyph())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::*;

    fn three_by_two() -> Board {
        Board::new((NonZero::new(3).unwrap(), NonZero::new(2).unwrap()))
    }

    #[test]
    fn border_is_seeded() {
        assert_eq!(format!("{}", three_by_two()), "^X^X^X^
X.....X
^.....^
X.....X
^X^X^X^
");
    }

    #[test]
    fn circles_toggle() {
        let mut board = three_by_two();
        board.set_circle(Location(1, 0), Circle::Black);
        board.set_circle(Location(2, 1), Circle::White);
        assert_eq!(board.circle(Location(1, 0)), Some(Circle::Black));
        assert_eq!(board.circle(Location(2, 1)), Some(Circle::White));

        // clears, even with the other colour
        board.set_circle(Location(1, 0), Circle::White);
        assert_eq!(board.circle(Location(1, 0)), None);

        // out of bounds is ignored
        board.set_circle(Location(3, 0), Circle::White);
        assert_eq!(board.circle(Location(3, 0)), None);

        assert_eq!(format!("{}", board), "^X^X^X^
X.....X
^.....^
X....OX
^X^X^X^
");
    }

    #[test]
    fn edges_and_corners() {
        let board = three_by_two();
        assert!(board.is_blocked(Location(2, 0), Orientation::Horizontal));
        assert!(board.is_blocked(Location(0, 1), Orientation::Vertical));
        assert!(!board.is_blocked(Location(0, 0), Orientation::Horizontal));
        assert!(!board.is_segment(Location(0, 0), Orientation::Vertical));

        assert_eq!(board.corner_marker(Location(2, 0)), Some(Side::Out));
        assert_eq!(board.corner_marker(Location(0, 0)), None);
        assert_eq!(board.corner_marker(Location(5, 5)), None);
    }

    #[test]
    fn far_away_locations() {
        let board = three_by_two();
        assert_eq!(board.dims(), (NonZero::new(3).unwrap(), NonZero::new(2).unwrap()));

        let far = Location(usize::MAX / 2 + 1, usize::MAX);
        assert_eq!(board.circle(far), None);
        assert_eq!(board.corner_marker(far), None);
        assert!(!board.is_segment(far, Orientation::Horizontal));
        assert!(!board.is_blocked(far, Orientation::Vertical));
    }
}
