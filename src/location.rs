use std::num::NonZero;

use ndarray::Ix;
use strum::VariantArray;

use crate::shape::SquareStep;

pub(crate) type Coord = usize;
/// The width or height of a puzzle, in cells.
pub type Dimension = NonZero<Coord>;
pub(crate) type Offset = (isize, isize);

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A cell `(x, y)` of a puzzle. The top left cell is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

/// Which of the two edges owned by a cell is meant: the one to its right or the one below it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// The edge between this cell and the cell to its right.
    Horizontal,
    /// The edge between this cell and the cell below it.
    Vertical,
}

impl Location {
    pub(crate) fn clue_site(self) -> Site {
        Site(self.0 * 2 + 1, self.1 * 2 + 1)
    }

    pub(crate) fn edge_site(self, orientation: Orientation) -> Site {
        match orientation {
            Orientation::Horizontal => Site(self.0 * 2 + 2, self.1 * 2 + 1),
            Orientation::Vertical => Site(self.0 * 2 + 1, self.1 * 2 + 2),
        }
    }

    pub(crate) fn corner_site(self) -> Site {
        Site(self.0 * 2 + 2, self.1 * 2 + 2)
    }
}

/// A position `(x, y)` on the doubled grid.
///
/// A `W`x`H` puzzle is stored as a `(2W+1)`x`(2H+1)` grid: sites with two odd coordinates hold clues,
/// sites with exactly one odd coordinate are the edges a loop segment may occupy,
/// and sites with two even coordinates are the corners between four cells.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Site(pub Coord, pub Coord);

/// The role a [`Site`] plays, decided purely by coordinate parity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SiteKind {
    /// Both coordinates odd; may hold a circle.
    Clue,
    /// Exactly one coordinate odd; may hold a segment or a block.
    Edge,
    /// Both coordinates even; may hold an in/out marker.
    Corner,
}

impl Site {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: Offset) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// The kind of this site.
    pub fn kind(&self) -> SiteKind {
        match (self.0 % 2, self.1 % 2) {
            (1, 1) => SiteKind::Clue,
            (0, 0) => SiteKind::Corner,
            _ => SiteKind::Edge,
        }
    }

    /// The two clue sites joined by this edge site.
    ///
    /// Only meaningful when `self` is an [`Edge`](SiteKind::Edge) site.
    pub(crate) fn junctions(self) -> [Site; 2] {
        // an odd x means the edge sits between two vertically adjacent clues
        if self.0 % 2 == 1 {
            [SquareStep::Up.attempt_from(self), SquareStep::Down.attempt_from(self)]
        } else {
            [SquareStep::Left.attempt_from(self), SquareStep::Right.attempt_from(self)]
        }
    }

    /// The four sites orthogonally adjacent to this one, without bounds checking.
    pub(crate) fn adjacent(self) -> impl Iterator<Item = Site> {
        SquareStep::VARIANTS.iter().map(move |step| step.attempt_from(self))
    }

    /// The puzzle cell of a clue site.
    pub(crate) fn location(self) -> Location {
        Location(self.0 / 2, self.1 / 2)
    }

    pub(crate) fn on_border(self, grid_dims: (Coord, Coord)) -> bool {
        self.0 == 0 || self.1 == 0 || self.0 + 1 == grid_dims.0 || self.1 + 1 == grid_dims.1
    }
}

impl From<(Ix, Ix)> for Site {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}
