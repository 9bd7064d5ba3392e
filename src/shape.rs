use strum::VariantArray;

use crate::location::{Offset, Site};

/// A unit step on the doubled grid.
///
/// From a clue site a step lands on an edge site; from an edge site it lands on one of the clues the edge joins.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub(crate) enum SquareStep {
    Up,
    Down,
    Left,
    Right,
}

impl SquareStep {
    pub(crate) fn offset(&self) -> Offset {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub(crate) fn attempt_from(&self, site: Site) -> Site {
        site.offset_by(self.offset())
    }
}

/// The eight symmetries of the square, acting on relative offsets.
///
/// Rotations are clockwise as seen on screen, where `y` grows downwards.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug)]
pub(crate) enum Symmetry {
    Identity,
    MirrorX,
    MirrorY,
    Rotate180,
    Transpose,
    Rotate90,
    Rotate270,
    AntiTranspose,
}

impl Symmetry {
    pub(crate) fn apply(&self, (x, y): Offset) -> Offset {
        match self {
            Self::Identity => (x, y),
            Self::MirrorX => (-x, y),
            Self::MirrorY => (x, -y),
            Self::Rotate180 => (-x, -y),
            Self::Transpose => (y, x),
            Self::Rotate90 => (-y, x),
            Self::Rotate270 => (y, -x),
            Self::AntiTranspose => (-y, -x),
        }
    }
}
