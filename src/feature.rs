use std::fmt::{Display, Formatter};

use strum::VariantArray;

/// A circle clue.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, VariantArray)]
pub enum Circle {
    /// The loop turns here and runs straight through both neighbouring cells.
    Black,
    /// The loop runs straight through here and turns in at least one neighbouring cell.
    White,
}

/// What is known about an edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, VariantArray)]
pub enum Line {
    /// The loop uses this edge.
    Segment,
    /// The loop cannot use this edge.
    Blocked,
}

/// Which side of the loop a corner lies on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, VariantArray)]
pub enum Side {
    /// Enclosed by the loop.
    In,
    /// Outside the loop.
    Out,
}

/// The value held by one site of the doubled grid.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Feature {
    /// Nothing known yet.
    #[default]
    Empty,
    /// A circle clue, on clue sites only.
    Circle(Circle),
    /// A decided edge, on edge sites only.
    Line(Line),
    /// A decided corner, on corner sites only.
    Side(Side),
}

pub(crate) const SEGMENT: Feature = Feature::Line(Line::Segment);
pub(crate) const BLOCKED: Feature = Feature::Line(Line::Blocked);

impl Feature {
    /// Number of non-empty features, i.e. the number of distinct pattern triggers.
    pub(crate) const COUNT: usize = 6;

    /// Dense index of a non-empty feature, used to address the pattern table.
    pub(crate) fn slot(self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Circle(Circle::Black) => Some(0),
            Self::Circle(Circle::White) => Some(1),
            Self::Line(Line::Segment) => Some(2),
            Self::Line(Line::Blocked) => Some(3),
            Self::Side(Side::In) => Some(4),
            Self::Side(Side::Out) => Some(5),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::Empty
    }

    /// The glyph used for this feature in templates and board dumps.
    pub fn glyph(&self) -> char {
        match self {
            Self::Empty => '.',
            Self::Circle(Circle::Black) => 'Q',
            Self::Circle(Circle::White) => 'O',
            Self::Line(Line::Segment) => '-',
            Self::Line(Line::Blocked) => 'X',
            Self::Side(Side::In) => 'v',
            Self::Side(Side::Out) => '^',
        }
    }

    /// Inverse of [`Self::glyph`].
    pub fn from_glyph(glyph: char) -> Option<Self> {
        Some(match glyph {
            '.' => Self::Empty,
            'Q' => Self::Circle(Circle::Black),
            'O' => Self::Circle(Circle::White),
            '-' => Self::Line(Line::Segment),
            'X' => Self::Line(Line::Blocked),
            'v' => Self::Side(Side::In),
            '^' => Self::Side(Side::Out),
            _ => return None,
        })
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'", self.glyph())
    }
}
