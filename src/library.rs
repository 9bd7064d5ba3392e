use std::sync::LazyLock;

use itertools::Itertools;
use log::debug;
use ndarray::Array3;

use crate::feature::Feature;
use crate::location::{Coord, Site, SiteKind};
use crate::pattern::{Mark, Pattern, Role, Template};

/// The built-in rules, as (before, after) grids.
pub(crate) const CATALOGUE: &[(&str, &str)] = &[
    // completing lines through circles
    ("....\nQ-..\n....", "..X.\nQ-.-\n..X."),
    ("...\n-O.\n...", ".X.\n-O-\n.X."),
    // black circles turn away from their segments
    (".Q-", "XQ-"),
    // line continuation through Xs
    ("...\nX*X\n.-.", ".-.\nX.X\n.-."),
    (".X.\nX*.\n.-.", ".X.\nX.-\n.-."),
    // X completion around lines
    (".-.\n-*.\n...", ".-.\n-.X\n.X."),
    (".-.\n.*.\n.-.", ".-.\nX.X\n.-."),
    (".X.\nX*X\n...", ".X.\nX.X\n.X."),
    // black circles blocked by features
    (".....\nXQ...\n.....", "...X.\nXQ-.-\n...X."),
    (".......\nX..Q...\n.......", ".....X.\nX.XQ-.-\n.....X."),
    (".........\n...Q.Q...\n.........", ".X.....X.\n-.-QXQ-.-\n.X.....X."),
    (".....-\n...Q..\n......", ".X...-\n-.-QX.\n.X...."),
    ("..........\n...Q...O.O\n..........", ".X........\n-.-QX..O.O\n.X........"),
    ("O...O\n.....\n..Q..\n.....\n.....\n.....", "O...O\n..X..\n..Q..\n..-..\n.X.X.\n..-.."),
    // white circle rule
    ("-.-O...", "-.-O-.X"),
    // white circles blocked by features
    ("...\n.O.\n.X.", ".X.\n-O-\n.X."),
    (".......\n.O.O.O.\n.......", ".-.-.-.\nXOXOXOX\n.-.-.-."),
    (".......\n-..O.O.\n.......", "...-.-.\n-.XOXOX\n...-.-."),
    (".......\n-..O..-\n.......", "...-...\n-.XOX.-\n...-..."),
    // in/out across segments and walls
    ("v-.", "v-^"),
    ("^-.", "^-v"),
    ("vX.", "vXv"),
    ("^X.", "^X^"),
    ("v.^", "v-^"),
    ("^.v", "^-v"),
    ("v.v", "vXv"),
    ("^.^", "^X^"),
];

static TEMPLATES: LazyLock<Vec<Template>> = LazyLock::new(|| {
    CATALOGUE.iter()
        .map(|(before, after)| Template::parse(before, after))
        .collect::<Result<Vec<_>, _>>()
        .expect("built-in pattern catalogue must parse")
});

pub(crate) type PatternId = usize;

/// Every rule of a template catalogue, expanded over all orientations and trigger features,
/// and registered at every site of a grid of fixed size where it fits.
///
/// A library is built once per grid size and never changes afterwards; boards share it behind an [`Arc`](std::sync::Arc).
#[derive(Debug)]
pub struct PatternLibrary {
    grid_dims: (Coord, Coord),
    patterns: Vec<Pattern>,
    // (row, column, trigger slot)
    table: Array3<Vec<PatternId>>,
}

impl PatternLibrary {
    /// Build the built-in catalogue for a grid of `grid_dims` `(columns, rows)`, i.e. `(2W+1, 2H+1)` for a `W`x`H` puzzle.
    pub fn for_grid(grid_dims: (Coord, Coord)) -> Self {
        Self::from_templates(grid_dims, &TEMPLATES)
    }

    /// Build a library from arbitrary templates.
    pub fn from_templates(grid_dims: (Coord, Coord), templates: &[Template]) -> Self {
        let (width, height) = grid_dims;
        let mut patterns = Vec::new();
        let mut table = Array3::from_shape_simple_fn((height, width, Feature::COUNT), Vec::new);

        for orientation in templates.iter().flat_map(Template::orientations) {
            // orientations are normalised, so the bounding box starts at the origin
            let max_x = orientation.iter().map(|e| e.offset.0).max().unwrap_or(0);
            let max_y = orientation.iter().map(|e| e.offset.1).max().unwrap_or(0);
            if max_x >= width as isize || max_y >= height as isize {
                continue;
            }
            let wildcard = orientation.iter().find(|e| e.mark == Mark::AnyClue).map(|e| e.offset);

            for trigger in orientation.iter().filter(|e| e.role == Role::Check) {
                let Mark::Feature(feature) = trigger.mark else { continue };
                let Some(slot) = feature.slot() else { continue };
                let (tx, ty) = trigger.offset;

                let id = patterns.len();
                patterns.push(Pattern::anchored(&orientation, trigger.offset));

                for (x, y) in (tx..width as isize - (max_x - tx)).cartesian_product(ty..height as isize - (max_y - ty)) {
                    if let Some((wx, wy)) = wildcard {
                        let pinned = Site((x - tx + wx) as Coord, (y - ty + wy) as Coord);
                        if pinned.kind() != SiteKind::Clue {
                            continue;
                        }
                    }
                    table[[y as usize, x as usize, slot]].push(id);
                }
            }
        }

        debug!(
            "built pattern library for a {}x{} grid: {} anchored patterns over {} templates",
            width, height, patterns.len(), templates.len(),
        );

        Self { grid_dims, patterns, table }
    }

    /// The `(columns, rows)` of the grid this library was built for.
    pub fn grid_dims(&self) -> (Coord, Coord) {
        self.grid_dims
    }

    /// Number of anchored patterns, counting each orientation and trigger once.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the library holds no patterns at all.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns triggered by `feature` appearing at `site`.
    pub(crate) fn lookup(&self, site: Site, feature: Feature) -> impl Iterator<Item = &Pattern> + '_ {
        feature.slot()
            .into_iter()
            .flat_map(move |slot| self.table[[site.1, site.0, slot]].iter())
            .map(move |&id| &self.patterns[id])
    }
}
