use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::error::TemplateError;
use crate::feature::Feature;
use crate::location::{Offset, Site};
use crate::shape::Symmetry;

/// What a template demands of one relative site.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub(crate) enum Mark {
    Feature(Feature),
    /// Matches anything, but pins the template so that this site is a clue site.
    AnyClue,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub(crate) enum Role {
    Check,
    Set,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub(crate) struct Entry {
    pub(crate) offset: Offset,
    pub(crate) mark: Mark,
    pub(crate) role: Role,
}

/// One orientation of a template: entries sorted, with the minimum corner at the origin.
pub(crate) type Orientation = Vec<Entry>;

/// A local inference rule written as a pair of ASCII grids.
///
/// The `before` grid lists what must already be present, the `after` grid what follows from it.
/// Glyphs are those of [`Feature::glyph`], plus `*` in the before grid for "some clue site, whatever it holds".
///
/// ```
/// use masyu::Template;
///
/// // a white circle entered from the left leaves to the right and cannot turn
/// let template = Template::parse("...\n-O.\n...", ".X.\n-O-\n.X.").unwrap();
/// assert_eq!(template.orientation_count(), 4);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Template {
    entries: Vec<Entry>,
}

fn parse_grid(grid: &str) -> Result<Vec<Vec<Option<Mark>>>, TemplateError> {
    let lines = grid.split('\n').collect_vec();
    let width = lines.first().map_or(0, |line| line.chars().count());

    lines.iter().enumerate()
        .map(|(y, line)| {
            if line.chars().count() != width {
                return Err(TemplateError::RaggedLine { line: y });
            }

            line.chars().enumerate()
                .map(|(x, glyph)| match glyph {
                    '*' => Ok(Some(Mark::AnyClue)),
                    _ => match Feature::from_glyph(glyph) {
                        Some(Feature::Empty) => Ok(None),
                        Some(feature) => Ok(Some(Mark::Feature(feature))),
                        None => Err(TemplateError::UnknownGlyph { glyph, line: y, column: x }),
                    },
                })
                .collect()
        })
        .collect()
}

fn shape_of(grid: &[Vec<Option<Mark>>]) -> (usize, usize) {
    (grid.first().map_or(0, Vec::len), grid.len())
}

fn normalize(entries: impl Iterator<Item = Entry>) -> Orientation {
    let entries = entries.collect_vec();
    let min_x = entries.iter().map(|e| e.offset.0).min().unwrap_or(0);
    let min_y = entries.iter().map(|e| e.offset.1).min().unwrap_or(0);

    entries.into_iter()
        .map(|e| Entry { offset: (e.offset.0 - min_x, e.offset.1 - min_y), ..e })
        .sorted()
        .collect_vec()
}

impl Template {
    /// Parse a template from its before and after grids, rows separated by `\n`.
    pub fn parse(before: &str, after: &str) -> Result<Self, TemplateError> {
        let before = parse_grid(before)?;
        let after = parse_grid(after)?;
        if shape_of(&before) != shape_of(&after) {
            return Err(TemplateError::ShapeMismatch { before: shape_of(&before), after: shape_of(&after) });
        }

        let mut entries = Vec::new();
        for (y, (before_row, after_row)) in before.iter().zip(after.iter()).enumerate() {
            for (x, (was, now)) in before_row.iter().zip(after_row.iter()).enumerate() {
                let offset = (x as isize, y as isize);
                if let Some(mark) = was {
                    entries.push(Entry { offset, mark: *mark, role: Role::Check });
                }

                match (was, now) {
                    (_, None) => {}
                    (Some(was), Some(now)) if was == now => {}
                    (_, Some(Mark::AnyClue)) => return Err(TemplateError::WildcardInResult { line: y, column: x }),
                    (_, Some(now)) => entries.push(Entry { offset, mark: *now, role: Role::Set }),
                }
            }
        }

        Ok(Self { entries })
    }

    /// Every distinct image of this template under the symmetries of the square.
    pub(crate) fn orientations(&self) -> Vec<Orientation> {
        Symmetry::VARIANTS.iter()
            .map(|symmetry| normalize(self.entries.iter().map(|e| Entry { offset: symmetry.apply(e.offset), ..*e })))
            .unique()
            .collect_vec()
    }

    /// How many distinct orientations this template has: 8 divided by the order of its own symmetry group.
    pub fn orientation_count(&self) -> usize {
        self.orientations().len()
    }
}

/// A rule anchored at its trigger feature, ready to be tested against the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Pattern {
    pub(crate) check: Vec<(Offset, Feature)>,
    pub(crate) set: Vec<(Offset, Feature)>,
}

impl Pattern {
    /// Re-centre `orientation` on `trigger`, dropping the trigger itself and any wildcard from the checks.
    pub(crate) fn anchored(orientation: &[Entry], trigger: Offset) -> Self {
        let relative = |offset: Offset| (offset.0 - trigger.0, offset.1 - trigger.1);
        let mut check = Vec::new();
        let mut set = Vec::new();

        for entry in orientation {
            match (entry.role, entry.mark) {
                (_, Mark::AnyClue) => {}
                (Role::Check, Mark::Feature(_)) if entry.offset == trigger => {}
                (Role::Check, Mark::Feature(feature)) => check.push((relative(entry.offset), feature)),
                (Role::Set, Mark::Feature(feature)) => set.push((relative(entry.offset), feature)),
            }
        }

        Self { check, set }
    }

    /// Whether every precondition holds with the trigger at `anchor`.
    ///
    /// The library only registers a pattern where all of its offsets stay on the grid.
    pub(crate) fn matches(&self, grid: &Array2<Feature>, anchor: Site) -> bool {
        self.check.iter().all(|&(offset, feature)| grid[anchor.offset_by(offset).as_index()] == feature)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::feature::{Circle, BLOCKED, SEGMENT};
    use crate::library::CATALOGUE;

    fn orientation_set(template: &Template) -> HashSet<Orientation> {
        template.orientations().into_iter().collect()
    }

    #[test]
    fn check_and_set_lists() {
        let template = Template::parse("...\n-O.\n...", ".X.\n-O-\n.X.").unwrap();
        let checks = template.entries.iter().filter(|e| e.role == Role::Check).count();
        let sets = template.entries.iter().filter(|e| e.role == Role::Set).collect_vec();

        assert_eq!(checks, 2);
        assert_eq!(sets.len(), 3);
        assert!(sets.iter().any(|e| e.offset == (2, 1) && e.mark == Mark::Feature(SEGMENT)));
        assert!(sets.iter().any(|e| e.offset == (1, 0) && e.mark == Mark::Feature(BLOCKED)));
    }

    #[test]
    fn orientation_counts_follow_symmetry() {
        // mirror-symmetric about the horizontal axis
        assert_eq!(Template::parse("...\n-O.\n...", ".X.\n-O-\n.X.").unwrap().orientation_count(), 4);
        // symmetric about both axes
        assert_eq!(Template::parse(".......\n.O.O.O.\n.......", ".-.-.-.\nXOXOXOX\n.-.-.-.").unwrap().orientation_count(), 2);
        // symmetric about the diagonal
        assert_eq!(Template::parse(".-.\n-*.\n...", ".-.\n-.X\n.X.").unwrap().orientation_count(), 4);
        // symmetric under a half turn only
        assert_eq!(Template::parse("Q..\n..Q", "Q-.\n.-Q").unwrap().orientation_count(), 4);
        // no symmetry at all
        assert_eq!(Template::parse(".....-\n...Q..\n......", ".X...-\n-.-QX.\n.X....").unwrap().orientation_count(), 8);
    }

    #[test]
    fn orientation_sets_are_closed_under_symmetry() {
        for (before, after) in CATALOGUE {
            let template = Template::parse(before, after).unwrap();
            let orientations = orientation_set(&template);

            for symmetry in Symmetry::VARIANTS {
                let image: HashSet<Orientation> = orientations.iter()
                    .map(|o| normalize(o.iter().map(|e| Entry { offset: symmetry.apply(e.offset), ..*e })))
                    .collect();
                assert_eq!(image, orientations, "template {before:?} under {symmetry:?}");
            }
        }
    }

    #[test]
    fn malformed_templates() {
        assert_eq!(Template::parse("..\n...", "..\n..."), Err(TemplateError::RaggedLine { line: 1 }));
        assert_eq!(
            Template::parse("...", "..."),
            Ok(Template { entries: vec![] })
        );
        assert_eq!(
            Template::parse("..", "..."),
            Err(TemplateError::ShapeMismatch { before: (2, 1), after: (3, 1) })
        );
        assert_eq!(
            Template::parse(".#.", "..."),
            Err(TemplateError::UnknownGlyph { glyph: '#', line: 0, column: 1 })
        );
        assert_eq!(Template::parse("...", ".*."), Err(TemplateError::WildcardInResult { line: 0, column: 1 }));
    }

    #[test]
    fn anchoring_drops_trigger_and_wildcard() {
        let template = Template::parse(".X.\nX*X\n...", ".X.\nX.X\n.X.").unwrap();
        let orientation = &template.orientations()[0];
        let trigger = orientation.iter().find(|e| e.role == Role::Check && e.mark != Mark::AnyClue).unwrap();
        let pattern = Pattern::anchored(orientation, trigger.offset);

        assert_eq!(pattern.check.len(), 2);
        assert_eq!(pattern.set.len(), 1);
        assert!(pattern.check.iter().all(|(_, f)| *f == BLOCKED));
        assert!(pattern.check.iter().all(|(offset, _)| *offset != (0, 0)));
    }

    #[test]
    fn matching_reads_relative_sites() {
        let mut grid = Array2::from_elem((5, 5), Feature::Empty);
        grid[[1, 1]] = Feature::Circle(Circle::White);
        grid[[1, 0]] = SEGMENT;

        let pattern = Pattern { check: vec![((-1, 0), SEGMENT)], set: vec![((1, 0), SEGMENT)] };
        assert!(pattern.matches(&grid, Site(1, 1)));
        assert!(!pattern.matches(&grid, Site(3, 1)));
    }
}
