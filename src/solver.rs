use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, info, warn};

use crate::board::Board;
use crate::config::SearchDepth;
use crate::error::Contradiction;
use crate::feature::{BLOCKED, SEGMENT};
use crate::location::{Site, SiteKind};
use crate::propagation::Seed;
use crate::validity::Validity;

/// What a successful [`Board::solve_with`] did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SolveReport {
    /// The search depth used.
    pub depth: SearchDepth,
    /// Wall time spent, propagation included.
    pub elapsed: Duration,
    /// Edges blocked because a segment there led to a contradiction.
    pub forced: usize,
    /// The state of the board afterwards.
    pub validity: Validity,
}

impl Board {
    /// Solve as far as the default [`SearchDepth`] allows.
    pub fn solve(&mut self) -> Result<SolveReport, Contradiction> {
        self.solve_with(SearchDepth::default())
    }

    /// Start over from the circles and deduce as much as `depth` allows.
    ///
    /// The search is sound but incomplete: puzzles that need more than one speculative segment at a time are left partly undecided,
    /// which the [`Validity`] in the report shows.
    /// A contradiction means the circles admit no loop at all.
    pub fn solve_with(&mut self, depth: SearchDepth) -> Result<SolveReport, Contradiction> {
        let start = Instant::now();

        let outcome = match depth {
            SearchDepth::Off => {
                self.clear();
                Ok(0)
            }
            SearchDepth::Propagation => self.run_propagation().map(|_| 0),
            SearchDepth::Shallow => self.run_propagation().and_then(|_| self.shallow_search()),
        };
        let elapsed = start.elapsed();

        match outcome {
            Ok(forced) => {
                let validity = self.validity();
                let tracker = &self.state.tracker;
                let fragments = if tracker.is_closed() { "loop closed".to_string() } else { format!("{} fragments open", tracker.active()) };
                info!("{depth} search finished in {elapsed:?}: {forced} edges forced, {fragments}, board {validity:?}");
                Ok(SolveReport { depth, elapsed, forced, validity })
            }
            Err(contradiction) => {
                warn!("{depth} search found no solution after {elapsed:?}: {contradiction}");
                Err(contradiction)
            }
        }
    }

    /// Try a segment on every undecided edge, and block the edge if the segment leads to a contradiction.
    /// Every blocked edge restarts the scan, until a whole scan blocks nothing.
    ///
    /// Returns how many edges were blocked.
    fn shallow_search(&mut self) -> Result<usize, Contradiction> {
        let mut forced = 0;

        'scan: loop {
            let undecided = self.state.grid.indexed_iter()
                .filter(|(_, feature)| feature.is_empty())
                .map(|(index, _)| Site::from(index))
                .filter(|site| site.kind() == SiteKind::Edge)
                .collect_vec();

            for site in undecided {
                let backup = self.state.clone();
                let trial = self.propagate(Seed::Place(site, SEGMENT));
                self.state = backup;

                if let Err(contradiction) = trial {
                    debug!("a segment at {site:?} leads to a contradiction ({contradiction}), blocking it");
                    self.propagate(Seed::Place(site, BLOCKED))?;
                    self.propagate(Seed::Clues)?;
                    forced += 1;
                    continue 'scan;
                }
            }

            return Ok(forced);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::*;
    use crate::feature::{Circle, Feature};
    use crate::location::Location;
    use crate::propagation::Propagation;

    fn board(width: usize, height: usize) -> Board {
        Board::new((NonZero::new(width).unwrap(), NonZero::new(height).unwrap()))
    }

    #[test]
    fn propagation_depth_skips_the_search() {
        let mut board = board(3, 3);
        board.set_circle(Location(0, 0), Circle::Black);

        let report = board.solve_with(SearchDepth::Propagation).unwrap();
        assert_eq!(report.depth, SearchDepth::Propagation);
        assert_eq!(report.forced, 0);
        assert_eq!(report.validity, Validity::Valid);
    }

    #[test]
    fn off_only_clears() {
        let mut board = board(3, 3);
        board.set_circle(Location(0, 0), Circle::Black);
        let empty = board.state.grid.clone();
        board.solve().unwrap();
        assert_ne!(board.state.grid, empty);

        let report = board.solve_with(SearchDepth::Off).unwrap();
        assert_eq!(report.forced, 0);
        assert_eq!(report.validity, Validity::Valid);
        assert_eq!(board.state.grid, empty);
        assert_eq!(board.state.tracker.active(), 0);
    }

    #[test]
    fn trials_leave_no_trace() {
        let mut board = board(3, 3);
        board.set_circle(Location(0, 0), Circle::Black);
        board.run_propagation().unwrap();
        let before = board.state.grid.clone();

        assert_eq!(board.shallow_search(), Ok(0));
        assert_eq!(board.state.grid, before);
        assert_eq!(board.propagate(Seed::Clues), Ok(Propagation::Unchanged));
    }

    #[test]
    fn corners_fix_the_outer_ring() {
        // the outer ring of a 3x3 board, fixed by its corners
        let mut board = board(3, 3);
        for location in [Location(0, 0), Location(2, 2)] {
            board.set_circle(location, Circle::Black);
        }
        for location in [Location(1, 0), Location(0, 1)] {
            board.set_circle(location, Circle::White);
        }

        let report = board.solve().unwrap();
        assert_eq!(report.validity, Validity::Complete);
        assert_eq!(board.segments().len(), 8);
        assert!(board.state.grid.indexed_iter()
            .all(|(index, feature)| Site::from(index).kind() != SiteKind::Edge || *feature != Feature::Empty));
    }
}
