use std::collections::HashSet;

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::feature::{Circle, Feature, SEGMENT};
use crate::location::{Location, Offset, Site};
use crate::shape::SquareStep;

/// Verdict on the segments currently on a board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Validity {
    /// The segments form a single loop satisfying every circle.
    Complete,
    /// Not finished, but nothing breaks the rules yet.
    Valid,
    /// Some segment or circle already breaks the rules.
    Invalid,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum CircleState {
    Broken,
    Pending,
    Satisfied,
}

fn times(offset: Offset, factor: isize) -> Offset {
    (offset.0 * factor, offset.1 * factor)
}

fn perpendicular(step: SquareStep) -> [SquareStep; 2] {
    match step {
        SquareStep::Up | SquareStep::Down => [SquareStep::Left, SquareStep::Right],
        SquareStep::Left | SquareStep::Right => [SquareStep::Up, SquareStep::Down],
    }
}

fn opposite(step: SquareStep) -> SquareStep {
    match step {
        SquareStep::Up => SquareStep::Down,
        SquareStep::Down => SquareStep::Up,
        SquareStep::Left => SquareStep::Right,
        SquareStep::Right => SquareStep::Left,
    }
}

impl Board {
    fn has_segment(&self, site: Site) -> bool {
        self.state.grid.get(site.as_index()) == Some(&SEGMENT)
    }

    /// The segment leaving the cell at clue site `clue` in `step`'s direction.
    fn exits(&self, clue: Site, step: SquareStep) -> bool {
        self.has_segment(step.attempt_from(clue))
    }

    /// Whether the next cell in `step`'s direction turns off the line it was entered along.
    fn turns_after(&self, clue: Site, step: SquareStep) -> bool {
        let cell = clue.offset_by(times(step.offset(), 2));
        perpendicular(step).into_iter().any(|side| self.exits(cell, side))
    }

    /// Whether the next cell in `step`'s direction carries straight on.
    fn continues_after(&self, clue: Site, step: SquareStep) -> bool {
        self.exits(clue.offset_by(times(step.offset(), 2)), step)
    }

    fn circle_state(&self, clue: Site, circle: Circle) -> CircleState {
        let exits = [SquareStep::Up, SquareStep::Down, SquareStep::Left, SquareStep::Right]
            .into_iter()
            .filter(|&step| self.exits(clue, step))
            .collect::<Vec<_>>();
        let straight = exits.len() == 2 && exits[1] == opposite(exits[0]);

        match circle {
            Circle::Black => {
                if straight || exits.iter().any(|&step| self.turns_after(clue, step)) {
                    CircleState::Broken
                } else if exits.len() == 2 && exits.iter().all(|&step| self.continues_after(clue, step)) {
                    CircleState::Satisfied
                } else {
                    CircleState::Pending
                }
            }
            Circle::White => {
                if exits.len() == 2 && !straight {
                    CircleState::Broken
                } else if !straight {
                    CircleState::Pending
                } else if exits.iter().any(|&step| self.turns_after(clue, step)) {
                    CircleState::Satisfied
                } else if exits.iter().all(|&step| self.continues_after(clue, step)) {
                    CircleState::Broken
                } else {
                    CircleState::Pending
                }
            }
        }
    }

    /// Every committed segment, as the pair of cells it joins.
    pub fn segments(&self) -> Vec<UnorderedPair<Location>> {
        self.state.grid.indexed_iter()
            .filter(|(_, feature)| **feature == SEGMENT)
            .map(|(index, _)| {
                let [a, b] = Site::from(index).junctions();
                UnorderedPair(a.location(), b.location())
            })
            .collect()
    }

    /// Check the committed segments against the rules of Masyu.
    pub fn validity(&self) -> Validity {
        let graph = UnGraphMap::<Location, ()>::from_edges(self.segments().into_iter().map(|UnorderedPair(a, b)| (a, b)));
        let degree = |location: Location| graph.neighbors(location).count();

        if graph.nodes().any(|location| degree(location) > 2) {
            return Validity::Invalid;
        }

        let mut visited = HashSet::new();
        let mut components = 0;
        for start in graph.nodes() {
            if visited.contains(&start) {
                continue;
            }
            components += 1;

            let mut bfs = Bfs::new(&graph, start);
            let mut size = 0;
            let mut closed = true;
            while let Some(location) = bfs.next(&graph) {
                visited.insert(location);
                size += 1;
                closed &= degree(location) == 2;
            }

            // a finished loop that leaves other segments out
            if closed && size < graph.node_count() {
                return Validity::Invalid;
            }
        }

        let mut satisfied = true;
        for (index, feature) in self.state.grid.indexed_iter() {
            let Feature::Circle(circle) = feature else { continue };
            match self.circle_state(Site::from(index), *circle) {
                CircleState::Broken => return Validity::Invalid,
                CircleState::Pending => satisfied = false,
                CircleState::Satisfied => {}
            }
        }

        let loop_done = components == 1 && graph.nodes().all(|location| degree(location) == 2);
        if satisfied && loop_done {
            Validity::Complete
        } else {
            Validity::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::*;

    fn board(width: usize, height: usize) -> Board {
        Board::new((NonZero::new(width).unwrap(), NonZero::new(height).unwrap()))
    }

    // a ring around the single inner corner of a 2x2 board
    fn ring(board: &mut Board) {
        for site in [Site(2, 1), Site(1, 2), Site(3, 2), Site(2, 3)] {
            board.state.grid[site.as_index()] = SEGMENT;
        }
    }

    #[test]
    fn empty_board_is_valid() {
        assert_eq!(board(3, 3).validity(), Validity::Valid);
        assert!(board(3, 3).segments().is_empty());
    }

    #[test]
    fn finished_ring() {
        let mut board = board(2, 2);
        ring(&mut board);
        assert_eq!(board.validity(), Validity::Complete);
        assert_eq!(board.segments().len(), 4);
        assert!(board.segments().contains(&UnorderedPair(Location(0, 0), Location(1, 0))));

        // the loop turns again straight after the black circle
        board.set_circle(Location(0, 0), Circle::Black);
        assert_eq!(board.validity(), Validity::Invalid);
    }

    #[test]
    fn straight_black_circle() {
        let mut board = board(5, 5);
        board.set_circle(Location(2, 2), Circle::Black);
        for site in [Site(4, 5), Site(6, 5)] {
            board.state.grid[site.as_index()] = SEGMENT;
        }
        assert_eq!(board.validity(), Validity::Invalid);
    }

    #[test]
    fn white_circle_rules() {
        let mut board = board(5, 5);
        board.set_circle(Location(2, 2), Circle::White);

        // straight through, neighbours undecided
        for site in [Site(4, 5), Site(6, 5)] {
            board.state.grid[site.as_index()] = SEGMENT;
        }
        assert_eq!(board.validity(), Validity::Valid);

        // straight on through both neighbours as well
        for site in [Site(2, 5), Site(8, 5)] {
            board.state.grid[site.as_index()] = SEGMENT;
        }
        assert_eq!(board.validity(), Validity::Invalid);
    }

    #[test]
    fn separate_small_loop() {
        let mut board = board(4, 4);
        ring(&mut board);
        board.state.grid[Site(6, 5).as_index()] = SEGMENT;
        assert_eq!(board.validity(), Validity::Invalid);
    }
}
