#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use crate::builder::BoardBuilder;
    use crate::config::SearchDepth;
    use crate::error::Contradiction;
    use crate::feature::{Circle, Side, SEGMENT};
    use crate::location::{Location, Orientation, Site};
    use crate::propagation::{Propagation, Seed};
    use crate::validity::Validity;

    fn square(size: usize) -> BoardBuilder {
        BoardBuilder::with_dims((NonZero::new(size).unwrap(), NonZero::new(size).unwrap()))
    }

    #[test]
    fn solve_black_corner() {
        let mut board = square(3)
            .add_circle(Location(0, 0), Circle::Black)
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "^X^X^X^
XQ....X
^.....^
X.....X
^.....^
X.....X
^X^X^X^
");

        let report = board.solve().unwrap();
        assert_eq!(report.depth, SearchDepth::Shallow);
        // both ways around the middle are still possible
        assert_eq!(report.forced, 0);
        assert_eq!(report.validity, Validity::Valid);
        assert_eq!(format!("{}", board), "^X^X^X^
XQ-.-.X
^-vXv-^
X.X...X
^-v...^
X.-...X
^X^X^X^
");
        assert_eq!(board.corner_marker(Location(0, 0)), Some(Side::In));
        assert_eq!(board.corner_marker(Location(1, 1)), None);

        // settle it by going around the bottom right
        assert_eq!(board.propagate(Seed::Place(Site(5, 4), SEGMENT)), Ok(Propagation::Progress));
        assert!(board.is_segment(Location(1, 2), Orientation::Horizontal));
        assert!(board.is_blocked(Location(1, 1), Orientation::Horizontal));
        assert!(board.is_blocked(Location(1, 1), Orientation::Vertical));
        assert_eq!(board.validity(), Validity::Complete);
    }

    #[test]
    fn solve_outer_ring() {
        let mut board = square(4)
            .add_circles([Location(0, 0), Location(3, 3)], Circle::Black)
            .add_circles([Location(2, 0), Location(0, 2)], Circle::White)
            .build()
            .unwrap();

        let report = board.solve().unwrap();
        assert_eq!(report.validity, Validity::Complete);
        // the inner edges only fall to the search
        assert!(report.forced > 0);
        assert_eq!(board.segments().len(), 12);

        for x in 0..4 {
            for y in 0..4 {
                let location = Location(x, y);
                let on_ring = |orientation| match orientation {
                    Orientation::Horizontal => (y == 0 || y == 3) && x < 3,
                    Orientation::Vertical => (x == 0 || x == 3) && y < 3,
                };
                for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                    assert_eq!(board.is_segment(location, orientation), on_ring(orientation), "{location:?} {orientation:?}");
                    assert_eq!(board.is_blocked(location, orientation), !on_ring(orientation), "{location:?} {orientation:?}");
                }
            }
        }
    }

    #[test]
    fn propagation_alone_finds_the_ring() {
        let mut board = square(4)
            .add_circles([Location(0, 0), Location(3, 3)], Circle::Black)
            .add_circles([Location(2, 0), Location(0, 2)], Circle::White)
            .build()
            .unwrap();

        let report = board.solve_with(SearchDepth::Propagation).unwrap();
        assert_eq!(report.forced, 0);
        assert_eq!(report.validity, Validity::Complete);
    }

    #[test]
    fn white_circle_in_a_corner() {
        let mut board = square(2)
            .add_circle(Location(0, 0), Circle::White)
            .build()
            .unwrap();

        assert!(matches!(board.solve(), Err(Contradiction::Conflict { .. })));
    }

    #[test]
    fn solve_starts_over() {
        let mut board = square(3)
            .add_circle(Location(0, 0), Circle::Black)
            .build()
            .unwrap();
        board.solve().unwrap();
        let solved = format!("{}", board);

        board.propagate(Seed::Place(Site(5, 4), SEGMENT)).unwrap();
        assert_ne!(format!("{}", board), solved);

        board.solve().unwrap();
        assert_eq!(format!("{}", board), solved);
    }
}
