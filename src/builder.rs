use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::board::{grid_dims_of, Board};
use crate::feature::Circle;
use crate::library::PatternLibrary;
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A circle was placed outside the bounds specified by `dims` on a builder.
    #[error("a circle lies outside the board")]
    FeatureOutOfBounds,
    /// A circle was placed on a cell which already holds one.
    #[error("two circles were placed on one cell")]
    DuplicateCircle,
    /// A shared pattern library was built for a different board size.
    #[error("the pattern library was built for a different board size")]
    LibraryMismatch,
}

/// A builder for Masyu boards.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Once a builder is invalid, every further call does nothing; [`Self::is_valid`] and [`Self::build`] report why.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    // width, height
    dims: (Dimension, Dimension),
    circles: BTreeMap<Location, Circle>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            circles: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    fn contains(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// Place a circle at `location`.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds,
    /// or a [`DuplicateCircle`](BuilderInvalidReason::DuplicateCircle) invalid state if a circle is already there.
    pub fn add_circle(&mut self, location: Location, circle: Circle) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.contains(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        if self.circles.insert(location, circle).is_some() {
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateCircle);
        }

        self
    }

    /// Shorthand for multiple calls to [`Self::add_circle`] with the same `circle`.
    pub fn add_circles(&mut self, locations: impl IntoIterator<Item = Location>, circle: Circle) -> &mut Self {
        for location in locations {
            self.add_circle(location, circle);
        }

        self
    }

    /// Remove the circle at `location`, if there is one.
    ///
    /// If the builder is in an invalid state, this function does nothing.
    pub fn remove_circle(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.circles.remove(&location);
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`] with its own [`PatternLibrary`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(self.assemble(Board::new(self.dims)))
    }

    /// As [`Self::build`], but sharing `library` with other boards of the same size.
    ///
    /// Fails with [`LibraryMismatch`](BuilderInvalidReason::LibraryMismatch) if `library` was built for another size.
    pub fn build_with(&mut self, library: Arc<PatternLibrary>) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() && library.grid_dims() != grid_dims_of(self.dims) {
            self.invalid_reasons.push(BuilderInvalidReason::LibraryMismatch);
        }
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(self.assemble(Board::with_library(self.dims, library)))
    }

    fn assemble(&self, mut board: Board) -> Board {
        for (location, circle) in &self.circles {
            board.set_circle(*location, *circle);
        }

        board
    }
}
