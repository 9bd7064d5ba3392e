use std::collections::VecDeque;

use crate::board::State;
use crate::error::Contradiction;
use crate::feature::{Feature, BLOCKED, SEGMENT};
use crate::library::PatternLibrary;
use crate::location::Site;

/// How a propagation that found no contradiction ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Propagation {
    /// The fixpoint had already been reached; nothing was assigned.
    Unchanged,
    /// At least one site was assigned before reaching the fixpoint.
    Progress,
}

/// Where a propagation starts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Seed {
    /// Every circle currently on the board.
    Clues,
    /// Assign a feature, then work outwards from it.
    Place(Site, Feature),
}

impl State {
    /// Apply every triggered pattern until nothing changes, starting from `seed`.
    ///
    /// A contradiction leaves the state partially written; callers keep a copy to restore.
    pub(crate) fn propagate(&mut self, library: &PatternLibrary, seed: Seed) -> Result<Propagation, Contradiction> {
        self.propagate_with(library, seed, VecDeque::pop_front)
    }

    /// [`Self::propagate`], taking the next site off the worklist with `next`.
    ///
    /// The fixpoint does not depend on the order sites are taken in.
    fn propagate_with(
        &mut self,
        library: &PatternLibrary,
        seed: Seed,
        mut next: impl FnMut(&mut VecDeque<Site>) -> Option<Site>,
    ) -> Result<Propagation, Contradiction> {
        let mut queue = VecDeque::new();
        let mut progress = false;

        match seed {
            Seed::Clues => queue.extend(
                self.grid.indexed_iter()
                    .filter(|(_, feature)| matches!(feature, Feature::Circle(_)))
                    .map(|(index, _)| Site::from(index)),
            ),
            Seed::Place(site, feature) => {
                if self.assign(site, feature, &mut queue)? {
                    progress = true;
                } else {
                    // already there, but still worth working outwards from
                    queue.push_back(site);
                }
            }
        }

        while let Some(site) = next(&mut queue) {
            let feature = self.grid[site.as_index()];
            for pattern in library.lookup(site, feature) {
                if !pattern.matches(&self.grid, site) {
                    continue;
                }
                for &(offset, wanted) in &pattern.set {
                    progress |= self.assign(site.offset_by(offset), wanted, &mut queue)?;
                }
            }
        }

        Ok(if progress { Propagation::Progress } else { Propagation::Unchanged })
    }

    /// Write `feature` to an empty `site` and queue it. Returns whether anything was written.
    fn assign(&mut self, site: Site, feature: Feature, queue: &mut VecDeque<Site>) -> Result<bool, Contradiction> {
        let present = self.grid[site.as_index()];
        if present == feature {
            return Ok(false);
        }
        if !present.is_empty() {
            return Err(Contradiction::Conflict { site, present, wanted: feature });
        }

        self.grid[site.as_index()] = feature;
        queue.push_back(site);

        if feature == SEGMENT {
            for forced in self.tracker.link(&self.grid, site)? {
                self.assign(forced, BLOCKED, queue)?;
            }
        }

        Ok(true)
    }
}
