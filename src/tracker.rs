use std::sync::Arc;

use itertools::Itertools;
use log::debug;
use ndarray::Array2;

use crate::error::Contradiction;
use crate::feature::{Feature, SEGMENT};
use crate::location::{Coord, Site, SiteKind};

pub(crate) type FragmentId = usize;

/// For every interior edge site, the interior edge sites that share one of its junctions.
///
/// Built once per grid size and shared between every copy of a board's state.
#[derive(Debug)]
pub(crate) struct PathNeighbors {
    table: Array2<Vec<Site>>,
}

impl PathNeighbors {
    pub(crate) fn new(grid_dims: (Coord, Coord)) -> Self {
        let (width, height) = grid_dims;
        let table = Array2::from_shape_fn((height, width), |index| {
            let site = Site::from(index);
            if site.kind() != SiteKind::Edge || site.on_border(grid_dims) {
                return Vec::new();
            }

            site.junctions().into_iter()
                .flat_map(Site::adjacent)
                .filter(|&other| other != site && !other.on_border(grid_dims))
                .collect()
        });

        Self { table }
    }

    pub(crate) fn of(&self, site: Site) -> &[Site] {
        &self.table[site.as_index()]
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Fragment {
    // equal while the fragment is a single segment
    ends: (Site, Site),
    open: bool,
}

impl Fragment {
    fn far_end(&self, near: Site) -> Site {
        if self.ends.0 == near { self.ends.1 } else { self.ends.0 }
    }
}

/// Keeps every chain of committed segments as a fragment with two open ends,
/// so that no fragment closes into a loop of its own while others are still open.
#[derive(Clone, Debug)]
pub(crate) struct LoopTracker {
    neighbors: Arc<PathNeighbors>,
    // which fragment, if any, has this site as an open end
    owners: Array2<Option<FragmentId>>,
    fragments: Vec<Fragment>,
    active: usize,
    closed: bool,
}

impl LoopTracker {
    pub(crate) fn new(neighbors: Arc<PathNeighbors>) -> Self {
        let owners = Array2::from_elem(neighbors.table.raw_dim(), None);
        Self { neighbors, owners, fragments: Vec::new(), active: 0, closed: false }
    }

    pub(crate) fn reset(&mut self) {
        self.owners.fill(None);
        self.fragments.clear();
        self.active = 0;
        self.closed = false;
    }

    /// Number of fragments still open.
    pub(crate) fn active(&self) -> usize {
        self.active
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// The open end next to `site` across `junction`, if a segment sits there.
    fn attachment(&self, grid: &Array2<Feature>, site: Site, junction: Site) -> Result<Option<(Site, FragmentId)>, Contradiction> {
        let mut segments = junction.adjacent().filter(|&other| other != site && grid[other.as_index()] == SEGMENT);
        let Some(neighbor) = segments.next() else {
            return Ok(None);
        };
        if segments.next().is_some() {
            return Err(Contradiction::Branch { site: junction });
        }

        Ok(self.owners[neighbor.as_index()].map(|id| (neighbor, id)))
    }

    /// Register a segment just written to `grid` at `site`.
    ///
    /// Returns the empty sites where a further segment would close a fragment while others are still open.
    pub(crate) fn link(&mut self, grid: &Array2<Feature>, site: Site) -> Result<Vec<Site>, Contradiction> {
        if self.closed {
            return Err(Contradiction::Stray { site });
        }

        let [first, second] = site.junctions();
        let first = self.attachment(grid, site, first)?;
        let second = self.attachment(grid, site, second)?;

        match (first, second) {
            (None, None) => {
                self.owners[site.as_index()] = Some(self.fragments.len());
                self.fragments.push(Fragment { ends: (site, site), open: true });
                self.active += 1;
            }
            (Some((neighbor, id)), None) | (None, Some((neighbor, id))) => self.extend(id, neighbor, site),
            (Some((_, id1)), Some((_, id2))) if id1 == id2 => self.close(id1, site)?,
            (Some((n1, id1)), Some((n2, id2))) => self.merge((n1, id1), (n2, id2)),
        }

        debug_assert_eq!(self.active, self.fragments.iter().filter(|f| f.open).count());

        if self.active < 2 {
            return Ok(Vec::new());
        }
        // a fragment finished while it was alone must be rechecked once a second one appears
        Ok(self.fragments.iter()
            .filter(|fragment| fragment.open && fragment.ends.0 != fragment.ends.1)
            .flat_map(|fragment| self.closing_sites(grid, fragment.ends))
            .unique()
            .collect())
    }

    fn extend(&mut self, id: FragmentId, neighbor: Site, site: Site) {
        let fragment = &mut self.fragments[id];
        if fragment.ends.0 == fragment.ends.1 {
            // a lone segment stays an open end
            fragment.ends = (neighbor, site);
        } else {
            fragment.ends = (fragment.far_end(neighbor), site);
            self.owners[neighbor.as_index()] = None;
        }
        self.owners[site.as_index()] = Some(id);
    }

    fn merge(&mut self, (n1, id1): (Site, FragmentId), (n2, id2): (Site, FragmentId)) {
        let far1 = self.fragments[id1].far_end(n1);
        let far2 = self.fragments[id2].far_end(n2);

        for (near, far) in [(n1, far1), (n2, far2)] {
            if near != far {
                self.owners[near.as_index()] = None;
            }
        }
        self.owners[far2.as_index()] = Some(id1);

        self.fragments[id1].ends = (far1, far2);
        self.fragments[id2].open = false;
        self.active -= 1;
    }

    fn close(&mut self, id: FragmentId, site: Site) -> Result<(), Contradiction> {
        if self.active > 1 {
            return Err(Contradiction::PrematureLoop { site });
        }

        let (a, b) = self.fragments[id].ends;
        self.owners[a.as_index()] = None;
        self.owners[b.as_index()] = None;
        self.fragments[id].open = false;
        self.active -= 1;
        self.closed = true;
        debug!("loop closed at {site:?}");

        Ok(())
    }

    /// Empty sites that would join the two ends of a fragment.
    fn closing_sites<'a>(&'a self, grid: &'a Array2<Feature>, (a, b): (Site, Site)) -> impl Iterator<Item = Site> + 'a {
        let near_b = self.neighbors.of(b);

        self.neighbors.of(a).iter()
            .copied()
            .filter(move |other| near_b.contains(other) && grid[other.as_index()].is_empty())
    }
}
