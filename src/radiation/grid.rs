use super::conserved::Conserved;
use serde::{Deserialize, Serialize};

/**
 * A 1D row of conserved states: `nx` interior cells bordered by `nghost`
 * ghost cells on each side. Storage index `0` is the outermost lower ghost
 * cell; interior cell `i` lives at storage index `i + nghost`. Ghost cells
 * carry no meaning between boundary fills.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    nx: usize,
    nghost: usize,
    cells: Vec<Conserved>,
}

/// Mutable access to the ghost cells of a grid, together with read-only
/// access to the interior. This is all a boundary policy gets to see.
///
/// `lower` is ordered by storage index, so `lower[nghost - 1]` borders the
/// first interior cell; `upper[0]` borders the last interior cell.
pub struct GhostZones<'a> {
    pub lower: &'a mut [Conserved],
    pub interior: &'a [Conserved],
    pub upper: &'a mut [Conserved],
}

// ============================================================================
impl Grid {
    pub fn new(nx: usize, nghost: usize) -> Self {
        Self {
            nx,
            nghost,
            cells: vec![Conserved::default(); nx + 2 * nghost],
        }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn nghost(&self) -> usize {
        self.nghost
    }

    /// Return all cells, ghosts included, in storage order.
    pub fn cells(&self) -> &[Conserved] {
        &self.cells
    }

    pub fn interior(&self) -> &[Conserved] {
        &self.cells[self.nghost..self.nghost + self.nx]
    }

    pub fn interior_mut(&mut self) -> &mut [Conserved] {
        let (g, n) = (self.nghost, self.nx);
        &mut self.cells[g..g + n]
    }

    /// Return interior cell `i` (`0 <= i < nx`).
    pub fn cell(&self, i: usize) -> &Conserved {
        &self.interior()[i]
    }

    pub fn cell_mut(&mut self, i: usize) -> &mut Conserved {
        &mut self.interior_mut()[i]
    }

    pub fn ghost_zones_mut(&mut self) -> GhostZones<'_> {
        let (lower, rest) = self.cells.split_at_mut(self.nghost);
        let (interior, upper) = rest.split_at_mut(self.nx);
        GhostZones {
            lower,
            interior,
            upper,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.interior().iter().all(Conserved::is_finite)
    }
}
