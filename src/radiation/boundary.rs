use super::conserved::{Conserved, GAS_DENSITY, GAS_ENERGY};
use super::constants::PhysicalConstants;
use super::grid::GhostZones;

/// A policy that overwrites every ghost cell on both ends of the domain. It
/// is invoked before each flux evaluation and only ever sees the ghost cells
/// mutably.
///
pub trait BoundaryCondition: Send + Sync {
    fn fill_ghost_zones(&self, ghosts: GhostZones<'_>, constants: &PhysicalConstants, time: f64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Lower,
    Upper,
}

impl Side {
    /// Unit normal pointing from the boundary into the domain.
    fn inward(self) -> f64 {
        match self {
            Side::Lower => 1.0,
            Side::Upper => -1.0,
        }
    }
}

/**
 * Boundary behavior at one end of the domain.
 */
#[derive(Clone, Debug, PartialEq)]
pub enum Boundary {
    /// Incident radiation from a blackbody at the given temperature: ghost
    /// energy is `a T^4` and the ghost flux is the free-streaming inward
    /// flux `c E / 4`. Gas fields are mirrored from the interior.
    Marshak { temperature: f64 },
    /// Mirror of the interior with the normal flux and momentum reversed,
    /// so no energy crosses the wall.
    Reflecting,
    /// Every ghost cell holds the given fixed state.
    Fixed(Conserved),
    /// Zero-gradient copy of the adjacent interior cell.
    Outflow,
}

impl Boundary {
    fn fill(&self, side: Side, ghost: &mut [Conserved], interior: &[Conserved], constants: &PhysicalConstants) {
        let ng = ghost.len();
        let nx = interior.len();

        // Interior cell mirrored onto ghost slot `k`, counting outward from
        // the boundary face.
        let mirror = |k: usize| match side {
            Side::Lower => interior[k.min(nx - 1)],
            Side::Upper => interior[nx - 1 - k.min(nx - 1)],
        };
        // Storage slot of the ghost cell `k` steps out from the face.
        let slot = |k: usize| match side {
            Side::Lower => ng - 1 - k,
            Side::Upper => k,
        };

        for k in 0..ng {
            let g = &mut ghost[slot(k)];
            *g = match self {
                Boundary::Marshak { temperature } => {
                    let e_inc = constants.blackbody_energy(*temperature);
                    let f_inc = side.inward() * constants.c_light * e_inc / 4.0;
                    let adjacent = mirror(k);
                    let mut u = Conserved::new(e_inc, [f_inc, 0.0, 0.0], 0.0, 0.0, [0.0; 3]);
                    u[GAS_ENERGY] = adjacent.internal_energy();
                    u[GAS_DENSITY] = adjacent.gas_density();
                    u
                }
                Boundary::Reflecting => mirror(k).reflect(),
                Boundary::Fixed(state) => *state,
                Boundary::Outflow => mirror(0),
            }
        }
    }
}

/**
 * A pair of boundaries for the lower and upper ends of a 1D domain.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryPair {
    pub lower: Boundary,
    pub upper: Boundary,
}

impl BoundaryPair {
    pub fn new(lower: Boundary, upper: Boundary) -> Self {
        Self { lower, upper }
    }

    pub fn reflecting() -> Self {
        Self::new(Boundary::Reflecting, Boundary::Reflecting)
    }
}

impl BoundaryCondition for BoundaryPair {
    fn fill_ghost_zones(&self, ghosts: GhostZones<'_>, constants: &PhysicalConstants, _time: f64) {
        let GhostZones { lower, interior, upper } = ghosts;
        self.lower.fill(Side::Lower, lower, interior, constants);
        self.upper.fill(Side::Upper, upper, interior, constants);
    }
}

// ============================================================================
#[cfg(test)]
mod test {

    use super::*;
    use crate::radiation::grid::Grid;

    fn ramp(nx: usize) -> Grid {
        let mut grid = Grid::new(nx, 2);
        for i in 0..nx {
            *grid.cell_mut(i) = Conserved::new(1.0 + i as f64, [0.1 * i as f64, 0.0, 0.0], 2.0, 1.0, [0.0; 3]);
        }
        grid
    }

    #[test]
    fn reflecting_boundary_mirrors_and_flips_flux() {
        let mut grid = ramp(6);
        let constants = PhysicalConstants::default();
        BoundaryPair::reflecting().fill_ghost_zones(grid.ghost_zones_mut(), &constants, 0.0);
        let cells = grid.cells();

        assert_eq!(cells[1].rad_energy(), cells[2].rad_energy());
        assert_eq!(cells[0].rad_energy(), cells[3].rad_energy());
        assert_eq!(cells[1].rad_flux()[0], -cells[2].rad_flux()[0]);
        assert_eq!(cells[8].rad_energy(), cells[7].rad_energy());
        assert_eq!(cells[9].rad_energy(), cells[6].rad_energy());
        assert_eq!(cells[8].rad_flux()[0], -cells[7].rad_flux()[0]);
    }

    #[test]
    fn marshak_boundary_imposes_inward_blackbody_flux() {
        let mut grid = ramp(6);
        let constants = PhysicalConstants { c_light: 2.0, c_hat: 2.0, ..PhysicalConstants::default() };
        let boundary = BoundaryPair::new(Boundary::Marshak { temperature: 2.0 }, Boundary::Marshak { temperature: 1.0 });
        boundary.fill_ghost_zones(grid.ghost_zones_mut(), &constants, 0.0);
        let cells = grid.cells();

        assert_eq!(cells[0].rad_energy(), 16.0);
        assert_eq!(cells[1].rad_flux()[0], 8.0);
        assert_eq!(cells[9].rad_energy(), 1.0);
        assert_eq!(cells[9].rad_flux()[0], -0.5);
        assert_eq!(cells[1].gas_density(), 1.0);
    }

    #[test]
    fn boundary_fill_leaves_interior_untouched() {
        let mut grid = ramp(5);
        let before = grid.interior().to_vec();
        let floor = Conserved::new(1e-20, [0.0; 3], 1e-5, 1.0, [0.0; 3]);
        let boundary = BoundaryPair::new(Boundary::Fixed(floor), Boundary::Outflow);
        boundary.fill_ghost_zones(grid.ghost_zones_mut(), &PhysicalConstants::default(), 0.0);

        assert_eq!(grid.interior(), &before[..]);
        assert_eq!(grid.cells()[0], floor);
        assert_eq!(grid.cells()[8], before[4]);
    }
}
