use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::boundary::BoundaryCondition;
use super::closure::{self, RadPrimitive, NUM_RAD_FIELDS};
use super::conserved::{Conserved, RAD_FIELDS};
use super::constants::{FluxLimitPolicy, Parameters, PhysicalConstants};
use super::eos::EquationOfState;
use super::error::Error;
use super::grid::Grid;
use super::opacity::Opacity;
use super::reaction::{self, ExchangeSettings};
use super::source::{EnergySource, NoSource};
use crate::mesh::Mesh;

/// Ghost cells on each side; the piecewise-linear reconstruction at the
/// outermost interior face needs two.
pub const NUM_GUARD: usize = 2;

/**
 * The problem-specific behavior the integrator delegates to: opacities,
 * equation of state, boundary policy, and external source. Chosen once at
 * problem setup.
 */
pub struct Closures {
    pub opacity: Box<dyn Opacity>,
    pub eos: Box<dyn EquationOfState>,
    pub boundary: Box<dyn BoundaryCondition>,
    pub source: Box<dyn EnergySource>,
}

impl Closures {
    pub fn new<O, E, B>(opacity: O, eos: E, boundary: B) -> Self
    where
        O: Opacity + 'static,
        E: EquationOfState + 'static,
        B: BoundaryCondition + 'static,
    {
        Self {
            opacity: Box::new(opacity),
            eos: Box::new(eos),
            boundary: Box::new(boundary),
            source: Box::new(NoSource),
        }
    }

    pub fn with_source<S: EnergySource + 'static>(self, source: S) -> Self {
        Self {
            source: Box::new(source),
            ..self
        }
    }
}

/// Running account of energy (per unit area) that entered the domain other
/// than through the initial condition. Over any run,
/// `total_energy(t) - total_energy(t0) == ledger.net()` to round-off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyLedger {
    /// Net radiation energy that crossed the two domain faces, inward
    /// positive.
    pub boundary_inflow: f64,
    /// Energy deposited by the external source.
    pub source_injection: f64,
    /// Energy added by clamping the radiation energy to its floor.
    pub floor_correction: f64,
}

impl EnergyLedger {
    pub fn net(&self) -> f64 {
        self.boundary_inflow + self.source_injection + self.floor_correction
    }
}

/// Time derivative of the radiation variables in each interior cell, plus
/// the boundary and source energy rates that went into it.
struct StageRates {
    rates: Vec<[f64; NUM_RAD_FIELDS]>,
    inflow: f64,
    injection: f64,
}

/**
 * Integrator for the two-moment (M1) radiation system coupled to the gas
 * energy on a uniform 1D grid. Each call to `advance` applies one step made
 * of a two-stage (Heun) explicit transport update followed by a per-cell
 * implicit energy exchange, then enforces the energy floor and the flux
 * causality bound. A step either succeeds in full or leaves the state and
 * the clock untouched.
 */
pub struct RadSystem {
    parameters: Parameters,
    constants: PhysicalConstants,
    closures: Closures,
    mesh: Mesh,
    grid: Grid,
    time: f64,
    dt: f64,
    ledger: EnergyLedger,
}

// ============================================================================
impl RadSystem {
    pub fn new(parameters: Parameters, constants: PhysicalConstants, closures: Closures) -> Result<Self, Error> {
        parameters.validate()?;
        constants.validate()?;

        let mesh = Mesh::new(parameters.domain_length, parameters.nx);
        let grid = Grid::new(parameters.nx, NUM_GUARD);
        let system = Self {
            time: parameters.initial_time,
            dt: 0.0,
            ledger: EnergyLedger::default(),
            parameters,
            constants,
            closures,
            mesh,
            grid,
        };
        let dt_max = system.cfl_timestep()?;

        info!(
            "radiation system: nx = {}, length = {}, dx = {:.4e}, cfl = {}, c_hat = {}, dt_cfl = {:.4e}",
            system.parameters.nx,
            system.parameters.domain_length,
            system.mesh.cell_spacing(),
            system.parameters.cfl_number,
            system.constants.c_hat,
            dt_max
        );
        Ok(system)
    }

    pub fn nx(&self) -> usize {
        self.grid.nx()
    }

    pub fn nghost(&self) -> usize {
        self.grid.nghost()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn last_dt(&self) -> f64 {
        self.dt
    }

    pub fn ledger(&self) -> &EnergyLedger {
        &self.ledger
    }

    /// Return interior cell `i`.
    pub fn cell(&self, i: usize) -> &Conserved {
        self.grid.cell(i)
    }

    /// Mutable access to interior cell `i`, for writing the initial state.
    pub fn cell_mut(&mut self, i: usize) -> &mut Conserved {
        self.grid.cell_mut(i)
    }

    pub fn set_cell(&mut self, i: usize, u: Conserved) {
        *self.grid.cell_mut(i) = u
    }

    /// Write every interior cell from a function of the cell-center
    /// position.
    pub fn initialize<F>(&mut self, f: F)
    where
        F: Fn(f64) -> Conserved,
    {
        let x = self.mesh.cell_centers();
        for (u, x) in self.grid.interior_mut().iter_mut().zip(x) {
            *u = f(x)
        }
    }

    pub fn rad_energy(&self, i: usize) -> f64 {
        self.cell(i).rad_energy()
    }

    pub fn x1_rad_flux(&self, i: usize) -> f64 {
        self.cell(i).rad_flux()[0]
    }

    pub fn gas_energy(&self, i: usize) -> f64 {
        self.cell(i).gas_energy()
    }

    pub fn gas_density(&self, i: usize) -> f64 {
        self.cell(i).gas_density()
    }

    pub fn x1_gas_momentum(&self, i: usize) -> f64 {
        self.cell(i).gas_momentum()[0]
    }

    pub fn gas_temperature(&self, i: usize) -> f64 {
        let u = self.cell(i);
        self.closures.eos.gas_temperature(u.gas_density(), u.internal_energy())
    }

    pub fn radiation_temperature(&self, i: usize) -> f64 {
        self.constants.radiation_temperature(self.rad_energy(i))
    }

    /// Radiation energy per unit area, summed over the interior cells.
    pub fn total_radiation_energy(&self) -> f64 {
        self.grid.interior().iter().map(Conserved::rad_energy).sum::<f64>() * self.mesh.cell_spacing()
    }

    /// Total (internal plus kinetic) gas energy per unit area, summed over
    /// the interior cells.
    pub fn total_gas_energy(&self) -> f64 {
        self.grid.interior().iter().map(Conserved::gas_energy).sum::<f64>() * self.mesh.cell_spacing()
    }

    pub fn total_energy(&self) -> f64 {
        self.total_radiation_energy() + self.total_gas_energy()
    }

    /// The largest time step allowed by the causality constraint,
    /// `cfl * dx / c_hat`.
    pub fn cfl_timestep(&self) -> Result<f64, Error> {
        let dt = self.parameters.cfl_number * self.mesh.cell_spacing() / self.constants.c_hat;

        if dt.is_finite() && dt > 0.0 {
            Ok(dt)
        } else {
            Err(Error::InvalidConfiguration(format!("CFL time step is {}", dt)))
        }
    }

    /// Advance the state by one step no longer than `dt_requested` or the
    /// CFL time step, and return the step size used.
    pub fn advance(&mut self, dt_requested: f64) -> Result<f64, Error> {
        if !(dt_requested.is_finite() && dt_requested > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "requested time step must be positive, got {}",
                dt_requested
            )));
        }
        let dt = dt_requested.min(self.cfl_timestep()?);
        let t = self.time;

        let mut stage = self.grid.clone();
        self.fill_ghost_zones(&mut stage, t);
        let l0 = self.spatial_operator(&stage, t)?;

        let mut predictor = self.grid.clone();
        apply_rates(&mut predictor, &[(&l0.rates, dt)]);
        self.floor_energy(&mut predictor);
        self.fill_ghost_zones(&mut predictor, t + dt);
        let l1 = self.spatial_operator(&predictor, t + dt)?;

        let mut updated = self.grid.clone();
        apply_rates(&mut updated, &[(&l0.rates, 0.5 * dt), (&l1.rates, 0.5 * dt)]);

        let iterations = self.react(&mut updated, dt)?;
        let floor_added = self.enforce_bounds(&mut updated)?;

        self.grid = updated;
        self.time = t + dt;
        self.dt = dt;
        self.ledger.boundary_inflow += 0.5 * dt * (l0.inflow + l1.inflow);
        self.ledger.source_injection += 0.5 * dt * (l0.injection + l1.injection);
        self.ledger.floor_correction += floor_added;

        debug!(
            "t = {:.6e} dt = {:.4e} (max exchange iterations {})",
            self.time, dt, iterations
        );
        Ok(dt)
    }

    fn fill_ghost_zones(&self, grid: &mut Grid, time: f64) {
        self.closures
            .boundary
            .fill_ghost_zones(grid.ghost_zones_mut(), &self.constants, time)
    }

    /// Absorption coefficient `rho * kappa_R` of the cell at storage index
    /// `k`. Ghost cells without a meaningful gas state count as transparent.
    fn rosseland_absorption(&self, grid: &Grid, k: usize) -> Result<f64, Error> {
        let u = &grid.cells()[k];
        let ng = grid.nghost();
        let interior = k >= ng && k < ng + grid.nx();
        let rho = u.gas_density();
        let tgas = self.closures.eos.gas_temperature(rho, u.internal_energy());
        let kappa = self.closures.opacity.rosseland_opacity(rho, tgas);
        let chi = rho * kappa;

        if rho > 0.0 && chi.is_finite() && chi >= 0.0 {
            Ok(chi)
        } else if interior {
            Err(Error::InvalidClosure {
                quantity: "Rosseland opacity",
                cell: k - ng,
                value: kappa,
            })
        } else {
            Ok(0.0)
        }
    }

    /// Evaluate `L(U)`: the divergence of the interface fluxes plus the
    /// external source, for every interior cell. Ghost cells must have been
    /// filled.
    fn spatial_operator(&self, grid: &Grid, time: f64) -> Result<StageRates, Error> {
        let c_hat = self.constants.c_hat;
        let dx = self.mesh.cell_spacing();
        let ng = grid.nghost();
        let nx = grid.nx();
        let cells = grid.cells();

        let prims: Vec<_> = cells
            .par_iter()
            .map(|u| RadPrimitive::from_conserved(u, c_hat))
            .collect();

        let absorption = (0..cells.len())
            .into_par_iter()
            .map(|k| self.rosseland_absorption(grid, k))
            .collect::<Result<Vec<_>, _>>()?;

        // Face j separates storage cells ng - 1 + j and ng + j.
        let faces: Vec<_> = (0..=nx)
            .into_par_iter()
            .map(|j| {
                let kl = ng - 1 + j;
                let kr = ng + j;
                let (_, pl) = closure::reconstruct(&prims[kl - 1], &prims[kl], &prims[kl + 1]);
                let (pr, _) = closure::reconstruct(&prims[kr - 1], &prims[kr], &prims[kr + 1]);
                let tau = 0.5 * dx * (absorption[kl] + absorption[kr]);
                closure::riemann_hll(&pl, &pr, c_hat, closure::asymptotic_factor(tau))
            })
            .collect();

        let source = (0..nx)
            .into_par_iter()
            .map(|i| {
                let s = self.closures.source.energy_source(&self.mesh, i, time);
                if s.is_finite() {
                    Ok(s)
                } else {
                    Err(Error::InvalidClosure { quantity: "energy source", cell: i, value: s })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rates = (0..nx)
            .into_par_iter()
            .map(|i| {
                let mut rate = [0.0; NUM_RAD_FIELDS];

                for (n, r) in rate.iter_mut().enumerate() {
                    *r = -(faces[i + 1][n] - faces[i][n]) / dx;
                }
                rate[0] += source[i];
                rate
            })
            .collect();

        Ok(StageRates {
            rates,
            inflow: faces[0][0] - faces[nx][0],
            injection: source.iter().sum::<f64>() * dx,
        })
    }

    fn floor_energy(&self, grid: &mut Grid) {
        let floor = self.constants.erad_floor;

        for u in grid.interior_mut() {
            if u.rad_energy() < floor {
                u.set_rad_energy(floor)
            }
        }
    }

    /// Run the energy exchange solve in every interior cell; return the
    /// largest iteration count.
    fn react(&self, grid: &mut Grid, dt: f64) -> Result<usize, Error> {
        let settings = ExchangeSettings {
            dt,
            tolerance: self.parameters.reaction_tolerance,
            max_iterations: self.parameters.max_reaction_iterations,
        };
        let opacity = self.closures.opacity.as_ref();
        let eos = self.closures.eos.as_ref();
        let constants = &self.constants;

        let exchanged = grid
            .interior()
            .par_iter()
            .enumerate()
            .map(|(i, u)| reaction::solve_energy_exchange(u, i, settings, constants, opacity, eos))
            .collect::<Result<Vec<_>, _>>()?;

        let mut most = 0;

        for (u, x) in grid.interior_mut().iter_mut().zip(exchanged) {
            *u = x.state;
            most = most.max(x.iterations);
        }
        Ok(most)
    }

    /// Clamp the radiation energy to its floor and apply the flux limit
    /// policy. Returns the energy (per unit area) added by the floor.
    fn enforce_bounds(&self, grid: &mut Grid) -> Result<f64, Error> {
        let floor = self.constants.erad_floor;
        let c_hat = self.constants.c_hat;
        let dx = self.mesh.cell_spacing();
        let tolerance = self.parameters.flux_tolerance;
        let mut added = 0.0;
        let mut clamped = 0;

        for (i, u) in grid.interior_mut().iter_mut().enumerate() {
            let e = u.rad_energy();

            if !e.is_finite() {
                return Err(Error::InvalidClosure { quantity: "radiation energy", cell: i, value: e });
            }
            if e < floor {
                added += (floor - e) * dx;
                u.set_rad_energy(floor);
            }

            let flux = u.rad_flux_magnitude();
            let bound = c_hat * u.rad_energy();

            if flux > bound * (1.0 + tolerance) {
                match self.parameters.flux_limit {
                    FluxLimitPolicy::Fail => {
                        return Err(Error::CausalityViolation { cell: i, flux, bound });
                    }
                    FluxLimitPolicy::Clamp => {
                        let scale = bound / flux;
                        u.set_rad_flux(u.rad_flux().map(|f| f * scale));
                        clamped += 1;
                    }
                }
            }
        }

        if clamped > 0 {
            warn!(
                "radiation flux exceeded c_hat * Erad in {} cells near t = {:.6e}; clamped",
                clamped, self.time
            );
        }
        if added > 0.0 {
            debug!("energy floor added {:.4e}", added);
        }
        Ok(added)
    }
}

/// Add `scale * rate` to the radiation variables of every interior cell,
/// for each `(rate, scale)` term.
fn apply_rates(grid: &mut Grid, terms: &[(&Vec<[f64; NUM_RAD_FIELDS]>, f64)]) {
    grid.interior_mut()
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, u)| {
            for (n, &field) in RAD_FIELDS.iter().enumerate() {
                u[field] += terms.iter().map(|(rate, scale)| scale * rate[i][n]).sum::<f64>();
            }
        })
}

// ============================================================================
#[cfg(test)]
mod test {

    use super::*;
    use crate::radiation::boundary::{Boundary, BoundaryPair};
    use crate::radiation::eos::{IdealGas, QuarticGas};
    use crate::radiation::opacity::ConstantOpacity;
    use crate::radiation::source::SlabSource;

    fn closed_box(nx: usize, kappa: f64) -> RadSystem {
        let constants = PhysicalConstants::default();
        let closures = Closures::new(
            ConstantOpacity { kappa },
            IdealGas::from_constants(&constants),
            BoundaryPair::reflecting(),
        );
        let mut system = RadSystem::new(Parameters::new(nx, 1.0, 0.4), constants, closures).unwrap();
        system.initialize(|x| {
            let e = 1.0 + (-100.0 * (x - 0.4).powi(2)).exp();
            Conserved::new(e, [0.0; 3], 1.5 * 0.8, 1.0, [0.0; 3])
        });
        system
    }

    fn marshak(nx: usize) -> RadSystem {
        let constants = PhysicalConstants {
            erad_floor: 1e-10,
            ..PhysicalConstants::default()
        };
        let closures = Closures::new(
            ConstantOpacity { kappa: 1.0 },
            QuarticGas { alpha: 4.0 },
            BoundaryPair::new(Boundary::Marshak { temperature: 1.0 }, Boundary::Reflecting),
        );
        let mut system = RadSystem::new(Parameters::new(nx, 4.0, 0.4), constants, closures).unwrap();
        system.initialize(|_| Conserved::new(1e-10, [0.0; 3], 1e-10, 1.0, [0.0; 3]));
        system
    }

    #[test]
    fn time_step_is_limited_by_cfl_condition() {
        let mut system = closed_box(50, 1.0);
        let dt_cfl = 0.4 * (1.0 / 50.0);
        assert!((system.cfl_timestep().unwrap() - dt_cfl).abs() < 1e-15);
        assert_eq!(system.advance(1.0).unwrap(), system.cfl_timestep().unwrap());
        assert_eq!(system.advance(1e-4).unwrap(), 1e-4);
        assert_eq!(system.last_dt(), 1e-4);
        assert!((system.time() - (dt_cfl + 1e-4)).abs() < 1e-15);
    }

    #[test]
    fn non_positive_time_step_is_rejected_without_mutation() {
        let mut system = closed_box(20, 1.0);
        let before = system.grid().clone();
        assert!(matches!(system.advance(0.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(system.advance(-1.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(system.advance(f64::NAN), Err(Error::InvalidArgument(_))));
        assert_eq!(system.grid(), &before);
        assert_eq!(system.time(), 0.0);
    }

    #[test]
    fn closed_box_conserves_total_energy() {
        let mut system = closed_box(64, 5.0);
        let e0 = system.total_energy();

        for _ in 0..500 {
            system.advance(1.0).unwrap();
        }
        let e1 = system.total_energy();
        assert!((e1 - e0).abs() / e0 < 1e-11, "relative energy change {}", (e1 - e0) / e0);
        assert!(system.ledger().boundary_inflow.abs() < 1e-12);
    }

    #[test]
    fn closed_box_relaxes_toward_uniform_equilibrium() {
        let mut system = closed_box(32, 20.0);

        for _ in 0..20000 {
            system.advance(1.0).unwrap();
        }
        let tr: Vec<_> = (0..system.nx()).map(|i| system.radiation_temperature(i)).collect();
        let tg: Vec<_> = (0..system.nx()).map(|i| system.gas_temperature(i)).collect();
        let (lo, hi) = tr.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &t| (lo.min(t), hi.max(t)));
        assert!(hi - lo < 1e-3 * hi);
        assert!(tr.iter().zip(&tg).all(|(a, b)| (a - b).abs() < 1e-3 * a));
    }

    #[test]
    fn long_runs_stay_finite_and_causal() {
        let mut system = marshak(40);

        for _ in 0..10000 {
            system.advance(1.0).unwrap();
            assert!(system.grid().is_finite());

            for i in 0..system.nx() {
                let u = system.cell(i);
                assert!(u.rad_energy() >= system.constants().erad_floor);
                assert!(u.rad_flux_magnitude() <= system.constants().c_hat * u.rad_energy() * (1.0 + 1e-9));
            }
        }
    }

    #[test]
    fn energy_ledger_accounts_for_boundary_and_floor() {
        let mut system = marshak(80);
        let e0 = system.total_energy();

        for _ in 0..400 {
            system.advance(1.0).unwrap();
        }
        let ledger = *system.ledger();
        assert!(ledger.boundary_inflow > 0.0);
        assert!(ledger.floor_correction >= 0.0);
        let de = system.total_energy() - e0;
        assert!((de - ledger.net()).abs() < 1e-10 * ledger.net().abs());
    }

    #[test]
    fn marshak_wave_heats_from_the_boundary() {
        let mut system = marshak(80);

        while system.time() < 2.0 {
            system.advance(1.0).unwrap();
        }
        let t: Vec<_> = (0..system.nx()).map(|i| system.gas_temperature(i)).collect();
        assert!(t[0] > 0.3 && t[0] < 1.0);
        assert!(t[0] > t[20] && t[20] > t[60]);
        assert!(t[79] < 0.05);
    }

    #[test]
    fn source_energy_is_accounted() {
        let constants = PhysicalConstants::default();
        let closures = Closures::new(
            ConstantOpacity { kappa: 1.0 },
            QuarticGas { alpha: 4.0 },
            BoundaryPair::reflecting(),
        )
        .with_source(SlabSource {
            strength: 1.0,
            x_min: 0.0,
            x_max: 0.55,
            cutoff_time: 0.5,
        });
        let mut system = RadSystem::new(Parameters::new(20, 2.0, 0.4), constants, closures).unwrap();
        system.initialize(|_| Conserved::new(1e-6, [0.0; 3], 1e-6, 1.0, [0.0; 3]));
        let e0 = system.total_energy();

        while system.time() < 1.0 {
            system.advance(0.05).unwrap();
        }
        let de = system.total_energy() - e0;
        assert!((system.ledger().source_injection - 0.55 * 0.5).abs() < 0.03);
        assert!((de - system.ledger().net()).abs() < 1e-12);
    }

    #[test]
    fn failed_exchange_leaves_state_untouched() {
        let constants = PhysicalConstants::default();
        let closures = Closures::new(
            ConstantOpacity { kappa: 1e3 },
            QuarticGas { alpha: 4.0 },
            BoundaryPair::reflecting(),
        );
        let parameters = Parameters::new(10, 1.0, 0.4).with_max_reaction_iterations(1);
        let mut system = RadSystem::new(parameters, constants, closures).unwrap();
        system.initialize(|_| Conserved::new(1.0, [0.0; 3], 1e-10, 1.0, [0.0; 3]));
        let before = system.grid().clone();

        assert!(matches!(system.advance(1.0), Err(Error::ReactionNotConverged { .. })));
        assert_eq!(system.grid(), &before);
        assert_eq!(system.time(), 0.0);
        assert_eq!(system.ledger(), &EnergyLedger::default());
    }

    #[test]
    fn invalid_opacity_is_fatal() {
        struct Negative;
        impl Opacity for Negative {
            fn planck_opacity(&self, _rho: f64, _t: f64) -> f64 {
                -1.0
            }
            fn rosseland_opacity(&self, _rho: f64, _t: f64) -> f64 {
                -1.0
            }
        }
        let constants = PhysicalConstants::default();
        let closures = Closures::new(Negative, IdealGas::from_constants(&constants), BoundaryPair::reflecting());
        let mut system = RadSystem::new(Parameters::new(10, 1.0, 0.4), constants, closures).unwrap();
        system.initialize(|_| Conserved::new(1.0, [0.0; 3], 1.0, 1.0, [0.0; 3]));
        assert!(matches!(system.advance(1.0), Err(Error::InvalidClosure { .. })));
        assert_eq!(system.time(), 0.0);
    }

    #[test]
    fn non_finite_gas_temperature_is_fatal() {
        struct Broken;
        impl EquationOfState for Broken {
            fn gas_temperature(&self, _rho: f64, _egas: f64) -> f64 {
                f64::NAN
            }
            fn gas_energy(&self, _rho: f64, tgas: f64) -> f64 {
                tgas
            }
            fn heat_capacity(&self, _rho: f64, _tgas: f64) -> f64 {
                1.0
            }
        }
        let constants = PhysicalConstants::default();
        let closures = Closures::new(ConstantOpacity { kappa: 1.0 }, Broken, BoundaryPair::reflecting());
        let mut system = RadSystem::new(Parameters::new(10, 1.0, 0.4), constants, closures).unwrap();
        system.initialize(|_| Conserved::new(1.0, [0.0; 3], 1.0, 1.0, [0.0; 3]));
        let before = system.grid().clone();

        let result = system.advance(1.0);
        assert!(matches!(result, Err(Error::InvalidClosure { quantity: "gas temperature", .. })));
        assert_eq!(system.grid(), &before);
        assert_eq!(system.time(), 0.0);
        assert_eq!(system.ledger(), &EnergyLedger::default());
    }

    #[test]
    fn cold_quartic_gas_absorbs_radiation() {
        let constants = PhysicalConstants::default();
        let closures = Closures::new(
            ConstantOpacity { kappa: 1.0 },
            QuarticGas { alpha: 4.0 },
            BoundaryPair::reflecting(),
        );
        let parameters = Parameters::new(4, 1.0, 0.4);
        let mut system = RadSystem::new(parameters, constants, closures).unwrap();

        for i in 0..system.nx() {
            system.set_cell(i, Conserved::new(1.0, [0.0; 3], 0.0, 1.0, [0.0; 3]));
        }
        assert_eq!(system.gas_temperature(0), 0.0);

        let e0 = system.total_energy();
        let dt = system.advance(1.0).unwrap();
        assert_eq!(dt, system.parameters().cfl_number * system.mesh().cell_spacing());

        for i in 0..system.nx() {
            assert!(system.gas_temperature(i) > 0.0);
            assert!(system.gas_energy(i) < system.rad_energy(i));
            assert_eq!(system.x1_gas_momentum(i), 0.0);
        }
        assert!((system.total_energy() - e0).abs() < 1e-14);
    }

    #[test]
    fn flux_limit_policy_fail_reports_violation() {
        let constants = PhysicalConstants::default();
        let closures = Closures::new(
            ConstantOpacity { kappa: 0.0 },
            IdealGas::from_constants(&constants),
            BoundaryPair::new(Boundary::Outflow, Boundary::Outflow),
        );
        let parameters = Parameters::new(10, 1.0, 0.4).with_flux_limit(FluxLimitPolicy::Fail);
        let mut system = RadSystem::new(parameters, constants, closures).unwrap();
        system.initialize(|_| Conserved::new(1.0, [2.0, 0.0, 0.0], 1.0, 1.0, [0.0; 3]));
        assert!(matches!(system.advance(1.0), Err(Error::CausalityViolation { .. })));
    }

    #[test]
    fn zero_reduced_light_speed_is_invalid() {
        let constants = PhysicalConstants {
            c_hat: 0.0,
            ..PhysicalConstants::default()
        };
        let closures = Closures::new(
            ConstantOpacity { kappa: 1.0 },
            IdealGas::from_constants(&constants),
            BoundaryPair::reflecting(),
        );
        let result = RadSystem::new(Parameters::new(10, 1.0, 0.4), constants, closures);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }
}
