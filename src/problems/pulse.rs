//! Gaussian radiation pulse diffusing through an optically thick medium. The
//! pulse starts at `t = 0.01` in equilibrium with the gas and is compared at
//! `t = 0.03` with the analytic solution of the diffusion equation.

use super::{Norm, Profile, RunSettings, Validation};
use crate::radiation::{
    Boundary, BoundaryPair, Closures, ConstantOpacity, Conserved, EquationOfState, Error, IdealGas, Parameters,
    PhysicalConstants, RadSystem,
};
use crate::reference::relative_l1_error;
use std::f64::consts::PI;

pub const NX: usize = 100;
pub const LENGTH: f64 = 1.0;
pub const KAPPA: f64 = 200.0;
pub const DENSITY: f64 = 1.0;
pub const T_FLOOR: f64 = 1e-5;
pub const SIGMA: f64 = 0.025;
pub const INITIAL_TIME: f64 = 0.01;
pub const STOP_TIME: f64 = 0.03;
pub const TOLERANCE: f64 = 0.05;

/// Solution of `dE/dt = D d^2E/dx^2` for a pulse centered at `x = 0`, with
/// `D = c / (3 kappa)`.
pub fn exact_solution(x: f64, t: f64) -> f64 {
    let diffusivity = PhysicalConstants::default().c_light / (3.0 * KAPPA);
    let width_sq = SIGMA * SIGMA + diffusivity * t;
    let normfac = 1.0 / (2.0 * (PI * width_sq).sqrt());
    normfac * (-(x * x) / (4.0 * width_sq)).exp()
}

pub fn setup(nx: usize, cfl: f64) -> Result<RadSystem, Error> {
    let defaults = PhysicalConstants::default();
    let constants = PhysicalConstants {
        erad_floor: defaults.blackbody_energy(T_FLOOR),
        ..defaults
    };
    let eos = IdealGas::from_constants(&constants);
    let floor = Conserved::new(
        constants.blackbody_energy(T_FLOOR),
        [0.0; 3],
        eos.gas_energy(DENSITY, T_FLOOR),
        DENSITY,
        [0.0; 3],
    );
    let boundary = BoundaryPair::new(Boundary::Fixed(floor), Boundary::Fixed(floor));
    let closures = Closures::new(ConstantOpacity { kappa: KAPPA }, eos.clone(), boundary);
    let parameters = Parameters::new(nx, LENGTH, cfl).with_initial_time(INITIAL_TIME);
    let a_rad = constants.radiation_constant;
    let mut system = RadSystem::new(parameters, constants, closures)?;

    system.initialize(|x| {
        let erad = exact_solution(x - 0.5 * LENGTH, INITIAL_TIME);
        let t_eq = (erad / a_rad).powf(0.25);
        Conserved::new(erad, [0.0; 3], eos.gas_energy(DENSITY, t_eq), DENSITY, [0.0; 3])
    });
    Ok(system)
}

pub fn run_settings() -> RunSettings {
    RunSettings {
        initial_dt: 1e-6,
        max_dt: 1e-5,
        stop_time: STOP_TIME,
        max_steps: 20000,
    }
}

/// The analytic radiation energy at the cell centers, at the system's
/// current time.
pub fn exact_profile(system: &RadSystem) -> Vec<f64> {
    system
        .mesh()
        .cell_centers()
        .into_iter()
        .map(|x| exact_solution(x - 0.5 * LENGTH, system.time()))
        .collect()
}

pub fn validate(system: &RadSystem) -> Result<Validation, Error> {
    let profile = Profile::from_system(system);

    Ok(Validation {
        quantity: "radiation energy",
        norm: Norm::RelativeL1,
        error: relative_l1_error(&profile.rad_energy, &exact_profile(system))?,
        tolerance: TOLERANCE,
    })
}
