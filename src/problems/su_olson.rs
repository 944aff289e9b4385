//! Su & Olson non-equilibrium diffusion benchmark: a slab source of width
//! `x0` switched on in a cold medium whose heat capacity is `alpha T^3`,
//! with reflecting walls. At `t = 10` the gas temperature is compared with
//! the tabulated transport solution.

use super::{Norm, Profile, RunSettings, Validation};
use crate::radiation::{
    BoundaryPair, Closures, Conserved, EquationOfState, Error, Parameters, PhysicalConstants, QuarticGas, RadSystem,
    SlabSource, SpecificOpacity,
};
use crate::reference::{interpolate_arrays, relative_l1_error};

pub const NX: usize = 400;
pub const LENGTH: f64 = 20.0;
pub const KAPPA: f64 = 1.0;
pub const DENSITY: f64 = 1.0;
pub const T_HOHLRAUM: f64 = 1.0;
pub const SLAB_WIDTH: f64 = 0.5;
pub const SOURCE_CUTOFF: f64 = 10.0;
pub const STOP_TIME: f64 = 10.0;
pub const TOLERANCE: f64 = 0.03;

/// Positions of the tabulated solution.
pub const REFERENCE_X: [f64; 13] = [
    0.01, 0.1, 0.17783, 0.31623, 0.45, 0.5, 0.56234, 0.75, 1.0, 1.33352, 1.77828, 3.16228, 5.62341,
];

/// Gas energy density of the transport solution at `t = 10`.
pub const REFERENCE_EGAS: [f64; 13] = [
    2.11186, 2.09585, 2.06052, 1.94365, 1.74291, 1.61536, 1.46027, 1.16591, 0.88992, 0.62521, 0.38688, 0.07642,
    0.00253,
];

pub fn constants() -> PhysicalConstants {
    let constants = PhysicalConstants::default();
    PhysicalConstants {
        erad_floor: 1e-10 * constants.blackbody_energy(T_HOHLRAUM),
        ..constants
    }
}

fn gas() -> QuarticGas {
    QuarticGas {
        alpha: 4.0 * PhysicalConstants::default().radiation_constant,
    }
}

pub fn setup(nx: usize, cfl: f64) -> Result<RadSystem, Error> {
    let constants = constants();
    let eos = gas();
    let strength = constants.blackbody_energy(T_HOHLRAUM) / (2.0 * SLAB_WIDTH);
    let erad = 1e-10 * constants.blackbody_energy(T_HOHLRAUM);
    let egas = 1e-10 * eos.alpha / 4.0 * T_HOHLRAUM.powi(4);

    let closures = Closures::new(SpecificOpacity { kappa: KAPPA }, eos, BoundaryPair::reflecting()).with_source(
        SlabSource {
            strength,
            x_min: 0.0,
            x_max: SLAB_WIDTH,
            cutoff_time: SOURCE_CUTOFF,
        },
    );
    let mut system = RadSystem::new(Parameters::new(nx, LENGTH, cfl), constants, closures)?;
    system.initialize(|_| Conserved::new(erad, [0.0; 3], egas, DENSITY, [0.0; 3]));
    Ok(system)
}

pub fn run_settings() -> RunSettings {
    RunSettings {
        initial_dt: 1e-9,
        max_dt: 1e-2,
        stop_time: STOP_TIME,
        max_steps: 12000,
    }
}

/// Gas temperature of the reference solution at `REFERENCE_X`.
pub fn reference_gas_temperature() -> Vec<f64> {
    let eos = gas();
    REFERENCE_EGAS.iter().map(|&e| eos.gas_temperature(DENSITY, e)).collect()
}

pub fn validate(system: &RadSystem) -> Result<Validation, Error> {
    let profile = Profile::from_system(system);
    let tgas = interpolate_arrays(&REFERENCE_X, &profile.x, &profile.gas_temperature)?;

    Ok(Validation {
        quantity: "gas temperature",
        norm: Norm::RelativeL1,
        error: relative_l1_error(&tgas, &reference_gas_temperature())?,
        tolerance: TOLERANCE,
    })
}
