//! Classical Marshak wave: a cold slab heated through its left face by an
//! incident blackbody flux at `T_HOHLRAUM`, with a reflecting right wall and
//! gas heat capacity `alpha T^3`. The reference solution is the tabulated
//! transport solution of Su & Olson at optical depth `tau = 10`, which is
//! not distributed with this crate and must be supplied as a file.

use super::{Norm, RunSettings, Validation};
use crate::radiation::{
    Boundary, BoundaryPair, Closures, ConstantOpacity, Conserved, EquationOfState, Error, Parameters,
    PhysicalConstants, QuarticGas, RadSystem,
};
use crate::reference::{interpolate_arrays, relative_l2_error, ReferenceTable};

pub const NX: usize = 1500;
pub const LENGTH: f64 = 100.0;
pub const KAPPA: f64 = 1.0;
pub const DENSITY: f64 = 1.0;
pub const T_HOHLRAUM: f64 = 1.0;
pub const MAX_TAU: f64 = 10.0;
pub const TOLERANCE: f64 = 0.003;

/// Columns of the reference table holding position, radiation temperature
/// and material temperature.
pub const POSITION_COLUMN: usize = 1;
pub const TRAD_COLUMN: usize = 4;
pub const TMAT_COLUMN: usize = 5;

fn gas() -> QuarticGas {
    QuarticGas {
        alpha: 4.0 * PhysicalConstants::default().radiation_constant,
    }
}

pub fn setup(nx: usize, cfl: f64) -> Result<RadSystem, Error> {
    setup_with_length(nx, LENGTH, cfl)
}

pub fn setup_with_length(nx: usize, length: f64, cfl: f64) -> Result<RadSystem, Error> {
    let defaults = PhysicalConstants::default();
    let erad = 1e-10 * defaults.blackbody_energy(T_HOHLRAUM);
    let eos = gas();
    let egas = 1e-10 * eos.gas_energy(DENSITY, T_HOHLRAUM);
    let constants = PhysicalConstants {
        erad_floor: erad,
        ..defaults
    };
    let boundary = BoundaryPair::new(
        Boundary::Marshak {
            temperature: T_HOHLRAUM,
        },
        Boundary::Reflecting,
    );
    let closures = Closures::new(ConstantOpacity { kappa: KAPPA }, eos, boundary);
    let mut system = RadSystem::new(Parameters::new(nx, length, cfl), constants, closures)?;
    system.initialize(|_| Conserved::new(erad, [0.0; 3], egas, DENSITY, [0.0; 3]));
    Ok(system)
}

/// Run to optical depth `MAX_TAU`, i.e. `t = tau / (c rho kappa)`.
pub fn run_settings() -> RunSettings {
    let chi = DENSITY * KAPPA * PhysicalConstants::default().c_light;
    RunSettings {
        initial_dt: 1e-9 / chi,
        max_dt: 1e-2 / chi,
        stop_time: MAX_TAU / chi,
        max_steps: 200000,
    }
}

/// Temperature profiles in the coordinates of the reference tabulation:
/// positions are multiplied by `sqrt 3` and energy densities divided by it.
pub struct ScaledProfile {
    pub x: Vec<f64>,
    pub rad_temperature: Vec<f64>,
    pub gas_temperature: Vec<f64>,
}

pub fn scaled_profile(system: &RadSystem) -> ScaledProfile {
    let s3 = 3f64.sqrt();
    let eos = gas();
    let n = system.nx();

    ScaledProfile {
        x: system.mesh().cell_centers().into_iter().map(|x| s3 * x).collect(),
        rad_temperature: (0..n)
            .map(|i| system.constants().radiation_temperature(system.rad_energy(i) / s3))
            .collect(),
        gas_temperature: (0..n)
            .map(|i| eos.gas_temperature(DENSITY, system.cell(i).internal_energy() / s3))
            .collect(),
    }
}

fn compare(
    quantity: &'static str,
    profile_x: &[f64],
    profile_t: &[f64],
    table: &ReferenceTable,
    column: usize,
) -> Result<Validation, Error> {
    let s3 = 3f64.sqrt();
    let x_exact: Vec<_> = table.column(POSITION_COLUMN)?.into_iter().map(|x| s3 * x).collect();
    let t_exact = table.column(column)?;
    let t = interpolate_arrays(&x_exact, profile_x, profile_t)?;

    Ok(Validation {
        quantity,
        norm: Norm::RelativeL2Squared,
        error: relative_l2_error(&t, &t_exact)?,
        tolerance: TOLERANCE,
    })
}

/// Compare the radiation temperature with the reference table, whose
/// positions are also scaled by `sqrt 3`.
pub fn validate(system: &RadSystem, table: &ReferenceTable) -> Result<Validation, Error> {
    let profile = scaled_profile(system);
    compare("radiation temperature", &profile.x, &profile.rad_temperature, table, TRAD_COLUMN)
}

/// The same comparison for the material temperature. Reported only; the
/// benchmark is judged on the radiation temperature.
pub fn validate_material(system: &RadSystem, table: &ReferenceTable) -> Result<Validation, Error> {
    let profile = scaled_profile(system);
    compare("material temperature", &profile.x, &profile.gas_temperature, table, TMAT_COLUMN)
}
