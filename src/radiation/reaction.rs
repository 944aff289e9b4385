use super::closure::{eddington_factor, RadPrimitive};
use super::conserved::{Conserved, GAS_ENERGY, RAD_ENERGY};
use super::constants::PhysicalConstants;
use super::eos::EquationOfState;
use super::error::Error;
use super::opacity::Opacity;

/// Settings of the per-cell implicit energy exchange solve.
#[derive(Clone, Copy, Debug)]
pub struct ExchangeSettings {
    pub dt: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
}

/// Result of the exchange solve in one cell.
#[derive(Clone, Copy, Debug)]
pub struct Exchange {
    pub state: Conserved,
    pub iterations: usize,
}

fn checked(quantity: &'static str, cell: usize, value: f64) -> Result<f64, Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidClosure { quantity, cell, value })
    }
}

/**
 * Advance the radiation-matter coupling of one cell by `dt`:
 *
 * ```text
 * dEgas/dt = -c_hat rho kappa_P (a T^4 - Erad)
 * dErad/dt = +c_hat rho kappa_P (a T^4 - Erad)
 * dF/dt    = -c_hat rho kappa_R F
 * ```
 *
 * The energy equations are solved backward-Euler with Newton iteration on
 * the gas temperature, using the heat capacity as Jacobian; the sum
 * `Erad + Egas_internal` is held fixed, so the exchange conserves energy
 * exactly. The flux is then relaxed implicitly with the end-of-step
 * temperature. Failure to reduce the energy residual below `tolerance`
 * times the magnitude of its terms within `max_iterations` Newton updates
 * is an error.
 *
 * With `compute_v_over_c_terms`, the radiation energy also receives the
 * work term `-(c_hat/c) rho (kappa_R - 2 kappa_P) v.F` (taken from the gas),
 * and the flux relaxes toward the advected enthalpy `(1 + chi) E v` instead
 * of zero.
 */
pub fn solve_energy_exchange(
    u: &Conserved,
    cell: usize,
    settings: ExchangeSettings,
    constants: &PhysicalConstants,
    opacity: &dyn Opacity,
    eos: &dyn EquationOfState,
) -> Result<Exchange, Error> {
    let ExchangeSettings { dt, tolerance, max_iterations } = settings;
    let rho = u.gas_density();
    let a_rad = constants.radiation_constant;
    let c_hat = constants.c_hat;

    if !(rho.is_finite() && rho > 0.0) {
        return Err(Error::InvalidClosure { quantity: "gas density", cell, value: rho });
    }

    let ekin = u.kinetic_energy();
    let mut eint0 = u.internal_energy();
    let mut erad0 = u.rad_energy();
    let t0 = checked("gas temperature", cell, eos.gas_temperature(rho, eint0))?;

    if constants.compute_v_over_c_terms {
        let kp = checked("Planck opacity", cell, opacity.planck_opacity(rho, t0))?;
        let kr = checked("Rosseland opacity", cell, opacity.rosseland_opacity(rho, t0))?;
        let v = u.gas_velocity();
        let f = u.rad_flux();
        let v_dot_f = v[0] * f[0] + v[1] * f[1] + v[2] * f[2];
        let work = -dt * (c_hat / constants.c_light) * rho * (kr - 2.0 * kp) * v_dot_f;
        erad0 += work;
        eint0 -= work;
    }

    let etot = eint0 + erad0;
    let mut t = t0;
    let mut iterations = 0;

    // A cold start with zero heat capacity would stall Newton at T = 0. The
    // residual is increasing in T, so seed from the radiation temperature of
    // the total energy instead.
    if eos.heat_capacity(rho, t) == 0.0 {
        t = t.max(constants.radiation_temperature(etot.max(0.0)));
    }

    loop {
        let kp = checked("Planck opacity", cell, opacity.planck_opacity(rho, t))?;
        let coupling = dt * c_hat * rho * kp;
        let egas = eos.gas_energy(rho, t);
        let erad = etot - egas;
        let emission = a_rad * t.powi(4);
        let residual = egas - eint0 + coupling * (emission - erad);
        let scale = egas.abs() + eint0.abs() + coupling * (emission + erad.abs());

        if residual.abs() <= tolerance * scale {
            break;
        }
        if iterations == max_iterations {
            return Err(Error::ReactionNotConverged { cell, iterations, residual });
        }

        let cv = checked("heat capacity", cell, eos.heat_capacity(rho, t))?;
        let jacobian = cv + coupling * (4.0 * a_rad * t.powi(3) + cv);
        let t_next = if jacobian > 0.0 { t - residual / jacobian } else { 0.0 };

        t = if t_next > 0.0 { t_next } else { 0.5 * t };
        iterations += 1;
    }

    let egas = checked("gas energy", cell, eos.gas_energy(rho, t))?;
    let erad = etot - egas;

    let kr = checked("Rosseland opacity", cell, opacity.rosseland_opacity(rho, t))?;
    let damping = dt * c_hat * rho * kr;
    let target = if constants.compute_v_over_c_terms {
        let p = RadPrimitive::from_conserved(u, c_hat);
        let chi = eddington_factor(p.flux_factor());
        u.gas_velocity().map(|v| (1.0 + chi) * erad.max(0.0) * v)
    } else {
        [0.0; 3]
    };
    let f = u.rad_flux();
    let relaxed = [0, 1, 2].map(|n| (f[n] + damping * target[n]) / (1.0 + damping));

    let mut state = *u;
    state[RAD_ENERGY] = erad;
    state[GAS_ENERGY] = egas + ekin;
    state.set_rad_flux(relaxed);

    Ok(Exchange { state, iterations })
}
