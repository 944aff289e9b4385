use super::error::Error;
use serde::{Deserialize, Serialize};

/**
 * Physical constants and policy flags of a problem. One instance is chosen
 * at problem setup and owned by the integrator; it is never mutated during a
 * run.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    pub c_light: f64,
    /// Reduced speed of light: the signal speed of the radiation field.
    pub c_hat: f64,
    pub radiation_constant: f64,
    pub mean_molecular_mass: f64,
    pub boltzmann_constant: f64,
    pub gamma: f64,
    pub erad_floor: f64,
    pub compute_v_over_c_terms: bool,
}

impl Default for PhysicalConstants {
    /// Dimensionless units: `c = a_rad = k_B = mu = 1`.
    fn default() -> Self {
        Self {
            c_light: 1.0,
            c_hat: 1.0,
            radiation_constant: 1.0,
            mean_molecular_mass: 1.0,
            boltzmann_constant: 1.0,
            gamma: 5.0 / 3.0,
            erad_floor: 0.0,
            compute_v_over_c_terms: false,
        }
    }
}

impl PhysicalConstants {
    /// Blackbody radiation energy density at temperature `t`.
    pub fn blackbody_energy(&self, t: f64) -> f64 {
        self.radiation_constant * t.powi(4)
    }

    /// Radiation temperature of a radiation energy density.
    pub fn radiation_temperature(&self, erad: f64) -> f64 {
        (erad / self.radiation_constant).powf(0.25)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("c_light", self.c_light),
            ("c_hat", self.c_hat),
            ("radiation_constant", self.radiation_constant),
            ("mean_molecular_mass", self.mean_molecular_mass),
            ("boltzmann_constant", self.boltzmann_constant),
        ];
        for (name, value) in positive.iter() {
            if !(value.is_finite() && *value > 0.0) {
                return Err(Error::InvalidConfiguration(format!("{} must be positive, got {}", name, value)));
            }
        }
        if !(self.gamma > 1.0) {
            return Err(Error::InvalidConfiguration(format!("gamma must exceed 1, got {}", self.gamma)));
        }
        if !(self.erad_floor.is_finite() && self.erad_floor >= 0.0) {
            return Err(Error::InvalidConfiguration(format!("erad_floor must be non-negative, got {}", self.erad_floor)));
        }
        if self.c_hat > self.c_light {
            return Err(Error::InvalidConfiguration("c_hat may not exceed c_light".into()));
        }
        Ok(())
    }
}

/// What the integrator does when a cell's flux exceeds `c_hat * Erad` after
/// a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FluxLimitPolicy {
    /// Rescale the flux onto the causal bound and log a warning.
    Clamp,
    /// Fail the step with `Error::CausalityViolation`.
    Fail,
}

/**
 * Construction parameters of the integrator.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub nx: usize,
    pub domain_length: f64,
    pub cfl_number: f64,
    pub initial_time: f64,
    /// Relative energy residual accepted by the per-cell exchange solve.
    pub reaction_tolerance: f64,
    pub max_reaction_iterations: usize,
    pub flux_limit: FluxLimitPolicy,
    /// Relative excess over `c_hat * Erad` tolerated before the flux limit
    /// policy is applied.
    pub flux_tolerance: f64,
}

impl Parameters {
    pub fn new(nx: usize, domain_length: f64, cfl_number: f64) -> Self {
        Self {
            nx,
            domain_length,
            cfl_number,
            initial_time: 0.0,
            reaction_tolerance: 1e-10,
            max_reaction_iterations: 400,
            flux_limit: FluxLimitPolicy::Clamp,
            flux_tolerance: 1e-10,
        }
    }

    pub fn with_initial_time(self, initial_time: f64) -> Self {
        Self { initial_time, ..self }
    }

    pub fn with_flux_limit(self, flux_limit: FluxLimitPolicy) -> Self {
        Self { flux_limit, ..self }
    }

    pub fn with_max_reaction_iterations(self, max_reaction_iterations: usize) -> Self {
        Self { max_reaction_iterations, ..self }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.nx == 0 {
            return Err(Error::InvalidConfiguration("nx must be positive".into()));
        }
        if !(self.domain_length.is_finite() && self.domain_length > 0.0) {
            return Err(Error::InvalidConfiguration(format!("domain length must be positive, got {}", self.domain_length)));
        }
        if !(self.cfl_number.is_finite() && self.cfl_number > 0.0) {
            return Err(Error::InvalidConfiguration(format!("CFL number must be positive, got {}", self.cfl_number)));
        }
        if !self.initial_time.is_finite() {
            return Err(Error::InvalidConfiguration("initial time must be finite".into()));
        }
        if !(self.reaction_tolerance > 0.0) {
            return Err(Error::InvalidConfiguration("reaction tolerance must be positive".into()));
        }
        if self.max_reaction_iterations == 0 {
            return Err(Error::InvalidConfiguration("reaction iteration budget must be positive".into()));
        }
        if !(self.flux_tolerance >= 0.0) {
            return Err(Error::InvalidConfiguration("flux tolerance must be non-negative".into()));
        }
        Ok(())
    }
}

// ============================================================================
#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn default_constants_are_valid() {
        assert!(PhysicalConstants::default().validate().is_ok());
    }

    #[test]
    fn reduced_light_speed_above_light_speed_is_rejected() {
        let constants = PhysicalConstants { c_hat: 2.0, ..PhysicalConstants::default() };
        assert!(matches!(constants.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn blackbody_conversions_are_inverse() {
        let constants = PhysicalConstants { radiation_constant: 7.5657e-15, ..PhysicalConstants::default() };
        let t = 3.0e6;
        let e = constants.blackbody_energy(t);
        assert!((constants.radiation_temperature(e) - t).abs() / t < 1e-12);
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(Parameters::new(0, 1.0, 0.4).validate().is_err());
        assert!(Parameters::new(10, 1.0, 0.0).validate().is_err());
        assert!(Parameters::new(10, 1.0, 0.4).validate().is_ok());
    }
}
