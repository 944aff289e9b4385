use super::constants::PhysicalConstants;

/// Conversion between gas internal energy density and gas temperature.
/// `gas_temperature` and `gas_energy` must be inverses of each other at fixed
/// density, and `heat_capacity` must be the temperature derivative of
/// `gas_energy`; the exchange solve uses it as its Jacobian.
///
pub trait EquationOfState: Send + Sync {
    fn gas_temperature(&self, rho: f64, egas: f64) -> f64;

    fn gas_energy(&self, rho: f64, tgas: f64) -> f64;

    fn heat_capacity(&self, rho: f64, tgas: f64) -> f64;
}

/// Gamma-law gas with constant specific heat
/// `c_v = k_B / (mu (gamma - 1))`.
#[derive(Clone, Debug)]
pub struct IdealGas {
    specific_heat: f64,
}

impl IdealGas {
    pub fn new(boltzmann_constant: f64, mean_molecular_mass: f64, gamma: f64) -> Self {
        Self {
            specific_heat: boltzmann_constant / (mean_molecular_mass * (gamma - 1.0)),
        }
    }

    pub fn from_constants(constants: &PhysicalConstants) -> Self {
        Self::new(constants.boltzmann_constant, constants.mean_molecular_mass, constants.gamma)
    }
}

impl EquationOfState for IdealGas {
    fn gas_temperature(&self, rho: f64, egas: f64) -> f64 {
        egas / (rho * self.specific_heat)
    }

    fn gas_energy(&self, rho: f64, tgas: f64) -> f64 {
        rho * self.specific_heat * tgas
    }

    fn heat_capacity(&self, rho: f64, _tgas: f64) -> f64 {
        rho * self.specific_heat
    }
}

/// Material with `dE/dT = alpha T^3`, independent of density. It is not a
/// physical gas; it makes the Su & Olson problems linear in `T^4` so they
/// have closed-form solutions.
#[derive(Clone, Debug)]
pub struct QuarticGas {
    pub alpha: f64,
}

impl EquationOfState for QuarticGas {
    fn gas_temperature(&self, _rho: f64, egas: f64) -> f64 {
        (4.0 * egas / self.alpha).powf(0.25)
    }

    fn gas_energy(&self, _rho: f64, tgas: f64) -> f64 {
        0.25 * self.alpha * tgas.powi(4)
    }

    fn heat_capacity(&self, _rho: f64, tgas: f64) -> f64 {
        self.alpha * tgas.powi(3)
    }
}
