/// Planck- and Rosseland-mean opacities (per unit mass) as functions of gas
/// density and temperature. Both must be non-negative for `rho > 0`.
///
pub trait Opacity: Send + Sync {
    fn planck_opacity(&self, rho: f64, tgas: f64) -> f64;

    fn rosseland_opacity(&self, rho: f64, tgas: f64) -> f64;
}

/// Opacity independent of density and temperature.
#[derive(Clone, Debug)]
pub struct ConstantOpacity {
    pub kappa: f64,
}

impl Opacity for ConstantOpacity {
    fn planck_opacity(&self, _rho: f64, _tgas: f64) -> f64 {
        self.kappa
    }

    fn rosseland_opacity(&self, _rho: f64, _tgas: f64) -> f64 {
        self.kappa
    }
}

/// Opacity `kappa / rho`, so the absorption coefficient `rho * kappa_P` is
/// the constant `kappa`.
#[derive(Clone, Debug)]
pub struct SpecificOpacity {
    pub kappa: f64,
}

impl Opacity for SpecificOpacity {
    fn planck_opacity(&self, rho: f64, _tgas: f64) -> f64 {
        self.kappa / rho
    }

    fn rosseland_opacity(&self, rho: f64, _tgas: f64) -> f64 {
        self.kappa / rho
    }
}

/// Power law `kappa0 * (rho / rho0)^m * (T / T0)^n`, the same law used for
/// both means.
#[derive(Clone, Debug)]
pub struct PowerLawOpacity {
    pub kappa0: f64,
    pub rho0: f64,
    pub t0: f64,
    pub density_exponent: f64,
    pub temperature_exponent: f64,
}

impl PowerLawOpacity {
    fn evaluate(&self, rho: f64, tgas: f64) -> f64 {
        self.kappa0 * (rho / self.rho0).powf(self.density_exponent) * (tgas / self.t0).powf(self.temperature_exponent)
    }
}

impl Opacity for PowerLawOpacity {
    fn planck_opacity(&self, rho: f64, tgas: f64) -> f64 {
        self.evaluate(rho, tgas)
    }

    fn rosseland_opacity(&self, rho: f64, tgas: f64) -> f64 {
        self.evaluate(rho, tgas)
    }
}
