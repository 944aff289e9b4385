//! Benchmark problems: problem setup, driver loop settings, and validation
//! against reference solutions.

pub mod marshak;
pub mod pulse;
pub mod su_olson;

use crate::radiation::{Error, RadSystem};
use crate::reference::ReferenceTable;
use log::info;
use std::fmt;

/// Step-size bounds and stopping criteria of a driver loop.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSettings {
    /// Bound on the first step.
    pub initial_dt: f64,
    /// Bound on every later step.
    pub max_dt: f64,
    pub stop_time: f64,
    pub max_steps: usize,
}

/**
 * Advance `system` until its time reaches `settings.stop_time` or the step
 * budget is used up. The last step is shortened to land on the stop time.
 * Returns the number of steps taken.
 */
pub fn run(system: &mut RadSystem, settings: &RunSettings) -> Result<usize, Error> {
    let mut steps = 0;

    while steps < settings.max_steps && system.time() < settings.stop_time {
        let dt_max = if steps == 0 { settings.initial_dt } else { settings.max_dt };
        system.advance(dt_max.min(settings.stop_time - system.time()))?;
        steps += 1;

        if steps % 1000 == 0 {
            info!("[{}] t={:.6e} dt={:.4e}", steps, system.time(), system.last_dt());
        }
    }
    info!(
        "finished after {} steps at t = {:.6e}: Erad = {:.8e} Egas = {:.8e} (ledger {:.4e})",
        steps,
        system.time(),
        system.total_radiation_energy(),
        system.total_gas_energy(),
        system.ledger().net()
    );
    Ok(steps)
}

/// Cell-centered profiles of the state, as plotted or compared against a
/// reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub x: Vec<f64>,
    pub rad_energy: Vec<f64>,
    pub rad_flux: Vec<f64>,
    pub gas_temperature: Vec<f64>,
    pub rad_temperature: Vec<f64>,
}

impl Profile {
    pub fn from_system(system: &RadSystem) -> Self {
        let n = system.nx();
        Self {
            x: system.mesh().cell_centers(),
            rad_energy: (0..n).map(|i| system.rad_energy(i)).collect(),
            rad_flux: (0..n).map(|i| system.x1_rad_flux(i)).collect(),
            gas_temperature: (0..n).map(|i| system.gas_temperature(i)).collect(),
            rad_temperature: (0..n).map(|i| system.radiation_temperature(i)).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Norm {
    /// `sum |a - b| / sum |b|`
    RelativeL1,
    /// `sum (a - b)^2 / sum b^2`
    RelativeL2Squared,
}

/// Outcome of comparing a computed profile against a reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Validation {
    pub quantity: &'static str,
    pub norm: Norm,
    pub error: f64,
    pub tolerance: f64,
}

impl Validation {
    pub fn passed(&self) -> bool {
        self.error <= self.tolerance
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let norm = match self.norm {
            Norm::RelativeL1 => "relative L1",
            Norm::RelativeL2Squared => "relative L2",
        };
        write!(
            f,
            "{} {} error = {:.6e} (tolerance {:e}): {}",
            self.quantity,
            norm,
            self.error,
            self.tolerance,
            if self.passed() { "pass" } else { "FAIL" }
        )
    }
}

/// The benchmark problems this crate knows how to set up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    SuOlson,
    Marshak,
    Pulse,
}

impl Scenario {
    pub fn name(self) -> &'static str {
        match self {
            Scenario::SuOlson => "su-olson",
            Scenario::Marshak => "marshak",
            Scenario::Pulse => "pulse",
        }
    }

    pub fn default_nx(self) -> usize {
        match self {
            Scenario::SuOlson => su_olson::NX,
            Scenario::Marshak => marshak::NX,
            Scenario::Pulse => pulse::NX,
        }
    }

    pub fn setup(self, nx: usize, cfl: f64) -> Result<RadSystem, Error> {
        match self {
            Scenario::SuOlson => su_olson::setup(nx, cfl),
            Scenario::Marshak => marshak::setup(nx, cfl),
            Scenario::Pulse => pulse::setup(nx, cfl),
        }
    }

    pub fn run_settings(self) -> RunSettings {
        match self {
            Scenario::SuOlson => su_olson::run_settings(),
            Scenario::Marshak => marshak::run_settings(),
            Scenario::Pulse => pulse::run_settings(),
        }
    }

    /// Compare the final state against this problem's reference solution.
    /// The Marshak wave is only validated when a tabulated reference is
    /// supplied; the others carry their own.
    pub fn validate(self, system: &RadSystem, reference: Option<&ReferenceTable>) -> Result<Option<Validation>, Error> {
        match (self, reference) {
            (Scenario::SuOlson, _) => su_olson::validate(system).map(Some),
            (Scenario::Pulse, _) => pulse::validate(system).map(Some),
            (Scenario::Marshak, Some(table)) => marshak::validate(system, table).map(Some),
            (Scenario::Marshak, None) => Ok(None),
        }
    }
}

// ============================================================================
#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn run_lands_on_stop_time() {
        let mut system = pulse::setup(40, 0.4).unwrap();
        let settings = RunSettings {
            initial_dt: 1e-6,
            max_dt: 3e-4,
            stop_time: system.time() + 1e-3,
            max_steps: 100,
        };
        let steps = run(&mut system, &settings).unwrap();
        assert!((system.time() - settings.stop_time).abs() < 1e-15);
        assert_eq!(steps, 5);
    }

    #[test]
    fn run_respects_step_budget() {
        let mut system = pulse::setup(40, 0.4).unwrap();
        let settings = RunSettings {
            initial_dt: 1e-6,
            max_dt: 1e-5,
            stop_time: 1.0,
            max_steps: 3,
        };
        assert_eq!(run(&mut system, &settings).unwrap(), 3);
        assert!(system.time() < 1.0);
    }

    #[test]
    fn validation_passes_within_tolerance() {
        let v = Validation {
            quantity: "Tgas",
            norm: Norm::RelativeL1,
            error: 0.01,
            tolerance: 0.03,
        };
        assert!(v.passed());
        assert!(v.to_string().ends_with("pass"));
        assert!(!Validation { error: 0.05, ..v }.passed());
    }

    #[test]
    fn marshak_without_reference_is_not_validated() {
        let system = marshak::setup(20, 0.4).unwrap();
        assert_eq!(Scenario::Marshak.validate(&system, None).unwrap(), None);
    }
}
