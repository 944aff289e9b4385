//! Two-moment (M1) radiation transport coupled to the gas energy through
//! absorption and emission. The integrator is `system::RadSystem`; the
//! problem-specific behavior it calls out to is supplied through the
//! `Opacity`, `EquationOfState`, `BoundaryCondition` and `EnergySource`
//! traits.

pub mod boundary;
pub mod closure;
pub mod conserved;
pub mod constants;
pub mod eos;
pub mod error;
pub mod grid;
pub mod opacity;
pub mod reaction;
pub mod source;
pub mod system;

pub use boundary::{Boundary, BoundaryCondition, BoundaryPair};
pub use conserved::Conserved;
pub use constants::{FluxLimitPolicy, Parameters, PhysicalConstants};
pub use eos::{EquationOfState, IdealGas, QuarticGas};
pub use error::Error;
pub use grid::{GhostZones, Grid};
pub use opacity::{ConstantOpacity, Opacity, PowerLawOpacity, SpecificOpacity};
pub use source::{EnergySource, NoSource, SlabSource};
pub use system::{Closures, EnergyLedger, RadSystem};
