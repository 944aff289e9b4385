//! Radmoment is a 1D solver for two-moment (M1 closure) radiation transport
//! coupled to the internal energy of a static gas through absorption and
//! emission. The transport stage is an explicit, second-order finite-volume
//! update limited by the reduced speed of light; the radiation-matter energy
//! exchange is solved implicitly in each cell. The `problems` module sets up
//! the classical diffusion and transport benchmarks (Su & Olson, Marshak
//! wave, Gaussian pulse) and validates them against tabulated or analytic
//! solutions.

pub mod mesh;
pub mod problems;
pub mod radiation;
pub mod reference;
