use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

pub const RAD_ENERGY: usize = 0;
pub const X1_RAD_FLUX: usize = 1;
pub const X2_RAD_FLUX: usize = 2;
pub const X3_RAD_FLUX: usize = 3;
pub const GAS_ENERGY: usize = 4;
pub const GAS_DENSITY: usize = 5;
pub const X1_GAS_MOMENTUM: usize = 6;
pub const X2_GAS_MOMENTUM: usize = 7;
pub const X3_GAS_MOMENTUM: usize = 8;
pub const NUM_FIELDS: usize = 9;

/// Indexes of the radiation variables, which are the only ones evolved by
/// the transport stage.
pub const RAD_FIELDS: [usize; 4] = [RAD_ENERGY, X1_RAD_FLUX, X2_RAD_FLUX, X3_RAD_FLUX];

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]

/**
 * The conserved state of one grid cell: radiation energy density, radiation
 * flux, total gas energy density, gas mass density, and gas momentum.
 * Components are addressed with the named index constants in this module.
 */
pub struct Conserved([f64; NUM_FIELDS]);

// ============================================================================
impl Conserved {
    pub fn new(
        rad_energy: f64,
        rad_flux: [f64; 3],
        gas_energy: f64,
        gas_density: f64,
        gas_momentum: [f64; 3],
    ) -> Self {
        Self([
            rad_energy,
            rad_flux[0],
            rad_flux[1],
            rad_flux[2],
            gas_energy,
            gas_density,
            gas_momentum[0],
            gas_momentum[1],
            gas_momentum[2],
        ])
    }

    pub fn rad_energy(&self) -> f64 {
        self.0[RAD_ENERGY]
    }

    pub fn rad_flux(&self) -> [f64; 3] {
        [self.0[X1_RAD_FLUX], self.0[X2_RAD_FLUX], self.0[X3_RAD_FLUX]]
    }

    pub fn rad_flux_magnitude(&self) -> f64 {
        let [f1, f2, f3] = self.rad_flux();
        (f1 * f1 + f2 * f2 + f3 * f3).sqrt()
    }

    pub fn gas_energy(&self) -> f64 {
        self.0[GAS_ENERGY]
    }

    pub fn gas_density(&self) -> f64 {
        self.0[GAS_DENSITY]
    }

    pub fn gas_momentum(&self) -> [f64; 3] {
        [self.0[X1_GAS_MOMENTUM], self.0[X2_GAS_MOMENTUM], self.0[X3_GAS_MOMENTUM]]
    }

    pub fn gas_velocity(&self) -> [f64; 3] {
        let d = self.gas_density();
        let [p1, p2, p3] = self.gas_momentum();
        [p1 / d, p2 / d, p3 / d]
    }

    pub fn momentum_squared(&self) -> f64 {
        let [p1, p2, p3] = self.gas_momentum();
        p1 * p1 + p2 * p2 + p3 * p3
    }

    pub fn kinetic_energy(&self) -> f64 {
        if self.gas_density() > 0.0 {
            0.5 * self.momentum_squared() / self.gas_density()
        } else {
            0.0
        }
    }

    /// The gas energy density with the bulk kinetic part removed.
    pub fn internal_energy(&self) -> f64 {
        self.gas_energy() - self.kinetic_energy()
    }

    pub fn set_rad_energy(&mut self, e: f64) {
        self.0[RAD_ENERGY] = e
    }

    pub fn set_rad_flux(&mut self, f: [f64; 3]) {
        self.0[X1_RAD_FLUX] = f[0];
        self.0[X2_RAD_FLUX] = f[1];
        self.0[X3_RAD_FLUX] = f[2];
    }

    /// Return a copy of this state mirrored through a plane normal to the x
    /// axis: the normal radiation flux and gas momentum change sign.
    pub fn reflect(&self) -> Self {
        let mut u = *self;
        u.0[X1_RAD_FLUX] = -u.0[X1_RAD_FLUX];
        u.0[X1_GAS_MOMENTUM] = -u.0[X1_GAS_MOMENTUM];
        u
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

// ============================================================================
impl Index<usize> for Conserved {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Conserved {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

// ============================================================================
#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn named_indexes_address_the_right_components() {
        let u = Conserved::new(1.0, [2.0, 3.0, 4.0], 5.0, 6.0, [7.0, 8.0, 9.0]);
        assert_eq!(u[RAD_ENERGY], 1.0);
        assert_eq!(u[X3_RAD_FLUX], 4.0);
        assert_eq!(u[GAS_ENERGY], 5.0);
        assert_eq!(u[GAS_DENSITY], 6.0);
        assert_eq!(u[X2_GAS_MOMENTUM], 8.0);
        assert_eq!(u.rad_flux(), [2.0, 3.0, 4.0]);
    }

    #[test]
    fn internal_energy_excludes_kinetic_part() {
        let u = Conserved::new(0.0, [0.0; 3], 10.0, 2.0, [2.0, 0.0, 0.0]);
        assert_eq!(u.kinetic_energy(), 1.0);
        assert_eq!(u.internal_energy(), 9.0);
        assert_eq!(u.gas_velocity(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn reflection_flips_only_normal_components() {
        let u = Conserved::new(1.0, [2.0, 3.0, 0.0], 5.0, 6.0, [7.0, 8.0, 0.0]);
        let r = u.reflect();
        assert_eq!(r.rad_flux(), [-2.0, 3.0, 0.0]);
        assert_eq!(r.gas_momentum(), [-7.0, 8.0, 0.0]);
        assert_eq!(r.reflect(), u);
    }
}
